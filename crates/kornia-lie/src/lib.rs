#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia Lie Groups
//!
//! This crate provides the batched matrix Lie group primitives that manifold code builds on.
//! Every operation acts on k independent copies at once, stored as slices of `glam` double
//! precision matrices.
//!
//! ## Supported Groups
//!
//! - **SO(3)**: 3D rotations as 3×3 matrices, with closed-form exponential and logarithm
//! - **GL(4)**: invertible 4×4 matrices with the generic affine group formulas
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use kornia_lie::so3;
//!
//! // quarter turn about the z axis
//! let omega = so3::hat(DVec3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2));
//! let rotations = so3::expm(&[omega]);
//!
//! let x = rotations[0] * DVec3::X;
//! assert!((x - DVec3::Y).length() < 1e-12);
//! assert!(so3::logm(&rotations)[0].abs_diff_eq(omega, 1e-12));
//! ```

/// General linear group GL(4) for invertible 4×4 matrices.
pub mod gl4;

/// Special Orthogonal group SO(3) for 3D rotations.
pub mod so3;
