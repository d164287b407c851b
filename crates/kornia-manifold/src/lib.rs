#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia Manifold
//!
//! Differential-geometric primitives of the rigid motion group SE(3), batched over k
//! independent copies, for manifold statistics and optimization (means, geodesic
//! regression, principal geodesic analysis).
//!
//! - [`SE3`]: the manifold SE(3)^k, sampling and the zero tangent vector.
//! - [`AffineGroupStructure`]: group operations and the canonical Cartan-Shouten
//!   connection, installed on every [`SE3`].
//! - [`expm`] / [`logm`]: closed-form exponential and logarithm of se(3)^k.
//! - [`exponential_barycenter`]: group mean of a data set.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use kornia_manifold::{batch, expm, logm};
//!
//! // twist: one radian about z while moving along x
//! let twist = batch::from_blocks(kornia_lie::so3::hat(DVec3::Z), DVec3::X, 0.0);
//! let motion = expm(&[twist]);
//!
//! assert!(logm(&motion)[0].abs_diff_eq(twist, 1e-12));
//! ```

/// Block accessors and slotwise arithmetic on batches of homogeneous matrices.
pub mod batch;

/// Error types.
pub mod error;

/// Manifold, Lie group and connection interfaces.
pub mod manifold;

/// Group mean of data on a connection.
pub mod mean;

/// Special Euclidean group SE(3)^k.
pub mod se3;

pub use error::ManifoldError;
pub use manifold::{Connection, Footpoint, LieGroup, Manifold};
pub use mean::{exponential_barycenter, BarycenterParams};
pub use se3::{expm, logm, AffineGroupStructure, Structure, SE3};
