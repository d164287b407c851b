//! Closed-form matrix exponential and logarithm of SE(3), batched over k copies.
//!
//! Reference: Blanco, J. L. (2010). A tutorial on SE(3) transformation parameterizations
//! and on-manifold optimization. University of Malaga, Tech. Rep 3.
//!
//! The rotation block is handled by [`kornia_lie::so3`]. The translation block goes through
//! the left Jacobian of SO(3) (the "V matrix")
//!
//! ```text
//! V    = I + (1 - cos θ)/θ² Ω + (θ - sin θ)/θ³ Ω²
//! V⁻¹  = I - ½ Ω + (1 - (θ/2) cot(θ/2))/θ² Ω²
//! ```
//!
//! with `θ² = ½ ‖Ω‖²`. For `θ < 1e-6` each coefficient is replaced by its Taylor series;
//! both are evaluated for every slot and combined with [`select`].

use glam::{DMat3, DMat4};
use kornia_lie::so3::{self, select, SMALL_ANGLE_THRESHOLD};

use crate::batch;

/// Matrix exponential se(3)^k -> SE(3)^k.
///
/// The rotation blocks of `x` must be skew-symmetric. This is not checked: other inputs give
/// a meaningless, but finite, result. The bottom row of the output is `(0, 0, 0, 1)`.
pub fn expm(x: &[DMat4]) -> Vec<DMat4> {
    let omegas = batch::rotations(x);
    let rotations = so3::expm(&omegas);

    x.iter()
        .zip(omegas.iter().zip(rotations.iter()))
        .map(|(x, (omega, r))| {
            batch::from_blocks(*r, left_jacobian(omega) * batch::translation(x), 1.0)
        })
        .collect()
}

/// Matrix logarithm SE(3)^k -> se(3)^k.
///
/// The rotation blocks of `p` must be orthogonal with determinant +1. This is not checked.
/// Rotation angles are recovered in `[0, π]`. The bottom row of the output is zero.
pub fn logm(p: &[DMat4]) -> Vec<DMat4> {
    let omegas = so3::logm(&batch::rotations(p));

    p.iter()
        .zip(omegas.iter())
        .map(|(p, w)| batch::from_blocks(*w, left_jacobian_inv(w) * batch::translation(p), 0.0))
        .collect()
}

// squared rotation angle and the regularized angle of a skew generator
#[inline]
fn angle(omega: &DMat3) -> (f64, f64) {
    let theta_sq = 0.5 * so3::frobenius_sq(omega);
    (theta_sq, (theta_sq + f64::EPSILON).sqrt())
}

fn left_jacobian(omega: &DMat3) -> DMat3 {
    let (theta_sq, theta) = angle(omega);
    let small = theta < SMALL_ANGLE_THRESHOLD;

    let a = select(small, series_a(theta_sq), closed_a(theta_sq, theta));
    let b = select(small, series_b(theta_sq), closed_b(theta_sq, theta));

    DMat3::IDENTITY + *omega * a + (*omega * *omega) * b
}

fn left_jacobian_inv(w: &DMat3) -> DMat3 {
    let (theta_sq, theta) = angle(w);
    let small = theta < SMALL_ANGLE_THRESHOLD;

    let c = select(small, series_c(theta_sq), closed_c(theta_sq, theta));

    DMat3::IDENTITY - *w * 0.5 + (*w * *w) * c
}

// (1 - cos θ) / θ²
fn series_a(theta_sq: f64) -> f64 {
    0.5 - theta_sq / 24.0 + theta_sq * theta_sq / 720.0
}

fn closed_a(theta_sq: f64, theta: f64) -> f64 {
    (1.0 - theta.cos()) / theta_sq
}

// (θ - sin θ) / θ³
fn series_b(theta_sq: f64) -> f64 {
    1.0 / 6.0 - theta_sq / 120.0 + theta_sq * theta_sq / 5040.0
}

fn closed_b(theta_sq: f64, theta: f64) -> f64 {
    (theta - theta.sin()) / (theta_sq * theta)
}

// (1 - (θ/2) cot(θ/2)) / θ²
fn series_c(theta_sq: f64) -> f64 {
    1.0 / 12.0 + theta_sq / 720.0 + theta_sq * theta_sq / 30240.0
}

fn closed_c(theta_sq: f64, theta: f64) -> f64 {
    let half = 0.5 * theta;
    (1.0 - half.cos() / sinc(half)) / theta_sq
}

// sin(x) / x with the removable singularity at 0 filled in
#[inline]
fn sinc(x: f64) -> f64 {
    select(x == 0.0, 1.0, x.sin() / x)
}
