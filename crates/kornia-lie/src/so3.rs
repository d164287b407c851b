//! # SO(3) on rotation matrices, batched over k copies
//!
//! SO(3)^k is represented as a slice of k `DMat3` rotation matrices. Its Lie algebra
//! so(3)^k is represented as a slice of k skew-symmetric `DMat3` generators.
//!
//! - [`expm`]: Rodrigues' formula `R = I + sin(θ)/θ Ω + (1 - cos θ)/θ² Ω²`.
//! - [`logm`]: inverse of [`expm`] for angles in `[0, π]`.
//!
//! The rotation angle of a generator is read from its Frobenius norm, `θ² = ½ ‖Ω‖²`.
//! For θ below [`SMALL_ANGLE_THRESHOLD`] the trigonometric ratios are replaced by their
//! Taylor expansions. Both branches are always evaluated and combined with [`select`],
//! so every slot goes through the same arithmetic.

use glam::{DMat3, DQuat, DVec3};
use rand::Rng;
use rand_distr::StandardNormal;

/// Rotation angle (radians) below which the Taylor expansions are used.
pub const SMALL_ANGLE_THRESHOLD: f64 = 1.0e-6;

// distance to π below which the log reads the axis from the symmetric part
const NEAR_PI_THRESHOLD: f64 = 1.0e-4;

/// Value-level select between two eagerly evaluated branches.
///
/// Unlike an `if` guarding the computation, both arguments are already computed when this
/// is called, so a non-finite value in the discarded branch never leaks into the result.
#[inline]
pub fn select(cond: bool, if_true: f64, if_false: f64) -> f64 {
    if cond {
        if_true
    } else {
        if_false
    }
}

/// Vector space -> Lie algebra
pub fn hat(v: DVec3) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(0.0, v.z, -v.y),
        DVec3::new(-v.z, 0.0, v.x),
        DVec3::new(v.y, -v.x, 0.0),
    )
}

/// Lie algebra -> vector space
pub fn vee(omega: &DMat3) -> DVec3 {
    DVec3::new(omega.y_axis.z, omega.z_axis.x, omega.x_axis.y)
}

/// Squared Frobenius norm of a 3x3 matrix.
#[inline]
pub fn frobenius_sq(m: &DMat3) -> f64 {
    m.x_axis.length_squared() + m.y_axis.length_squared() + m.z_axis.length_squared()
}

/// Batched matrix exponential so(3)^k -> SO(3)^k.
///
/// The input generators are assumed to be skew-symmetric; this is not checked.
pub fn expm(omegas: &[DMat3]) -> Vec<DMat3> {
    omegas.iter().map(expm_single).collect()
}

/// Batched matrix logarithm SO(3)^k -> so(3)^k.
///
/// The inputs are assumed to be orthogonal with determinant +1; this is not checked.
/// The returned generators have rotation angle in `[0, π]`.
pub fn logm(rotations: &[DMat3]) -> Vec<DMat3> {
    rotations.iter().map(logm_single).collect()
}

fn expm_single(omega: &DMat3) -> DMat3 {
    let theta_sq = 0.5 * frobenius_sq(omega);
    let theta = (theta_sq + f64::EPSILON).sqrt();
    let small = theta < SMALL_ANGLE_THRESHOLD;

    // sin(θ)/θ
    let a = select(
        small,
        1.0 - theta_sq / 6.0 + theta_sq * theta_sq / 120.0,
        theta.sin() / theta,
    );
    // (1 - cos θ)/θ²
    let b = select(
        small,
        0.5 - theta_sq / 24.0 + theta_sq * theta_sq / 720.0,
        (1.0 - theta.cos()) / theta_sq,
    );

    DMat3::IDENTITY + *omega * a + (*omega * *omega) * b
}

fn logm_single(r: &DMat3) -> DMat3 {
    // R - Rᵀ = 2 sin(θ) [u]ₓ
    let skew = (*r - r.transpose()) * 0.5;
    let sin_theta = vee(&skew).length();
    let cos_theta = 0.5 * (r.x_axis.x + r.y_axis.y + r.z_axis.z - 1.0);
    let theta = sin_theta.atan2(cos_theta);
    let theta_sq = theta * theta;

    // θ / sin(θ)
    let scale = select(
        theta < SMALL_ANGLE_THRESHOLD,
        1.0 + theta_sq / 6.0 + 7.0 * theta_sq * theta_sq / 360.0,
        theta / sin_theta,
    );
    let generic = skew * scale;
    let antipodal = logm_near_pi(r, &skew, theta, cos_theta);

    let near_pi = std::f64::consts::PI - theta < NEAR_PI_THRESHOLD;
    if near_pi {
        antipodal
    } else {
        generic
    }
}

// Near θ = π the skew part vanishes and the axis is recovered from
// (R + Rᵀ)/2 - cos(θ) I = (1 - cos θ) u uᵀ instead.
fn logm_near_pi(r: &DMat3, skew: &DMat3, theta: f64, cos_theta: f64) -> DMat3 {
    let sym = (*r + r.transpose()) * 0.5 - DMat3::IDENTITY * cos_theta;
    let diag = [sym.x_axis.x, sym.y_axis.y, sym.z_axis.z];
    let pivot = (0..3).fold(0, |best, i| if diag[i] > diag[best] { i } else { best });

    let column = sym.col(pivot);
    let axis = column / column.length();
    let sign = select(axis.dot(vee(skew)) < 0.0, -1.0, 1.0);

    hat(axis * (sign * theta))
}

/// The product manifold SO(3)^k, used as a sampler of rotation blocks.
#[derive(Debug, Clone, Copy)]
pub struct SO3 {
    k: usize,
}

impl SO3 {
    /// Create SO(3)^k.
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    /// Number of copies.
    pub fn k(&self) -> usize {
        self.k
    }

    /// k independent rotations, uniformly distributed on SO(3).
    pub fn rand<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DMat3> {
        (0..self.k).map(|_| random_rotation(rng)).collect()
    }

    /// k random Lie algebra elements with standard normal axis-angle coordinates.
    ///
    /// Tangent vectors are expressed at the identity, so the footpoint only fixes the
    /// number of slots.
    pub fn randvec<R: Rng + ?Sized>(&self, rotations: &[DMat3], rng: &mut R) -> Vec<DMat3> {
        debug_assert_eq!(rotations.len(), self.k);
        rotations
            .iter()
            .map(|_| {
                let v = DVec3::new(
                    rng.sample(StandardNormal),
                    rng.sample(StandardNormal),
                    rng.sample(StandardNormal),
                );
                hat(v)
            })
            .collect()
    }
}

fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> DMat3 {
    let r1: f64 = rng.random();
    let r2: f64 = rng.random();
    let r3: f64 = rng.random();

    // uniform random quaternion (Shoemake method)
    let one_minus_r1_sqrt = (1.0 - r1).sqrt();
    let r1_sqrt = r1.sqrt();

    let w = one_minus_r1_sqrt * (2.0 * std::f64::consts::PI * r2).cos();
    let x = one_minus_r1_sqrt * (2.0 * std::f64::consts::PI * r2).sin();
    let y = r1_sqrt * (2.0 * std::f64::consts::PI * r3).cos();
    let z = r1_sqrt * (2.0 * std::f64::consts::PI * r3).sin();

    DMat3::from_quat(DQuat::from_xyzw(x, y, z, w).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    const EPSILON: f64 = 1e-9;

    fn assert_mat3_eq(a: &DMat3, b: &DMat3, epsilon: f64) {
        for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
            assert_relative_eq!(*x, *y, epsilon = epsilon);
        }
    }

    #[test]
    fn test_hat() {
        let hat_v = hat(DVec3::new(1.0, 2.0, 3.0));

        assert_relative_eq!(hat_v.x_axis.y, 3.0);
        assert_relative_eq!(hat_v.x_axis.z, -2.0);
        assert_relative_eq!(hat_v.y_axis.x, -3.0);
        assert_relative_eq!(hat_v.y_axis.z, 1.0);
        assert_relative_eq!(hat_v.z_axis.x, 2.0);
        assert_relative_eq!(hat_v.z_axis.y, -1.0);
        assert_mat3_eq(&hat_v, &(hat_v.transpose() * -1.0), 0.0);
    }

    #[test]
    fn test_hat_vee() {
        let test_vectors = [
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(-0.5, 0.0, 1.5),
            DVec3::new(0.1, -0.2, 0.3),
        ];

        for v in test_vectors.iter() {
            let v_recovered = vee(&hat(*v));
            assert_relative_eq!(v_recovered.x, v.x);
            assert_relative_eq!(v_recovered.y, v.y);
            assert_relative_eq!(v_recovered.z, v.z);
        }
    }

    #[test]
    fn test_expm_zero() {
        let r = expm(&[DMat3::ZERO]);
        assert_mat3_eq(&r[0], &DMat3::IDENTITY, EPSILON);
    }

    #[test]
    fn test_expm_matches_axis_angle() {
        let v = DVec3::new(0.3, -0.4, 1.2);
        let r = expm(&[hat(v)]);
        let expected = DMat3::from_axis_angle(v.normalize(), v.length());
        assert_mat3_eq(&r[0], &expected, EPSILON);
    }

    #[test]
    fn test_logm_identity() {
        let w = logm(&[DMat3::IDENTITY]);
        assert_mat3_eq(&w[0], &DMat3::ZERO, EPSILON);
    }

    #[test]
    fn test_exp_log() {
        let test_vectors = [
            DVec3::new(0.1, 0.2, 0.3),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(-0.5, 0.3, -0.2),
            DVec3::new(1e-7, -2e-7, 0.0),
            DVec3::new(0.0, 0.0, 3.1),
        ];
        let omegas: Vec<DMat3> = test_vectors.iter().map(|v| hat(*v)).collect();

        let recovered = logm(&expm(&omegas));
        for (w, omega) in recovered.iter().zip(omegas.iter()) {
            assert_mat3_eq(w, omega, EPSILON);
        }
    }

    #[test]
    fn test_logm_near_pi() {
        let axis = DVec3::new(1.0, 2.0, -2.0).normalize();
        for theta in [std::f64::consts::PI - 1e-6, std::f64::consts::PI - 5e-5] {
            let r = DMat3::from_axis_angle(axis, theta);
            let w = logm(&[r]);
            assert_relative_eq!(vee(&w[0]).length(), theta, epsilon = 1e-8);
            assert_mat3_eq(&expm(&w)[0], &r, 1e-8);
        }
    }

    #[test]
    fn test_rand_is_rotation() {
        let mut rng = StdRng::seed_from_u64(42);
        let so3 = SO3::new(8);
        for r in so3.rand(&mut rng).iter() {
            assert_mat3_eq(&(r.transpose() * *r), &DMat3::IDENTITY, 1e-12);
            assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rand_is_reproducible() {
        let so3 = SO3::new(3);
        let a = so3.rand(&mut StdRng::seed_from_u64(7));
        let b = so3.rand(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_randvec_is_skew() {
        let mut rng = StdRng::seed_from_u64(3);
        let so3 = SO3::new(4);
        let rotations = so3.rand(&mut rng);
        let vecs = so3.randvec(&rotations, &mut rng);
        assert_eq!(vecs.len(), 4);
        for x in vecs.iter() {
            assert_mat3_eq(x, &(x.transpose() * -1.0), 0.0);
        }
    }
}
