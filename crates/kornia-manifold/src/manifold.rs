//! Interfaces shared by manifolds of homogeneous 4×4 matrices and their geometric structures.
//!
//! Points and tangent vectors are batches (`[DMat4]`) of k independent copies. Tangent
//! vectors are always represented in the Lie algebra, i.e. at the identity; structures
//! that need a footpoint-relative vector pull it back with the group translations first.

use glam::DMat4;
use rand::Rng;

use crate::{batch, error::ManifoldError};

/// Where an exponential or logarithm is based.
#[derive(Debug, Clone, Copy)]
pub enum Footpoint<'a> {
    /// The group identity: plain group exponential / logarithm.
    Identity,
    /// An arbitrary point of the manifold.
    At(&'a [DMat4]),
}

/// A product manifold of k copies, with points stored as k stacked 4×4 matrices.
pub trait Manifold {
    /// Human readable name.
    fn name(&self) -> String;

    /// Dimension of the manifold.
    fn dim(&self) -> usize;

    /// Shape `[k, rows, cols]` of a point.
    fn point_shape(&self) -> [usize; 3];

    /// Random point.
    fn rand<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DMat4>;

    /// Random tangent vector at `p`.
    fn randvec<R: Rng + ?Sized>(&self, p: &[DMat4], rng: &mut R) -> Vec<DMat4>;

    /// Zero tangent vector.
    fn zerovec(&self) -> Vec<DMat4>;

    /// Projection of an ambient vector `x` onto the tangent space at `p`.
    fn proj(&self, p: &[DMat4], x: &[DMat4]) -> Result<Vec<DMat4>, ManifoldError>;
}

/// Lie group structure: group operations and their derivatives at the identity.
pub trait LieGroup {
    /// Identity element.
    fn identity(&self) -> Vec<DMat4>;

    /// Group inverse.
    fn inverse(&self, p: &[DMat4]) -> Vec<DMat4>;

    /// Left translation of `p` by `s`.
    fn lefttrans(&self, p: &[DMat4], s: &[DMat4]) -> Vec<DMat4>;

    /// Right translation of `p` by `s`.
    fn righttrans(&self, p: &[DMat4], s: &[DMat4]) -> Vec<DMat4>;

    /// Derivative of the left translation by `p` at the identity applied to `x`.
    fn dleft(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4>;

    /// Derivative of the right translation by `p` at the identity applied to `x`.
    fn dright(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4>;

    /// Derivative of the left translation by `p⁻¹` at `p` applied to `x`.
    fn dleft_inv(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4>;

    /// Derivative of the right translation by `p⁻¹` at `p` applied to `x`.
    fn dright_inv(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4>;

    /// Adjoint representation of `p` applied to the Lie algebra element `x`.
    fn adjrep(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4>;

    /// Lie bracket in the Lie algebra.
    fn bracket(&self, x: &[DMat4], y: &[DMat4]) -> Vec<DMat4>;

    /// Coordinates of a Lie algebra element w.r.t. an orthonormal basis.
    fn coords(&self, x: &[DMat4]) -> Vec<f64>;
}

/// Affine connection: geodesic exponential and logarithm relative to footpoints.
pub trait Connection {
    /// Exponential map of the Lie algebra element `x`, based at `base`.
    fn exp(&self, base: Footpoint<'_>, x: &[DMat4]) -> Vec<DMat4>;

    /// Logarithm of `s`, based at `base`. Inverse of [`Connection::exp`].
    fn log(&self, base: Footpoint<'_>, s: &[DMat4]) -> Vec<DMat4>;

    /// Retraction at `p`; defaults to the exponential map.
    fn retr(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4> {
        self.exp(Footpoint::At(p), x)
    }

    /// Midpoint of the geodesic between `p` and `s`.
    fn pairmean(&self, p: &[DMat4], s: &[DMat4]) -> Vec<DMat4> {
        let half = batch::scale(&self.log(Footpoint::At(p), s), 0.5);
        self.exp(Footpoint::At(p), &half)
    }

    /// Parallel transport of `x` from `p` to `s`.
    fn transp(&self, p: &[DMat4], s: &[DMat4], x: &[DMat4]) -> Result<Vec<DMat4>, ManifoldError>;

    /// Curvature tensor `R(X, Y)Z = ∇_X ∇_Y Z - ∇_Y ∇_X Z - ∇_[X,Y] Z` at `p`.
    fn curvature_tensor(
        &self,
        p: &[DMat4],
        x: &[DMat4],
        y: &[DMat4],
        z: &[DMat4],
    ) -> Result<Vec<DMat4>, ManifoldError>;

    /// Jacobi field along the geodesic from `p` to `s`, evaluated at time `t`, with
    /// boundary value `x` at `s`.
    fn jacobi_field(
        &self,
        p: &[DMat4],
        s: &[DMat4],
        t: f64,
        x: &[DMat4],
    ) -> Result<Vec<DMat4>, ManifoldError>;
}
