//! # GL(4) — the general linear group of invertible 4×4 matrices, batched over k copies
//!
//! Group elements and Lie algebra elements are both plain `DMat4`s. Composition is the
//! matrix product, so every translation, its derivative and the adjoint action reduce to
//! products with the footpoint or its inverse:
//!
//! | operation          | formula          |
//! |--------------------|------------------|
//! | `lefttrans(P, S)`  | `S P`            |
//! | `righttrans(P, S)` | `P S`            |
//! | `dleft(P, X)`      | `P X`            |
//! | `dright(P, X)`     | `X P`            |
//! | `dleft_inv(P, X)`  | `P⁻¹ X`          |
//! | `dright_inv(P, X)` | `X P⁻¹`          |
//! | `adjrep(P, X)`     | `P X P⁻¹`        |
//! | `bracket(X, Y)`    | `X Y - Y X`      |
//!
//! Any closed subgroup of GL(4), e.g. SE(3) in homogeneous coordinates, can reuse these
//! formulas unchanged.

use glam::DMat4;

/// Standard (product) Lie group structure on GL(4)^k.
#[derive(Debug, Clone, Copy)]
pub struct GL4 {
    k: usize,
}

impl GL4 {
    /// Create GL(4)^k.
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    /// Number of copies.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Identity element of GL(4)^k.
    pub fn identity(&self) -> Vec<DMat4> {
        vec![DMat4::IDENTITY; self.k]
    }

    /// Generic matrix inverse.
    ///
    /// NOTE: the matrices must be invertible, singular inputs yield non-finite entries.
    pub fn inverse(&self, p: &[DMat4]) -> Vec<DMat4> {
        p.iter().map(DMat4::inverse).collect()
    }

    /// Left translation of `p` by `s`.
    pub fn lefttrans(&self, p: &[DMat4], s: &[DMat4]) -> Vec<DMat4> {
        zip_map(p, s, |p, s| *s * *p)
    }

    /// Right translation of `p` by `s`.
    pub fn righttrans(&self, p: &[DMat4], s: &[DMat4]) -> Vec<DMat4> {
        zip_map(p, s, |p, s| *p * *s)
    }

    /// Derivative of the left translation by `p` at the identity applied to `x`.
    pub fn dleft(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4> {
        zip_map(p, x, |p, x| *p * *x)
    }

    /// Derivative of the right translation by `p` at the identity applied to `x`.
    pub fn dright(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4> {
        zip_map(p, x, |p, x| *x * *p)
    }

    /// Derivative of the left translation by `p⁻¹` at `p` applied to `x`.
    pub fn dleft_inv(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4> {
        zip_map(p, x, |p, x| p.inverse() * *x)
    }

    /// Derivative of the right translation by `p⁻¹` at `p` applied to `x`.
    pub fn dright_inv(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4> {
        zip_map(p, x, |p, x| *x * p.inverse())
    }

    /// Adjoint representation of `p` applied to the Lie algebra element `x`.
    pub fn adjrep(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4> {
        zip_map(p, x, |p, x| *p * *x * p.inverse())
    }

    /// Lie bracket (matrix commutator) in the Lie algebra.
    pub fn bracket(&self, x: &[DMat4], y: &[DMat4]) -> Vec<DMat4> {
        zip_map(x, y, |x, y| *x * *y - *y * *x)
    }
}

fn zip_map(a: &[DMat4], b: &[DMat4], f: impl Fn(&DMat4, &DMat4) -> DMat4) -> Vec<DMat4> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(a, b)| f(a, b)).collect()
}
