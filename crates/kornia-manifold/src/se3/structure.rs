use std::fmt;

use glam::DMat4;
use kornia_lie::gl4::GL4;

use super::exp_log::{expm, logm};
use crate::{
    batch,
    error::ManifoldError,
    manifold::{Connection, Footpoint, LieGroup},
};

/// Standard (product) Lie group structure on SE(3)^k together with the canonical
/// Cartan-Shouten connection.
///
/// SE(3) is a subgroup of GL⁺(4): translations, their derivatives, the adjoint action and
/// the bracket are forwarded to the generic [`GL4`] formulas. The inverse and the
/// exponential/logarithm use the closed forms for rigid motions.
#[derive(Debug, Clone, Copy)]
pub struct AffineGroupStructure {
    k: usize,
    glp4: GL4,
}

impl AffineGroupStructure {
    /// Create the structure for SE(3)^k.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            glp4: GL4::new(k),
        }
    }

    /// Number of copies.
    pub fn k(&self) -> usize {
        self.k
    }
}

impl fmt::Display for AffineGroupStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SE3(k)-affine group structure")
    }
}

impl LieGroup for AffineGroupStructure {
    fn identity(&self) -> Vec<DMat4> {
        self.glp4.identity()
    }

    /// Closed-form rigid motion inverse `(R, t) ↦ (Rᵀ, -Rᵀ t)`.
    ///
    /// The rotation blocks must be orthogonal; this is not checked.
    fn inverse(&self, p: &[DMat4]) -> Vec<DMat4> {
        p.iter()
            .map(|p| {
                let rt = batch::rotation(p).transpose();
                batch::from_blocks(rt, -(rt * batch::translation(p)), 1.0)
            })
            .collect()
    }

    fn lefttrans(&self, p: &[DMat4], s: &[DMat4]) -> Vec<DMat4> {
        self.glp4.lefttrans(p, s)
    }

    fn righttrans(&self, p: &[DMat4], s: &[DMat4]) -> Vec<DMat4> {
        self.glp4.righttrans(p, s)
    }

    fn dleft(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4> {
        self.glp4.dleft(p, x)
    }

    fn dright(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4> {
        self.glp4.dright(p, x)
    }

    fn dleft_inv(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4> {
        self.glp4.dleft_inv(p, x)
    }

    fn dright_inv(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4> {
        self.glp4.dright_inv(p, x)
    }

    fn adjrep(&self, p: &[DMat4], x: &[DMat4]) -> Vec<DMat4> {
        self.glp4.adjrep(p, x)
    }

    fn bracket(&self, x: &[DMat4], y: &[DMat4]) -> Vec<DMat4> {
        self.glp4.bracket(x, y)
    }

    /// Per slot `[√2 x₀₁, √2 x₀₂, √2 x₁₂, t₀, t₁, t₂]`, slots stacked one after the other
    /// (column-major flattening of the 6×k coordinate matrix).
    fn coords(&self, x: &[DMat4]) -> Vec<f64> {
        x.iter()
            .flat_map(|x| {
                let t = batch::translation(x);
                [
                    x.y_axis.x * std::f64::consts::SQRT_2,
                    x.z_axis.x * std::f64::consts::SQRT_2,
                    x.z_axis.y * std::f64::consts::SQRT_2,
                    t.x,
                    t.y,
                    t.z,
                ]
            })
            .collect()
    }
}

impl Connection for AffineGroupStructure {
    /// `Exp_e(X) = expm(X)` and `Exp_P(X) = expm(X) P`.
    fn exp(&self, base: Footpoint<'_>, x: &[DMat4]) -> Vec<DMat4> {
        let e = expm(x);
        match base {
            Footpoint::Identity => e,
            Footpoint::At(p) => batch::compose(&e, p),
        }
    }

    /// `Log_e(S) = logm(S)` and `Log_P(S) = logm(S P⁻¹)`.
    fn log(&self, base: Footpoint<'_>, s: &[DMat4]) -> Vec<DMat4> {
        match base {
            Footpoint::Identity => logm(s),
            Footpoint::At(p) => logm(&batch::compose(s, &self.inverse(p))),
        }
    }

    fn transp(
        &self,
        _p: &[DMat4],
        _s: &[DMat4],
        _x: &[DMat4],
    ) -> Result<Vec<DMat4>, ManifoldError> {
        Err(ManifoldError::Unsupported {
            operation: "transp",
        })
    }

    fn curvature_tensor(
        &self,
        _p: &[DMat4],
        _x: &[DMat4],
        _y: &[DMat4],
        _z: &[DMat4],
    ) -> Result<Vec<DMat4>, ManifoldError> {
        Err(ManifoldError::Unsupported {
            operation: "curvature_tensor",
        })
    }

    fn jacobi_field(
        &self,
        _p: &[DMat4],
        _s: &[DMat4],
        _t: f64,
        _x: &[DMat4],
    ) -> Result<Vec<DMat4>, ManifoldError> {
        Err(ManifoldError::Unsupported {
            operation: "jacobi_field",
        })
    }
}
