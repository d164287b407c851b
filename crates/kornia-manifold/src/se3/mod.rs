//! # SE(3)^k — products of rigid body motions
//!
//! Elements of SE(3)^k are stored as k homogeneous 4×4 matrices: the upper-left 3×3 block
//! is the rotation, the upper-right 3×1 block is the translation, and the bottom row is
//! `(0, 0, 0, 1)`. Tangent vectors follow the same layout but always live in the Lie
//! algebra se(3): skew-symmetric rotation block, free translation block, zero bottom row.

use std::{fmt, str::FromStr};

use glam::{DMat4, DVec3};
use kornia_lie::so3::SO3;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::{batch, error::ManifoldError, manifold::Manifold};

mod exp_log;
mod structure;

pub use exp_log::{expm, logm};
pub use structure::AffineGroupStructure;

/// Geometric structures that can be installed on [`SE3`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Structure {
    /// Standard Lie group structure with the canonical Cartan-Shouten connection.
    #[default]
    AffineGroup,
}

impl FromStr for Structure {
    type Err = ManifoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AffineGroup" => Ok(Self::AffineGroup),
            _ => Err(ManifoldError::UnknownStructure(s.to_string())),
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AffineGroup => write!(f, "AffineGroup"),
        }
    }
}

/// The product manifold SE(3)^k of k rigid body motions.
///
/// # Example
///
/// ```rust
/// use kornia_manifold::{Connection, Footpoint, Manifold, SE3};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let manifold = SE3::new(2).unwrap();
/// let mut rng = StdRng::seed_from_u64(0);
///
/// let p = manifold.rand(&mut rng);
/// let s = manifold.rand(&mut rng);
///
/// // geodesic from p to s, evaluated at its end point
/// let x = manifold.connec().log(Footpoint::At(&p), &s);
/// let q = manifold.connec().exp(Footpoint::At(&p), &x);
///
/// assert!(q.iter().zip(s.iter()).all(|(a, b)| a.abs_diff_eq(*b, 1e-9)));
/// ```
#[derive(Debug, Clone)]
pub struct SE3 {
    k: usize,
    so: SO3,
    structure: AffineGroupStructure,
}

impl SE3 {
    /// Create SE(3)^k with the [`Structure::AffineGroup`] structure.
    ///
    /// # Errors
    ///
    /// [`ManifoldError::InvalidBatchSize`] if `k` is zero.
    pub fn new(k: usize) -> Result<Self, ManifoldError> {
        Self::with_structure(k, Structure::AffineGroup)
    }

    /// Create SE(3)^k with the given structure.
    pub fn with_structure(k: usize, structure: Structure) -> Result<Self, ManifoldError> {
        if k < 1 {
            return Err(ManifoldError::InvalidBatchSize(k));
        }

        let installed = match structure {
            Structure::AffineGroup => AffineGroupStructure::new(k),
        };

        let manifold = Self {
            k,
            so: SO3::new(k),
            structure: installed,
        };
        log::debug!(
            "Initialized {} (k = {}) with {} structure",
            manifold.name(),
            k,
            structure
        );

        Ok(manifold)
    }

    /// Create SE(3)^k with a structure given by name, e.g. `"AffineGroup"`.
    ///
    /// # Errors
    ///
    /// [`ManifoldError::InvalidBatchSize`] if `k` is zero, [`ManifoldError::UnknownStructure`]
    /// if the name does not match any [`Structure`].
    pub fn from_structure_name(k: usize, name: &str) -> Result<Self, ManifoldError> {
        if k < 1 {
            return Err(ManifoldError::InvalidBatchSize(k));
        }
        Self::with_structure(k, name.parse()?)
    }

    /// Number of copies.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The connection, i.e. exponential and logarithm relative to footpoints.
    pub fn connec(&self) -> &AffineGroupStructure {
        &self.structure
    }

    /// The Lie group structure.
    pub fn group(&self) -> &AffineGroupStructure {
        &self.structure
    }

    fn normal_translations<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DVec3> {
        (0..self.k)
            .map(|_| {
                DVec3::new(
                    rng.sample(StandardNormal),
                    rng.sample(StandardNormal),
                    rng.sample(StandardNormal),
                )
            })
            .collect()
    }
}

impl Manifold for SE3 {
    fn name(&self) -> String {
        if self.k == 1 {
            "Rigid motions".to_string()
        } else {
            format!("Special Euclidean group SE(3)^{}", self.k)
        }
    }

    fn dim(&self) -> usize {
        6 * self.k
    }

    fn point_shape(&self) -> [usize; 3] {
        [self.k, 4, 4]
    }

    /// Uniformly distributed rotations and standard normal translations.
    fn rand<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DMat4> {
        let rotations = self.so.rand(rng);
        let translations = self.normal_translations(rng);

        rotations
            .into_iter()
            .zip(translations)
            .map(|(r, t)| batch::from_blocks(r, t, 1.0))
            .collect()
    }

    /// Random Lie algebra element; the rotation block is sampled by SO(3)^k at the rotation
    /// blocks of `p`, the translation block is standard normal.
    fn randvec<R: Rng + ?Sized>(&self, p: &[DMat4], rng: &mut R) -> Vec<DMat4> {
        let omegas = self.so.randvec(&batch::rotations(p), rng);
        let translations = self.normal_translations(rng);

        omegas
            .into_iter()
            .zip(translations)
            .map(|(w, t)| batch::from_blocks(w, t, 0.0))
            .collect()
    }

    fn zerovec(&self) -> Vec<DMat4> {
        vec![DMat4::ZERO; self.k]
    }

    fn proj(&self, _p: &[DMat4], _x: &[DMat4]) -> Result<Vec<DMat4>, ManifoldError> {
        Err(ManifoldError::Unsupported { operation: "proj" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_new() -> Result<(), ManifoldError> {
        let manifold = SE3::new(1)?;
        assert_eq!(manifold.k(), 1);
        assert_eq!(manifold.name(), "Rigid motions");
        assert_eq!(manifold.dim(), 6);
        assert_eq!(manifold.point_shape(), [1, 4, 4]);

        let manifold = SE3::new(5)?;
        assert_eq!(manifold.name(), "Special Euclidean group SE(3)^5");
        assert_eq!(manifold.dim(), 30);
        assert_eq!(manifold.point_shape(), [5, 4, 4]);
        assert_eq!(manifold.connec().k(), 5);
        assert_eq!(manifold.group().k(), 5);
        Ok(())
    }

    #[test]
    fn test_invalid_k() {
        assert_eq!(SE3::new(0).unwrap_err(), ManifoldError::InvalidBatchSize(0));
        assert_eq!(
            SE3::from_structure_name(0, "AffineGroup").unwrap_err(),
            ManifoldError::InvalidBatchSize(0)
        );
    }

    #[test]
    fn test_structure_by_name() -> Result<(), ManifoldError> {
        let manifold = SE3::from_structure_name(3, "AffineGroup")?;
        assert_eq!(manifold.k(), 3);
        assert_eq!("AffineGroup".parse::<Structure>()?, Structure::AffineGroup);
        assert_eq!(Structure::default().to_string(), "AffineGroup");

        assert_eq!(
            SE3::from_structure_name(3, "Riemannian").unwrap_err(),
            ManifoldError::UnknownStructure("Riemannian".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_rand_is_valid() -> Result<(), ManifoldError> {
        let manifold = SE3::new(4)?;
        let p = manifold.rand(&mut StdRng::seed_from_u64(11));

        assert_eq!(p.len(), 4);
        for m in p.iter() {
            let r = batch::rotation(m);
            assert!((r.transpose() * r).abs_diff_eq(glam::DMat3::IDENTITY, 1e-12));
            assert!((r.determinant() - 1.0).abs() < 1e-12);
            assert_eq!(m.row(3), glam::DVec4::new(0.0, 0.0, 0.0, 1.0));
        }
        Ok(())
    }

    #[test]
    fn test_rand_is_reproducible() -> Result<(), ManifoldError> {
        let manifold = SE3::new(3)?;
        let a = manifold.rand(&mut StdRng::seed_from_u64(5));
        let b = manifold.rand(&mut StdRng::seed_from_u64(5));
        let c = manifold.rand(&mut StdRng::seed_from_u64(6));
        assert_eq!(a, b);
        assert_ne!(a, c);
        Ok(())
    }

    #[test]
    fn test_randvec_is_algebra_element() -> Result<(), ManifoldError> {
        let manifold = SE3::new(3)?;
        let mut rng = StdRng::seed_from_u64(2);
        let p = manifold.rand(&mut rng);
        let x = manifold.randvec(&p, &mut rng);

        assert_eq!(x.len(), 3);
        for m in x.iter() {
            let w = batch::rotation(m);
            assert_eq!(w, w.transpose() * -1.0);
            assert_eq!(m.row(3), glam::DVec4::ZERO);
        }
        Ok(())
    }

    #[test]
    fn test_zerovec() -> Result<(), ManifoldError> {
        let manifold = SE3::new(2)?;
        assert_eq!(manifold.zerovec(), vec![DMat4::ZERO; 2]);
        Ok(())
    }

    #[test]
    fn test_proj_is_unsupported() -> Result<(), ManifoldError> {
        let manifold = SE3::new(2)?;
        let p = manifold.rand(&mut StdRng::seed_from_u64(1));
        assert_eq!(
            manifold.proj(&p, &manifold.zerovec()),
            Err(ManifoldError::Unsupported { operation: "proj" })
        );
        Ok(())
    }
}
