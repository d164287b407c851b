//! Exponential barycenter (group mean) of a data set.
//!
//! The barycenter `m` of points `p₁, …, p_N` solves `Σᵢ Log_m(pᵢ) = 0`. It is found by the
//! fixed point iteration `m ← Exp_m((1/N) Σᵢ Log_m(pᵢ))`, which converges for data in a
//! sufficiently small neighbourhood. This is the mean that principal geodesic analysis
//! linearizes around.

use glam::DMat4;

use crate::{
    batch,
    error::ManifoldError,
    manifold::{Connection, Footpoint},
};

/// Convergence criteria of [`exponential_barycenter`].
#[derive(Debug, Clone)]
pub struct BarycenterParams {
    /// Maximum number of fixed point iterations.
    pub max_iterations: usize,
    /// Stop once the Frobenius norm of the mean tangent step is below this value in every slot.
    pub tolerance: f64,
}

impl Default for BarycenterParams {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-10,
        }
    }
}

/// Exponential barycenter of `data` w.r.t. the connection `connec`.
///
/// # Arguments
///
/// * `connec` - Connection providing the exponential and logarithm maps.
/// * `data` - Points of the manifold, each a batch of k matrices.
/// * `params` - Convergence criteria.
///
/// # Returns
///
/// The barycenter. When the iteration cap is reached first, the last iterate is returned.
///
/// # Errors
///
/// [`ManifoldError::EmptyData`] if `data` is empty.
pub fn exponential_barycenter<C: Connection>(
    connec: &C,
    data: &[Vec<DMat4>],
    params: &BarycenterParams,
) -> Result<Vec<DMat4>, ManifoldError> {
    let first = data.first().ok_or(ManifoldError::EmptyData)?;
    let weight = 1.0 / data.len() as f64;

    let mut mean = first.clone();
    for i in 0..params.max_iterations {
        let zero = vec![DMat4::ZERO; mean.len()];
        let sum = data
            .iter()
            .map(|p| connec.log(Footpoint::At(&mean), p))
            .fold(zero, |acc, v| batch::add(&acc, &v));
        let step = batch::scale(&sum, weight);

        let step_norm = step.iter().map(batch::frobenius_norm).fold(0.0, f64::max);
        log::debug!("Iteration: {} step norm: {:e}", i, step_norm);

        if step_norm <= params.tolerance {
            return Ok(mean);
        }
        mean = connec.exp(Footpoint::At(&mean), &step);
    }

    log::warn!(
        "Exponential barycenter did not converge within {} iterations",
        params.max_iterations
    );
    Ok(mean)
}
