//! Block access and elementwise arithmetic for batches of 4×4 homogeneous matrices.
//!
//! A batch of k elements is a slice of k `DMat4` in the layout
//!
//! ```text
//! | R  t |
//! | 0  c |
//! ```
//!
//! where `R` is the upper-left 3×3 block, `t` the upper-right 3×1 block and `c` the
//! corner entry: 1 for group elements and 0 for Lie algebra elements.

use glam::{DMat3, DMat4, DVec3};

/// Upper-left 3×3 block.
#[inline]
pub fn rotation(m: &DMat4) -> DMat3 {
    DMat3::from_mat4(*m)
}

/// Upper-right 3×1 block.
#[inline]
pub fn translation(m: &DMat4) -> DVec3 {
    m.w_axis.truncate()
}

/// Assemble a homogeneous matrix from its blocks, with the bottom row set to `(0, 0, 0, corner)`.
#[inline]
pub fn from_blocks(r: DMat3, t: DVec3, corner: f64) -> DMat4 {
    DMat4::from_cols(
        r.x_axis.extend(0.0),
        r.y_axis.extend(0.0),
        r.z_axis.extend(0.0),
        t.extend(corner),
    )
}

/// Upper-left 3×3 blocks of a batch.
pub fn rotations(ms: &[DMat4]) -> Vec<DMat3> {
    ms.iter().map(rotation).collect()
}

/// Slotwise matrix product `a[i] * b[i]`.
pub fn compose(a: &[DMat4], b: &[DMat4]) -> Vec<DMat4> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(a, b)| *a * *b).collect()
}

/// Slotwise sum `a[i] + b[i]`.
pub fn add(a: &[DMat4], b: &[DMat4]) -> Vec<DMat4> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(a, b)| *a + *b).collect()
}

/// Multiply every slot by the scalar `s`.
pub fn scale(x: &[DMat4], s: f64) -> Vec<DMat4> {
    x.iter().map(|x| *x * s).collect()
}

/// Frobenius norm of a single 4×4 matrix.
pub fn frobenius_norm(m: &DMat4) -> f64 {
    m.to_cols_array().iter().map(|v| v * v).sum::<f64>().sqrt()
}
