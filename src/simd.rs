//! Vector operations for dense embeddings.
//!
//! Portable scalar implementations. For normalized embeddings, prefer
//! [`dot`] over [`cosine`]: on unit vectors the two coincide and `dot`
//! skips both norm computations.

const NORM_EPSILON: f32 = 1e-9;

/// Dot product of two vectors.
///
/// Callers are responsible for matching lengths; a shorter slice silently
/// truncates the product, so length checks live at the store boundary.
#[inline]
#[must_use]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// L2 norm of a vector.
#[inline]
#[must_use]
pub fn norm(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

/// Cosine similarity between two vectors.
///
/// Computes norms, so it does not require pre-normalized inputs. Returns 0.0
/// when either norm is (near) zero.
#[inline]
#[must_use]
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let d = dot(a, b);
    let na = norm(a);
    let nb = norm(b);
    if na > NORM_EPSILON && nb > NORM_EPSILON {
        d / (na * nb)
    } else {
        0.0
    }
}

/// Normalize a vector to unit L2 norm.
///
/// A (near) zero vector is returned as all zeros rather than dividing by
/// zero.
#[inline]
#[must_use]
pub fn normalize(v: &[f32]) -> Vec<f32> {
    let n = norm(v);
    if n < NORM_EPSILON {
        return vec![0.0; v.len()];
    }
    v.iter().map(|x| x / n).collect()
}
