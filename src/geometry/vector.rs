//! Small vector helpers on top of `glam::Vec3`.
//!
//! glam already provides the componentwise arithmetic, `length` and `dot`;
//! the helpers here add the checked variants the sphere code relies on so a
//! degenerate input surfaces as a [`GeometryError`] instead of NaNs.

use glam::Vec3;

use super::error::GeometryError;

/// Relative tolerance used when comparing directions.
const DIRECTION_EPSILON: f32 = 1e-5;

/// Returns `v / |v|`, failing on zero-length or non-finite input.
///
/// # Example
/// ```
/// use glam::Vec3;
/// use planetgen::geometry::normalize_checked;
///
/// let n = normalize_checked(Vec3::new(3.0, 0.0, 4.0)).unwrap();
/// assert!((n.length() - 1.0).abs() < 1e-6);
/// assert!(normalize_checked(Vec3::ZERO).is_err());
/// ```
pub fn normalize_checked(v: Vec3) -> Result<Vec3, GeometryError> {
    let len = v.length();
    if len == 0.0 || !len.is_finite() {
        return Err(GeometryError::ZeroLength(v.to_array()));
    }
    Ok(v / len)
}

/// Cosine of the angle between two vectors.
pub fn cos_angle(a: Vec3, b: Vec3) -> Result<f32, GeometryError> {
    let la = a.length();
    let lb = b.length();
    if la == 0.0 || !la.is_finite() {
        return Err(GeometryError::ZeroLength(a.to_array()));
    }
    if lb == 0.0 || !lb.is_finite() {
        return Err(GeometryError::ZeroLength(b.to_array()));
    }
    Ok(a.dot(b) / (la * lb))
}

/// Returns true when `displaced` is a positive scalar multiple of `original`.
///
/// Both vectors must be non-zero; a zero vector is never considered a
/// radial multiple.
pub fn is_radial_multiple(original: Vec3, displaced: Vec3) -> bool {
    match cos_angle(original, displaced) {
        Ok(cos) => cos > 1.0 - DIRECTION_EPSILON,
        Err(_) => false,
    }
}
