//! Orthonormal frames around a unit normal.
//!
//! Hemisphere samples are generated around +Z and then rotated into the
//! frame of a surface or light normal.

use crate::Vec3;

/// Build two unit tangents that complete `n` to a right-handed basis.
///
/// Branchless construction of Duff et al. (2017). `n` must be unit length.
pub fn coordinate_system(n: Vec3) -> (Vec3, Vec3) {
    let sign = 1.0_f32.copysign(n.z);
    let a = -1.0 / (sign + n.z);
    let b = n.x * n.y * a;
    (
        Vec3::new(1.0 + sign * n.x * n.x * a, sign * b, -sign * n.x),
        Vec3::new(b, sign + n.y * n.y * a, -n.y),
    )
}

/// Map a vector from the local frame (normal = +Z) into world space.
#[inline]
pub fn from_local(v: Vec3, n: Vec3) -> Vec3 {
    let (s, t) = coordinate_system(n);
    v.x * s + v.y * t + v.z * n
}
