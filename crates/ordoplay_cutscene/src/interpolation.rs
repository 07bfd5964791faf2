// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interpolation helpers for camera moves.

/// A 3D point or offset
pub type Vec3 = [f32; 3];

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two floats
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Interpolate Vec3
    pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
        [
            Self::lerp(a[0], b[0], t),
            Self::lerp(a[1], b[1], t),
            Self::lerp(a[2], b[2], t),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(Interpolation::lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(Interpolation::lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(Interpolation::lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn test_lerp_vec3_midpoint() {
        let mid = Interpolation::lerp_vec3([0.0, 0.0, 0.0], [10.0, -4.0, 2.0], 0.5);
        assert_eq!(mid, [5.0, -2.0, 1.0]);
    }
}
