use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::DEGENERATE_TOLERANCE;

/// Spherical coordinates of a displacement vector.
///
/// `phi` is the colatitude in [0, π] and `theta` the azimuth in [0, 2π).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SphericalCoords {
    pub r: f64,
    pub phi: f64,
    pub theta: f64,
}

impl SphericalCoords {
    /// True when the angles were left at zero by the degenerate-vector policy.
    pub fn is_polar_or_degenerate(&self) -> bool {
        self.phi == 0.0 && self.theta == 0.0
    }
}

/// Convert a Cartesian vector to (r, phi, theta).
///
/// Zero-length vectors (r² + 1 == 1) and vectors lying on the z axis (r² == z²)
/// keep phi = theta = 0. The radius is always set.
pub fn cartesian_to_spherical(v: &Vector3<f64>) -> SphericalCoords {
    let r2 = v.norm_squared();
    let r = r2.sqrt();
    if r2 == v.z * v.z || r2 + DEGENERATE_TOLERANCE == DEGENERATE_TOLERANCE {
        return SphericalCoords { r, phi: 0.0, theta: 0.0 };
    }
    let phi = (v.z / r).clamp(-1.0, 1.0).acos();
    let mut theta = v.y.atan2(v.x);
    if theta < 0.0 {
        theta += 2.0 * PI;
    }
    // atan2 of a tiny negative y can round up to exactly 2π
    if theta >= 2.0 * PI {
        theta -= 2.0 * PI;
    }
    SphericalCoords { r, phi, theta }
}

/// Vectorised form of [`cartesian_to_spherical`].
pub fn cartesian_to_spherical_all(vectors: &[Vector3<f64>]) -> Vec<SphericalCoords> {
    vectors.iter().map(cartesian_to_spherical).collect()
}
