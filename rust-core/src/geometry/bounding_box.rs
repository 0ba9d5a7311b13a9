// 3D bounding box module: axis-aligned bounds of a point cloud
// Used to decide which particles sit far enough from the sampled region's edges

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// 3D axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox3D {
    /// Minimum corner
    pub min: Vector3<f64>,
    /// Maximum corner
    pub max: Vector3<f64>,
}

impl BoundingBox3D {
    /// Create a new bounding box from minimum and maximum corners
    ///
    /// # Panics
    /// Panics in debug mode if a min coordinate is greater than the matching max coordinate
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "Minimum coordinates must be less than or equal to maximum coordinates"
        );
        Self { min, max }
    }

    /// Smallest box enclosing all `points`, `None` for an empty slice
    pub fn from_points(points: &[Vector3<f64>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some(Self { min, max })
    }

    /// Edge lengths along x, y, z
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Distance from an inner point to the closest face (negative outside)
    pub fn distance_to_boundary(&self, point: &Vector3<f64>) -> f64 {
        let low = point - self.min;
        let high = self.max - point;
        low.min().min(high.min())
    }

    /// Flag every point lying at least `margin` away from all faces
    pub fn inside_mask(&self, points: &[Vector3<f64>], margin: f64) -> Vec<bool> {
        points
            .iter()
            .map(|p| self.distance_to_boundary(p) >= margin)
            .collect()
    }
}

/// Flag the particles whose distance to every face of the cloud's own bounding
/// box is at least `margin`.
///
/// With `margin = maxdist` this gives the usual `is_center` mask of
/// [`crate::correlation::gg_l`]; with `margin` equal to the bond length it gives
/// the `inside` mask of [`crate::boo::coarsegrain_qlm`].
pub fn inside_mask(positions: &[Vector3<f64>], margin: f64) -> Vec<bool> {
    match BoundingBox3D::from_points(positions) {
        Some(bb) => bb.inside_mask(positions, margin),
        None => Vec::new(),
    }
}
