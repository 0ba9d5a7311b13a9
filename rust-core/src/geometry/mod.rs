// Geometry module: spatial bookkeeping for particle clouds
// Bounding boxes for edge masks and a cell list for fixed-radius pair queries

// ======================== MODULE DECLARATIONS ========================
pub mod bounding_box;
pub mod spatial_grid;

// Test modules
mod _tests_bounding_box;

// ======================== BOUNDING BOX ========================
pub use bounding_box::{
    BoundingBox3D, // struct - axis-aligned box with min/max corners
    inside_mask,   // fn(positions, margin: f64) -> Vec<bool> - at least margin from every face
};
// BoundingBox3D impl methods:
//   new(min, max) -> Self                                - box from corners
//   from_points(points) -> Option<Self>                  - enclosing box of a cloud
//   size(&self) -> Vector3<f64>                          - edge lengths
//   distance_to_boundary(&self, point) -> f64            - distance to closest face
//   inside_mask(&self, points, margin) -> Vec<bool>      - per-point margin test

// ======================== SPATIAL INDEX ========================
pub use spatial_grid::SpatialGrid; // struct - uniform cell list
// SpatialGrid impl methods:
//   build(positions, cutoff: f64) -> Self                - cells >= cutoff, at most 8 per point
//   for_each_within(&self, positions, point, radius, f) - visits (j, distance²) below radius
//   pairs_within(&self, positions, cutoff) -> Vec<Bond>  - unordered pairs i < j
//   n_cells(&self) / dims(&self) / cell_size(&self)
