// Lattice module: cubic crystal point clouds and cutoff neighbour lists
// Used by the demo binary, the benchmarks and as reference structures in tests

// ======================== MODULE DECLARATIONS ========================
pub mod bonds;
pub mod crystal;


// ======================== CUBIC CRYSTALS ========================
pub use crystal::{
    Centering,                 // enum - Primitive, BodyCentered, FaceCentered
    cubic_lattice,             // fn(centering, cells, a) -> Vec<Vector3<f64>> - cells³ cells
    nearest_neighbor_distance, // fn(centering, a: f64) -> f64
    coordination_number,       // fn(centering) -> usize - 6, 8 or 12
};
// Centering impl methods:
//   basis(&self) -> &'static [[f64; 3]]   - fractional points of one conventional cell

// ======================== NEIGHBOUR LISTS ========================
pub use bonds::cutoff_bonds; // fn(positions, cutoff, periodicity) -> Vec<Bond> - i < j
