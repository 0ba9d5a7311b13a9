// Neighbour lists from a distance cutoff

use log::debug;
use nalgebra::Vector3;

use crate::geometry::SpatialGrid;
use crate::interfaces::{Bond, Periodicity};

/// All unordered pairs (i < j) closer than `cutoff`.
///
/// Open boundaries go through a cell list; periodic boxes are searched
/// exhaustively under the minimal image. A non-positive cutoff gives no bonds.
pub fn cutoff_bonds(
    positions: &[Vector3<f64>],
    cutoff: f64,
    periodicity: &Periodicity,
) -> Vec<Bond> {
    if !(cutoff > 0.0) {
        return Vec::new();
    }
    let bonds = match periodicity {
        Periodicity::None => SpatialGrid::build(positions, cutoff).pairs_within(positions, cutoff),
        Periodicity::Box(_) => {
            let cutoff_sq = cutoff * cutoff;
            let mut bonds = Vec::new();
            for i in 0..positions.len() {
                for j in (i + 1)..positions.len() {
                    let d = periodicity.displacement(&positions[i], &positions[j]);
                    if d.norm_squared() < cutoff_sq {
                        bonds.push((i, j));
                    }
                }
            }
            bonds
        }
    };
    debug!(
        "cutoff_bonds: {} bonds below {} among {} particles",
        bonds.len(),
        cutoff,
        positions.len()
    );
    bonds
}
