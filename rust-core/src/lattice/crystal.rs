use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Centerings of the cubic Bravais lattices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Centering {
    Primitive,
    BodyCentered,
    FaceCentered,
}

impl Centering {
    /// Fractional positions of the lattice points in one conventional cell.
    pub fn basis(&self) -> &'static [[f64; 3]] {
        match self {
            Centering::Primitive => &[[0.0, 0.0, 0.0]],
            Centering::BodyCentered => &[[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]],
            Centering::FaceCentered => &[
                [0.0, 0.0, 0.0],
                [0.5, 0.5, 0.0],
                [0.5, 0.0, 0.5],
                [0.0, 0.5, 0.5],
            ],
        }
    }
}

/// Points of a block of `cells`³ conventional cubic cells of side `a`.
///
/// The block spans [0, cells·a) on every axis, so it tiles a periodic box of
/// side cells·a.
pub fn cubic_lattice(centering: Centering, cells: usize, a: f64) -> Vec<Vector3<f64>> {
    let basis = centering.basis();
    let mut points = Vec::with_capacity(cells.pow(3) * basis.len());
    for i in 0..cells {
        for j in 0..cells {
            for k in 0..cells {
                let corner = Vector3::new(i as f64, j as f64, k as f64);
                for b in basis {
                    points.push((corner + Vector3::from(*b)) * a);
                }
            }
        }
    }
    points
}

/// Distance between nearest neighbours for conventional cell side `a`.
pub fn nearest_neighbor_distance(centering: Centering, a: f64) -> f64 {
    match centering {
        Centering::Primitive => a,
        Centering::BodyCentered => a * 3.0_f64.sqrt() / 2.0,
        Centering::FaceCentered => a / 2.0_f64.sqrt(),
    }
}

/// Number of nearest neighbours of every lattice point.
pub fn coordination_number(centering: Centering) -> usize {
    match centering {
        Centering::Primitive => 6,
        Centering::BodyCentered => 8,
        Centering::FaceCentered => 12,
    }
}
