// Definitions that are used throughout all modules

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::BooError;
use crate::Result;

/// An unordered neighbour relation between two particle indices.
pub type Bond = (usize, usize);

// Boundary conditions of the sampled region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Periodicity {
    /// Open boundaries, displacement vectors are used as they are.
    #[default]
    None,
    /// Periodic box with one period per axis. A non-positive period leaves
    /// that axis open.
    Box(Vector3<f64>),
}

impl Periodicity {
    /// Cubic periodic box of side `side`.
    pub fn cubic(side: f64) -> Result<Self> {
        if !(side.is_finite() && side > 0.0) {
            return Err(BooError::InvalidPeriod(side));
        }
        Ok(Periodicity::Box(Vector3::repeat(side)))
    }

    /// Mirrors the `periods = -1` convention: any non-positive value means open.
    pub fn from_periods(periods: [f64; 3]) -> Self {
        if periods.iter().all(|&p| p <= 0.0) {
            Periodicity::None
        } else {
            Periodicity::Box(Vector3::from(periods))
        }
    }

    pub fn is_periodic(&self) -> bool {
        matches!(self, Periodicity::Box(_))
    }

    /// Displacement from `from` to `to` under this periodicity.
    pub fn displacement(&self, from: &Vector3<f64>, to: &Vector3<f64>) -> Vector3<f64> {
        let diff = to - from;
        match self {
            Periodicity::None => diff,
            Periodicity::Box(periods) => minimal_image(diff, periods),
        }
    }
}

/// Fold each component of `v` into (-P/2, P/2] for its period P.
///
/// Axes whose period is not strictly positive are left untouched.
pub fn minimal_image(mut v: Vector3<f64>, periods: &Vector3<f64>) -> Vector3<f64> {
    for axis in 0..3 {
        let period = periods[axis];
        if period <= 0.0 {
            continue;
        }
        let mut x = v[axis] - period * (v[axis] / period).round();
        if x > period / 2.0 {
            x -= period;
        }
        if x <= -period / 2.0 {
            x += period;
        }
        v[axis] = x;
    }
    v
}

/// Wrap a single coordinate difference into [-L/2, L/2] for a cubic box of side L.
#[inline]
pub fn periodic_difference(a: f64, b: f64, side: f64) -> f64 {
    let d = a - b;
    d - side * (d / side).round()
}

/// Check that every bond references existing, distinct particles.
pub fn validate_bonds(bonds: &[Bond], n_particles: usize) -> Result<()> {
    for (b, &(i, j)) in bonds.iter().enumerate() {
        for index in [i, j] {
            if index >= n_particles {
                return Err(BooError::BondIndexOutOfRange {
                    bond: b,
                    index,
                    len: n_particles,
                });
            }
        }
        if i == j {
            return Err(BooError::SelfBond { bond: b, index: i });
        }
    }
    Ok(())
}

/// Check that a per-particle array has one entry per particle.
pub fn check_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(BooError::LengthMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}
