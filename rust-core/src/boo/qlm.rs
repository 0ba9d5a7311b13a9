// Per-particle spherical-harmonic coefficients and their coarse-graining over bonds

use log::debug;
use nalgebra::Vector3;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::BooError;
use crate::interfaces::{check_len, validate_bonds, Bond, Periodicity};
use crate::spherical::coordinates::cartesian_to_spherical;
use crate::spherical::harmonics::ylm_row;
use crate::Result;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Dense N × (l+1) store of qlm vectors, m = 0..=l per row.
///
/// Negative orders are never stored; [`QlmArray::component`] rebuilds them from
/// q_{l,-m} = (-1)^m conj(q_{l,m}).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QlmArray {
    degree: usize,
    coefficients: Vec<Complex64>,
}

impl QlmArray {
    /// All-zero coefficients for `n` particles.
    pub fn zeros(n: usize, degree: usize) -> Self {
        Self {
            degree,
            coefficients: vec![ZERO; n * (degree + 1)],
        }
    }

    /// Build from explicit rows; every row must hold l+1 coefficients.
    pub fn from_rows(degree: usize, rows: &[Vec<Complex64>]) -> Result<Self> {
        let mut coefficients = Vec::with_capacity(rows.len() * (degree + 1));
        for row in rows {
            check_len("qlm row", degree + 1, row.len())?;
            coefficients.extend_from_slice(row);
        }
        Ok(Self { degree, coefficients })
    }

    /// Degree l of the harmonics.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of particles (rows).
    pub fn len(&self) -> usize {
        self.coefficients.len() / (self.degree + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn row(&self, i: usize) -> &[Complex64] {
        let w = self.degree + 1;
        &self.coefficients[i * w..(i + 1) * w]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [Complex64] {
        let w = self.degree + 1;
        &mut self.coefficients[i * w..(i + 1) * w]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, Complex64> {
        self.coefficients.chunks_exact(self.degree + 1)
    }

    /// q_{l,m} of particle `i` for any -l <= m <= l.
    pub fn component(&self, i: usize, m: i32) -> Complex64 {
        qlm_component(self.row(i), m)
    }

    /// Row `i` expanded to m = -l..=l.
    pub fn full_row(&self, i: usize) -> Vec<Complex64> {
        let l = self.degree as i32;
        (-l..=l).map(|m| self.component(i, m)).collect()
    }
}

/// q_{l,m} from a half-range row, using the conjugate symmetry for m < 0.
///
/// # Panics
/// Panics if |m| exceeds the degree of the row.
#[inline]
pub fn qlm_component(row: &[Complex64], m: i32) -> Complex64 {
    let abs_m = m.unsigned_abs() as usize;
    let q = row[abs_m];
    if m >= 0 {
        q
    } else if abs_m % 2 == 0 {
        q.conj()
    } else {
        -q.conj()
    }
}

fn add_assign(acc: &mut [Complex64], other: &[Complex64]) {
    for (a, b) in acc.iter_mut().zip(other) {
        *a += b;
    }
}

fn bond_counts(bonds: &[Bond], n: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n];
    for &(i, j) in bonds {
        counts[i] += 1;
        counts[j] += 1;
    }
    counts
}

/// qlm of every particle from a bond list.
///
/// Each bond's displacement (from i to j, folded by `periodicity`) is projected
/// on Y_l^m and added to both endpoints with the same sign. Sums are divided by
/// max(1, bond count), so isolated particles keep an all-zero row.
pub fn bonds_to_qlm(
    positions: &[Vector3<f64>],
    bonds: &[Bond],
    l: usize,
    periodicity: &Periodicity,
) -> Result<QlmArray> {
    validate_bonds(bonds, positions.len())?;
    debug!(
        "bonds_to_qlm: {} particles, {} bonds, l = {}",
        positions.len(),
        bonds.len(),
        l
    );

    let mut qlm = QlmArray::zeros(positions.len(), l);
    let mut ylm = vec![ZERO; l + 1];
    for &(i, j) in bonds {
        let v = periodicity.displacement(&positions[i], &positions[j]);
        ylm_row(l, &cartesian_to_spherical(&v), &mut ylm);
        add_assign(qlm.row_mut(i), &ylm);
        add_assign(qlm.row_mut(j), &ylm);
    }

    let counts = bond_counts(bonds, positions.len());
    for (p, &count) in counts.iter().enumerate() {
        let inv = 1.0 / count.max(1) as f64;
        qlm.row_mut(p).iter_mut().for_each(|c| *c *= inv);
    }
    Ok(qlm)
}

/// qlm of particle `i` from an explicit list of neighbour indices.
///
/// The mean of Y_l^m over the vectors from `i` to each neighbour; zero for an
/// empty list.
pub fn single_position_qlm(
    positions: &[Vector3<f64>],
    i: usize,
    neighbours: &[usize],
    l: usize,
) -> Result<Vec<Complex64>> {
    let n = positions.len();
    if let Some(&bad) = std::iter::once(&i).chain(neighbours).find(|&&k| k >= n) {
        return Err(BooError::IndexOutOfRange { index: bad, len: n });
    }
    let mut acc = vec![ZERO; l + 1];
    let mut ylm = vec![ZERO; l + 1];
    for &j in neighbours {
        ylm_row(l, &cartesian_to_spherical(&(positions[j] - positions[i])), &mut ylm);
        add_assign(&mut acc, &ylm);
    }
    let inv = 1.0 / neighbours.len().max(1) as f64;
    acc.iter_mut().for_each(|c| *c *= inv);
    Ok(acc)
}

/// Coarse-grain qlm over each particle's neighbour shell.
///
/// Q[p] = (q[p] + Σ_{neighbours} q[n]) / (1 + #neighbours). The returned mask is
/// `inside[p]` AND-ed with `inside` of every bonded neighbour; particles failing
/// it get Q = 0.
pub fn coarsegrain_qlm(
    qlm: &QlmArray,
    bonds: &[Bond],
    inside: &[bool],
) -> Result<(QlmArray, Vec<bool>)> {
    let n = qlm.len();
    check_len("inside mask", n, inside.len())?;
    validate_bonds(bonds, n)?;

    let mut valid = inside.to_vec();
    for &(i, j) in bonds {
        valid[i] &= inside[j];
        valid[j] &= inside[i];
    }

    // Self contribution first, then every bond adds each endpoint to the other
    let mut coarse = qlm.clone();
    for &(i, j) in bonds {
        if valid[i] {
            add_assign(coarse.row_mut(i), qlm.row(j));
        }
        if valid[j] {
            add_assign(coarse.row_mut(j), qlm.row(i));
        }
    }

    let counts = bond_counts(bonds, n);
    for p in 0..n {
        let row = coarse.row_mut(p);
        if valid[p] {
            let inv = 1.0 / (1 + counts[p]) as f64;
            row.iter_mut().for_each(|c| *c *= inv);
        } else {
            row.fill(ZERO);
        }
    }
    debug!(
        "coarsegrain_qlm: {} of {} particles keep a valid neighbourhood",
        valid.iter().filter(|&&v| v).count(),
        n
    );
    Ok((coarse, valid))
}
