// Distance-binned spatial correlations of bond-orientational order
//
// Three separate pair conventions are kept on purpose:
//   gg_l           ordered (center, any) pairs, self pairs dropped, cell-list search
//   periodic_gg_l  unordered pairs i < j under the minimal image, exhaustive
//   steinhardt_g_l ordered (valid bond, any other bond) pairs by midpoint, exhaustive

use log::{debug, warn};
use nalgebra::Vector3;
use num_complex::Complex64;

use crate::boo::invariants::product_of_rows;
use crate::boo::QlmArray;
use crate::config::QUADRATIC_WARN_THRESHOLD;
use crate::correlation::histogram::{Binning, CorrelationHistogram};
use crate::error::BooError;
use crate::geometry::SpatialGrid;
use crate::interfaces::{check_len, periodic_difference, validate_bonds, Bond};
use crate::spherical::vector_to_ylm;
use crate::Result;

// ======================== ACCUMULATION ========================

/// Run `visit` for every outer index and merge the partial histograms.
///
/// With the `parallel` feature each rayon task folds into its own histogram;
/// partials are summed elementwise at the end.
fn accumulate<F>(
    binning: Binning,
    n_channels: usize,
    n_outer: usize,
    visit: F,
) -> CorrelationHistogram
where
    F: Fn(usize, &mut CorrelationHistogram) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..n_outer)
            .into_par_iter()
            .fold(
                || CorrelationHistogram::new(binning, n_channels),
                |mut hist, i| {
                    visit(i, &mut hist);
                    hist
                },
            )
            .reduce(|| CorrelationHistogram::new(binning, n_channels), CorrelationHistogram::merge)
    }
    #[cfg(not(feature = "parallel"))]
    {
        let mut hist = CorrelationHistogram::new(binning, n_channels);
        for i in 0..n_outer {
            visit(i, &mut hist);
        }
        hist
    }
}

fn check_pair_inputs(n: usize, qlm: &QlmArray, coarse: &QlmArray) -> Result<()> {
    check_len("qlm array", n, qlm.len())?;
    check_len("coarse-grained qlm array", n, coarse.len())?;
    if qlm.degree() != coarse.degree() {
        return Err(BooError::DegreeMismatch {
            left: qlm.degree(),
            right: coarse.degree(),
        });
    }
    Ok(())
}

fn warn_if_quadratic(name: &str, n: usize) {
    if n > QUADRATIC_WARN_THRESHOLD {
        warn!(
            "{}: exhaustive O(n²) pass over {} items; prune neighbours first for large inputs",
            name, n
        );
    }
}

// ======================== CORRELATORS ========================

/// Correlation of qlm and Qlm around center particles, open boundaries.
///
/// Every particle `i` with `is_center[i]` is paired with every other particle
/// closer than `binning.max_distance()`; pairs are found through a cell list
/// over all positions. Channel 0 accumulates the qlm product, channel 1 the
/// Qlm product. A pair of two centers is counted once from each side.
pub fn gg_l(
    positions: &[Vector3<f64>],
    qlm: &QlmArray,
    coarse: &QlmArray,
    is_center: &[bool],
    binning: &Binning,
) -> Result<CorrelationHistogram> {
    let n = positions.len();
    check_pair_inputs(n, qlm, coarse)?;
    check_len("center mask", n, is_center.len())?;

    let binning = *binning;
    let max_distance = binning.max_distance();
    let grid = SpatialGrid::build(positions, max_distance);
    debug!(
        "gg_l: cell list of {:?} cells with side {:.4}",
        grid.dims(),
        grid.cell_size()
    );
    let centers: Vec<usize> = (0..n).filter(|&i| is_center[i]).collect();
    debug!(
        "gg_l: {} centers among {} particles, {} bins up to {}",
        centers.len(),
        n,
        binning.n_bins(),
        max_distance
    );

    let hist = accumulate(binning, 2, centers.len(), |c, hist| {
        let i = centers[c];
        grid.for_each_within(positions, &positions[i], max_distance, |j, d2| {
            if j == i {
                return;
            }
            if let Some(bin) = binning.bin_of_squared(d2) {
                let pq = product_of_rows(qlm.row(i), qlm.row(j));
                let pqc = product_of_rows(coarse.row(i), coarse.row(j));
                hist.add(bin, &[pq, pqc]);
            }
        });
    });
    debug!("gg_l: {} pairs binned", hist.total_pairs());
    Ok(hist)
}

/// Correlation of qlm and Qlm in a cubic periodic box of side `box_side`.
///
/// All unordered pairs are visited once. Distances use the minimal image and
/// bins span [0, box_side / 2). Channel 0 is the qlm product, channel 1 the
/// Qlm product.
pub fn periodic_gg_l(
    positions: &[Vector3<f64>],
    box_side: f64,
    qlm: &QlmArray,
    coarse: &QlmArray,
    n_bins: usize,
) -> Result<CorrelationHistogram> {
    if !(box_side.is_finite() && box_side > 0.0) {
        return Err(BooError::InvalidPeriod(box_side));
    }
    let n = positions.len();
    check_pair_inputs(n, qlm, coarse)?;
    let binning = Binning::new(n_bins, box_side / 2.0)?;
    warn_if_quadratic("periodic_gg_l", n);
    debug!("periodic_gg_l: {} particles, box side {}, {} bins", n, box_side, n_bins);

    let hist = accumulate(binning, 2, n, |i, hist| {
        let pi = &positions[i];
        for j in (i + 1)..n {
            let pj = &positions[j];
            let d2: f64 = (0..3)
                .map(|k| periodic_difference(pi[k], pj[k], box_side).powi(2))
                .sum();
            if let Some(bin) = binning.bin_of_squared(d2) {
                let pq = product_of_rows(qlm.row(i), qlm.row(j));
                let pqc = product_of_rows(coarse.row(i), coarse.row(j));
                hist.add(bin, &[pq, pqc]);
            }
        }
    });
    Ok(hist)
}

/// Midpoint and Y_l^m of every bond, the bond vector pointing from j to i.
fn bond_harmonics(
    positions: &[Vector3<f64>],
    bonds: &[Bond],
    l: usize,
) -> (Vec<Vector3<f64>>, Vec<Vec<Complex64>>) {
    bonds
        .iter()
        .map(|&(i, j)| {
            let cart = positions[i] - positions[j];
            (positions[j] + 0.5 * cart, vector_to_ylm(&cart, l))
        })
        .unzip()
}

/// Correlation of the bond harmonics themselves, located at bond midpoints.
///
/// Outer bonds are those whose two endpoints are both centers; each is paired
/// with every other bond. The single channel holds the product of the two
/// bonds' Y_l^m vectors.
pub fn steinhardt_g_l(
    positions: &[Vector3<f64>],
    bonds: &[Bond],
    is_center: &[bool],
    binning: &Binning,
    l: usize,
) -> Result<CorrelationHistogram> {
    check_len("center mask", positions.len(), is_center.len())?;
    validate_bonds(bonds, positions.len())?;

    let binning = *binning;
    let (midpoints, harmonics) = bond_harmonics(positions, bonds, l);
    let outer: Vec<usize> = bonds
        .iter()
        .enumerate()
        .filter(|&(_, &(i, j))| is_center[i] && is_center[j])
        .map(|(b, _)| b)
        .collect();
    warn_if_quadratic("steinhardt_g_l", bonds.len());
    debug!(
        "steinhardt_g_l: {} of {} bonds are centers, l = {}",
        outer.len(),
        bonds.len(),
        l
    );

    let hist = accumulate(binning, 1, outer.len(), |o, hist| {
        let b = outer[o];
        for c in 0..bonds.len() {
            if c == b {
                continue;
            }
            let d2 = (midpoints[b] - midpoints[c]).norm_squared();
            if let Some(bin) = binning.bin_of_squared(d2) {
                hist.add(bin, &[product_of_rows(&harmonics[b], &harmonics[c])]);
            }
        }
    });
    Ok(hist)
}
