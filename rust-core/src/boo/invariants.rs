// Rotational invariants built from qlm rows: ql, wl and the cross product of two sets

use log::warn;
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::boo::qlm::{qlm_component, QlmArray};
use crate::config::WL_IMAGINARY_TOLERANCE;
use crate::error::BooError;
use crate::interfaces::check_len;
use crate::spherical::wigner3j::{is_supported_degree, wigner3j_unchecked};
use crate::Result;

#[inline]
fn prefactor(l: usize) -> f64 {
    4.0 * PI / (2 * l + 1) as f64
}

// Row kernels. Callers guarantee non-empty rows of equal width, and a
// tabulated degree for the third-order sum.

#[inline]
pub(crate) fn product_of_rows(a: &[Complex64], b: &[Complex64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let l = a.len() - 1;
    let head = (a[0].conj() * b[0]).re;
    let tail: f64 = a[1..].iter().zip(&b[1..]).map(|(x, y)| (x.conj() * y).re).sum();
    prefactor(l) * (2.0 * tail + head)
}

#[inline]
fn norm_sqr_full_range(row: &[Complex64]) -> f64 {
    row[0].norm_sqr() + 2.0 * row[1..].iter().map(|c| c.norm_sqr()).sum::<f64>()
}

#[inline]
fn ql_of_row(row: &[Complex64]) -> f64 {
    (prefactor(row.len() - 1) * norm_sqr_full_range(row)).sqrt()
}

fn wl_of_row(row: &[Complex64]) -> Complex64 {
    let l = row.len() - 1;
    debug_assert!(is_supported_degree(l));
    let li = l as i32;
    let mut w = Complex64::new(0.0, 0.0);
    for m1 in -li..=li {
        let q1 = qlm_component(row, m1);
        for m2 in -li..=li {
            let m3 = -m1 - m2;
            if -li <= m3 && m3 <= li {
                let coupling = wigner3j_unchecked(l, m1, m2, m3);
                w += coupling * q1 * qlm_component(row, m2) * qlm_component(row, m3);
            }
        }
    }
    w
}

fn check_row(row: &[Complex64]) -> Result<()> {
    if row.is_empty() {
        return Err(BooError::EmptyRow);
    }
    Ok(())
}

/// 4π/(2l+1) · Σ_{m=-l..l} Re(conj(a_m) b_m) for two half-range rows.
pub fn boo_product_row(a: &[Complex64], b: &[Complex64]) -> Result<f64> {
    check_row(a)?;
    check_len("second qlm row", a.len(), b.len())?;
    Ok(product_of_rows(a, b))
}

/// ql of one half-range row.
pub fn ql_row(row: &[Complex64]) -> Result<f64> {
    check_row(row)?;
    Ok(ql_of_row(row))
}

/// ql summed over the explicit m = -l..=l range, rebuilding negative orders.
pub fn ql_full_range(row: &[Complex64]) -> Result<f64> {
    check_row(row)?;
    let l = (row.len() - 1) as i32;
    let s: f64 = (-l..=l).map(|m| qlm_component(row, m).norm_sqr()).sum();
    Ok((prefactor(l as usize) * s).sqrt())
}

/// Unreduced third-order sum Σ W3j(l; m1 m2 m3) q_{m1} q_{m2} q_{m3} of one row.
pub fn wl_complex_row(row: &[Complex64]) -> Result<Complex64> {
    check_row(row)?;
    let l = row.len() - 1;
    if !is_supported_degree(l) {
        return Err(BooError::UnsupportedDegree(l));
    }
    Ok(wl_of_row(row))
}

fn wl_residual_is_small(w: Complex64, row: &[Complex64]) -> bool {
    // |w| is bounded by (Σ|q|²)^{3/2}; compare against that scale as well as Re(w)
    let scale = w.re.abs().max(norm_sqr_full_range(row).powf(1.5));
    w.im.abs() <= WL_IMAGINARY_TOLERANCE * scale.max(f64::MIN_POSITIVE)
}

/// Cross product of two coefficient sets, one value per particle.
pub fn boo_product(a: &QlmArray, b: &QlmArray) -> Result<Vec<f64>> {
    if a.degree() != b.degree() {
        return Err(BooError::DegreeMismatch {
            left: a.degree(),
            right: b.degree(),
        });
    }
    check_len("second qlm array", a.len(), b.len())?;
    Ok(a.rows().zip(b.rows()).map(|(x, y)| product_of_rows(x, y)).collect())
}

/// Second-order invariant ql of every particle.
pub fn ql(qlm: &QlmArray) -> Vec<f64> {
    qlm.rows().map(ql_of_row).collect()
}

/// Complex third-order sums of every particle, before taking the real part.
pub fn wl_complex(qlm: &QlmArray) -> Result<Vec<Complex64>> {
    if !is_supported_degree(qlm.degree()) {
        return Err(BooError::UnsupportedDegree(qlm.degree()));
    }
    Ok(qlm.rows().map(wl_of_row).collect())
}

/// Third-order invariant wl of every particle (even l <= 10).
///
/// The imaginary part vanishes for coefficients obeying the conjugate symmetry;
/// a residual above tolerance trips a debug assertion and is logged in release
/// builds.
pub fn wl(qlm: &QlmArray) -> Result<Vec<f64>> {
    if !is_supported_degree(qlm.degree()) {
        return Err(BooError::UnsupportedDegree(qlm.degree()));
    }
    let mut flagged = 0usize;
    let values = qlm
        .rows()
        .map(|row| {
            let w = wl_of_row(row);
            if !wl_residual_is_small(w, row) {
                flagged += 1;
            }
            w.re
        })
        .collect();
    debug_assert_eq!(flagged, 0, "wl: imaginary residual above tolerance");
    if flagged > 0 {
        warn!(
            "wl: {} particles have an imaginary residual above {}",
            flagged, WL_IMAGINARY_TOLERANCE
        );
    }
    Ok(values)
}
