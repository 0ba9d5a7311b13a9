// Spherical harmonics in the physics convention (Condon-Shortley phase included)
//
// Only the m >= 0 half is ever stored. Negative orders follow from
// Y_l^{-m} = (-1)^m conj(Y_l^m).

use nalgebra::{DMatrix, Vector3};
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::spherical::coordinates::{cartesian_to_spherical, SphericalCoords};

/// Associated Legendre function P_l^m(x) for 0 <= m <= l, with the (-1)^m phase.
///
/// `x` is clamped to [-1, 1].
pub fn associated_legendre(l: usize, m: usize, x: f64) -> f64 {
    debug_assert!(m <= l, "associated_legendre requires m <= l");
    let x = x.clamp(-1.0, 1.0);

    // P_m^m = (-1)^m (2m-1)!! (1-x²)^{m/2}
    let somx2 = ((1.0 - x) * (1.0 + x)).sqrt();
    let mut pmm = 1.0;
    let mut odd = 1.0;
    for _ in 0..m {
        pmm *= -odd * somx2;
        odd += 2.0;
    }
    if l == m {
        return pmm;
    }

    // P_{m+1}^m = x (2m+1) P_m^m
    let mut pmm1 = x * (2 * m + 1) as f64 * pmm;
    if l == m + 1 {
        return pmm1;
    }

    let mut pll = 0.0;
    for ll in (m + 2)..=l {
        pll = ((2 * ll - 1) as f64 * x * pmm1 - (ll + m - 1) as f64 * pmm) / (ll - m) as f64;
        pmm = pmm1;
        pmm1 = pll;
    }
    pll
}

/// sqrt((2l+1)/(4π) · (l-m)!/(l+m)!) without forming the factorials.
fn normalization(l: usize, m: usize) -> f64 {
    let mut ratio = 1.0;
    for k in (l - m + 1)..=(l + m) {
        ratio /= k as f64;
    }
    ((2 * l + 1) as f64 / (4.0 * PI) * ratio).sqrt()
}

/// Y_l^m(theta, phi) with `theta` the azimuth and `phi` the colatitude, for any |m| <= l.
pub fn spherical_harmonic(l: usize, m: i32, theta: f64, phi: f64) -> Complex64 {
    let abs_m = m.unsigned_abs() as usize;
    debug_assert!(abs_m <= l, "spherical_harmonic requires |m| <= l");
    let magnitude = normalization(l, abs_m) * associated_legendre(l, abs_m, phi.cos());
    let positive = Complex64::from_polar(magnitude, abs_m as f64 * theta);
    if m >= 0 {
        positive
    } else if abs_m % 2 == 0 {
        positive.conj()
    } else {
        -positive.conj()
    }
}

/// Fill `out[m]` with Y_l^m for m = 0..=l at the given angles.
pub fn ylm_row(l: usize, coords: &SphericalCoords, out: &mut [Complex64]) {
    debug_assert_eq!(out.len(), l + 1);
    let cos_phi = coords.phi.cos();
    for (m, slot) in out.iter_mut().enumerate() {
        let magnitude = normalization(l, m) * associated_legendre(l, m, cos_phi);
        *slot = Complex64::from_polar(magnitude, m as f64 * coords.theta);
    }
}

/// Project one displacement vector on the degree-`l` harmonics, m = 0..=l.
pub fn vector_to_ylm(v: &Vector3<f64>, l: usize) -> Vec<Complex64> {
    let mut row = vec![Complex64::new(0.0, 0.0); l + 1];
    ylm_row(l, &cartesian_to_spherical(v), &mut row);
    row
}

/// Project every vector on the degree-`l` harmonics.
///
/// Returns a (l+1) × n matrix: row m, column k holds Y_l^m of vector k.
pub fn project_to_ylm(vectors: &[Vector3<f64>], l: usize) -> DMatrix<Complex64> {
    let mut ylm = DMatrix::<Complex64>::zeros(l + 1, vectors.len());
    let mut row = vec![Complex64::new(0.0, 0.0); l + 1];
    for (k, v) in vectors.iter().enumerate() {
        ylm_row(l, &cartesian_to_spherical(v), &mut row);
        ylm.column_mut(k).copy_from_slice(&row);
    }
    ylm
}
