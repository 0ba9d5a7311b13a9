// Spherical module: angular projection of bond vectors and angular-momentum coupling
// This module turns displacement vectors into spherical-harmonic coefficients

// ======================== MODULE DECLARATIONS ========================
pub mod coordinates;
pub mod harmonics;
pub mod wigner3j;

mod _tests_wigner3j;

// ======================== COORDINATES ========================
pub use coordinates::{
    SphericalCoords,            // struct - (r, phi colatitude, theta azimuth)
    cartesian_to_spherical,     // fn(v) -> SphericalCoords - zero angles if degenerate
    cartesian_to_spherical_all, // fn(vectors: &[Vector3<f64>]) -> Vec<SphericalCoords>
};

// ======================== SPHERICAL HARMONICS ========================
pub use harmonics::{
    associated_legendre, // fn(l: usize, m: usize, x: f64) -> f64 - P_l^m with Condon-Shortley phase
    spherical_harmonic,  // fn(l: usize, m: i32, theta: f64, phi: f64) -> Complex64 - any |m| <= l
    ylm_row,             // fn(l, coords, out: &mut [Complex64]) - m = 0..=l
    vector_to_ylm,       // fn(v: &Vector3<f64>, l: usize) -> Vec<Complex64>
    project_to_ylm,      // fn(vectors: &[Vector3<f64>], l: usize) -> DMatrix<Complex64> - (l+1) x n
};

// ======================== WIGNER 3-J TABLE ========================
pub use wigner3j::{
    wigner3j,            // fn(l: usize, m1: i32, m2: i32, m3: i32) -> Result<f64> - checked lookup
    is_supported_degree, // fn(l: usize) -> bool - even l <= 10
    table_len,           // fn(l: usize) -> Option<usize>
};
