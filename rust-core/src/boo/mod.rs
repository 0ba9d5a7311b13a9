// BOO module: bond-orientational order coefficients and their rotational invariants
// This module aggregates bond harmonics per particle and reduces them to scalar descriptors

// ======================== MODULE DECLARATIONS ========================
pub mod invariants;
pub mod qlm;


// ======================== COEFFICIENT STORAGE & AGGREGATION ========================
pub use qlm::{
    QlmArray,            // struct - N x (l+1) complex coefficients, m = 0..=l
    qlm_component,       // fn(row: &[Complex64], m: i32) -> Complex64 - negative m by symmetry
    bonds_to_qlm,        // fn(positions, bonds, l, periodicity) -> Result<QlmArray> - bond average
    single_position_qlm, // fn(positions, i, neighbours, l) -> Result<Vec<Complex64>> - one particle
    coarsegrain_qlm,     // fn(qlm, bonds, inside) -> Result<(QlmArray, Vec<bool>)> - shell average
};
// QlmArray impl methods:
//   zeros(n, degree) -> Self                     - all-zero coefficients
//   from_rows(degree, rows) -> Result<Self>      - from explicit half-range rows
//   degree(&self) -> usize / len(&self) -> usize
//   row(&self, i) -> &[Complex64]                - half-range row of particle i
//   component(&self, i, m: i32) -> Complex64     - any -l <= m <= l
//   full_row(&self, i) -> Vec<Complex64>         - m = -l..=l materialised

// ======================== ROTATIONAL INVARIANTS ========================
pub use invariants::{
    boo_product,     // fn(a: &QlmArray, b: &QlmArray) -> Result<Vec<f64>> - 4π/(2l+1) Σ_m a·b*
    boo_product_row, // fn(a: &[Complex64], b: &[Complex64]) -> Result<f64> - rows of equal width
    ql,              // fn(qlm: &QlmArray) -> Vec<f64>
    ql_row,          // fn(row: &[Complex64]) -> Result<f64>
    ql_full_range,   // fn(row: &[Complex64]) -> Result<f64> - explicit -l..=l sum
    wl,              // fn(qlm: &QlmArray) -> Result<Vec<f64>> - even l <= 10
    wl_complex,      // fn(qlm: &QlmArray) -> Result<Vec<Complex64>> - before taking the real part
    wl_complex_row,  // fn(row: &[Complex64]) -> Result<Complex64> - even l <= 10
};
