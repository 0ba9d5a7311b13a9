// Correlation module: distance-binned spatial correlations of bond-orientational order
// Each correlator returns raw per-bin pair counts and cross-product sums

// ======================== MODULE DECLARATIONS ========================
pub mod correlators;
pub mod histogram;

// Test modules
mod _tests_correlators;

// ======================== BINNING & HISTOGRAMS ========================
pub use histogram::{
    Binning,              // struct - n_bins uniform bins over [0, max_distance)
    CorrelationHistogram, // struct - pair counts + per-channel sums
};
// Binning impl methods:
//   new(n_bins, max_distance) -> Result<Self>      - rejects zero bins and non-positive distances
//   bin_of(&self, distance) -> Option<usize>       - floor(d / max * n_bins)
//   bin_of_squared(&self, distance2) -> Option<usize>
//   bin_width(&self) -> f64 / bin_centers(&self) -> Vec<f64>
// CorrelationHistogram impl methods:
//   new(binning, n_channels) -> Self
//   add(&mut self, bin, values) / record(&mut self, distance, values) -> bool
//   merge(self, other) -> Self                     - elementwise sum of partials
//   counts(&self) -> &[u64] / channel(&self, k) -> Vec<f64> / total_pairs(&self) -> u64

// ======================== CORRELATORS ========================
pub use correlators::{
    gg_l,           // fn(positions, qlm, coarse, is_center, binning) - open boundaries, cell list
    periodic_gg_l,  // fn(positions, box_side, qlm, coarse, n_bins) - cubic box, all pairs
    steinhardt_g_l, // fn(positions, bonds, is_center, binning, l) - bond midpoints
};
// All three return Result<CorrelationHistogram>: 2 channels (qlm, Qlm) for the
// particle correlators, 1 for the bond correlator
