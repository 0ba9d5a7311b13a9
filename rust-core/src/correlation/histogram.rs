// Distance binning and the raw accumulators shared by every correlator

use serde::{Deserialize, Serialize};

use crate::error::BooError;
use crate::Result;

/// Uniform bins over [0, max_distance).
///
/// Bin index of a distance d is floor(d / max_distance * n_bins). Distances at or
/// beyond `max_distance` fall outside every bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBinning")]
pub struct Binning {
    n_bins: usize,
    max_distance: f64,
}

#[derive(Deserialize)]
struct RawBinning {
    n_bins: usize,
    max_distance: f64,
}

impl TryFrom<RawBinning> for Binning {
    type Error = BooError;

    fn try_from(raw: RawBinning) -> Result<Self> {
        Binning::new(raw.n_bins, raw.max_distance)
    }
}

impl Binning {
    pub fn new(n_bins: usize, max_distance: f64) -> Result<Self> {
        if n_bins == 0 || !(max_distance.is_finite() && max_distance > 0.0) {
            return Err(BooError::InvalidBinning { n_bins, max_distance });
        }
        Ok(Self { n_bins, max_distance })
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn bin_width(&self) -> f64 {
        self.max_distance / self.n_bins as f64
    }

    /// Bin of `distance`, or `None` when it is outside [0, max_distance).
    #[inline]
    pub fn bin_of(&self, distance: f64) -> Option<usize> {
        if !(0.0..self.max_distance).contains(&distance) {
            return None;
        }
        let bin = (distance / self.max_distance * self.n_bins as f64) as usize;
        // Rounding can push a distance just below the maximum onto n_bins
        (bin < self.n_bins).then_some(bin)
    }

    /// Same as [`Binning::bin_of`] for a squared distance.
    #[inline]
    pub fn bin_of_squared(&self, distance2: f64) -> Option<usize> {
        if distance2 >= self.max_distance * self.max_distance {
            return None;
        }
        self.bin_of(distance2.sqrt())
    }

    /// Midpoint of every bin.
    pub fn bin_centers(&self) -> Vec<f64> {
        let w = self.bin_width();
        (0..self.n_bins).map(|b| (b as f64 + 0.5) * w).collect()
    }
}

/// Per-bin pair counts and per-bin sums of one or more real channels.
///
/// Sums are raw; normalising by the pair count or an ideal-gas reference is
/// left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationHistogram {
    binning: Binning,
    n_channels: usize,
    counts: Vec<u64>,
    // bin-major: sums[bin * n_channels + channel]
    sums: Vec<f64>,
}

impl CorrelationHistogram {
    pub fn new(binning: Binning, n_channels: usize) -> Self {
        Self {
            binning,
            n_channels,
            counts: vec![0; binning.n_bins()],
            sums: vec![0.0; binning.n_bins() * n_channels],
        }
    }

    /// An all-zero histogram with the same shape.
    pub fn empty_like(&self) -> Self {
        Self::new(self.binning, self.n_channels)
    }

    pub fn binning(&self) -> &Binning {
        &self.binning
    }

    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    /// Add one pair to `bin` with one value per channel.
    #[inline]
    pub fn add(&mut self, bin: usize, values: &[f64]) {
        debug_assert_eq!(values.len(), self.n_channels);
        self.counts[bin] += 1;
        let start = bin * self.n_channels;
        for (s, v) in self.sums[start..start + self.n_channels].iter_mut().zip(values) {
            *s += v;
        }
    }

    /// Bin `distance` and add the pair; returns false if it is out of range.
    #[inline]
    pub fn record(&mut self, distance: f64, values: &[f64]) -> bool {
        match self.binning.bin_of(distance) {
            Some(bin) => {
                self.add(bin, values);
                true
            }
            None => false,
        }
    }

    /// Elementwise sum of two partial histograms of the same shape.
    pub fn merge(mut self, other: Self) -> Self {
        self.merge_from(&other);
        self
    }

    pub fn merge_from(&mut self, other: &Self) {
        debug_assert_eq!(self.binning, other.binning);
        debug_assert_eq!(self.n_channels, other.n_channels);
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
        for (a, b) in self.sums.iter_mut().zip(&other.sums) {
            *a += b;
        }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Sum of channel `k` in every bin.
    pub fn channel(&self, k: usize) -> Vec<f64> {
        assert!(k < self.n_channels, "channel {} out of {}", k, self.n_channels);
        self.sums.iter().skip(k).step_by(self.n_channels).copied().collect()
    }

    pub fn sum(&self, bin: usize, k: usize) -> f64 {
        self.sums[bin * self.n_channels + k]
    }

    pub fn total_pairs(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn bin_centers(&self) -> Vec<f64> {
        self.binning.bin_centers()
    }
}
