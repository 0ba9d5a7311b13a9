//! Bond-orientational order library
//!
//! Steinhardt-type local order descriptors for 3D particle configurations:
//! spherical-harmonic projection of bond vectors, per-particle and
//! coarse-grained qlm coefficients, the rotational invariants ql and wl, and
//! distance-binned spatial correlations of those coefficients.

pub mod boo;
pub mod config;
pub mod correlation;
pub mod error;
pub mod geometry;
pub mod interfaces;
pub mod lattice;
pub mod spherical;

pub use error::BooError;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, BooError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
