//! Typed errors for bond-orientational order computations.
//!
//! Only input-contract violations are reported here. Documented special-value
//! policies (zero-length bond vectors, particles without bonds) are not errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BooError {
    /// Two arrays that must run in parallel have different lengths.
    #[error("length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A bond references a particle that does not exist.
    #[error("bond {bond} references particle {index}, but only {len} particles exist")]
    BondIndexOutOfRange { bond: usize, index: usize, len: usize },

    /// A particle index outside the position array.
    #[error("particle index {index} out of range for {len} particles")]
    IndexOutOfRange { index: usize, len: usize },

    /// A coefficient row without any entry; a degree-l row holds l+1.
    #[error("empty qlm row")]
    EmptyRow,

    /// A bond joins a particle to itself.
    #[error("bond {bond} joins particle {index} to itself")]
    SelfBond { bond: usize, index: usize },

    /// Two coefficient arrays were built for different degrees.
    #[error("degree mismatch: {left} vs {right}")]
    DegreeMismatch { left: usize, right: usize },

    /// The Wigner 3-j table only covers even degrees up to 10.
    #[error("degree l={0} is not covered by the Wigner 3-j table (even l <= 10 only)")]
    UnsupportedDegree(usize),

    /// A Wigner 3-j lookup outside the table domain.
    #[error("Wigner 3-j symbol (l={l}; {m1}, {m2}, {m3}) is outside the table domain")]
    Wigner3jDomain { l: usize, m1: i32, m2: i32, m3: i32 },

    /// Histogram parameters that cannot produce a binning.
    #[error("invalid binning: {n_bins} bins up to distance {max_distance}")]
    InvalidBinning { n_bins: usize, max_distance: f64 },

    /// A periodic box size that is not strictly positive and finite.
    #[error("invalid periodic box size {0}")]
    InvalidPeriod(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_bond_index() {
        let err = BooError::BondIndexOutOfRange { bond: 3, index: 12, len: 10 };
        assert_eq!(
            err.to_string(),
            "bond 3 references particle 12, but only 10 particles exist"
        );
    }

    #[test]
    fn display_unsupported_degree() {
        assert_eq!(
            BooError::UnsupportedDegree(7).to_string(),
            "degree l=7 is not covered by the Wigner 3-j table (even l <= 10 only)"
        );
    }

    #[test]
    fn display_particle_index() {
        let err = BooError::IndexOutOfRange { index: 4, len: 1 };
        assert_eq!(err.to_string(), "particle index 4 out of range for 1 particles");
        assert_eq!(BooError::EmptyRow.to_string(), "empty qlm row");
    }
}
