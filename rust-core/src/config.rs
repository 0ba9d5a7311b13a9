// Constants

// Tolerances
pub const DEGENERATE_TOLERANCE: f64 = 1.0; // r² + tolerance == tolerance marks a zero vector
pub const WL_IMAGINARY_TOLERANCE: f64 = 1e-9; // |Im(wl)| relative to max(|Re(wl)|, qlm³)

// Defaults
pub const DEFAULT_DEGREE: usize = 6; // l = 6 is the usual choice for dense packings
pub const MAX_WIGNER_DEGREE: usize = 10; // Largest degree of the hard-coded Wigner 3-j table

// Work size above which the exhaustive correlators log a scaling warning
pub const QUADRATIC_WARN_THRESHOLD: usize = 50_000;
