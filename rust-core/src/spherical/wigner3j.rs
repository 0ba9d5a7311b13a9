// Wigner 3-j symbols (l l l; m1 m2 m3) for even l in 0..=10
//
// For three equal even degrees the symbol is invariant under any permutation
// of the columns and under m -> -m, so it only depends on the multiset
// {|m1|, |m2|, |m3|}. Since m1 + m2 + m3 = 0 the largest magnitude equals the
// sum of the two others, and the pair (largest, smallest) identifies an entry.
// Entries for a given largest magnitude k cover smallest = 0..=k/2 and start at
// MAGNITUDE_OFFSET[k].
//
// Each entry is the closed form c·sqrt(p/q) evaluated once to f64.

use crate::config::MAX_WIGNER_DEGREE;
use crate::error::BooError;
use crate::Result;

const MAGNITUDE_OFFSET: [usize; 11] = [0, 1, 2, 4, 6, 9, 12, 16, 20, 25, 30];

const W3J_L0: [f64; 1] = [1.0];

const W3J_L2: [f64; 4] = [
    -0.23904572186687872, 0.11952286093343936, 0.23904572186687872, -0.29277002188455997,
];

const W3J_L4: [f64; 9] = [
    0.13409704688030225, -0.06704852344015112, -0.08194819531574027, 0.1413506985480439,
    0.15644655469368596, -0.06232979933389715, 0.10429770312912397, -0.16490914830605122,
    0.18698939800169145,
];

const W3J_L6: [f64; 16] = [
    -0.09305950021129075, 0.046529750105645376, 0.051182725116209915, -0.09535761169699032,
    -0.10003896272713755, 0.045232086779460515, 0.01861190004225815, 0.06881842847817146,
    -0.10445902991252017, 0.1279568127905248, -0.1060786463400413, 0.0408296900131293,
    0.051182725116209915, -0.09575411075314348, 0.12911481660011878, -0.14143819512005507,
];

const W3J_L8: [f64; 25] = [
    0.0712297113935446, -0.0356148556967723, -0.03764999030801643, 0.07224011237680622,
    0.0742824133104108, -0.03507287480528919, -0.025439182640551644, -0.04458756536551671,
    0.07576606905360045, -0.06614187486543427, 0.0778289332164142, -0.03362594233395219,
    0.06614187486543427, 0.0, -0.06028603244005229, 0.08430469899226617,
    0.092598624811608, -0.10246655193630476, 0.07937024983852113, -0.029806212171661055,
    0.02645674994617371, -0.05612324188528877, 0.08572966806188397, -0.1074678263122828,
    0.11543896335436808,
];

const W3J_L10: [f64; 36] = [
    -0.05768853868256272, 0.02884426934128136, 0.029912575613180666, -0.05822024152320928,
    -0.05929099809041168, 0.028565958372935296, 0.02391697918925597, 0.033388822149103825,
    -0.0599760188805225, 0.043833260401093095, -0.06128239750305534, 0.027896660938361115,
    -0.05978154688873279, 0.013600744415237138, 0.040327765795963984, -0.0636141744884848,
    -0.018161206622288265, 0.061282130874106694, -0.06353534304526189, 0.02649508509090357,
    0.07931629014632018, -0.04284825115821173, -0.009333263758353732, 0.053967901150019815,
    -0.07138574104403102, 0.0633789047430876, -0.08386964498510283, 0.08472113529239221,
    -0.06286446595773457, 0.02319273790359862, 0.014084201054019469, -0.03303037929414733,
    0.0556844122765083, -0.07727756515750789, 0.09277095161439448, -0.09839845347550114,
];

static W3J_TABLE: [&[f64]; 6] = [&W3J_L0, &W3J_L2, &W3J_L4, &W3J_L6, &W3J_L8, &W3J_L10];

/// True when `l` has a table (even and at most 10).
pub fn is_supported_degree(l: usize) -> bool {
    l % 2 == 0 && l <= MAX_WIGNER_DEGREE
}

/// Table lookup without range checks.
///
/// The caller guarantees `l` is supported, |mi| <= l and m1 + m2 + m3 = 0.
/// The `wl` loop enforces this through its own bounds.
#[inline]
pub(crate) fn wigner3j_unchecked(l: usize, m1: i32, m2: i32, m3: i32) -> f64 {
    debug_assert!(is_supported_degree(l));
    debug_assert_eq!(m1 + m2 + m3, 0);
    let a = m1.unsigned_abs() as usize;
    let b = m2.unsigned_abs() as usize;
    let c = m3.unsigned_abs() as usize;
    let largest = a.max(b).max(c);
    let smallest = a.min(b).min(c);
    debug_assert!(largest <= l);
    W3J_TABLE[l / 2][MAGNITUDE_OFFSET[largest] + smallest]
}

/// Wigner 3-j symbol (l l l; m1 m2 m3) for even l <= 10.
///
/// Returns `Ok(0.0)` when m1 + m2 + m3 != 0, which is the exact value of the
/// symbol, and an error outside the table domain.
pub fn wigner3j(l: usize, m1: i32, m2: i32, m3: i32) -> Result<f64> {
    if !is_supported_degree(l) {
        return Err(BooError::UnsupportedDegree(l));
    }
    let bound = l as i32;
    if [m1, m2, m3].iter().any(|m| m.abs() > bound) {
        return Err(BooError::Wigner3jDomain { l, m1, m2, m3 });
    }
    if m1 + m2 + m3 != 0 {
        return Ok(0.0);
    }
    Ok(wigner3j_unchecked(l, m1, m2, m3))
}

/// Number of stored entries for degree `l`.
pub fn table_len(l: usize) -> Option<usize> {
    is_supported_degree(l).then(|| W3J_TABLE[l / 2].len())
}
