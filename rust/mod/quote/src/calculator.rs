use serde::{Deserialize, Serialize};

/// Cover grows by 30% of income per dependent.
pub const DEPENDENT_LOADING: f64 = 0.3;

/// Monthly premium as a fraction of cover (0.9%).
pub const PREMIUM_RATE: f64 = 0.009;

/// Recommended cover and monthly premium, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub cover: i64,
    pub premium: i64,
}

/// Compute the quote for an annual income and a number of dependents.
///
/// ```text
/// cover   = round(income * (1 + dependents * 0.3))
/// premium = round(cover * 0.009)
/// ```
///
/// Premium is taken from the already rounded cover. No bounds are checked;
/// values beyond the i64 range saturate.
pub fn compute(income: f64, dependents: u32) -> Quote {
    let cover = round_half_up(income * (1.0 + f64::from(dependents) * DEPENDENT_LOADING));
    let premium = round_half_up(cover * PREMIUM_RATE);
    Quote {
        cover: cover as i64,
        premium: premium as i64,
    }
}

/// Round to the nearest integer, halves toward positive infinity
/// (`2.5 -> 3`, `-2.5 -> -2`). `f64::round` sends halves away from zero.
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    // x - floor is exact for every finite f64.
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
