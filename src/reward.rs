//! Reward points pricing rule.
//!
//! Points are earned on the whole-unit part of a purchase:
//!
//! - nothing for the first 50
//! - 1 point per unit between 50 and 100
//! - 2 points per unit above 100

use crate::transaction::Price;

/// Amount up to which a purchase earns nothing.
pub const LOWER_THRESHOLD: i64 = 50;

/// Amount above which every unit earns double.
pub const UPPER_THRESHOLD: i64 = 100;

/// Calculates the reward points earned by a purchase amount.
///
/// Missing, empty, non-numeric, zero, and negative amounts earn `0`.
/// Decimals are truncated, not rounded.
///
/// # Examples
///
/// ```
/// use reward_points::{calculate_rewards, Price};
///
/// assert_eq!(calculate_rewards(&Price::Text("105.5".into())), 60);
/// assert_eq!(calculate_rewards(&Price::Missing), 0);
/// ```
pub fn calculate_rewards(price: &Price) -> u64 {
    match price.whole_units() {
        Some(units) if units > 0 => points_for(units),
        _ => 0,
    }
}

/// Applies the tiered rule to a whole-unit amount.
pub fn points_for(units: i64) -> u64 {
    if units > UPPER_THRESHOLD {
        // (i64::MAX - 100) * 2 + 50 still fits in u64
        (UPPER_THRESHOLD - LOWER_THRESHOLD) as u64 + 2 * (units - UPPER_THRESHOLD) as u64
    } else if units > LOWER_THRESHOLD {
        (units - LOWER_THRESHOLD) as u64
    } else {
        0
    }
}
