// analysis/data.rs

//! # Reference Dataset
//!
//! The hardcoded inputs of the reference analysis: six annual observations
//! pairing realized commodity price with off-mine operating cost per tonne
//! (both in USD/t), and the monthly LME settlement series the future-price
//! range is derived from. Exposed as `Array1` accessors so the CLI and the
//! regression fixtures share a single source of truth.

use ndarray::Array1;

const REALIZED_PRICES: [f64; 6] = [9400.0, 10250.0, 11890.0, 10780.0, 12310.0, 11050.0];

const OFF_MINE_COSTS: [f64; 6] = [2140.0, 2305.0, 2590.0, 2395.0, 2665.0, 2480.0];

const LME_SETTLEMENTS: [f64; 12] = [
    9850.0, 10420.0, 9980.0, 10760.0, 11340.0, 10910.0, 11620.0, 12080.0, 11760.0, 12440.0,
    11980.0, 12310.0,
];

/// Realized commodity price per observation year, USD/t.
pub fn realized_prices() -> Array1<f64> {
    Array1::from(REALIZED_PRICES.to_vec())
}

/// Off-mine operating cost per tonne per observation year, USD/t.
pub fn off_mine_costs() -> Array1<f64> {
    Array1::from(OFF_MINE_COSTS.to_vec())
}

/// Monthly LME cash settlement series, USD/t.
pub fn lme_settlements() -> Array1<f64> {
    Array1::from(LME_SETTLEMENTS.to_vec())
}
