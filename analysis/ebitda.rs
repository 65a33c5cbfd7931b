// analysis/ebitda.rs

//! # EBITDA Outcome Evaluation
//!
//! Maps each design-matrix row of (slope, intercept, price) to a single owned
//! EBITDA figure through the deterministic financial formula:
//!
//! ```text
//! off_mine_per_tonne = slope · price + intercept
//! ebitda             = price · tonnes − on_mine_costs − off_mine_per_tonne · tonnes
//! ebitda_owned       = ownership_fraction · ebitda
//! ```
//!
//! The formula is total: every real-valued row produces a value, non-finite
//! inputs propagate, and no row is ever dropped. Output order follows design
//! row order.
//!
//! The scenario constants (tonnes produced, on-mine operating costs,
//! ownership fraction) are configuration, not uncertain inputs; they are
//! carried in a serde-derived [`Scenario`] that can be loaded from a TOML
//! file.

use crate::design::{INTERCEPT_COL, PRICE_COL, SLOPE_COL};
use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Financial constants of the mine being analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Saleable tonnes produced over the analysis period.
    #[serde(default = "defaults::tonnes_produced")]
    pub tonnes_produced: f64,
    /// Fixed operating costs at the mine site.
    #[serde(default = "defaults::on_mine_operating_costs")]
    pub on_mine_operating_costs: f64,
    /// Attributable share of the operation.
    #[serde(default = "defaults::ownership_fraction")]
    pub ownership_fraction: f64,
}

mod defaults {
    pub fn tonnes_produced() -> f64 {
        3056.0
    }
    pub fn on_mine_operating_costs() -> f64 {
        19_000_000.0
    }
    pub fn ownership_fraction() -> f64 {
        0.8414
    }
}

impl Default for Scenario {
    /// The reference scenario the original analysis was built around.
    fn default() -> Self {
        Scenario {
            tonnes_produced: defaults::tonnes_produced(),
            on_mine_operating_costs: defaults::on_mine_operating_costs(),
            ownership_fraction: defaults::ownership_fraction(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scenario TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Scenario {
    /// Loads scenario constants from a TOML file. Missing fields fall back
    /// to the reference scenario defaults.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Owned EBITDA for a single (slope, intercept, price) draw.
pub fn ebitda_owned(slope: f64, intercept: f64, price: f64, scenario: &Scenario) -> f64 {
    let off_mine_per_tonne = slope * price + intercept;
    let off_mine_total = off_mine_per_tonne * scenario.tonnes_produced;
    let revenue = price * scenario.tonnes_produced;
    let ebitda = revenue - scenario.on_mine_operating_costs - off_mine_total;
    scenario.ownership_fraction * ebitda
}

/// Evaluates every row of the design matrix, producing one owned-EBITDA
/// outcome per row in design order.
pub fn evaluate_ebitda(design: ArrayView2<f64>, scenario: &Scenario) -> Array1<f64> {
    debug_assert_eq!(design.ncols(), 3);
    Array1::from_iter(design.outer_iter().map(|row| {
        ebitda_owned(
            row[SLOPE_COL],
            row[INTERCEPT_COL],
            row[PRICE_COL],
            scenario,
        )
    }))
}
