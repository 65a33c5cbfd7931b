// analysis/pipeline.rs

//! # Analysis Pipeline
//!
//! Chains the four stages of the uncertainty analysis in dependency order:
//! regression fit → price range → Latin hypercube design → EBITDA
//! evaluation. Data flows strictly forward; each stage is a pure transform
//! and any stage error aborts the run before the next stage sees its output.
//!
//! The pipeline also summarizes the outcome distribution (mean, spread,
//! percentiles) for reporting. The full outcome vector stays available in
//! the report for consumers that want their own statistics.

use crate::design::{self, DesignError};
use crate::ebitda::{self, Scenario};
use crate::prices::{self, PriceError, PriceRange};
use crate::regression::{self, RegressionError, RegressionFit};
use ndarray::{Array1, ArrayView1};
use thiserror::Error;

/// Run options for one analysis pass.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of Latin hypercube scenarios to draw.
    pub n_samples: usize,
    /// Seed for the stratified sampler; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Financial constants of the mine.
    pub scenario: Scenario,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            n_samples: 10,
            seed: None,
            scenario: Scenario::default(),
        }
    }
}

/// A comprehensive error type for the whole pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Off-mine cost regression failed: {0}")]
    Regression(#[from] RegressionError),

    #[error("Price range estimation failed: {0}")]
    Prices(#[from] PriceError),

    #[error("Experiment design failed: {0}")]
    Design(#[from] DesignError),
}

/// Everything one analysis pass produced.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub fit: RegressionFit,
    pub price_range: PriceRange,
    /// One owned-EBITDA outcome per design row, in design order.
    pub outcomes: Array1<f64>,
    pub summary: EbitdaSummary,
}

/// Summary statistics of the outcome distribution.
#[derive(Debug, Clone, Copy)]
pub struct EbitdaSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p05: f64,
    pub p50: f64,
    pub p95: f64,
}

impl EbitdaSummary {
    pub fn from_outcomes(outcomes: &Array1<f64>) -> Self {
        if outcomes.is_empty() {
            return EbitdaSummary {
                mean: f64::NAN,
                std_dev: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                p05: f64::NAN,
                p50: f64::NAN,
                p95: f64::NAN,
            };
        }
        let mut sorted = outcomes.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let n = sorted.len() as f64;
        let mean = outcomes.sum() / n;
        let std_dev = if sorted.len() > 1 {
            (outcomes.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        EbitdaSummary {
            mean,
            std_dev,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            p05: percentile(&sorted, 0.05),
            p50: percentile(&sorted, 0.50),
            p95: percentile(&sorted, 0.95),
        }
    }
}

/// Linear-interpolation percentile over an already sorted slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = q * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

/// Runs the full uncertainty analysis over one observation set, one price
/// series, and one run configuration.
pub fn run_analysis(
    realized_prices: ArrayView1<f64>,
    off_mine_costs: ArrayView1<f64>,
    price_series: ArrayView1<f64>,
    config: &RunConfig,
) -> Result<AnalysisReport, AnalysisError> {
    log::info!(
        "Starting EBITDA uncertainty analysis: {} observations, {} samples.",
        realized_prices.len(),
        config.n_samples
    );

    let fit = regression::fit_regression(realized_prices, off_mine_costs)?;
    let price_range = prices::price_range(price_series)?;
    log::info!(
        "Future price modeled as Uniform({:.1}, {:.1}).",
        price_range.min,
        price_range.max
    );

    let design = design::build_design(config.n_samples, &fit, &price_range, config.seed)?;
    let outcomes = ebitda::evaluate_ebitda(design.view(), &config.scenario);
    let summary = EbitdaSummary::from_outcomes(&outcomes);
    log::info!(
        "Owned EBITDA: mean {:.0}, p05 {:.0}, p95 {:.0}.",
        summary.mean,
        summary.p05,
        summary.p95
    );

    Ok(AnalysisReport {
        fit,
        price_range,
        outcomes,
        summary,
    })
}
