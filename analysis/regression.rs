// analysis/regression.rs

//! # Off-Mine Cost Regression
//!
//! This module fits the linear model relating realized commodity price to
//! off-mine operating cost per tonne, and quantifies the sampling uncertainty
//! of the fitted coefficients. The point estimates come from the ordinary
//! least-squares closed form; the standard errors come from the residual
//! variance `s² = SS_res / (n − 2)`:
//!
//! - `sigma_slope     = sqrt(s² / SS_x)`
//! - `sigma_intercept = sqrt(s² · (1/n + x̄²/SS_x))`
//!
//! Those standard errors are what the experiment designer later uses as the
//! spreads of the normal marginals for slope and intercept, so this module
//! is the sole source of coefficient uncertainty in the pipeline.
//!
//! The fit is a pure function of the observation set: it takes views, owns
//! nothing, and mutates nothing.

use ndarray::ArrayView1;
use thiserror::Error;

/// Minimum observation count for a defined residual variance (n − 2 > 0).
pub const MIN_OBSERVATIONS: usize = 3;

/// OLS point estimates together with their standard errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionFit {
    /// Change in off-mine cost per unit change in realized price.
    pub slope: f64,
    /// Off-mine cost at zero realized price.
    pub intercept: f64,
    /// Standard error of the slope estimate.
    pub sigma_slope: f64,
    /// Standard error of the intercept estimate.
    pub sigma_intercept: f64,
}

/// A comprehensive error type for regression fitting failures.
#[derive(Error, Debug)]
pub enum RegressionError {
    #[error(
        "The regression requires at least {required} observations for a defined residual variance, but only {found} were provided."
    )]
    InsufficientData { found: usize, required: usize },

    #[error("Price and cost vectors have mismatched lengths ({x_len} vs {y_len}).")]
    MismatchedLengths { x_len: usize, y_len: usize },

    #[error(
        "All realized prices in the observation set are identical; the slope is undefined (zero variance in x)."
    )]
    DegenerateInput,

    #[error("Non-finite value (NaN or infinity) encountered in the observation set.")]
    NonFinite,
}

/// Fits `y = slope · x + intercept` by ordinary least squares and derives the
/// standard errors of both coefficients from the residual variance.
///
/// Fails fast rather than letting a degenerate input surface downstream as
/// NaN: fewer than [`MIN_OBSERVATIONS`] points, mismatched vector lengths,
/// non-finite observations, and zero variance in `x` are all explicit errors.
pub fn fit_regression(
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
) -> Result<RegressionFit, RegressionError> {
    if x.len() != y.len() {
        return Err(RegressionError::MismatchedLengths {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    let n = x.len();
    if n < MIN_OBSERVATIONS {
        return Err(RegressionError::InsufficientData {
            found: n,
            required: MIN_OBSERVATIONS,
        });
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(RegressionError::NonFinite);
    }

    let n_f = n as f64;
    let x_bar = x.sum() / n_f;
    let y_bar = y.sum() / n_f;

    let ss_x: f64 = x.iter().map(|&xi| (xi - x_bar) * (xi - x_bar)).sum();
    if ss_x == 0.0 {
        return Err(RegressionError::DegenerateInput);
    }
    let s_xy: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - x_bar) * (yi - y_bar))
        .sum();

    let slope = s_xy / ss_x;
    let intercept = y_bar - slope * x_bar;

    let ss_res: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| {
            let r = yi - (slope * xi + intercept);
            r * r
        })
        .sum();
    let s2 = ss_res / (n_f - 2.0);
    let sigma_slope = (s2 / ss_x).sqrt();
    let sigma_intercept = (s2 * (1.0 / n_f + x_bar * x_bar / ss_x)).sqrt();

    log::debug!(
        "OLS fit over {n} observations: slope = {slope:.6e} (se {sigma_slope:.6e}), intercept = {intercept:.6e} (se {sigma_intercept:.6e})"
    );

    Ok(RegressionFit {
        slope,
        intercept,
        sigma_slope,
        sigma_intercept,
    })
}
