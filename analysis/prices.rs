// analysis/prices.rs

//! # Future Price Range Estimation
//!
//! Derives the support of the uniform price marginal from the historical
//! settlement series: the observed minimum and maximum, nothing more. No
//! smoothing, no outlier handling — the range is taken at face value and
//! handed to the experiment designer as the bounds of a uniform distribution.

use ndarray::ArrayView1;
use thiserror::Error;

/// Support bounds for the uniform future-price marginal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("The historical price series is empty; no range can be derived.")]
    EmptySeries,

    #[error("Non-finite value (NaN or infinity) at position {index} of the price series.")]
    NonFiniteEntry { index: usize },
}

/// Returns the min/max of the series. Fails on an empty series or any
/// non-finite entry rather than propagating NaN into the design bounds.
pub fn price_range(series: ArrayView1<f64>) -> Result<PriceRange, PriceError> {
    if series.is_empty() {
        return Err(PriceError::EmptySeries);
    }
    if let Some((index, _)) = series.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(PriceError::NonFiniteEntry { index });
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &p in series.iter() {
        min = min.min(p);
        max = max.max(p);
    }
    Ok(PriceRange { min, max })
}
