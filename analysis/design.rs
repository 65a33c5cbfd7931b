// analysis/design.rs

//! # Latin Hypercube Experiment Design
//!
//! Builds the N×3 design matrix that drives the Monte Carlo evaluation. Each
//! column starts as a Latin hypercube sample of the unit interval: the N
//! equal-probability strata `[k/N, (k+1)/N)` are visited exactly once, in a
//! randomly permuted order, with a uniform jitter inside each stratum. The
//! permutations are drawn independently per column, so the three columns are
//! jointly randomized while each marginal keeps full stratified coverage.
//!
//! The unit-interval fractions are then pushed through the inverse CDF of the
//! column's target marginal:
//!
//! - column 0: Normal(slope, sigma_slope)
//! - column 1: Normal(intercept, sigma_intercept)
//! - column 2: Uniform(price_min, price_max)
//!
//! Inverse-CDF transforms are monotonic, so the stratification guarantee
//! survives into the target space. A zero sigma is allowed and collapses the
//! corresponding column to a constant at its mean.
//!
//! Sampling is reproducible: the caller injects an explicit seed, and the
//! same seed always yields a bit-identical matrix. Without a seed the RNG is
//! seeded from OS entropy.

use crate::prices::PriceRange;
use crate::regression::RegressionFit;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

/// Column index of the slope samples in the design matrix.
pub const SLOPE_COL: usize = 0;
/// Column index of the intercept samples in the design matrix.
pub const INTERCEPT_COL: usize = 1;
/// Column index of the price samples in the design matrix.
pub const PRICE_COL: usize = 2;

/// Lower clamp for the unit-interval fractions. A jitter of exactly 0.0 in
/// the first stratum would otherwise map to −∞ through the normal quantile.
const LATIN_FLOOR: f64 = 1e-12;

#[derive(Error, Debug)]
pub enum DesignError {
    #[error("The design requires a positive number of samples.")]
    ZeroSamples,

    #[error(
        "Standard deviation of the {name} column must be finite and non-negative, but is {value}."
    )]
    InvalidSigma { name: &'static str, value: f64 },

    #[error("Mean of the {name} column must be finite, but is {value}.")]
    NonFiniteMean { name: &'static str, value: f64 },

    #[error(
        "Price range [{min}, {max}] is not a valid uniform support; finite bounds with min <= max are required."
    )]
    InvalidPriceRange { min: f64, max: f64 },
}

/// Builds the N×3 design matrix of (slope, intercept, price) samples.
///
/// `seed` makes the stratified sampler deterministic; pass `None` to seed
/// from OS entropy.
pub fn build_design(
    n_samples: usize,
    fit: &RegressionFit,
    prices: &PriceRange,
    seed: Option<u64>,
) -> Result<Array2<f64>, DesignError> {
    if n_samples == 0 {
        return Err(DesignError::ZeroSamples);
    }
    validate_marginal("slope", fit.slope, fit.sigma_slope)?;
    validate_marginal("intercept", fit.intercept, fit.sigma_intercept)?;
    if !(prices.min.is_finite() && prices.max.is_finite()) || prices.min > prices.max {
        return Err(DesignError::InvalidPriceRange {
            min: prices.min,
            max: prices.max,
        });
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    log::debug!(
        "Building {n_samples}×3 Latin hypercube design (seed: {})",
        seed.map_or_else(|| "entropy".to_string(), |s| s.to_string())
    );

    let mut design = Array2::zeros((n_samples, 3));
    let slope_col = normal_quantiles(
        latin_fractions(n_samples, &mut rng),
        fit.slope,
        fit.sigma_slope,
    );
    let intercept_col = normal_quantiles(
        latin_fractions(n_samples, &mut rng),
        fit.intercept,
        fit.sigma_intercept,
    );
    let price_col: Vec<f64> = latin_fractions(n_samples, &mut rng)
        .into_iter()
        .map(|u| prices.min + u * prices.width())
        .collect();

    design.column_mut(SLOPE_COL).assign(&Array1::from(slope_col));
    design
        .column_mut(INTERCEPT_COL)
        .assign(&Array1::from(intercept_col));
    design.column_mut(PRICE_COL).assign(&Array1::from(price_col));
    Ok(design)
}

fn validate_marginal(name: &'static str, mean: f64, sigma: f64) -> Result<(), DesignError> {
    if !mean.is_finite() {
        return Err(DesignError::NonFiniteMean { name, value: mean });
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(DesignError::InvalidSigma { name, value: sigma });
    }
    Ok(())
}

/// One Latin hypercube column: a shuffled visit of the `n` equal-probability
/// strata with a uniform jitter inside each, clamped away from 0.
fn latin_fractions(n: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
        .into_iter()
        .map(|k| {
            let jitter: f64 = rng.gen_range(0.0..1.0);
            ((k as f64 + jitter) / n as f64).max(LATIN_FLOOR)
        })
        .collect()
}

/// Maps unit-interval fractions through the Normal(mean, sigma) quantile
/// function. A zero sigma degenerates the marginal to a point mass, so the
/// column collapses to a constant at the mean.
fn normal_quantiles(fractions: Vec<f64>, mean: f64, sigma: f64) -> Vec<f64> {
    if sigma == 0.0 {
        return vec![mean; fractions.len()];
    }
    // The unwrap is safe: mean and sigma were validated finite and positive
    // before this point.
    let dist = Normal::new(mean, sigma).unwrap();
    fractions.into_iter().map(|u| dist.inverse_cdf(u)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_fit() -> RegressionFit {
        RegressionFit {
            slope: 0.1797,
            intercept: 462.0,
            sigma_slope: 0.0077,
            sigma_intercept: 84.7,
        }
    }

    fn reference_range() -> PriceRange {
        PriceRange {
            min: 9850.0,
            max: 12440.0,
        }
    }

    #[test]
    fn returns_exactly_n_rows_and_three_columns() {
        let design = build_design(10, &reference_fit(), &reference_range(), Some(42)).unwrap();
        assert_eq!(design.dim(), (10, 3));
    }

    #[test]
    fn normal_columns_stay_near_their_means() {
        // The Latin floor caps the quantile at roughly seven standard
        // deviations; six is a comfortable bound for any seeded draw.
        let fit = reference_fit();
        let design = build_design(50, &fit, &reference_range(), Some(7)).unwrap();
        for &v in design.column(SLOPE_COL) {
            assert!((v - fit.slope).abs() <= 6.0 * fit.sigma_slope);
        }
        for &v in design.column(INTERCEPT_COL) {
            assert!((v - fit.intercept).abs() <= 6.0 * fit.sigma_intercept);
        }
    }

    #[test]
    fn price_column_stays_strictly_inside_the_range() {
        let range = reference_range();
        let design = build_design(50, &reference_fit(), &range, Some(7)).unwrap();
        for &p in design.column(PRICE_COL) {
            assert!(p > range.min && p < range.max);
        }
    }

    #[test]
    fn price_column_covers_every_stratum_exactly_once() {
        let n = 25;
        let range = reference_range();
        let design = build_design(n, &reference_fit(), &range, Some(99)).unwrap();
        let mut counts = vec![0usize; n];
        for &p in design.column(PRICE_COL) {
            let u = (p - range.min) / range.width();
            let stratum = ((u * n as f64).floor() as usize).min(n - 1);
            counts[stratum] += 1;
        }
        assert!(counts.iter().all(|&c| c == 1));
    }

    #[test]
    fn fixed_seed_is_bit_identical() {
        let a = build_design(32, &reference_fit(), &reference_range(), Some(1234)).unwrap();
        let b = build_design(32, &reference_fit(), &reference_range(), Some(1234)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = build_design(32, &reference_fit(), &reference_range(), Some(1)).unwrap();
        let b = build_design(32, &reference_fit(), &reference_range(), Some(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn zero_sigma_collapses_a_column_to_its_mean() {
        let fit = RegressionFit {
            sigma_slope: 0.0,
            sigma_intercept: 0.0,
            ..reference_fit()
        };
        let design = build_design(8, &fit, &reference_range(), Some(3)).unwrap();
        assert!(design.column(SLOPE_COL).iter().all(|&v| v == fit.slope));
        assert!(
            design
                .column(INTERCEPT_COL)
                .iter()
                .all(|&v| v == fit.intercept)
        );
    }

    #[test]
    fn collapsed_price_range_yields_a_constant_column() {
        let range = PriceRange {
            min: 11287.5,
            max: 11287.5,
        };
        let design = build_design(4, &reference_fit(), &range, Some(3)).unwrap();
        assert!(design.column(PRICE_COL).iter().all(|&p| p == 11287.5));
    }

    #[test]
    fn zero_samples_is_rejected() {
        let err = build_design(0, &reference_fit(), &reference_range(), Some(0)).unwrap_err();
        assert!(matches!(err, DesignError::ZeroSamples));
    }

    #[test]
    fn negative_sigma_is_rejected() {
        let fit = RegressionFit {
            sigma_slope: -0.1,
            ..reference_fit()
        };
        let err = build_design(4, &fit, &reference_range(), Some(0)).unwrap_err();
        assert!(matches!(
            err,
            DesignError::InvalidSigma { name: "slope", .. }
        ));
    }

    #[test]
    fn non_finite_sigma_is_rejected() {
        let fit = RegressionFit {
            sigma_intercept: f64::NAN,
            ..reference_fit()
        };
        let err = build_design(4, &fit, &reference_range(), Some(0)).unwrap_err();
        assert!(matches!(
            err,
            DesignError::InvalidSigma {
                name: "intercept",
                ..
            }
        ));
    }

    #[test]
    fn inverted_price_range_is_rejected() {
        let range = PriceRange {
            min: 12440.0,
            max: 9850.0,
        };
        let err = build_design(4, &reference_fit(), &range, Some(0)).unwrap_err();
        assert!(matches!(err, DesignError::InvalidPriceRange { .. }));
    }
}
