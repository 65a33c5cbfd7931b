#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]

use clap::Parser;
use std::path::PathBuf;
use std::process;

use assay::data;
use assay::ebitda::Scenario;
use assay::pipeline::{AnalysisReport, RunConfig, run_analysis};

#[derive(Parser)]
#[command(
    name = "assay",
    about = "Monte Carlo uncertainty analysis of mine EBITDA",
    long_about = "Fits a linear off-mine-cost model to the reference observations, derives the \
                 future price range from the LME settlement series, and propagates both \
                 uncertainties through the EBITDA formula via Latin hypercube sampling."
)]
struct Cli {
    /// Number of Latin hypercube scenarios to draw
    #[arg(long, default_value = "10")]
    samples: usize,

    /// Seed for the stratified sampler (omit to seed from OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML file with the scenario constants
    #[arg(long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Override: saleable tonnes produced
    #[arg(long)]
    tonnes: Option<f64>,

    /// Override: on-mine operating costs
    #[arg(long)]
    on_mine_costs: Option<f64>,

    /// Override: attributable ownership fraction
    #[arg(long)]
    ownership: Option<f64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut scenario = match &cli.scenario {
        Some(path) => match Scenario::load(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => Scenario::default(),
    };
    if let Some(tonnes) = cli.tonnes {
        scenario.tonnes_produced = tonnes;
    }
    if let Some(costs) = cli.on_mine_costs {
        scenario.on_mine_operating_costs = costs;
    }
    if let Some(fraction) = cli.ownership {
        scenario.ownership_fraction = fraction;
    }

    let config = RunConfig {
        n_samples: cli.samples,
        seed: cli.seed,
        scenario,
    };
    let report = match run_analysis(
        data::realized_prices().view(),
        data::off_mine_costs().view(),
        data::lme_settlements().view(),
        &config,
    ) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    print_report(&report, config.n_samples);
}

fn print_report(report: &AnalysisReport, n_samples: usize) {
    println!("Off-mine cost model (USD/t):");
    println!(
        "  cost = {:.6} * price + {:.2}",
        report.fit.slope, report.fit.intercept
    );
    println!(
        "  se(slope) = {:.6}, se(intercept) = {:.2}",
        report.fit.sigma_slope, report.fit.sigma_intercept
    );
    println!(
        "Future price range (USD/t): [{:.1}, {:.1}]",
        report.price_range.min, report.price_range.max
    );
    println!("Owned EBITDA over {} scenarios (USD):", n_samples);
    let s = &report.summary;
    println!("  mean   {:>15.0}", s.mean);
    println!("  std    {:>15.0}", s.std_dev);
    println!("  min    {:>15.0}", s.min);
    println!("  p05    {:>15.0}", s.p05);
    println!("  p50    {:>15.0}", s.p50);
    println!("  p95    {:>15.0}", s.p95);
    println!("  max    {:>15.0}", s.max);
}
