#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Draw a batch of Poisson variables and report how close the sample mean and variance are to λ.

use std::{fmt, io::IsTerminal};

use poisson_direct::{prelude::*, stats};
use rand::rngs::SmallRng;
use tracing_subscriber::{EnvFilter, fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Parameters of a demo run.
#[derive(Clone, Debug)]
struct DemoConfig {
    lambda: f64,
    samples: usize,
    /// How many of the first samples to print
    preview: usize,
    /// Fixed seed for a reproducible run, otherwise seeded from the OS
    seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            lambda: 8.7,
            samples: 100,
            preview: 5,
            seed: None,
        }
    }
}

impl DemoConfig {
    fn rng(&self) -> Result<SmallRng> {
        match self.seed {
            Some(seed) => Ok(seeded_rng(seed)),
            None => entropy_rng(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Report {
    preview: Vec<u32>,
    mean: f64,
    variance: f64,
    total_variation: f64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for k in &self.preview {
            writeln!(f, "One of the Poisson variables has the value {k}.")?;
        }
        writeln!(f, "The average of the Poisson variables is {:.6}.", self.mean)?;
        writeln!(f, "The variance of the Poisson variables is {:.6}.", self.variance)?;
        writeln!(
            f,
            "The total variation distance to the Poisson distribution is {:.6}.",
            self.total_variation
        )?;
        write!(
            f,
            "For Poisson random variables, the mean and variance will agree more and more as the \
             number of simulations increases."
        )
    }
}

fn run(config: &DemoConfig, rng: &mut SmallRng) -> Result<Report> {
    let samples = sample_poisson_many(rng, config.lambda, config.samples)?;

    let moments: Moments = samples.iter().copied().collect();
    let upper_bound = samples.iter().copied().max().unwrap_or(0);
    let pmf = stats::empirical_pmf(&samples, upper_bound)?;

    Ok(Report {
        preview: samples.iter().take(config.preview).copied().collect(),
        mean: moments.mean().unwrap_or(f64::NAN),
        variance: moments.variance().unwrap_or(f64::NAN),
        total_variation: stats::total_variation(&pmf, config.lambda),
    })
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("poisson_direct=info,poisson_demo=info"));
    let fmt_layer = log_fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let config = DemoConfig::default();
    tracing::info!(?config, "starting");

    let mut rng = config.rng()?;
    let report = run(&config, &mut rng)?;
    println!("{report}");

    Ok(())
}
