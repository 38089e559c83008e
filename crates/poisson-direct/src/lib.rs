#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![doc = include_str!("../README.md")]

pub mod prelude {
    //! Import of useful traits and types from the crate

    pub use crate::{
        Error, Result,
        sampler::{MAX_LAMBDA, Method, PoissonDirect, sample_poisson, sample_poisson_many},
        stats::Moments,
        uniform::{entropy_rng, seeded_rng, uniform},
    };
}

mod error;
pub use error::{Error, Result};

pub mod sampler;
pub mod stats;
pub mod uniform;
