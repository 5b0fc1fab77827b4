//! Country population statistics and derived analytics over a static 1960–2022 dataset.
//!
//! The dataset is loaded once into a [`data::DataRegistry`] and shared read-only;
//! [`analytics`] holds the pure computations and [`server`] exposes them over HTTP.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod server;

pub use error::{LoadError, PopulationError, Result};
