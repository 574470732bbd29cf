//! Core library for the `weather-docs` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Weather and city providers
//! - Normalization of forecasts into display strings
//! - A small markup tree and the Flare topic/TOC/snippet assembly on top of it
//!
//! It is used by `weather-docs-cli`, but can also be reused by other binaries or services.

pub mod assemble;
pub mod config;
pub mod error;
pub mod generate;
pub mod geography;
pub mod markup;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod units;

pub use assemble::TopicAssembler;
pub use config::Config;
pub use error::{Error, Result};
pub use generate::{Generator, RunSummary, render_file};
pub use geography::Continent;
pub use model::{Field, WeatherRecord};
pub use normalize::normalize;
pub use provider::{CityDirectory, WeatherProvider};
