//! Core library for the `climate` CLI.
//!
//! This crate defines:
//! - Settings persistence
//! - Abstraction over the weather provider (OpenWeatherMap)
//! - The refinement pipeline: date partitioning, city disambiguation,
//!   field extraction and report rendering
//!
//! It is used by `climate-cli`, but interactive input goes through the
//! [`Console`] trait so the pipeline can be driven from anywhere.

pub mod city;
pub mod compass;
pub mod config;
pub mod console;
pub mod error;
pub mod fetch;
pub mod model;
pub mod partition;
pub mod provider;
pub mod report;

pub use compass::{CompassPoint, resolve_direction};
pub use config::{Settings, Units};
pub use console::Console;
pub use error::{ApiError, WeatherError};
pub use fetch::{Action, FetchContext};
pub use model::{CityCandidate, WeatherRecord};
pub use provider::{WeatherProvider, provider_from_settings};
pub use report::Report;
