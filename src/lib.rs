// src/lib.rs
//! Lighting gel data from Apollo, Lee and Rosco, normalised into one dataset.
//!
//! Library side: vendor extractors (`specs`), the canonical model (`model`),
//! ingestion and assembly (`ingest`, `store`) and the read-only consumer view
//! ([`LightingFilters`]). The `lighting_filters` binary (feature `cli`) drives
//! the pipeline.

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod specs;

pub mod csv;
pub mod file;
pub mod filters;
pub mod ingest;
pub mod progress;
pub mod scrape;
pub mod store;
pub mod swatch;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logging;

pub use error::{Error, Result, Severity};
pub use filters::{BrandFilter, LightingFilters};
pub use model::{CieCoords, Dataset, LightingFilter, Rgb, SpectralDistribution};
