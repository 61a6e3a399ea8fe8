// src/model/mod.rs
pub mod color;
pub mod filter;

pub use color::{CieCoords, Rgb};
pub use filter::{Dataset, FilterMap, LightingFilter, SpectralDistribution};
