// src/ingest.rs
//! Vendor record → canonical [`LightingFilter`].
//!
//! Pure mapping, no I/O. Every vendor goes through the same finishing rules:
//! descriptions single-spaced and period-terminated, transmission rounded to
//! 4 places, CIE x/y to 4 and Y to 2, spectral points to 5.

use log::{debug, info};

use crate::config::options::Vendor;
use crate::core::sanitize::finish_description;
use crate::model::{color::round_dp, CieCoords, FilterMap, LightingFilter, SpectralDistribution};
use crate::specs::{
    apollo::ApolloFilter,
    lee::{LeeFilter, SdVals},
    rosco::RoscoFilter,
};

pub const APOLLO_BRAND: &str = "Apollo";
pub const LEE_BRAND: &str = "Lee";
/// Parent brand for the Rosco family.
pub const ROSCO_BRAND: &str = "Roscolux";
/// Rosco sub-brands listed under the parent brand.
pub const ROSCO_SUB_BRANDS: [&str; 2] = ["Cinegel", "Superlux"];

pub fn from_apollo(raw: &ApolloFilter) -> (String, LightingFilter) {
    let mut description = raw.description.clone().unwrap_or_default();
    if let Some(conversion) = &raw.conversion {
        description.push_str(&format!(" {conversion}."));
    }

    let filter = LightingFilter {
        brand: s!(APOLLO_BRAND),
        name: s!(raw.name.trim()),
        description: finish_description(&description),
        rgb: raw.rgb,
        transmission: raw.transmission.map(round_transmission),
        spectral_distribution: None,
        source_a: None,
        source_c: None,
        source_d65: None,
    };
    (raw.filter_id.clone(), filter)
}

/// Lee quotes swatch-book transmission as the daylight (Source C) Y.
pub fn from_lee(raw: &LeeFilter) -> (String, LightingFilter) {
    let filter = LightingFilter {
        brand: s!(LEE_BRAND),
        name: s!(raw.name.trim()),
        description: finish_description(raw.description.as_deref().unwrap_or_default()),
        rgb: raw.rgb,
        transmission: raw.daylight_vals.as_ref().map(|d| round_transmission(d.transmission_y / 100.0)),
        spectral_distribution: raw.sd.as_ref().map(round_sd),
        source_a: raw.tungsten_vals.as_ref().and_then(sd_vals_to_cie),
        source_c: raw.daylight_vals.as_ref().and_then(sd_vals_to_cie),
        source_d65: None,
    };
    (raw.filter_id.clone(), filter)
}

pub fn from_rosco(raw: &RoscoFilter) -> (String, LightingFilter) {
    let filter = LightingFilter {
        brand: collapse_brand(&raw.brand),
        name: s!(raw.name.trim()),
        description: finish_description(&raw.description),
        rgb: raw.rgb,
        transmission: raw.transmission.map(round_transmission),
        spectral_distribution: None,
        source_a: Some(raw.source_a.normalized().rounded()),
        source_c: None,
        source_d65: Some(raw.source_d65.normalized().rounded()),
    };
    (raw.filter_id.clone(), filter)
}

/// First listed brand, with sub-brands folded into the parent.
pub fn collapse_brand(brands: &[String]) -> String {
    match brands.first().map(|b| b.trim()) {
        Some(b) if ROSCO_SUB_BRANDS.contains(&b) => s!(ROSCO_BRAND),
        Some(b) if !b.is_empty() => s!(b),
        _ => s!(ROSCO_BRAND),
    }
}

/// Map a whole vendor dump. Within one vendor a repeated ID keeps the last record.
pub fn ingest<R>(vendor: Vendor, records: &[R], map: fn(&R) -> (String, LightingFilter)) -> FilterMap {
    let mut out = FilterMap::new();
    for rec in records {
        let (id, filter) = map(rec);
        debug!("{id}: {filter:?}");
        out.insert(id, filter);
    }
    info!("Ingested {} {} filters", out.len(), vendor.label());
    out
}

/* ---------- helpers ---------- */

fn round_transmission(t: f64) -> f64 {
    round_dp(t, 4)
}

fn round_sd(sd: &SpectralDistribution) -> SpectralDistribution {
    sd.iter().map(|(nm, t)| (*nm, round_dp(*t, 5))).collect()
}

/// A temperature block is only a CIE point when both x and y were published.
fn sd_vals_to_cie(vals: &SdVals) -> Option<CieCoords> {
    Some(CieCoords::new(vals.x?, vals.y?, vals.transmission_y).normalized().rounded())
}
