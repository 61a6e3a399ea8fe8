// src/model/filter.rs
//! The canonical filter record and the versioned dataset container.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::color::{CieCoords, Rgb};
use crate::config::consts::DATASET_VERSION;
use crate::error::{Error, Result};

/// Wavelength (nm) → transmission fraction. Ordered so dumps diff cleanly.
pub type SpectralDistribution = BTreeMap<u32, f64>;

/// Filter ID → record. Ordered by ID.
pub type FilterMap = BTreeMap<String, LightingFilter>;

/// Common filter information, shared by every vendor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightingFilter {
    /// Brand or family of filter
    pub brand: String,
    pub name: String,
    pub description: String,
    /// Equivalent RGB value of filter
    pub rgb: Rgb,
    #[serde(default)]
    pub transmission: Option<f64>,
    #[serde(default)]
    pub spectral_distribution: Option<SpectralDistribution>,
    #[serde(default)]
    pub source_a: Option<CieCoords>,
    #[serde(default)]
    pub source_c: Option<CieCoords>,
    #[serde(default)]
    pub source_d65: Option<CieCoords>,
}

impl LightingFilter {
    /// Check every field constraint. `id` is only used for the message.
    pub fn validate(&self, id: &str) -> Result<()> {
        let fail = |what: String| Err(Error::Validation(format!("{id}: {what}")));

        if self.brand.trim().is_empty() {
            return fail(s!("brand is empty"));
        }
        if self.description.contains("  ") {
            return fail(s!("description contains doubled whitespace"));
        }
        if !self.description.is_empty() && !self.description.ends_with('.') {
            return fail(s!("description does not end with a period"));
        }
        if let Some(t) = self.transmission {
            if !(0.0..=1.0).contains(&t) {
                return fail(format!("transmission {t} outside [0, 1]"));
            }
        }
        if let Some(sd) = &self.spectral_distribution {
            if let Some((nm, t)) = sd.iter().find(|(_, t)| !t.is_finite() || **t < 0.0) {
                return fail(format!("spectral distribution at {nm}nm is {t}"));
            }
        }
        for (slot, src) in [
            ("source_a", &self.source_a),
            ("source_c", &self.source_c),
            ("source_d65", &self.source_d65),
        ] {
            if let Some(c) = src {
                if !c.in_range() {
                    return fail(format!("{slot} {} out of range", c.to_coords()));
                }
            }
        }
        Ok(())
    }
}

/// Versioned container written to `filters.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub version: String,
    pub filters: FilterMap,
}

impl Dataset {
    pub fn new(filters: FilterMap) -> Self {
        Self { version: s!(DATASET_VERSION), filters }
    }

    /// Fails on an empty mapping or the first record that breaks a constraint.
    pub fn validate(&self) -> Result<()> {
        if self.filters.is_empty() {
            return Err(Error::Validation(s!("dataset contains no filters")));
        }
        for (id, f) in &self.filters {
            f.validate(id)?;
        }
        Ok(())
    }

    /// Deserialize and validate. Type errors (e.g. an RGB channel of 300)
    /// surface as validation failures, not JSON errors.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let ds: Dataset = serde_json::from_str(text)
            .map_err(|e| Error::Validation(format!("dataset does not match schema: {e}")))?;
        ds.validate()?;
        Ok(ds)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
pub(crate) fn sample_filter(brand: &str) -> LightingFilter {
    LightingFilter {
        brand: s!(brand),
        name: s!("Bastard Amber"),
        description: s!("A warm tint."),
        rgb: Rgb::new(250, 200, 160),
        transmission: Some(0.7),
        spectral_distribution: None,
        source_a: None,
        source_c: Some(CieCoords::new(0.3695, 0.3612, 68.0)),
        source_d65: None,
    }
}
