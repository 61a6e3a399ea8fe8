// src/filters.rs
//! Read-only view of a compiled dataset, for consumers.
//!
//! ```no_run
//! use lighting_filters::{BrandFilter, LightingFilters};
//!
//! let lee = LightingFilters::load("dataset/filters.json", BrandFilter::one("Lee"))?;
//! let blue = lee.get("L201")?;
//! println!("{} {}", blue.name, blue.rgb.to_hex());
//! # Ok::<(), lighting_filters::Error>(())
//! ```

use std::{collections::btree_map, path::Path};

use crate::error::{Error, Result};
use crate::model::{Dataset, FilterMap, LightingFilter};
use crate::store::load_dataset;

/// Which brands to keep when loading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BrandFilter {
    #[default]
    All,
    One(String),
    Many(Vec<String>),
}

impl BrandFilter {
    pub fn one(brand: impl Into<String>) -> Self {
        BrandFilter::One(brand.into())
    }

    /// Empty list → no filtering.
    pub fn from_list(brands: Vec<String>) -> Self {
        match brands.len() {
            0 => BrandFilter::All,
            1 => BrandFilter::One(brands.into_iter().next().unwrap_or_default()),
            _ => BrandFilter::Many(brands),
        }
    }

    pub fn matches(&self, brand: &str) -> bool {
        match self {
            BrandFilter::All => true,
            BrandFilter::One(b) => b == brand,
            BrandFilter::Many(bs) => bs.iter().any(|b| b == brand),
        }
    }

    fn describe(&self) -> String {
        match self {
            BrandFilter::All => s!("any brand"),
            BrandFilter::One(b) => format!("brand '{b}'"),
            BrandFilter::Many(bs) => format!("brands {bs:?}"),
        }
    }
}

/// Filter ID → record, fixed at load time.
#[derive(Clone, Debug, PartialEq)]
pub struct LightingFilters {
    version: String,
    filters: FilterMap,
}

impl LightingFilters {
    /// Load and schema-check `path`, then keep only the selected brands.
    pub fn load(path: impl AsRef<Path>, brands: BrandFilter) -> Result<Self> {
        Self::from_dataset(load_dataset(path.as_ref())?, brands)
    }

    /// Fails on an empty dataset, or a brand selection that keeps nothing.
    pub fn from_dataset(dataset: Dataset, brands: BrandFilter) -> Result<Self> {
        dataset.validate()?;
        let Dataset { version, filters } = dataset;

        let filters: FilterMap = filters.into_iter().filter(|(_, f)| brands.matches(&f.brand)).collect();
        if filters.is_empty() {
            return Err(Error::NotFound(format!("no filters for {}", brands.describe())));
        }
        Ok(Self { version, filters })
    }

    pub fn get(&self, id: &str) -> Result<&LightingFilter> {
        self.filters
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("filter '{id}'")))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.filters.contains_key(id)
    }

    /// In filter-ID order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, LightingFilter> {
        self.filters.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Distinct brands, sorted.
    pub fn brands(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.filters.values().map(|f| f.brand.as_str()).collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn as_map(&self) -> &FilterMap {
        &self.filters
    }
}

impl<'a> IntoIterator for &'a LightingFilters {
    type Item = (&'a String, &'a LightingFilter);
    type IntoIter = btree_map::Iter<'a, String, LightingFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
