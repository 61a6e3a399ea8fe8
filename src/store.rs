// src/store.rs
//! Raw vendor dumps in, canonical dataset out.
//!
//! ```text
//! raw/apollo.json ┐
//! raw/lee.json    ├─ ingest::from_* ─ merge ─ validate ─┬─ dataset/json_schema.json
//! raw/rosco.json  ┘   (Apollo, Lee, Rosco order)        ├─ dataset/filters.json
//!                                                       └─ dataset/filters.csv|tsv
//! ```
//!
//! Nothing under `dataset/` is touched unless the merged dataset validates.

use std::{fs, io, path::{Path, PathBuf}};

use log::{info, warn};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::config::options::{PathOptions, PipelineOptions, Vendor};
use crate::csv::to_sheet_string;
use crate::error::{Error, Result};
use crate::file::write_text;
use crate::ingest::{self, from_apollo, from_lee, from_rosco};
use crate::model::{Dataset, FilterMap};
use crate::specs::{apollo::ApolloFilter, lee::LeeFilter, rosco::RoscoFilter};

/* ---------------- Raw vendor dumps ---------------- */

pub fn save_raw<T: Serialize>(paths: &PathOptions, vendor: Vendor, records: &[T]) -> Result<PathBuf> {
    let path = paths.raw_path(vendor);
    write_text(&path, &serde_json::to_string(records)?)?;
    info!("Wrote {} {} records to {}", records.len(), vendor.label(), path.display());
    Ok(path)
}

/// A missing dump is an empty vendor, not an error.
pub fn load_raw<T: DeserializeOwned>(paths: &PathOptions, vendor: Vendor) -> Result<Vec<T>> {
    let path = paths.raw_path(vendor);
    if !path.exists() {
        warn!("No raw {} data at {}, skipping", vendor.label(), path.display());
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&text)?)
}

/// All three vendor dumps.
#[derive(Clone, Debug, Default)]
pub struct RawDumps {
    pub apollo: Vec<ApolloFilter>,
    pub lee: Vec<LeeFilter>,
    pub rosco: Vec<RoscoFilter>,
}

impl RawDumps {
    pub fn load(paths: &PathOptions) -> Result<Self> {
        Ok(Self {
            apollo: load_raw(paths, Vendor::Apollo)?,
            lee: load_raw(paths, Vendor::Lee)?,
            rosco: load_raw(paths, Vendor::Rosco)?,
        })
    }

    /// Canonical mappings in merge order ([`Vendor::ALL`]).
    pub fn ingest(&self) -> Vec<(Vendor, FilterMap)> {
        Vendor::ALL.into_iter().map(|v| (v, self.ingest_vendor(v))).collect()
    }

    fn ingest_vendor(&self, vendor: Vendor) -> FilterMap {
        match vendor {
            Vendor::Apollo => ingest::ingest(vendor, &self.apollo, from_apollo),
            Vendor::Lee => ingest::ingest(vendor, &self.lee, from_lee),
            Vendor::Rosco => ingest::ingest(vendor, &self.rosco, from_rosco),
        }
    }
}

/* ---------------- Assembly ---------------- */

/// Union of the vendor maps; on a shared ID the later vendor wins.
pub fn merge(parts: Vec<(Vendor, FilterMap)>) -> FilterMap {
    let mut all = FilterMap::new();
    for (vendor, map) in parts {
        for (id, filter) in map {
            let brand = filter.brand.clone();
            if let Some(prev) = all.insert(id.clone(), filter) {
                warn!("{id}: {} record replaces {} record ({})", brand, prev.brand, vendor.label());
            }
        }
    }
    info!("Total number of filters: {}", all.len());
    all
}

/// Ingest, merge and validate. Fails on an empty or invalid result.
pub fn assemble(raw: &RawDumps) -> Result<Dataset> {
    let dataset = Dataset::new(merge(raw.ingest()));
    dataset.validate()?;
    Ok(dataset)
}

/* ---------------- Output ---------------- */

/// Where [`write_outputs`] put things.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outputs {
    pub schema: PathBuf,
    pub dataset: PathBuf,
    pub sheet: PathBuf,
    pub filters: usize,
}

/// Validate, then write schema, data and spreadsheet.
pub fn write_outputs(dataset: &Dataset, opts: &PipelineOptions) -> Result<Outputs> {
    dataset.validate()?;

    let schema = opts.paths.schema_path();
    write_text(&schema, &serde_json::to_string_pretty(&json_schema())?)?;

    let data = opts.paths.dataset_path();
    write_text(&data, &dataset.to_json_string()?)?;
    info!("Dumped dataset to {}", data.display());

    let sheet = opts.export.sheet_path(&opts.paths);
    let text = to_sheet_string(&dataset.filters, opts.export.include_headers, opts.export.format.delim());
    write_text(&sheet, &text)?;
    info!("Dumped spreadsheet to {}", sheet.display());

    Ok(Outputs { schema, dataset: data, sheet, filters: dataset.filters.len() })
}

/// `compile`: raw dumps → dataset files.
pub fn compile(opts: &PipelineOptions) -> Result<Outputs> {
    let raw = RawDumps::load(&opts.paths)?;
    let dataset = assemble(&raw)?;
    write_outputs(&dataset, opts)
}

/// Read back a dataset file, schema-checked.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::NotFound(format!("{}: {e}", path.display())),
        _ => Error::Io(e),
    })?;
    Dataset::from_json_str(&text)
}

/// JSON Schema (2020-12) for `filters.json`.
pub fn json_schema() -> Value {
    let cie = json!({
        "type": "object",
        "title": "CIECoords",
        "properties": {
            "x": { "type": "number", "minimum": 0, "maximum": 1 },
            "y": { "type": "number", "minimum": 0, "maximum": 1 },
            "Y": { "type": "number", "minimum": 0, "maximum": 100 }
        },
        "required": ["x", "y", "Y"]
    });
    let channel = json!({ "type": "integer", "minimum": 0, "maximum": 255 });
    let optional = |inner: Value| json!({ "anyOf": [inner, { "type": "null" }], "default": null });

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "FilterModel",
        "type": "object",
        "$defs": {
            "CIECoords": cie,
            "RGB": {
                "type": "object",
                "title": "RGB",
                "properties": { "r": channel, "g": channel, "b": channel },
                "required": ["r", "g", "b"]
            },
            "LightingFilter": {
                "type": "object",
                "title": "LightingFilter",
                "properties": {
                    "brand": { "type": "string", "minLength": 1 },
                    "name": { "type": "string" },
                    "description": { "type": "string", "pattern": "^$|^(?!.*  ).*\\.$" },
                    "rgb": { "$ref": "#/$defs/RGB" },
                    "transmission": optional(json!({ "type": "number", "minimum": 0, "maximum": 1 })),
                    "spectral_distribution": optional(json!({
                        "type": "object",
                        "propertyNames": { "pattern": "^[0-9]+$" },
                        "additionalProperties": { "type": "number", "minimum": 0 }
                    })),
                    "source_a": optional(json!({ "$ref": "#/$defs/CIECoords" })),
                    "source_c": optional(json!({ "$ref": "#/$defs/CIECoords" })),
                    "source_d65": optional(json!({ "$ref": "#/$defs/CIECoords" }))
                },
                "required": ["brand", "name", "description", "rgb"]
            }
        },
        "properties": {
            "version": { "type": "string" },
            "filters": {
                "type": "object",
                "minProperties": 1,
                "additionalProperties": { "$ref": "#/$defs/LightingFilter" }
            }
        },
        "required": ["version", "filters"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::sample_filter;

    fn one(id: &str, brand: &str) -> FilterMap {
        FilterMap::from([(s!(id), sample_filter(brand))])
    }

    #[test]
    fn later_vendor_wins_on_collision() {
        let merged = merge(vec![
            (Vendor::Lee, one("X1", "Lee")),
            (Vendor::Rosco, one("X1", "Roscolux")),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged["X1"].brand, "Roscolux");
    }

    #[test]
    fn disjoint_ids_are_all_kept() {
        let merged = merge(vec![
            (Vendor::Apollo, one("AP1000", "Apollo")),
            (Vendor::Lee, one("L002", "Lee")),
        ]);
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["AP1000", "L002"]);
    }

    #[test]
    fn empty_raw_dumps_fail_validation() {
        let err = assemble(&RawDumps::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn invalid_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = PipelineOptions::default();
        opts.paths.dataset_dir = dir.path().join("dataset");

        let mut bad = sample_filter("Lee");
        bad.transmission = Some(1.5);
        let dataset = Dataset::new(FilterMap::from([(s!("L002"), bad)]));

        assert!(matches!(write_outputs(&dataset, &opts), Err(Error::Validation(_))));
        assert!(!opts.paths.dataset_dir.exists());
    }

    #[test]
    fn raw_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = PathOptions::default();
        paths.raw_dir = dir.path().to_path_buf();

        assert!(load_raw::<LeeFilter>(&paths, Vendor::Lee).unwrap().is_empty());

        let dataset = Dataset::new(one("L002", "Lee"));
        save_raw(&paths, Vendor::Lee, &[dataset.clone()]).unwrap();
        let back: Vec<Dataset> = load_raw(&paths, Vendor::Lee).unwrap();
        assert_eq!(back, vec![dataset]);
    }

    #[test]
    fn writes_all_three_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = PipelineOptions::default();
        opts.paths.dataset_dir = dir.path().to_path_buf();

        let out = write_outputs(&Dataset::new(one("L002", "Lee")), &opts).unwrap();
        assert_eq!(out.filters, 1);
        assert!(out.sheet.ends_with("filters.csv"));

        let schema: Value = serde_json::from_str(&fs::read_to_string(&out.schema).unwrap()).unwrap();
        assert_eq!(schema["required"], json!(["version", "filters"]));

        let back = load_dataset(&out.dataset).unwrap();
        assert_eq!(back.version, crate::config::consts::DATASET_VERSION);
        assert_eq!(back.filters["L002"], sample_filter("Lee"));
    }

    #[test]
    fn ingest_follows_merge_order() {
        let order: Vec<Vendor> = RawDumps::default().ingest().into_iter().map(|(v, _)| v).collect();
        assert_eq!(order, Vendor::ALL.to_vec());
    }

    #[test]
    fn only_a_missing_dataset_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = load_dataset(&dir.path().join("filters.json")).unwrap_err();
        assert!(matches!(missing, Error::NotFound(_)));

        let unreadable = load_dataset(dir.path()).unwrap_err();
        assert!(matches!(unreadable, Error::Io(_)));
    }
}
