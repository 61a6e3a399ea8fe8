// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    pub paths: PathOptions,
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            paths: PathOptions::default(),
            scrape: ScrapeOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vendor {
    Apollo,
    Lee,
    Rosco,
}

impl Vendor {
    /// Merge order: later vendors overwrite earlier ones on ID collision.
    pub const ALL: [Vendor; 3] = [Vendor::Apollo, Vendor::Lee, Vendor::Rosco];

    pub fn raw_file(&self) -> &'static str {
        match self {
            Vendor::Apollo => APOLLO_RAW_FILE,
            Vendor::Lee => LEE_RAW_FILE,
            Vendor::Rosco => ROSCO_RAW_FILE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Vendor::Apollo => "Apollo",
            Vendor::Lee => "Lee",
            Vendor::Rosco => "Rosco",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathOptions {
    pub raw_dir: PathBuf,
    pub dataset_dir: PathBuf,
    pub apollo_pdf_dir: PathBuf,
    pub apollo_hex_file: PathBuf,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from(DEFAULT_RAW_DIR),
            dataset_dir: PathBuf::from(DEFAULT_DATASET_DIR),
            apollo_pdf_dir: PathBuf::from(DEFAULT_APOLLO_PDF_DIR),
            apollo_hex_file: PathBuf::from(DEFAULT_APOLLO_HEX_FILE),
        }
    }
}

impl PathOptions {
    pub fn raw_path(&self, vendor: Vendor) -> PathBuf {
        self.raw_dir.join(vendor.raw_file())
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.dataset_dir.join(DATASET_FILE)
    }

    pub fn schema_path(&self) -> PathBuf {
        self.dataset_dir.join(SCHEMA_FILE)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Sleep between vendor requests. Zero = back to back.
    pub request_pause_ms: u64,
    pub timeout_secs: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self { request_pause_ms: 0, timeout_secs: HTTP_TIMEOUT_SECS }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { format: ExportFormat::Csv, include_headers: true }
    }
}

impl ExportOptions {
    /// `<dataset_dir>/filters.<ext>`
    pub fn sheet_path(&self, paths: &PathOptions) -> PathBuf {
        paths.dataset_dir.join(join!(SHEET_STEM, ".", self.format.ext()))
    }
}
