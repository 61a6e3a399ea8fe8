// src/config/file.rs
//! `key=value` settings file layered over [`PipelineOptions::default`].
//!
//! ```text
//! # lighting_filters.conf
//! raw_dir=raw
//! dataset_dir=../dataset
//! apollo_pdf_dir=~/Downloads/apollo-pdf
//! apollo_hex_file=~/Downloads/colorhex.js
//! request_pause_ms=250
//! format=tsv
//! ```
//! Unknown keys are ignored with a warning; malformed values are errors.

use std::{fs, path::{Path, PathBuf}};

use log::{debug, warn};

use super::options::{ExportFormat, PipelineOptions};
use crate::error::{Error, Result};

/// Missing file → defaults.
pub fn load(path: &Path) -> Result<PipelineOptions> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(PipelineOptions::default());
    }
    let text = fs::read_to_string(path)?;
    parse(&text, &path.display().to_string())
}

pub fn parse(text: &str, origin: &str) -> Result<PipelineOptions> {
    let mut opts = PipelineOptions::default();

    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }

        let (key, val) = line
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .ok_or_else(|| Error::parse(origin, format!("line {}: expected key=value", n + 1)))?;

        match key {
            "raw_dir" => opts.paths.raw_dir = expand_home(val),
            "dataset_dir" => opts.paths.dataset_dir = expand_home(val),
            "apollo_pdf_dir" => opts.paths.apollo_pdf_dir = expand_home(val),
            "apollo_hex_file" => opts.paths.apollo_hex_file = expand_home(val),
            "request_pause_ms" => {
                opts.scrape.request_pause_ms = val.parse().map_err(|_| {
                    Error::parse(origin, format!("line {}: bad request_pause_ms '{val}'", n + 1))
                })?
            }
            "timeout_secs" => {
                opts.scrape.timeout_secs = val.parse().map_err(|_| {
                    Error::parse(origin, format!("line {}: bad timeout_secs '{val}'", n + 1))
                })?
            }
            "format" => {
                opts.export.format = match val.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(Error::parse(origin, format!("line {}: unknown format '{other}'", n + 1))),
                }
            }
            "include_headers" => opts.export.include_headers = val == "1" || val.eq_ignore_ascii_case("true"),
            other => warn!("{origin}: ignoring unknown key '{other}'"),
        }
    }

    Ok(opts)
}

/// `~/x` → `$HOME/x`. Anything else is taken literally.
pub fn expand_home(p: &str) -> PathBuf {
    if let Some(rest) = p.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_only_named_keys() {
        let text = "# comment\n\nraw_dir = scratch/raw\nformat=TSV\nrequest_pause_ms=250\n";
        let opts = parse(text, "test").unwrap();
        assert_eq!(opts.paths.raw_dir, PathBuf::from("scratch/raw"));
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert_eq!(opts.scrape.request_pause_ms, 250);
        assert_eq!(opts.paths.dataset_dir, PipelineOptions::default().paths.dataset_dir);
    }

    #[test]
    fn malformed_line_is_an_error() {
        assert!(parse("raw_dir", "test").is_err());
        assert!(parse("format=xlsx", "test").is_err());
        assert!(parse("request_pause_ms=soon", "test").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let opts = load(Path::new("definitely/not/here.conf")).unwrap();
        assert_eq!(opts, PipelineOptions::default());
    }
}
