// src/scrape.rs
//! Vendor batch loops: fetch or open each document, run its extractor,
//! collect the raw records.
//!
//! Error policy per vendor:
//! - Apollo (local PDFs): any error stops the run.
//! - Lee / Rosco (web): a recoverable error skips that document; a fatal one
//!   (template mismatch, I/O) stops the run.

use std::path::PathBuf;

use log::info;

use crate::{
    config::{
        consts::{LEE_BASE_URL, ROSCO_MYCOLOR_URL, ROSCO_TECHSHEET_URL},
        options::{PathOptions, PipelineOptions, Vendor},
    },
    core::net::Http,
    error::Result,
    progress::Progress,
    specs::{
        Extractor,
        apollo::{self, ApolloDocument, ApolloExtractor, ApolloFilter, HexTable},
        lee::{self, LeeExtractor, LeeFilter, LeePage},
        rosco::{self, RoscoExtractor, RoscoFilter, RoscoSheet},
    },
    store,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchPolicy {
    /// First error of any kind ends the batch.
    AbortOnAny,
    /// Recoverable errors skip the document; fatal ones end the batch.
    SkipRecoverable,
}

impl BatchPolicy {
    pub fn for_vendor(vendor: Vendor) -> Self {
        match vendor {
            Vendor::Apollo => BatchPolicy::AbortOnAny,
            Vendor::Lee | Vendor::Rosco => BatchPolicy::SkipRecoverable,
        }
    }
}

/// Run `extractor` over `items`, loading each with `load`.
pub fn run_batch<E, T>(
    extractor: &E,
    items: &[T],
    label: impl Fn(&T) -> String,
    mut load: impl FnMut(&T) -> Result<E::Input>,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<E::Record>>
where
    E: Extractor,
{
    let policy = BatchPolicy::for_vendor(extractor.vendor());
    if let Some(p) = progress.as_deref_mut() {
        p.begin(items.len());
    }

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let id = label(item);
        match load(item).and_then(|input| extractor.extract(&input)) {
            Ok(records) => {
                out.extend(records);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&id);
                }
            }
            Err(e) if policy == BatchPolicy::SkipRecoverable && e.is_recoverable() => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_skipped(&id, &e);
                }
            }
            Err(e) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("stopping at {id}"));
                    p.finish();
                }
                return Err(e);
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(out)
}

/* ---------------- Vendors ---------------- */

pub fn collect_apollo(paths: &PathOptions, progress: Option<&mut dyn Progress>) -> Result<Vec<ApolloFilter>> {
    let hex = HexTable::load(&paths.apollo_hex_file)?;
    let pdfs = apollo::collect_pdfs(&paths.apollo_pdf_dir)?;
    info!("Found {} Apollo PDFs, {} hex entries", pdfs.len(), hex.len());

    run_batch(
        &ApolloExtractor::new(hex),
        &pdfs,
        |p| p.display().to_string(),
        |p| ApolloDocument::load(p),
        progress,
    )
}

pub fn collect_lee(http: &Http, progress: Option<&mut dyn Progress>) -> Result<Vec<LeeFilter>> {
    let urls = lee::parse_listing(&http.get(LEE_BASE_URL)?)?;

    run_batch(
        &LeeExtractor,
        &urls,
        |u| u.clone(),
        |u| Ok(LeePage { url: u.clone(), html: http.get(u)? }),
        progress,
    )
}

pub fn collect_rosco(http: &Http, progress: Option<&mut dyn Progress>) -> Result<Vec<RoscoFilter>> {
    let listing = rosco::parse_listing(&http.get(ROSCO_MYCOLOR_URL)?)?;

    run_batch(
        &RoscoExtractor,
        &listing,
        |l| l.label.clone(),
        |l| {
            let html = http.post_form(ROSCO_TECHSHEET_URL, &[("ColorLabel", l.label.as_str())])?;
            Ok(RoscoSheet { listing: l.clone(), html })
        },
        progress,
    )
}

/// Collect one vendor and write its raw dump. Returns the dump path.
pub fn scrape_vendor(vendor: Vendor, opts: &PipelineOptions, progress: Option<&mut dyn Progress>) -> Result<PathBuf> {
    let paths = &opts.paths;
    match vendor {
        Vendor::Apollo => store::save_raw(paths, vendor, &collect_apollo(paths, progress)?),
        Vendor::Lee => {
            let http = Http::new(&opts.scrape)?;
            store::save_raw(paths, vendor, &collect_lee(&http, progress)?)
        }
        Vendor::Rosco => {
            let http = Http::new(&opts.scrape)?;
            store::save_raw(paths, vendor, &collect_rosco(&http, progress)?)
        }
    }
}
