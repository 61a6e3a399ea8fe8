// src/specs/rosco.rs
//! Rosco "MyColor" legacy app.
//!
//! Two steps per filter: the listing (`div.colorSquareCenter`) gives the label
//! and swatch colour, then a tech sheet (form POST by label) gives the rest.
//!
//! The tech sheet is a layout table. Inside `table.colorData` the first child
//! table holds the colour data, the second the spectral graph image. Cell
//! positions in the colour table (row, column):
//!
//! ```text
//! (0,1) brands, comma separated     (1,3) Y  source A   (1,5) Y  D65
//! (1,1) "<id> <name>"                (2,3) x  source A   (2,5) x  D65
//! (2,1) transmission "70% ..."       (3,3) y  source A   (3,5) y  D65
//! (4,1) description
//! (5,1) additional info
//! ```
//!
//! Nothing about these positions is self-describing; a redesign of the sheet
//! shows up as `Error::Parse` on every filter.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::Extractor;
use crate::config::options::Vendor;
use crate::core::html::{self, attr, require, select_all, select_first, style_hex, table_cells};
use crate::core::sanitize::tidy_rosco_prose;
use crate::core::units::{parse_number, parse_rosco_transmission};
use crate::error::{Error, Result};
use crate::model::{CieCoords, Rgb};

/// GamColor labels carry a two-token ID ("G N105 ...").
const GAMCOLOR_MARKER: &str = "G N";

/// Raw Rosco record, as dumped to `raw/rosco.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoscoFilter {
    pub filter_id: String,
    pub name: String,
    pub description: String,
    pub rgb: Rgb,
    pub transmission: Option<f64>,
    pub source_a: CieCoords,
    pub source_d65: CieCoords,
    pub brand: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One swatch from the listing page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoscoListing {
    pub label: String,
    pub rgb: Rgb,
}

/// A listing entry and its fetched tech sheet.
#[derive(Clone, Debug)]
pub struct RoscoSheet {
    pub listing: RoscoListing,
    pub html: String,
}

/// Every swatch with a usable label and colour, in page (chromatic) order.
pub fn parse_listing(listing_html: &str) -> Result<Vec<RoscoListing>> {
    let doc = html::parse_document(listing_html);
    let mut out = Vec::new();

    for square in select_all(doc.root_element(), "div.colorSquareCenter")? {
        let label = attr(square, "id").unwrap_or_default().trim();
        let rgb = attr(square, "style").and_then(style_hex).map(Rgb::from_hex);
        match (label, rgb) {
            ("", _) => warn!("Rosco listing: swatch without a label"),
            (label, Some(Ok(rgb))) => out.push(RoscoListing { label: s!(label), rgb }),
            (label, _) => warn!("Rosco listing: no colour for {label}"),
        }
    }
    info!("Collected {} Rosco colours", out.len());
    Ok(out)
}

pub struct RoscoExtractor;

impl Extractor for RoscoExtractor {
    type Input = RoscoSheet;
    type Record = RoscoFilter;

    fn vendor(&self) -> Vendor {
        Vendor::Rosco
    }

    fn extract(&self, sheet: &RoscoSheet) -> Result<Vec<RoscoFilter>> {
        let src = sheet.listing.label.as_str();
        let doc = html::parse_document(&sheet.html);

        let parent = require(doc.root_element(), "table.colorData", src)?;
        let tables = select_all(parent, "table")?;
        let (color_table, graph_table) = match tables.as_slice() {
            [color, graph, ..] => (*color, *graph),
            other => return Err(Error::parse(src, format!("{} data tables, expected 2", other.len()))),
        };
        let rows = table_cells(color_table)?;
        let at = |r, c| cell(&rows, r, c, src);
        let num = |r, c| number(&rows, r, c, src);

        let (filter_id, name) = split_full_name(at(1, 1)?, src)?;
        debug!("{filter_id} ({name})");

        let source_a = CieCoords::new(num(2, 3)?, num(3, 3)?, num(1, 3)?).normalized();
        let source_d65 = CieCoords::new(num(2, 5)?, num(3, 5)?, num(1, 5)?).normalized();

        let transmission_cell = at(2, 1)?;
        let transmission = parse_rosco_transmission(transmission_cell);
        if transmission.is_none() {
            info!("Unable to parse transmission for {filter_id} of '{transmission_cell}'");
        }

        let mut description = s!(at(4, 1)?);
        let additional = at(5, 1)?;
        if !additional.is_empty() {
            description.push_str(&format!(" {additional}."));
        }

        let brand = at(0, 1)?
            .split(',')
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(String::from)
            .collect();

        let image_url = select_first(graph_table, "img")?
            .and_then(|img| attr(img, "src"))
            .map(String::from);

        Ok(vec![RoscoFilter {
            filter_id,
            name,
            description: tidy_rosco_prose(&description),
            rgb: sheet.listing.rgb,
            transmission,
            source_a,
            source_d65,
            brand,
            image_url,
        }])
    }
}

/* ---------- helpers ---------- */

fn cell<'a>(rows: &'a [Vec<String>], r: usize, c: usize, src: &str) -> Result<&'a str> {
    rows.get(r)
        .and_then(|row| row.get(c))
        .map(String::as_str)
        .ok_or_else(|| Error::parse(src, format!("tech sheet has no cell ({r}, {c})")))
}

fn number(rows: &[Vec<String>], r: usize, c: usize, src: &str) -> Result<f64> {
    let raw = cell(rows, r, c, src)?;
    parse_number(raw).map_err(|_| Error::parse(src, format!("cell ({r}, {c}) '{raw}' is not a number")))
}

/// `"R02 Bastard Amber"` → `("R02", "Bastard Amber")`;
/// GamColor `"G N105 Antique Rose"` → `("G N105", "Antique Rose")`.
fn split_full_name(full: &str, src: &str) -> Result<(String, String)> {
    let id_tokens = if full.contains(GAMCOLOR_MARKER) { 2 } else { 1 };
    let mut parts = full.splitn(id_tokens + 1, ' ');
    let id: Vec<&str> = parts.by_ref().take(id_tokens).collect();
    match parts.next() {
        Some(name) if id.len() == id_tokens => Ok((id.join(" "), s!(name.trim()))),
        _ => Err(Error::parse(src, format!("cannot split '{full}' into ID and name"))),
    }
}
