// src/specs/apollo.rs
//! Apollo swatch-book PDFs (two pages per filter).
//!
//! Front page, by line:
//! - `0`       filter ID (`AP1000`)
//! - `1..=2`   colour name, wrapped over two lines
//! - `-2`      `... %T <n>` transmission, **or**
//! - `3..-1`   a conversion note for CTO/CTB/CTS colours (no transmission)
//!
//! Back page: the prose between the "Possible Uses" header and the
//! "Color Description" (or "Note") header, plus the rating boxes.
//!
//! RGB is not in the PDF; it comes from Apollo's `colorhex.js` lookup table.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{boxes::{self, ApolloBoxes}, Extractor};
use crate::config::{consts::APOLLO_PDF_PREFIX, options::Vendor};
use crate::core::pdf::{self, PdfPage};
use crate::core::sanitize::{ensure_period, join_wrapped_lines, straighten_quotes};
use crate::core::units::percent_to_fraction;
use crate::error::{Error, Result};
use crate::model::Rgb;

/// Diffusion with no colour entry in the hex table; it is white.
pub const DIFFUSION_WHITE_ID: &str = "AP1050";

const USES_HEADER: &str = "Possible Uses";
const COLOR_HEADER: &str = "Color Description";
const NOTE_HEADER: &str = "Note";
const TRANSMISSION_MARK: &str = "%T";

/// Raw Apollo record, as dumped to `raw/apollo.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApolloFilter {
    pub filter_id: String,
    pub name: String,
    pub description: Option<String>,
    pub conversion: Option<String>,
    pub rgb: Rgb,
    pub transmission: Option<f64>,
    pub color_description: Option<String>,
    pub boxes: Option<ApolloBoxes>,
}

/// Both pages of one swatch-book PDF.
#[derive(Clone, Debug)]
pub struct ApolloDocument {
    pub source: String,
    pub front: PdfPage,
    pub back: PdfPage,
}

impl ApolloDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let source = path.display().to_string();
        let mut pages = pdf::load_pages(path)?.into_iter();
        match (pages.next(), pages.next()) {
            (Some(front), Some(back)) => Ok(Self { source, front, back }),
            _ => Err(Error::parse(source, "expected two pages")),
        }
    }
}

/// Filter ID → colour, from the vendor's JS object literal.
#[derive(Clone, Debug, Default)]
pub struct HexTable(HashMap<String, Rgb>);

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']?([\w-]+)["']?\s*:\s*\{([^{}]*)\}"#).expect("entry regex")
});
static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']?hex["']?\s*:\s*["']#?([0-9A-Fa-f]{6})["']"#).expect("hex regex")
});

impl HexTable {
    /// Accepts `var x = { "AP1000": { "hex": "#aabbcc", ... }, AP1100: {...} }`.
    pub fn parse(js: &str) -> Result<Self> {
        let mut map = HashMap::new();
        for cap in ENTRY_RE.captures_iter(js) {
            if let Some(hex) = HEX_RE.captures(&cap[2]) {
                map.insert(cap[1].to_string(), Rgb::from_hex(&hex[1])?);
            }
        }
        debug!("Hex table has {} entries", map.len());
        Ok(Self(map))
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rgb_for(&self, filter_id: &str) -> Result<Rgb> {
        if filter_id == DIFFUSION_WHITE_ID {
            return Ok(Rgb::WHITE);
        }
        self.0
            .get(filter_id)
            .copied()
            .ok_or_else(|| Error::parse(filter_id, "no colour in hex table"))
    }
}

/// `AP*.pdf` in `dir`, sorted by name.
pub fn collect_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let is_pdf = path.extension().and_then(|s| s.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if path.is_file() && is_pdf && name.starts_with(APOLLO_PDF_PREFIX) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

pub struct ApolloExtractor {
    hex: HexTable,
}

impl ApolloExtractor {
    pub fn new(hex: HexTable) -> Self {
        Self { hex }
    }
}

impl Extractor for ApolloExtractor {
    type Input = ApolloDocument;
    type Record = ApolloFilter;

    fn vendor(&self) -> Vendor {
        Vendor::Apollo
    }

    fn extract(&self, doc: &ApolloDocument) -> Result<Vec<ApolloFilter>> {
        let front = clean_lines(&doc.front);
        let back = clean_lines(&doc.back);
        let src = doc.source.as_str();

        let front_page = read_front(&front, src)?;
        let (description, color_description) = read_back(&back, src)?;
        let boxes = boxes::classify(&doc.back.rects, src)?;
        let rgb = self.hex.rgb_for(&front_page.filter_id)?;

        debug!("{} ({}): {:?}", front_page.name, front_page.filter_id, description);

        Ok(vec![ApolloFilter {
            filter_id: front_page.filter_id,
            name: front_page.name,
            description,
            conversion: front_page.conversion,
            rgb,
            transmission: front_page.transmission,
            color_description,
            boxes,
        }])
    }
}

/* ---------- helpers ---------- */

struct FrontPage {
    filter_id: String,
    name: String,
    transmission: Option<f64>,
    conversion: Option<String>,
}

fn clean_lines(page: &PdfPage) -> Vec<String> {
    page.lines.iter().map(|l| straighten_quotes(l)).collect()
}

fn read_front(lines: &[String], src: &str) -> Result<FrontPage> {
    if lines.len() < 4 {
        return Err(Error::parse(src, format!("front page has {} lines, expected at least 4", lines.len())));
    }
    let filter_id = lines[0].trim().to_string();
    let name = join!(lines[1].trim(), " ", lines[2].trim());

    let second_last = &lines[lines.len() - 2];
    let (transmission, conversion) = if second_last.contains(TRANSMISSION_MARK) {
        let token = second_last
            .split(' ')
            .nth(2)
            .ok_or_else(|| Error::parse(src, format!("no value in '{second_last}'")))?;
        let t = percent_to_fraction(token).map_err(|_| Error::parse(src, format!("bad transmission '{token}'")))?;
        (Some(t), None)
    } else {
        let note = lines[3..lines.len() - 1].join(" ");
        (None, Some(note).filter(|n| !n.trim().is_empty()))
    };

    Ok(FrontPage { filter_id, name, transmission, conversion })
}

fn read_back(lines: &[String], src: &str) -> Result<(Option<String>, Option<String>)> {
    let color_idx = lines
        .iter()
        .position(|l| l.contains(COLOR_HEADER) || l.contains(NOTE_HEADER))
        .ok_or_else(|| Error::parse(src, format!("no '{COLOR_HEADER}' or '{NOTE_HEADER}' header")))?;

    let color_description = if lines[color_idx].contains(NOTE_HEADER) {
        None
    } else {
        let line = lines
            .get(color_idx + 1)
            .ok_or_else(|| Error::parse(src, "nothing after colour description header"))?;
        Some(rejoin_split_initial(line))
    };

    let uses_idx = lines
        .iter()
        .position(|l| l.contains(USES_HEADER))
        .ok_or_else(|| Error::parse(src, format!("no '{USES_HEADER}' header")))?;
    if uses_idx >= color_idx {
        return Err(Error::parse(src, "headers out of order"));
    }

    let description = ensure_period(&join_wrapped_lines(&lines[uses_idx + 1..color_idx]));
    let description = Some(description).filter(|d| !d.is_empty());

    Ok((description, color_description))
}

/// "R ed orange" → "Red orange": the PDF sometimes splits off the first letter.
fn rejoin_split_initial(line: &str) -> String {
    if line.chars().nth(1) == Some(' ') {
        line.replacen(' ', "", 1)
    } else {
        s!(line)
    }
}
