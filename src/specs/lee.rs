// src/specs/lee.rs
//! Lee Filters colour pages (one HTML page per filter).
//!
//! - Listing: `li.colours-list__colour a[href]` → filter page URLs
//! - Header: `<h1>201 – Full C.T. Blue</h1>`; numeric codes become `L201`,
//!   anything else (`CL104`) is kept verbatim
//! - RGB: inline `style` hex of `.page-header__colour`
//! - Transmission: one `.colour__transmissions > li` block per colour
//!   temperature (3200K tungsten, 6774K daylight), each a spec list
//! - Spectral distribution: `circle.tooltip` markers whose `title` holds an
//!   HTML fragment `<span>nm</span> … <b>percent</b>`

use std::collections::HashMap;

use log::{debug, warn};
use reqwest::Url;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use super::Extractor;
use crate::config::consts::{LEE_BASE_URL, LEE_DAYLIGHT_K, LEE_TUNGSTEN_K};
use crate::config::options::Vendor;
use crate::core::html::{self, attr, require, select_all, select_first, style_hex, text_of};
use crate::core::units::{parse_number, parse_spec_value, percent_to_fraction};
use crate::error::{Error, Result};
use crate::model::{Rgb, SpectralDistribution};

/// Values from one temperature block. Only `transmission_y` is required.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SdVals {
    /// Percent, 0..=100
    pub transmission_y: f64,
    pub absorption: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub stop: Option<f64>,
    pub mired_shift: Option<f64>,
}

/// Raw Lee record, as dumped to `raw/lee.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeeFilter {
    pub filter_id: String,
    pub name: String,
    pub description: Option<String>,
    pub rgb: Rgb,
    pub tungsten_vals: Option<SdVals>,
    pub daylight_vals: Option<SdVals>,
    pub sd: Option<SpectralDistribution>,
    pub url: String,
}

/// One fetched filter page.
#[derive(Clone, Debug)]
pub struct LeePage {
    pub url: String,
    pub html: String,
}

/// Absolute filter page URLs from the colour listing.
pub fn parse_listing(listing_html: &str) -> Result<Vec<String>> {
    let base = Url::parse(LEE_BASE_URL).map_err(|e| Error::parse(LEE_BASE_URL, e.to_string()))?;
    let doc = html::parse_document(listing_html);

    let mut urls = Vec::new();
    for a in select_all(doc.root_element(), "li.colours-list__colour a")? {
        let Some(href) = attr(a, "href") else { continue };
        let url = base.join(href).map_err(|e| Error::parse(href, e.to_string()))?;
        urls.push(url.to_string());
    }
    debug!("Lee listing: {} filter pages", urls.len());
    Ok(urls)
}

pub struct LeeExtractor;

impl Extractor for LeeExtractor {
    type Input = LeePage;
    type Record = LeeFilter;

    fn vendor(&self) -> Vendor {
        Vendor::Lee
    }

    fn extract(&self, page: &LeePage) -> Result<Vec<LeeFilter>> {
        let doc = html::parse_document(&page.html);
        let root = doc.root_element();
        let src = page.url.as_str();

        let heading = text_of(require(root, ".page-header__text h1", src)?);
        let (filter_id, name) = split_heading(&heading, src)?;

        let description = select_first(root, ".page-header__colour-desc p")?
            .map(text_of)
            .filter(|d| !d.is_empty());

        let swatch = require(root, ".page-header__colour", src)?;
        let hex = attr(swatch, "style")
            .and_then(style_hex)
            .ok_or_else(|| Error::parse(src, "no colour in header style"))?;
        let rgb = Rgb::from_hex(hex).map_err(|_| Error::parse(src, format!("bad colour '{hex}'")))?;

        let mut tungsten_vals = None;
        let mut daylight_vals = None;
        for block in select_all(root, ".colour__transmissions > li")? {
            let (kelvin, Some(vals)) = read_block(block, src)? else { continue };
            match kelvin {
                LEE_TUNGSTEN_K => tungsten_vals = Some(vals),
                LEE_DAYLIGHT_K => daylight_vals = Some(vals),
                other => return Err(Error::parse(src, format!("unrecognised colour temperature {other}K"))),
            }
        }

        let sd = read_spectral_distribution(root, src)?;
        if sd.is_none() {
            warn!("{filter_id}: no spectral distribution on page");
        }

        Ok(vec![LeeFilter {
            filter_id,
            name,
            description,
            rgb,
            tungsten_vals,
            daylight_vals,
            sd,
            url: s!(src),
        }])
    }
}

/* ---------- helpers ---------- */

/// `"201 – Full C.T. Blue"` → `("L201", "Full C.T. Blue")`
fn split_heading(heading: &str, src: &str) -> Result<(String, String)> {
    let (token, rest) = heading
        .split_once(' ')
        .ok_or_else(|| Error::parse(src, format!("heading '{heading}' has no name")))?;

    let filter_id = match token.parse::<u32>() {
        Ok(n) => format!("L{n:03}"),
        Err(_) => s!(token),
    };
    let name = rest.replace('\u{2013}', "").trim().to_string();
    Ok((filter_id, name))
}

/// One temperature block. `None` values when the block has no transmission Y.
fn read_block(block: ElementRef<'_>, src: &str) -> Result<(u32, Option<SdVals>)> {
    let title = text_of(require(block, "p", src)?);
    let kelvin = title
        .split(' ')
        .nth(2)
        .and_then(|t| t.trim_end_matches('K').parse::<u32>().ok())
        .ok_or_else(|| Error::parse(src, format!("no colour temperature in '{title}'")))?;

    let mut fields: HashMap<String, Option<f64>> = HashMap::new();
    for item in select_all(block, "li")? {
        let key = text_of(require(item, ".spec-list__spec", src)?)
            .trim_end_matches(':')
            .to_lowercase()
            .replace(' ', "_");
        let raw = text_of(require(item, ".spec-list__value", src)?);
        let value = parse_spec_value(&raw)
            .map_err(|_| Error::parse(src, format!("bad value '{raw}' for {key} at {kelvin}K")))?;
        fields.insert(key, value);
    }

    let get = |k: &str| fields.get(k).copied().flatten();
    let Some(transmission_y) = get("transmission_y") else {
        debug!("{src}: {kelvin}K block has no transmission Y, dropped");
        return Ok((kelvin, None));
    };

    Ok((
        kelvin,
        Some(SdVals {
            transmission_y,
            absorption: get("absorption"),
            x: get("x"),
            y: get("y"),
            stop: get("stop"),
            mired_shift: get("mired_shift"),
        }),
    ))
}

fn read_spectral_distribution(root: ElementRef<'_>, src: &str) -> Result<Option<SpectralDistribution>> {
    let mut sd = SpectralDistribution::new();
    for marker in select_all(root, "circle.tooltip")? {
        let Some(title) = attr(marker, "title") else { continue };
        let frag = html::parse_fragment(title);
        let nm = text_of(require(frag.root_element(), "span", src)?);
        let pct = text_of(require(frag.root_element(), "b", src)?);

        let wavelength = parse_number(nm.trim_end_matches("nm"))
            .map_err(|_| Error::parse(src, format!("bad wavelength '{nm}'")))? as u32;
        let fraction = percent_to_fraction(&pct)
            .map_err(|_| Error::parse(src, format!("bad transmission '{pct}' at {nm}nm")))?;
        sd.insert(wavelength, fraction);
    }
    Ok(Some(sd).filter(|sd| !sd.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = include_str!("../../tests/fixtures/lee_listing.html");
    const FILTER: &str = include_str!("../../tests/fixtures/lee_filter.html");

    fn page(html: &str) -> LeePage {
        LeePage { url: s!("https://leefilters.com/lighting/colour/201/"), html: s!(html) }
    }

    #[test]
    fn listing_resolves_relative_links() {
        let urls = parse_listing(LISTING).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://leefilters.com/lighting/colour/201-full-ct-blue/",
                "https://leefilters.com/lighting/colour/cl104-cool-led-deep-amber/",
            ]
        );
    }

    #[test]
    fn reads_filter_page() {
        let f = LeeExtractor.extract(&page(FILTER)).unwrap().remove(0);
        assert_eq!(f.filter_id, "L201");
        assert_eq!(f.name, "Full C.T. Blue");
        assert_eq!(f.description.as_deref(), Some("Converts tungsten to daylight"));
        assert_eq!(f.rgb, Rgb::new(0xf5, 0xa6, 0x23));

        let t = f.tungsten_vals.unwrap();
        assert_eq!(t.transmission_y, 36.1);
        assert_eq!(t.x, Some(0.2915));
        assert_eq!(t.stop, Some(1.5));
        assert_eq!(t.mired_shift, Some(-137.0));

        let d = f.daylight_vals.unwrap();
        assert_eq!(d.transmission_y, 34.2);
        assert_eq!(d.stop, Some(1.5));
        assert_eq!(d.mired_shift, None);

        let sd = f.sd.unwrap();
        assert_eq!(sd.len(), 2);
        assert_eq!(sd[&400], 0.455);
        assert_eq!(sd[&450], 0.6025);
    }

    #[test]
    fn specialty_codes_kept_verbatim() {
        let (id, name) = split_heading("CL104 Cool LED Deep Amber", "x").unwrap();
        assert_eq!(id, "CL104");
        assert_eq!(name, "Cool LED Deep Amber");
        assert_eq!(split_heading("2 – Rose Pink", "x").unwrap().0, "L002");
        assert!(split_heading("L201", "x").is_err());
    }

    #[test]
    fn block_without_transmission_y_is_dropped() {
        let html = FILTER.replace(
            r#"<li><span class="spec-list__spec">Transmission Y</span><span class="spec-list__value">34.2</span></li>"#,
            "",
        );
        let f = LeeExtractor.extract(&page(&html)).unwrap().remove(0);
        assert!(f.tungsten_vals.is_some());
        assert_eq!(f.daylight_vals, None);
    }

    #[test]
    fn unknown_temperature_is_a_parse_error() {
        let html = FILTER.replace("6774K", "5600K");
        let err = LeeExtractor.extract(&page(&html)).unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("5600K"));
    }

    #[test]
    fn empty_block_at_other_temperature_is_ignored() {
        let extra = r#"<li><p>Transmission at 5600K</p><ul class="spec-list"><li><span class="spec-list__spec">Absorption</span><span class="spec-list__value">-</span></li></ul></li>
  </ul>
</body>"#;
        let html = FILTER.replacen("  </ul>\n</body>", extra, 1);
        assert!(html.contains("5600K"));
        let f = LeeExtractor.extract(&page(&html)).unwrap().remove(0);
        assert_eq!(f.tungsten_vals.unwrap().transmission_y, 36.1);
        assert_eq!(f.daylight_vals.unwrap().transmission_y, 34.2);
    }

    #[test]
    fn missing_graph_is_not_an_error() {
        let html = FILTER.replace("class=\"tooltip\"", "class=\"marker\"");
        let f = LeeExtractor.extract(&page(&html)).unwrap().remove(0);
        assert_eq!(f.sd, None);
    }
}
