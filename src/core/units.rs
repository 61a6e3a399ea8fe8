// src/core/units.rs
//! Unit converters: vulgar fractions, percentages, vendor transmission strings.

use crate::error::{Error, Result};

/// Numeric value of a Unicode vulgar-fraction glyph.
pub fn vulgar_fraction(ch: char) -> Option<f64> {
    let v = match ch {
        '¼' => 1.0 / 4.0,
        '½' => 1.0 / 2.0,
        '¾' => 3.0 / 4.0,
        '⅐' => 1.0 / 7.0,
        '⅑' => 1.0 / 9.0,
        '⅒' => 1.0 / 10.0,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '⅕' => 1.0 / 5.0,
        '⅖' => 2.0 / 5.0,
        '⅗' => 3.0 / 5.0,
        '⅘' => 4.0 / 5.0,
        '⅙' => 1.0 / 6.0,
        '⅚' => 5.0 / 6.0,
        '⅛' => 1.0 / 8.0,
        '⅜' => 3.0 / 8.0,
        '⅝' => 5.0 / 8.0,
        '⅞' => 7.0 / 8.0,
        '↉' => 0.0,
        _ => return None,
    };
    Some(v)
}

pub fn contains_vulgar_fraction(s: &str) -> bool {
    s.chars().any(|c| vulgar_fraction(c).is_some())
}

/// Decode a plain, vulgar or mixed fraction: `"¾"`, `"2"`, `"1.5"`, `"1½"`.
///
/// - one character: a fraction glyph (or a lone digit)
/// - last character a digit: plain number
/// - otherwise: number formed by the leading characters plus the trailing glyph
pub fn decode_fraction(value: &str) -> Result<f64> {
    let mut chars = value.chars();
    let last = chars.next_back().ok_or_else(|| Error::parse(value, "empty fraction"))?;
    let head = chars.as_str();

    if head.is_empty() {
        if let Some(d) = last.to_digit(10) {
            return Ok(d as f64);
        }
        return vulgar_fraction(last)
            .ok_or_else(|| Error::parse(value, format!("'{last}' is not a fraction")));
    }
    if last.is_ascii_digit() {
        return parse_number(value);
    }

    let whole = parse_number(head)?;
    let frac = vulgar_fraction(last)
        .ok_or_else(|| Error::parse(value, format!("'{last}' is not a fraction")))?;
    Ok(whole + frac)
}

pub fn parse_number(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| Error::parse(s, "not a number"))
}

/// `"45%"` / `"45"` → 0.45
pub fn percent_to_fraction(token: &str) -> Result<f64> {
    Ok(parse_number(token.trim().trim_end_matches('%'))? / 100.0)
}

/// One value from a Lee spec list.
/// `<`/`>` qualifiers are dropped, `-` means no value.
pub fn parse_spec_value(raw: &str) -> Result<Option<f64>> {
    let value = raw.replace(['<', '>'], "");
    let value = value.trim();

    if value == "-" || value.is_empty() {
        Ok(None)
    } else if contains_vulgar_fraction(value) {
        decode_fraction(value).map(Some)
    } else {
        parse_number(value).map(Some)
    }
}

/// Tech-sheet markers that mean "measured zero", not "not reported".
pub const ZERO_TRANSMISSION_SENTINELS: [&str; 2] = ["Y=0.0", "Y=0"];

/// Rosco tech-sheet transmission cell, e.g. `"45% Y=44.8"`.
///
/// The leading `%` token wins. A bare zero sentinel maps to 0.0; anything else
/// that does not parse is missing data.
pub fn parse_rosco_transmission(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if ZERO_TRANSMISSION_SENTINELS.contains(&cell) {
        return Some(0.0);
    }
    let token = cell.split(' ').next().unwrap_or("");
    percent_to_fraction(token).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_single_glyph() {
        assert_eq!(decode_fraction("¾").unwrap(), 0.75);
        assert_eq!(decode_fraction("½").unwrap(), 0.5);
    }

    #[test]
    fn decodes_mixed_and_plain() {
        assert_eq!(decode_fraction("1½").unwrap(), 1.5);
        assert_eq!(decode_fraction("2").unwrap(), 2.0);
        assert_eq!(decode_fraction("0.25").unwrap(), 0.25);
    }

    #[test]
    fn unknown_glyph_fails() {
        assert!(decode_fraction("1x").is_err());
        assert!(decode_fraction("⅟").is_err());
        assert!(decode_fraction("").is_err());
    }

    #[test]
    fn spec_values() {
        assert_eq!(parse_spec_value("<0.5").unwrap(), Some(0.5));
        assert_eq!(parse_spec_value("> 12").unwrap(), Some(12.0));
        assert_eq!(parse_spec_value(" - ").unwrap(), None);
        assert_eq!(parse_spec_value("1⅓").unwrap(), Some(1.0 + 1.0 / 3.0));
        assert!(parse_spec_value("n/a").is_err());
    }

    #[test]
    fn rosco_transmission_policy() {
        assert_eq!(parse_rosco_transmission("45% Y=44.8"), Some(0.45));
        assert_eq!(parse_rosco_transmission("Y=0.0"), Some(0.0));
        assert_eq!(parse_rosco_transmission("See note"), None);
        assert_eq!(parse_rosco_transmission(""), None);
    }
}
