// src/model/color.rs
//! Colour value types shared by every vendor: 8-bit RGB and CIE xyY.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Equivalent RGB value of a filter, 8-bit per channel.
///
/// Serialised as `{"r", "g", "b"}`; raw vendor dumps may also hold `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RgbRepr")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 0xff, g: 0xff, b: 0xff };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Accepts `rrggbb` with or without a leading `#`, any case.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let h = hex.trim().trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return Err(Error::parse(hex, "expected 6 hex digits"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&h[i..i + 2], 16)
                .map_err(|e| Error::parse(hex, e.to_string()))
        };
        Ok(Self { r: channel(0)?, g: channel(2)?, b: channel(4)? })
    }

    pub fn as_tuple(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// CIE L* (0..=100) of the sRGB colour. Used to pick a legible text colour.
    pub fn perceived_lightness(&self) -> f64 {
        fn linear(c: u8) -> f64 {
            let v = c as f64 / 255.0;
            if v <= 0.04045 { v / 12.92 } else { ((v + 0.055) / 1.055).powf(2.4) }
        }
        let y = 0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b);
        if y <= 216.0 / 24389.0 {
            y * (24389.0 / 27.0)
        } else {
            y.cbrt() * 116.0 - 16.0
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RgbRepr {
    Fields { r: u8, g: u8, b: u8 },
    Triple(u8, u8, u8),
}

impl From<RgbRepr> for Rgb {
    fn from(repr: RgbRepr) -> Self {
        match repr {
            RgbRepr::Fields { r, g, b } | RgbRepr::Triple(r, g, b) => Self { r, g, b },
        }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

/// CIE 1931 xyY coordinates under one illuminant.
/// x, y in [0, 1]; Y in [0, 100].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CieCoords {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "Y", alias = "transmission_y")]
    pub big_y: f64,
}

impl CieCoords {
    pub fn new(x: f64, y: f64, big_y: f64) -> Self {
        Self { x, y, big_y }
    }

    /// Rescale percentage chromaticity (x or y > 1) into [0, 1]. Y is untouched.
    /// Applying it twice is a no-op.
    pub fn normalized(self) -> Self {
        if self.x > 1.0 || self.y > 1.0 {
            Self { x: self.x / 100.0, y: self.y / 100.0, big_y: self.big_y }
        } else {
            self
        }
    }

    /// Canonical precision: x, y to 4 places, Y to 2.
    pub fn rounded(self) -> Self {
        Self {
            x: round_dp(self.x, 4),
            y: round_dp(self.y, 4),
            big_y: round_dp(self.big_y, 2),
        }
    }

    /// `(x, y, Y)` as shown in the spreadsheet.
    pub fn to_coords(&self) -> String {
        format!("({}, {}, {})", self.x, self.y, self.big_y)
    }

    pub fn in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.x)
            && (0.0..=1.0).contains(&self.y)
            && (0.0..=100.0).contains(&self.big_y)
    }
}

/// Round half away from zero to `dp` decimal places.
pub fn round_dp(v: f64, dp: i32) -> f64 {
    let m = 10f64.powi(dp);
    (v * m).round() / m
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hex_formats_lowercase_with_hash() {
        assert_eq!(Rgb::new(255, 0, 171).to_hex(), "#ff00ab");
        assert_eq!(Rgb::from_hex("FF00AB").unwrap(), Rgb::new(255, 0, 171));
        assert_eq!(Rgb::from_hex("#ff00ab").unwrap(), Rgb::new(255, 0, 171));
    }

    #[test]
    fn bad_hex_is_a_parse_error() {
        assert!(Rgb::from_hex("#ff00a").is_err());
        assert!(Rgb::from_hex("zz0000").is_err());
    }

    #[test]
    fn lightness_extremes() {
        assert!(Rgb::new(0, 0, 0).perceived_lightness().abs() < 1e-9);
        assert!((Rgb::WHITE.perceived_lightness() - 100.0).abs() < 1e-6);
        assert!(Rgb::new(0, 0, 139).perceived_lightness() < 50.0);
        assert!(Rgb::new(255, 255, 150).perceived_lightness() > 50.0);
    }

    #[test]
    fn percentage_coordinates_are_rescaled() {
        let c = CieCoords::new(50.0, 30.0, 10.0).normalized();
        assert_eq!(c, CieCoords::new(0.5, 0.3, 10.0));
    }

    #[test]
    fn normalizing_twice_is_a_no_op() {
        let c = CieCoords::new(0.5, 0.3, 10.0);
        assert_eq!(c.normalized(), c);
        assert_eq!(c.normalized().normalized(), c);
    }

    #[test]
    fn reads_object_or_triple_and_writes_object() {
        let obj: Rgb = serde_json::from_str(r#"{"r":253,"g":216,"b":168}"#).unwrap();
        let triple: Rgb = serde_json::from_str("[253, 216, 168]").unwrap();
        assert_eq!(obj, triple);
        assert_eq!(serde_json::to_string(&obj).unwrap(), r#"{"r":253,"g":216,"b":168}"#);
        assert!(serde_json::from_str::<Rgb>("[300, 0, 0]").is_err());
    }

    #[test]
    fn luminance_accepts_transmission_y_key() {
        let c: CieCoords = serde_json::from_str(r#"{"x":0.5,"y":0.3,"transmission_y":10.0}"#).unwrap();
        assert_eq!(c, CieCoords::new(0.5, 0.3, 10.0));
        assert!(serde_json::to_string(&c).unwrap().contains(r#""Y":10.0"#));
    }

    #[test]
    fn rounding_to_canonical_precision() {
        let c = CieCoords::new(0.123456, 0.65432, 12.3456).rounded();
        assert_eq!(c, CieCoords::new(0.1235, 0.6543, 12.35));
        assert_eq!(c.to_coords(), "(0.1235, 0.6543, 12.35)");
    }

    proptest! {
        #[test]
        fn hex_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let rgb = Rgb::new(r, g, b);
            prop_assert_eq!(Rgb::from_hex(&rgb.to_hex()).unwrap(), rgb);
        }
    }
}
