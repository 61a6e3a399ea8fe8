// src/swatch.rs
//! Square PNG swatch of one filter's colour.

use std::path::Path;

use image::{Rgb as Pixel, RgbImage};
use log::debug;

use crate::config::consts::CONTRAST_THRESHOLD;
use crate::error::{Error, Result};
use crate::file::ensure_parent;
use crate::model::Rgb;

/// Frame edge as a fraction of the swatch edge (1/FRAME_SCALAR).
const FRAME_SCALAR: u32 = 80;

const DARK_INK: Rgb = Rgb::new(20, 20, 20);
const LIGHT_INK: Rgb = Rgb::new(0xdd, 0xdd, 0xdd);

/// Dark ink on light colours, light ink on dark ones.
pub fn contrast_color(rgb: Rgb) -> Rgb {
    if rgb.perceived_lightness() > CONTRAST_THRESHOLD { DARK_INK } else { LIGHT_INK }
}

/// `size`×`size` image filled with `rgb`, framed in its contrast colour.
pub fn render(rgb: Rgb, size: u32) -> Result<RgbImage> {
    if size == 0 {
        return Err(Error::Validation(s!("swatch size must be at least 1 pixel")));
    }
    let ink = contrast_color(rgb);
    debug!("{} has perceived lightness {:.1}", rgb.to_hex(), rgb.perceived_lightness());

    let frame = (size / FRAME_SCALAR).max(1);
    let fill = Pixel([rgb.r, rgb.g, rgb.b]);
    let edge = Pixel([ink.r, ink.g, ink.b]);

    Ok(RgbImage::from_fn(size, size, |x, y| {
        let on_frame = x < frame || y < frame || x >= size - frame || y >= size - frame;
        if on_frame { edge } else { fill }
    }))
}

pub fn save(rgb: Rgb, size: u32, path: &Path) -> Result<()> {
    let img = render(rgb, size)?;
    ensure_parent(path)?;
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
