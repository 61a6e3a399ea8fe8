// src/core/pdf.rs
//! Page primitives from a PDF: text lines and painted rectangles.
//!
//! Only what the Apollo swatch-book pages need. Rectangles come from `re`
//! path segments in the page content stream, in default user space
//! (origin bottom-left, so a larger `y0` is higher on the page).

use std::path::Path;

use log::debug;
use lopdf::{content::Content, Document, Object};

use crate::error::Result;

/// One rectangle as painted on the page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub fill: bool,
    pub stroke: bool,
    pub stroking_color: Vec<f64>,
    pub non_stroking_color: Vec<f64>,
}

impl PageRect {
    /// Filled with pure black in gray, RGB or CMYK.
    pub fn is_black(&self) -> bool {
        matches!(
            self.non_stroking_color.as_slice(),
            [g] if *g == 0.0
        ) || matches!(
            self.non_stroking_color.as_slice(),
            [r, g, b] if *r == 0.0 && *g == 0.0 && *b == 0.0
        ) || matches!(
            self.non_stroking_color.as_slice(),
            [c, m, y, k] if *c == 0.0 && *m == 0.0 && *y == 0.0 && *k == 1.0
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct PdfPage {
    pub lines: Vec<String>,
    pub rects: Vec<PageRect>,
}

/// Every page of the file, in page order.
pub fn load_pages(path: &Path) -> Result<Vec<PdfPage>> {
    let doc = Document::load(path)?;
    let mut pages = Vec::new();

    for (number, id) in doc.get_pages() {
        let text = doc.extract_text(&[number])?;
        let lines = text
            .lines()
            .map(|l| l.trim_end().to_string())
            .filter(|l| !l.trim().is_empty())
            .collect();
        let rects = rects_from_content(&doc.get_page_content(id)?)?;
        debug!("{}: page {number} has {} rects", path.display(), rects.len());
        pages.push(PdfPage { lines, rects });
    }

    Ok(pages)
}

#[derive(Clone, Copy)]
struct Matrix([f64; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// `self × other`, PDF row-vector convention.
    fn then(self, other: Matrix) -> Matrix {
        let [a, b, c, d, e, f] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Matrix([
            a * a2 + b * c2,
            a * b2 + b * d2,
            c * a2 + d * c2,
            c * b2 + d * d2,
            e * a2 + f * c2 + e2,
            e * b2 + f * d2 + f2,
        ])
    }

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }
}

#[derive(Clone)]
struct GraphicsState {
    ctm: Matrix,
    stroking: Vec<f64>,
    non_stroking: Vec<f64>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self { ctm: Matrix::IDENTITY, stroking: vec![0.0], non_stroking: vec![0.0] }
    }
}

fn numbers(operands: &[Object]) -> Vec<f64> {
    operands.iter().filter_map(|o| o.as_float().ok().map(f64::from)).collect()
}

/// Interpret a content stream and collect painted rectangles.
pub fn rects_from_content(bytes: &[u8]) -> Result<Vec<PageRect>> {
    let content = Content::decode(bytes)?;

    let mut gs = GraphicsState::default();
    let mut stack: Vec<GraphicsState> = Vec::new();
    let mut pending: Vec<(f64, f64, f64, f64)> = Vec::new();
    let mut out = Vec::new();

    for op in &content.operations {
        let nums = || numbers(&op.operands);
        let (fill, stroke) = match op.operator.as_str() {
            "q" => { stack.push(gs.clone()); continue; }
            "Q" => { gs = stack.pop().unwrap_or_default(); continue; }
            "cm" => {
                if let [a, b, c, d, e, f] = nums()[..] {
                    gs.ctm = Matrix([a, b, c, d, e, f]).then(gs.ctm);
                }
                continue;
            }
            "g" | "rg" | "k" | "sc" | "scn" => { gs.non_stroking = nums(); continue; }
            "G" | "RG" | "K" | "SC" | "SCN" => { gs.stroking = nums(); continue; }
            "re" => {
                if let [x, y, w, h] = nums()[..] {
                    let (ax, ay) = gs.ctm.apply(x, y);
                    let (bx, by) = gs.ctm.apply(x + w, y + h);
                    pending.push((ax.min(bx), ay.min(by), ax.max(bx), ay.max(by)));
                }
                continue;
            }
            "f" | "F" | "f*" => (true, false),
            "S" | "s" => (false, true),
            "B" | "B*" | "b" | "b*" => (true, true),
            "n" => { pending.clear(); continue; }
            _ => continue,
        };

        for (x0, y0, x1, y1) in pending.drain(..) {
            out.push(PageRect {
                x0, y0, x1, y1,
                fill,
                stroke,
                stroking_color: gs.stroking.clone(),
                non_stroking_color: gs.non_stroking.clone(),
            });
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_filled_and_stroked_rects() {
        let stream = b"q 0 0 0 rg 10 20 5 5 re f Q 1 0 0 RG 0.5 g 30 40 6 6 re B";
        let rects = rects_from_content(stream).unwrap();
        assert_eq!(rects.len(), 2);

        assert_eq!((rects[0].x0, rects[0].y0, rects[0].x1, rects[0].y1), (10.0, 20.0, 15.0, 25.0));
        assert!(rects[0].fill && !rects[0].stroke);
        assert!(rects[0].is_black());

        assert!(rects[1].fill && rects[1].stroke);
        assert_eq!(rects[1].stroking_color, vec![1.0, 0.0, 0.0]);
        assert!(!rects[1].is_black());
    }

    #[test]
    fn graphics_state_restores_colour_and_ctm() {
        let stream = b"q 1 0 0 1 100 200 cm 0 0 0 rg 0 0 4 4 re f Q 0 0 4 4 re f";
        let rects = rects_from_content(stream).unwrap();
        assert_eq!((rects[0].x0, rects[0].y0), (100.0, 200.0));
        assert_eq!((rects[1].x0, rects[1].y0), (0.0, 0.0));
        // default fill is gray 0: still black
        assert!(rects[1].is_black());
    }

    #[test]
    fn clipping_paths_are_not_painted() {
        let rects = rects_from_content(b"0 0 10 10 re W n").unwrap();
        assert!(rects.is_empty());
    }
}
