// src/specs/boxes.rs
//! Apollo rating boxes: which square is ticked on the back page.
//!
//! The back page carries 17 rating boxes laid out as
//!
//! ```text
//!   saturation   [ ] [ ] [ ] [ ] [ ]     Very Light .. Very Deep
//!   red          [ ] [ ] [ ]             Good / Neutral / Poor
//!   blue         [ ] [ ] [ ]
//!   green        [ ] [ ] [ ]
//!   yellow       [ ] [ ] [ ]
//! ```
//!
//! Each box is drawn twice: a stroked outline and a filled square. The ticked
//! one is filled black. Positions drift between PDFs, so rows and columns are
//! recovered from the rectangles on every page rather than hard-coded.
//! Any count that does not match the template is a layout error; we never guess.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::pdf::PageRect;
use crate::error::{Error, Result};

/// y0 values closer than this (in points) belong to the same row.
pub const ROW_MERGE_DISTANCE: i64 = 2;

const ROWS: usize = 5;
const SATURATION_COLUMNS: usize = 5;
const INTERACTION_COLUMNS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Saturation {
    #[serde(rename = "Very Light")]
    VeryLight,
    Light,
    Medium,
    Deep,
    #[serde(rename = "Very Deep")]
    VeryDeep,
}

impl Saturation {
    const ORDER: [Saturation; 5] = [
        Saturation::VeryLight,
        Saturation::Light,
        Saturation::Medium,
        Saturation::Deep,
        Saturation::VeryDeep,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Saturation::VeryLight => "Very Light",
            Saturation::Light => "Light",
            Saturation::Medium => "Medium",
            Saturation::Deep => "Deep",
            Saturation::VeryDeep => "Very Deep",
        }
    }
}

impl fmt::Display for Saturation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    Good,
    Neutral,
    Poor,
}

impl Interaction {
    const ORDER: [Interaction; 3] = [Interaction::Good, Interaction::Neutral, Interaction::Poor];
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Interaction::Good => "Good",
            Interaction::Neutral => "Neutral",
            Interaction::Poor => "Poor",
        })
    }
}

/// Ratings read off one Apollo back page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApolloBoxes {
    pub saturation: Saturation,
    pub interaction_red: Interaction,
    pub interaction_blue: Interaction,
    pub interaction_green: Interaction,
    pub interaction_yellow: Interaction,
}

/// Sort, then drop every value within `distance` of its predecessor.
pub fn merge_close_values(mut vals: Vec<i64>, distance: i64) -> Vec<i64> {
    vals.sort_unstable();
    (0..vals.len())
        .filter(|&i| i == 0 || vals[i] - vals[i - 1] >= distance)
        .map(|i| vals[i])
        .collect()
}

/// Midpoints between neighbouring sorted values, truncated to whole points.
pub fn midpoints(mut vals: Vec<i64>) -> Vec<i64> {
    vals.sort_unstable();
    vals.windows(2).map(|w| (w[0] + w[1]) / 2).collect()
}

/// Index of the bucket `x` falls into; bucket `i` is `(b[i-1], b[i]]`.
fn bucket(x: f64, boundaries: &[i64]) -> usize {
    boundaries
        .iter()
        .position(|&b| x <= b as f64)
        .unwrap_or(boundaries.len())
}

/// The single box with `lower < y0 <= upper`.
fn one_in_band<'a>(boxes: &[&'a PageRect], upper: f64, lower: f64, row: &str, doc: &str) -> Result<&'a PageRect> {
    let hits: Vec<&'a PageRect> = boxes
        .iter()
        .copied()
        .filter(|b| b.y0 > lower && b.y0 <= upper)
        .collect();
    match hits.as_slice() {
        [only] => Ok(*only),
        other => Err(Error::layout(doc, format!("{} checked boxes in {row} row, expected 1", other.len()))),
    }
}

fn expect_len<T>(vals: &[T], want: usize, what: &str, doc: &str) -> Result<()> {
    if vals.len() == want {
        Ok(())
    } else {
        Err(Error::layout(doc, format!("found {} {what}, expected {want}", vals.len())))
    }
}

/// Classify the rating boxes of one page.
///
/// Returns `Ok(None)` when the page has no candidate boxes at all.
pub fn classify(rects: &[PageRect], doc: &str) -> Result<Option<ApolloBoxes>> {
    let filled: Vec<&PageRect> = rects.iter().filter(|r| r.stroke).collect();
    if filled.is_empty() {
        return Ok(None);
    }

    // Rows, bottom to top
    let rows = merge_close_values(filled.iter().map(|b| b.y0 as i64).collect(), ROW_MERGE_DISTANCE);
    expect_len(&rows, ROWS, "rows", doc)?;
    let y_bounds = midpoints(rows);
    let top = y_bounds[ROWS - 2] as f64;
    let bottom = y_bounds[0] as f64;

    let sat_x: Vec<i64> = filled.iter().filter(|b| b.y0 > top).map(|b| b.x0 as i64).collect();
    expect_len(&sat_x, SATURATION_COLUMNS, "saturation columns", doc)?;
    let sat_bounds = midpoints(sat_x);

    let int_x: Vec<i64> = filled.iter().filter(|b| b.y0 < bottom).map(|b| b.x0 as i64).collect();
    expect_len(&int_x, INTERACTION_COLUMNS, "interaction columns", doc)?;
    let int_bounds = midpoints(int_x);

    let checked: Vec<&PageRect> = filled.iter().copied().filter(|b| b.is_black()).collect();
    expect_len(&checked, ROWS, "checked boxes", doc)?;

    let sat_box = one_in_band(&checked, f64::INFINITY, top, "saturation", doc)?;
    let saturation = Saturation::ORDER[bucket(sat_box.x0, &sat_bounds)];

    // Interaction rows top to bottom under the saturation row
    let yb = |i: usize| y_bounds[i] as f64;
    let interaction = |upper: f64, lower: f64, row: &str| -> Result<Interaction> {
        let b = one_in_band(&checked, upper, lower, row, doc)?;
        Ok(Interaction::ORDER[bucket(b.x0, &int_bounds)])
    };

    Ok(Some(ApolloBoxes {
        saturation,
        interaction_red: interaction(yb(3), yb(2), "red")?,
        interaction_blue: interaction(yb(2), yb(1), "blue")?,
        interaction_green: interaction(yb(1), yb(0), "green")?,
        interaction_yellow: interaction(yb(0), 0.0, "yellow")?,
    }))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::core::pdf::PageRect;

    pub const ROW_Y: [f64; 5] = [100.0, 130.0, 160.0, 190.0, 220.0];
    pub const SAT_X: [f64; 5] = [50.0, 80.0, 110.0, 140.0, 170.0];
    pub const INT_X: [f64; 3] = [60.0, 100.0, 140.0];

    fn square(x0: f64, y0: f64, black: bool) -> PageRect {
        PageRect {
            x0,
            y0,
            x1: x0 + 8.0,
            y1: y0 + 8.0,
            fill: true,
            stroke: true,
            stroking_color: vec![0.0],
            non_stroking_color: if black { vec![0.0, 0.0, 0.0] } else { vec![1.0, 1.0, 1.0] },
        }
    }

    /// Full back page: `sat` is the ticked saturation column, `ticks` the
    /// ticked interaction column for red, blue, green, yellow.
    pub fn page(sat: usize, ticks: [usize; 4]) -> Vec<PageRect> {
        let mut rects = Vec::new();
        for (i, x) in SAT_X.iter().enumerate() {
            rects.push(square(*x, ROW_Y[4], i == sat));
        }
        for (row, tick) in ticks.iter().enumerate() {
            // red is the row just under saturation
            let y = ROW_Y[3 - row];
            for (i, x) in INT_X.iter().enumerate() {
                rects.push(square(*x, y, i == *tick));
            }
        }
        // outlines without stroke flag are ignored
        rects.push(PageRect { x0: 0.0, y0: 0.0, x1: 400.0, y1: 400.0, ..Default::default() });
        rects
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn reads_ticked_boxes() {
        let boxes = classify(&page(3, [0, 2, 1, 0]), "AP1000").unwrap().unwrap();
        assert_eq!(
            boxes,
            ApolloBoxes {
                saturation: Saturation::Deep,
                interaction_red: Interaction::Good,
                interaction_blue: Interaction::Poor,
                interaction_green: Interaction::Neutral,
                interaction_yellow: Interaction::Good,
            }
        );
    }

    #[test]
    fn extreme_columns() {
        let lo = classify(&page(0, [2, 2, 2, 2]), "x").unwrap().unwrap();
        assert_eq!(lo.saturation, Saturation::VeryLight);
        assert_eq!(lo.interaction_yellow, Interaction::Poor);
        let hi = classify(&page(4, [0, 0, 0, 0]), "x").unwrap().unwrap();
        assert_eq!(hi.saturation, Saturation::VeryDeep);
    }

    #[test]
    fn jittered_rows_still_merge() {
        let mut rects = page(1, [1, 1, 1, 1]);
        rects[2].y0 += 1.0;
        let boxes = classify(&rects, "x").unwrap().unwrap();
        assert_eq!(boxes.saturation, Saturation::Light);
    }

    #[test]
    fn four_rows_is_a_layout_error() {
        let rects: Vec<PageRect> = page(1, [0, 0, 0, 0])
            .into_iter()
            .filter(|r| r.y0 != ROW_Y[0])
            .collect();
        let err = classify(&rects, "AP2000").unwrap_err();
        assert!(matches!(err, Error::Layout { .. }));
        assert!(err.to_string().contains("rows"));
    }

    #[test]
    fn missing_tick_is_a_layout_error() {
        let mut rects = page(1, [0, 0, 0, 0]);
        for r in rects.iter_mut().filter(|r| r.y0 == ROW_Y[0]) {
            r.non_stroking_color = vec![1.0, 1.0, 1.0];
        }
        assert!(matches!(classify(&rects, "x"), Err(Error::Layout { .. })));
    }

    #[test]
    fn two_ticks_in_one_row_is_a_layout_error() {
        let mut rects = page(1, [0, 0, 0, 0]);
        // tick a second red box and untick yellow: still 5 checked overall
        let red_extra = rects.iter().position(|r| r.y0 == ROW_Y[3] && r.x0 == INT_X[2]).unwrap();
        rects[red_extra].non_stroking_color = vec![0.0, 0.0, 0.0];
        for r in rects.iter_mut().filter(|r| r.y0 == ROW_Y[0]) {
            r.non_stroking_color = vec![1.0, 1.0, 1.0];
        }
        let err = classify(&rects, "x").unwrap_err();
        assert!(err.to_string().contains("red"));
    }

    #[test]
    fn page_without_boxes_has_no_ratings() {
        assert_eq!(classify(&[], "x").unwrap(), None);
    }

    #[test]
    fn helpers() {
        assert_eq!(merge_close_values(vec![101, 100, 130, 131, 160], 2), vec![100, 130, 160]);
        assert_eq!(midpoints(vec![100, 130, 161]), vec![115, 145]);
    }
}
