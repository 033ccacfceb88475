//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{RenderResult, StaticChartRenderer};

use crate::stats::{MedalType, RankedCount};
use std::f64::consts::TAU;

const PIE_SEGMENTS_PER_TURN: f64 = 120.0;

/// Bar color of single-series charts.
pub const BAR_RGB: (u8, u8, u8) = (52, 152, 219);

/// Highlight of the leading row in ranked tables.
pub const HIGHLIGHT_RGB: (u8, u8, u8) = (144, 238, 144);

/// Pie slice colors, cycled.
pub const PIE_RGB: [(u8, u8, u8); 6] = [
    (52, 152, 219),
    (231, 76, 60),
    (46, 204, 113),
    (155, 89, 182),
    (243, 156, 18),
    (26, 188, 156),
];

/// Series color of a medal type.
pub fn medal_rgb(medal: MedalType) -> (u8, u8, u8) {
    match medal {
        MedalType::Gold => (212, 175, 55),
        MedalType::Silver => (168, 168, 168),
        MedalType::Bronze => (205, 127, 50),
    }
}

/// Start/end angles (radians, clockwise from 12 o'clock) of each pie slice.
/// Zero-count entries get empty slices; an all-zero input yields no slices.
pub fn pie_slice_angles(rows: &[RankedCount]) -> Vec<(f64, f64)> {
    let total: usize = rows.iter().map(|r| r.count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = 0.0;
    rows.iter()
        .map(|r| {
            let end = start + TAU * r.count as f64 / total as f64;
            let slice = (start, end);
            start = end;
            slice
        })
        .collect()
}

/// Closed outline of a unit-radius slice: center, then arc points from
/// `start` to `end`.
pub fn pie_slice_outline(start: f64, end: f64) -> Vec<(f64, f64)> {
    let steps = (((end - start) / TAU) * PIE_SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
    let mut points = vec![(0.0, 0.0)];
    points.extend((0..=steps).map(|i| {
        let angle = start + (end - start) * i as f64 / steps as f64;
        (angle.sin(), angle.cos())
    }));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_slices_cover_full_turn() {
        let rows = vec![RankedCount::new("M", 3), RankedCount::new("F", 1)];
        let slices = pie_slice_angles(&rows);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].0, 0.0);
        assert!((slices[0].1 - TAU * 0.75).abs() < 1e-9);
        assert_eq!(slices[1].0, slices[0].1);
        assert!((slices[1].1 - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_pie_slices_empty_when_no_medals() {
        assert!(pie_slice_angles(&[]).is_empty());
        assert!(pie_slice_angles(&[RankedCount::new("M", 0)]).is_empty());
    }

    #[test]
    fn test_pie_slice_outline_starts_at_center_and_follows_arc() {
        let outline = pie_slice_outline(0.0, TAU / 4.0);

        assert_eq!(outline[0], (0.0, 0.0));
        let (x, y) = outline[1];
        assert!(x.abs() < 1e-9 && (y - 1.0).abs() < 1e-9);
        let (x, y) = *outline.last().unwrap();
        assert!((x - 1.0).abs() < 1e-9 && y.abs() < 1e-9);
        assert_eq!(outline.len(), 2 + 30);
    }
}
