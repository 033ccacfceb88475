//! Static Chart Renderer
//! Draws the dashboard charts to PNG files with plotters.
//!
//! Layout per chart: caption on top, value axis with light grid, categories
//! centered on integer positions.

use crate::charts::{medal_rgb, pie_slice_angles, pie_slice_outline, BAR_RGB, PIE_RGB};
use crate::stats::{AgeBinMedals, MedalType, RankedCount, YearMedals};
use plotters::prelude::*;
use std::path::Path;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 700;
const BAR_HALF_WIDTH: f64 = 0.35;

pub type RenderResult = Result<(), Box<dyn std::error::Error>>;

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// Label of the category at tick `x`, empty between categories.
fn category_label(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Axis top with roughly 10% headroom above the tallest bar.
fn value_ceiling(max: usize) -> f64 {
    let max = max.max(1);
    (max + max / 10 + 1) as f64
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// One line per medal type over the years.
    pub fn render_medals_per_year(rows: &[YearMedals], path: &Path) -> RenderResult {
        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let first_year = rows.first().map(|r| r.year).unwrap_or(0);
        let last_year = rows.last().map(|r| r.year).unwrap_or(first_year).max(first_year + 1);
        let max = rows
            .iter()
            .flat_map(|r| MedalType::ALL.map(|m| r.medals.get(m)))
            .max()
            .unwrap_or(0);

        let mut chart = ChartBuilder::on(&root)
            .caption("Number of Medals over Years", ("sans-serif", 28))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(first_year..last_year, 0f64..value_ceiling(max))?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Medals")
            .draw()?;

        for medal in MedalType::ALL {
            let color = rgb(medal_rgb(medal));
            chart
                .draw_series(LineSeries::new(
                    rows.iter().map(|r| (r.year, r.medals.get(medal) as f64)),
                    color.stroke_width(2),
                ))?
                .label(medal.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    /// Vertical bars, one per key, in the given order.
    pub fn render_bar_chart(title: &str, x_desc: &str, rows: &[RankedCount], path: &Path) -> RenderResult {
        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let labels: Vec<String> = rows.iter().map(|r| r.key.clone()).collect();
        let max = rows.iter().map(|r| r.count).max().unwrap_or(0);
        let n = rows.len().max(1) as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..n - 0.5, 0f64..value_ceiling(max))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(rows.len().max(1))
            .x_label_formatter(&|x| category_label(&labels, *x))
            .x_desc(x_desc)
            .y_desc("Number of Medals")
            .draw()?;

        let color = rgb(BAR_RGB);
        chart.draw_series(rows.iter().enumerate().map(|(i, r)| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, r.count as f64)],
                color.filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    /// Horizontal bars with the first entry on top.
    pub fn render_ranking(title: &str, rows: &[RankedCount], path: &Path) -> RenderResult {
        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let n = rows.len();
        // top row drawn at the highest y
        let labels: Vec<String> = rows.iter().rev().map(|r| r.key.clone()).collect();
        let max = rows.iter().map(|r| r.count).max().unwrap_or(0);

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(220)
            .build_cartesian_2d(0f64..value_ceiling(max), -0.5f64..n.max(1) as f64 - 0.5)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n.max(1))
            .y_label_formatter(&|y| category_label(&labels, *y))
            .x_desc("Number of Medals")
            .draw()?;

        let color = rgb(BAR_RGB);
        chart.draw_series(rows.iter().enumerate().map(|(i, r)| {
            let y = (n - 1 - i) as f64;
            Rectangle::new(
                [(0.0, y - BAR_HALF_WIDTH), (r.count as f64, y + BAR_HALF_WIDTH)],
                color.filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    /// Pie of each key's share, slices clockwise from 12 o'clock.
    pub fn render_pie(title: &str, rows: &[RankedCount], path: &Path) -> RenderResult {
        let root = BitMapBackend::new(path, (HEIGHT, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let total: usize = rows.iter().map(|r| r.count).sum();

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(15)
            .build_cartesian_2d(-1.2f64..1.2, -1.2f64..1.2)?;

        for (i, (row, (start, end))) in rows.iter().zip(pie_slice_angles(rows)).enumerate() {
            if end <= start {
                continue;
            }
            let color = rgb(PIE_RGB[i % PIE_RGB.len()]);
            let share = 100.0 * row.count as f64 / total as f64;
            chart
                .draw_series(std::iter::once(Polygon::new(
                    pie_slice_outline(start, end),
                    color.filled(),
                )))?
                .label(format!("{} ({:.1}%)", row.key, share))
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
        }

        if total > 0 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }

    /// Stacked Gold/Silver/Bronze bars per age bin.
    pub fn render_age_bins(rows: &[AgeBinMedals], path: &Path) -> RenderResult {
        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let labels: Vec<String> = rows.iter().map(|r| r.bin.label()).collect();
        let max = rows.iter().map(|r| r.medals.total()).max().unwrap_or(0);
        let n = rows.len().max(1) as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption("Number of Medals over Age Histogram Chart", ("sans-serif", 28))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..n - 0.5, 0f64..value_ceiling(max))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(rows.len().max(1))
            .x_label_formatter(&|x| category_label(&labels, *x))
            .x_desc("Age Bins")
            .y_desc("Number of Medals")
            .draw()?;

        let mut base = vec![0f64; rows.len()];
        for medal in MedalType::ALL {
            let color = rgb(medal_rgb(medal));
            let bars: Vec<Rectangle<(f64, f64)>> = rows
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    let x = i as f64;
                    let bottom = base[i];
                    let top = bottom + r.medals.get(medal) as f64;
                    base[i] = top;
                    Rectangle::new(
                        [(x - BAR_HALF_WIDTH, bottom), (x + BAR_HALF_WIDTH, top)],
                        color.filled(),
                    )
                })
                .collect();

            chart
                .draw_series(bars)?
                .label(medal.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}
