//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::charts::{
    medal_rgb, pie_slice_angles, pie_slice_outline, BAR_RGB, HIGHLIGHT_RGB, PIE_RGB,
};
use crate::stats::{AgeBinMedals, MedalType, RankedCount, YearMedals};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Polygon};

const CHART_HEIGHT: f32 = 300.0;
const BAR_WIDTH: f64 = 0.7;

fn color((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

pub fn medal_color(medal: MedalType) -> Color32 {
    color(medal_rgb(medal))
}

/// Label of the category at grid mark `value`, empty between categories.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Rows holding the maximum count. Every tied row is highlighted.
pub fn max_rows(rows: &[RankedCount]) -> Vec<bool> {
    let max = rows.iter().map(|r| r.count).max();
    rows.iter().map(|r| Some(r.count) == max).collect()
}

fn pie_polygon(start: f64, end: f64) -> PlotPoints {
    pie_slice_outline(start, end)
        .into_iter()
        .map(|(x, y)| [x, y])
        .collect()
}

/// Draws dashboard charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Big-number metric with a caption.
    pub fn draw_metric(ui: &mut egui::Ui, label: &str, value: usize) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                    ui.label(RichText::new(value.to_string()).size(26.0).strong());
                });
            });
    }

    /// One line per medal type over the years.
    pub fn draw_medals_per_year(ui: &mut egui::Ui, rows: &[YearMedals]) {
        Plot::new("medals_per_year")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Medals")
            .show(ui, |plot_ui| {
                for medal in MedalType::ALL {
                    let points: PlotPoints = rows
                        .iter()
                        .map(|r| [r.year as f64, r.medals.get(medal) as f64])
                        .collect();
                    plot_ui.line(
                        Line::new(points)
                            .color(medal_color(medal))
                            .width(2.0)
                            .name(medal),
                    );
                }
            });
    }

    /// Horizontal bars, first entry on top.
    pub fn draw_ranking(ui: &mut egui::Ui, id: &str, rows: &[RankedCount]) {
        let n = rows.len();
        let labels: Vec<String> = rows.iter().rev().map(|r| r.key.clone()).collect();
        let bars: Vec<Bar> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Bar::new((n - 1 - i) as f64, r.count as f64)
                    .width(BAR_WIDTH)
                    .name(&r.key)
            })
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Number of Medals")
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color(BAR_RGB)).horizontal());
            });
    }

    /// Key/count table with the leading row(s) highlighted.
    pub fn draw_ranked_table(ui: &mut egui::Ui, id: &str, key_header: &str, rows: &[RankedCount]) {
        let highlight = color(HIGHLIGHT_RGB);
        let highlighted = max_rows(rows);

        egui::Grid::new(ui.make_persistent_id(id))
            .striped(true)
            .min_col_width(80.0)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new(key_header).strong());
                ui.label(RichText::new("Medals").strong());
                ui.end_row();

                for (row, is_max) in rows.iter().zip(highlighted) {
                    let cell = |text: String| {
                        let text = RichText::new(text);
                        if is_max {
                            text.background_color(highlight).color(Color32::BLACK)
                        } else {
                            text
                        }
                    };
                    ui.label(cell(row.key.clone()));
                    ui.label(cell(row.count.to_string()));
                    ui.end_row();
                }
            });
    }

    /// Gold, Silver and Bronze stacked per age bin.
    pub fn draw_age_bins(ui: &mut egui::Ui, rows: &[AgeBinMedals]) {
        let labels: Vec<String> = rows.iter().map(|r| r.bin.label()).collect();
        let chart_for = |medal: MedalType| {
            let bars: Vec<Bar> = rows
                .iter()
                .enumerate()
                .map(|(i, r)| Bar::new(i as f64, r.medals.get(medal) as f64).width(BAR_WIDTH))
                .collect();
            BarChart::new(bars).color(medal_color(medal)).name(medal)
        };

        let gold = chart_for(MedalType::Gold);
        let silver = chart_for(MedalType::Silver).stack_on(&[&gold]);
        let bronze = chart_for(MedalType::Bronze).stack_on(&[&gold, &silver]);

        Plot::new("medals_by_age_bin")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Age Bins")
            .y_axis_label("Number of Medals")
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(gold);
                plot_ui.bar_chart(silver);
                plot_ui.bar_chart(bronze);
            });
    }

    /// Pie chart of medal share per key.
    pub fn draw_pie(ui: &mut egui::Ui, id: &str, rows: &[RankedCount]) {
        let total: usize = rows.iter().map(|r| r.count).sum();
        let slices = pie_slice_angles(rows);

        Plot::new(id)
            .height(CHART_HEIGHT)
            .data_aspect(1.0)
            .legend(Legend::default())
            .show_axes([false, false])
            .show_grid(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, (row, (start, end))) in rows.iter().zip(slices).enumerate() {
                    if end <= start {
                        continue;
                    }
                    let fill = color(PIE_RGB[i % PIE_RGB.len()]);
                    let share = 100.0 * row.count as f64 / total as f64;
                    plot_ui.polygon(
                        Polygon::new(pie_polygon(start, end))
                            .fill_color(fill)
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                            .name(format!("{} ({:.1}%)", row.key, share)),
                    );
                }
            });
    }

    /// Vertical bars, one per key.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, x_label: &str, rows: &[RankedCount]) {
        let labels: Vec<String> = rows.iter().map(|r| r.key.clone()).collect();
        let bars: Vec<Bar> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| Bar::new(i as f64, r.count as f64).width(BAR_WIDTH).name(&r.key))
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label("Number of Medals")
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color(BAR_RGB)));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_rows_marks_ties() {
        let rows = vec![
            RankedCount::new("Swimming", 4),
            RankedCount::new("Rowing", 4),
            RankedCount::new("Judo", 1),
        ];
        assert_eq!(max_rows(&rows), vec![true, true, false]);
        assert!(max_rows(&[]).is_empty());
    }

    #[test]
    fn test_category_label() {
        let labels = vec!["Summer".to_string(), "Winter".to_string()];
        assert_eq!(category_label(&labels, 1.0), "Winter");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 3.0), "");
    }
}
