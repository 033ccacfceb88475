//! Chart Viewer Widget
//! Scrollable dashboard: metrics on top, then one card per chart in a
//! responsive multi-column layout.

use crate::charts::ChartPlotter;
use crate::stats::{DashboardViews, TOP_N};
use egui::{RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;
const CHART_WIDTH: f32 = 620.0;

/// Central panel showing the current views.
#[derive(Default)]
pub struct ChartViewer {
    views: Option<DashboardViews>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_views(&mut self, views: DashboardViews) {
        self.views = Some(views);
    }

    pub fn views(&self) -> Option<&DashboardViews> {
        self.views.as_ref()
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(views) = &self.views else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let num_columns = ((ui.available_width() / (CHART_WIDTH + CHART_SPACING)).floor() as usize).max(1);

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            ui.label(RichText::new("Olympic History Dashboard").size(24.0).strong());
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ChartPlotter::draw_metric(ui, "Participations", views.participations);
                ChartPlotter::draw_metric(ui, "Gold Medals", views.medal_counts.gold);
                ChartPlotter::draw_metric(ui, "Silver Medals", views.medal_counts.silver);
                ChartPlotter::draw_metric(ui, "Bronze Medals", views.medal_counts.bronze);
            });
            ui.add_space(CHART_SPACING);

            let cards: [(String, Box<dyn Fn(&mut egui::Ui) + '_>); 8] = [
                (
                    "Number of Medals over Years".to_string(),
                    Box::new(|ui: &mut egui::Ui| ChartPlotter::draw_medals_per_year(ui, &views.medals_per_year)),
                ),
                (
                    format!("Top {} Athletes by Medals", TOP_N),
                    Box::new(|ui: &mut egui::Ui| ChartPlotter::draw_ranking(ui, "top_athletes", &views.top_athletes)),
                ),
                (
                    format!("Top {} Sports by Medals", TOP_N),
                    Box::new(|ui: &mut egui::Ui| {
                        ChartPlotter::draw_ranked_table(ui, "top_sports", "Sport", &views.top_sports)
                    }),
                ),
                (
                    "Number of Medals over Age".to_string(),
                    Box::new(|ui: &mut egui::Ui| ChartPlotter::draw_age_bins(ui, &views.medals_by_age_bin)),
                ),
                (
                    "Medals by Gender".to_string(),
                    Box::new(|ui: &mut egui::Ui| ChartPlotter::draw_pie(ui, "medals_by_gender", &views.medals_by_gender)),
                ),
                (
                    "Medals by Season".to_string(),
                    Box::new(|ui: &mut egui::Ui| {
                        ChartPlotter::draw_bar_chart(ui, "medals_by_season", "Season", &views.medals_by_season)
                    }),
                ),
                (
                    format!("{} Medals by Country", views.medal_filter),
                    Box::new(|ui: &mut egui::Ui| {
                        ChartPlotter::draw_bar_chart(ui, "medals_by_country", "Country", &views.medals_by_country)
                    }),
                ),
                (
                    format!("Athletes aged {}", views.age_range),
                    Box::new(|ui: &mut egui::Ui| {
                        ChartPlotter::draw_metric(ui, "Distinct athletes", views.athletes_in_age_range)
                    }),
                ),
            ];

            for row in cards.chunks(num_columns) {
                ui.horizontal(|ui| {
                    for (title, draw) in row {
                        Self::draw_card(ui, title, draw.as_ref());
                        ui.add_space(CHART_SPACING);
                    }
                });
                ui.add_space(CHART_SPACING);
            }
        });
    }

    fn draw_card(ui: &mut egui::Ui, title: &str, draw: &dyn Fn(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(CHART_WIDTH - 24.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(16.0).strong());
                    ui.add_space(8.0);
                    draw(ui);
                });
            });
    }
}
