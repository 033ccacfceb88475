//! Olympic Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::pipeline::{Pipeline, ViewParams};
use crate::report;
use egui::SidePanel;
use tracing::{error, info};

/// Main application window. Views are recomputed on the UI thread whenever a
/// selector changes.
pub struct DashboardApp {
    pipeline: Pipeline,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, pipeline: Pipeline, params: ViewParams) -> Self {
        let mut control_panel = ControlPanel::new(params);
        control_panel.dataset_summary = format!(
            "{} merged rows\n{} rows after cleaning",
            pipeline.merged_rows(),
            pipeline.cleaned().height()
        );

        let mut app = Self {
            pipeline,
            control_panel,
            chart_viewer: ChartViewer::new(),
        };
        app.refresh_views();
        app
    }

    /// Recompute every view for the current selector values.
    fn refresh_views(&mut self) {
        let params = self.control_panel.params;
        match self.pipeline.views(params) {
            Ok(views) => {
                self.chart_viewer.set_views(views);
                self.control_panel.set_status(format!(
                    "Showing {} medals, ages {}",
                    params.medal_filter, params.age_range
                ));
            }
            Err(e) => {
                error!("Failed to compute views: {}", e);
                self.control_panel.set_status(format!("Error: {}", e));
            }
        }
    }

    /// Write the current views to a file chosen through a save dialog.
    fn handle_export_json(&mut self) {
        let Some(views) = self.chart_viewer.views() else {
            self.control_panel.set_status("Nothing to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(report::JSON_FILE_NAME)
            .save_file()
        else {
            return;
        };

        match report::write_json(views, &path) {
            Ok(()) => {
                info!("Exported dashboard to {}", path.display());
                self.control_panel
                    .set_status(format!("Exported {}", path.display()));
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.control_panel.set_status(format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::ParamsChanged => self.refresh_views(),
                        ControlPanelAction::ExportJson => self.handle_export_json(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
