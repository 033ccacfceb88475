//! Control Panel Widget
//! Left side panel with the live view selectors and export controls.

use crate::pipeline::ViewParams;
use crate::stats::{AgeRange, MedalFilter};
use egui::{Color32, ComboBox, RichText, Slider};

/// Left side control panel.
pub struct ControlPanel {
    pub params: ViewParams,
    pub dataset_summary: String,
    pub status: String,
}

impl ControlPanel {
    pub fn new(params: ViewParams) -> Self {
        Self {
            params,
            dataset_summary: String::new(),
            status: "Ready".to_string(),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏅 Olympic History")
                    .size(22.0)
                    .color(Color32::from_rgb(212, 175, 55)),
            );
            ui.label(
                RichText::new("Medal Dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📁 Dataset").size(14.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new(&self.dataset_summary).size(12.0));

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Country Chart Section =====
        ui.label(RichText::new("🌍 Medals by Country").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 90.0;
        let combo_width = 150.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Medal Type:"));
            ComboBox::from_id_salt("medal_filter")
                .width(combo_width)
                .selected_text(self.params.medal_filter.label())
                .show_ui(ui, |ui| {
                    for filter in MedalFilter::OPTIONS {
                        if ui
                            .selectable_label(self.params.medal_filter == filter, filter.label())
                            .clicked()
                            && self.params.medal_filter != filter
                        {
                            self.params.medal_filter = filter;
                            action = ControlPanelAction::ParamsChanged;
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Age Range Section =====
        ui.label(RichText::new("🎂 Athletes by Age").size(14.0).strong());
        ui.add_space(8.0);

        let mut lo = self.params.age_range.lo();
        let mut hi = self.params.age_range.hi();
        let lo_changed = ui
            .add(Slider::new(&mut lo, AgeRange::MIN..=AgeRange::MAX).text("From"))
            .changed();
        let hi_changed = ui
            .add(Slider::new(&mut hi, AgeRange::MIN..=AgeRange::MAX).text("To"))
            .changed();

        if lo_changed || hi_changed {
            let range = ordered_age_range(lo, hi, lo_changed);
            if range != self.params.age_range {
                self.params.age_range = range;
                action = ControlPanelAction::ParamsChanged;
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("💾 Export JSON").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportJson;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

/// Build a range from slider values, dragging the other bound along when the
/// moved one crosses it.
fn ordered_age_range(lo: u32, hi: u32, lo_moved: bool) -> AgeRange {
    let lo = lo.clamp(AgeRange::MIN, AgeRange::MAX);
    let hi = hi.clamp(AgeRange::MIN, AgeRange::MAX);
    let (lo, hi) = match (lo > hi, lo_moved) {
        (true, true) => (lo, lo),
        (true, false) => (hi, hi),
        (false, _) => (lo, hi),
    };
    AgeRange::new(lo, hi).unwrap_or_default()
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ParamsChanged,
    ExportJson,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_age_range_keeps_valid_range() {
        assert_eq!(ordered_age_range(25, 40, true), AgeRange::new(25, 40).unwrap());
    }

    #[test]
    fn test_ordered_age_range_drags_other_bound() {
        assert_eq!(ordered_age_range(50, 40, true), AgeRange::new(50, 50).unwrap());
        assert_eq!(ordered_age_range(50, 40, false), AgeRange::new(40, 40).unwrap());
    }

    #[test]
    fn test_ordered_age_range_clamps_bounds() {
        assert_eq!(ordered_age_range(0, 200, true), AgeRange::new(10, 100).unwrap());
    }
}
