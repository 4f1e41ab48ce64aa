//! Settings panel for editing the live configuration
//!
//! Shown only while paused. Edits apply to the [`Configuration`] directly;
//! the next frame picks them up.

use egui::{Context, Slider, Ui};

use tessellab_core::config::{
    Configuration, LEVEL_RANGE, NORMAL_DISTANCE_RANGE, NormalMode, SpacingMode, WEIGHT_RANGE,
};

const OUTER_LEVEL_LABELS: [&str; 3] = ["Outer Level 0", "Outer Level 1", "Outer Level 2"];
const WEIGHT_LABELS: [&str; 3] = ["U", "V", "W"];

/// The "Settings" window
#[derive(Debug, Default)]
pub struct SettingsPanel {
    pub visible: bool,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show as a floating window.
    /// Returns true if any value changed.
    pub fn show_as_window(&mut self, ctx: &Context, config: &mut Configuration) -> bool {
        if !self.visible {
            return false;
        }

        let before = *config;
        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
            .show(ctx, |ui| render_content(ui, config));

        *config != before
    }
}

fn render_content(ui: &mut Ui, config: &mut Configuration) {
    ui.checkbox(&mut config.tessellation, "Tessellation");
    ui.checkbox(&mut config.wireframe, "Wireframe");
    ui.checkbox(&mut config.level_of_detail, "Level of Detail");
    ui.separator();

    ui.label("Spacing");
    ui.horizontal(|ui| {
        for spacing in SpacingMode::ALL {
            ui.radio_value(&mut config.spacing, spacing, spacing.label());
        }
    });
    ui.separator();

    ui.add(Slider::new(&mut config.inner_level, LEVEL_RANGE).text("Inner Level 0"));
    for (level, label) in config.outer_levels.iter_mut().zip(OUTER_LEVEL_LABELS) {
        ui.add(Slider::new(level, LEVEL_RANGE).text(label));
    }
    ui.separator();

    ui.label("Barycentric weights");
    for (weight, label) in config.weights.iter_mut().zip(WEIGHT_LABELS) {
        ui.add(Slider::new(weight, WEIGHT_RANGE).text(label));
    }
    ui.separator();

    ui.label("Normals");
    ui.horizontal(|ui| {
        for mode in NormalMode::ALL {
            ui.radio_value(&mut config.normal_mode, mode, mode.label());
        }
    });
    ui.add(Slider::new(&mut config.normal_distance, NORMAL_DISTANCE_RANGE).text("Multiplier"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_panel(panel: &mut SettingsPanel, config: &mut Configuration) -> bool {
        let ctx = Context::default();
        let mut changed = false;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            changed = panel.show_as_window(ctx, config);
        });
        changed
    }

    #[test]
    fn test_hidden_panel_changes_nothing() {
        let mut panel = SettingsPanel::new();
        let mut config = Configuration::default();
        assert!(!run_panel(&mut panel, &mut config));
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_visible_panel_without_input_keeps_values() {
        let mut panel = SettingsPanel { visible: true };
        let mut config = Configuration {
            tessellation: true,
            spacing: SpacingMode::Even,
            inner_level: 7.0,
            ..Default::default()
        };
        let expected = config;
        assert!(!run_panel(&mut panel, &mut config));
        assert_eq!(config, expected);
    }
}
