//! Toolbar rendering for `SolarisApp`.

use eframe::egui;
use solaris::orbit::integrator::MAX_SPEED;

use super::SolarisApp;

impl SolarisApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            let slider = egui::Slider::new(&mut self.speed, 0.0..=MAX_SPEED)
                .step_by(0.1)
                .text("Warp Speed");
            if ui.add(slider).changed() {
                if let Some(engine) = self.engine.as_mut() {
                    engine.set_speed(self.speed);
                }
            }

            if ui.button("Recenter").clicked() {
                if let Some(engine) = self.engine.as_mut() {
                    engine.reset_camera();
                }
            }

            ui.toggle_value(&mut self.show_log, "Host log");

            if let Some(engine) = self.engine.as_ref() {
                ui.separator();
                let nodes = engine.tree().map_or(0, |t| t.len());
                ui.colored_label(
                    egui::Color32::from_rgb(160, 160, 175),
                    format!("{nodes} bodies  ·  zoom {:.2}×", engine.camera().scale()),
                );
                if engine.is_static() {
                    ui.colored_label(egui::Color32::from_rgb(255, 80, 80), "static");
                }
            }
        });
    }
}
