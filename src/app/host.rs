//! Demo host.
//!
//! Receives engine intents and records them as the JSON a real host would
//! get. No filesystem mutation happens here.

use std::collections::VecDeque;

use eframe::egui;
use solaris::host::Intent;

const MAX_LINES: usize = 200;

#[derive(Default)]
pub struct HostLog {
    lines: VecDeque<String>,
}

impl HostLog {
    pub fn receive(&mut self, intents: Vec<Intent>) {
        for intent in intents {
            let line = match intent.to_json() {
                Ok(json) => json,
                Err(e) => {
                    log::error!("cannot encode {intent:?}: {e}");
                    continue;
                }
            };
            log::info!("host ← {line}");
            if self.lines.len() == MAX_LINES {
                self.lines.pop_front();
            }
            self.lines.push_back(line);
        }
    }

    pub fn draw(&self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Host messages").strong());
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for line in &self.lines {
                    ui.monospace(line);
                }
            });
    }
}
