//! Orbital canvas for `SolarisApp`.
//!
//! Boots the engine against the first non-empty canvas, then each frame:
//! resize → tick → pointer input → render → tooltip / context menu.

use eframe::egui;

use solaris::camera::Viewport;
use solaris::config::EngineConfig;
use solaris::engine::{Capabilities, Engine};
use solaris::geom::Point;
use solaris::interact::{Cursor, MenuEntry};
use solaris::render::egui_surface::EguiSurface;

use super::SolarisApp;

impl SolarisApp {
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let size = ui.available_size();
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
        let origin = rect.min;

        if self.engine.is_none() {
            self.boot(rect.size());
        }
        let Some(engine) = self.engine.as_mut() else {
            ui.painter_at(rect).text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No drawing surface",
                egui::FontId::proportional(16.0),
                egui::Color32::GRAY,
            );
            return;
        };

        if rect.size() != self.canvas_size {
            self.canvas_size = rect.size();
            if let Err(e) = engine.resize(rect.width() as f64, rect.height() as f64) {
                log::warn!("{e}");
            }
        }

        let now_ms = ctx.input(|i| i.time) * 1000.0;
        engine.tick_at(now_ms);

        let to_local = |p: egui::Pos2| Point::new((p.x - origin.x) as f64, (p.y - origin.y) as f64);

        // Pan & zoom
        if response.dragged_by(egui::PointerButton::Primary) {
            let d = response.drag_delta();
            engine.pan(d.x as f64, d.y as f64);
        }
        if let Some(pos) = response.hover_pos() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                // egui scrolls up with positive values; the camera zooms out on positive delta
                engine.wheel(to_local(pos), -scroll as f64);
            }
        }

        // Hover
        let hover = match response.hover_pos() {
            Some(pos) => engine.hover(to_local(pos)).clone(),
            None => {
                engine.leave();
                Default::default()
            }
        };
        ctx.set_cursor_icon(match hover.cursor {
            Cursor::Pointer => egui::CursorIcon::PointingHand,
            Cursor::Move => egui::CursorIcon::Move,
        });

        // Click / context menu
        if response.clicked() {
            self.menu = None;
            if let Some(pos) = response.interact_pointer_pos() {
                engine.click(to_local(pos));
            }
        }
        let menu_opened = response.secondary_clicked();
        if menu_opened {
            self.menu = response
                .interact_pointer_pos()
                .and_then(|pos| engine.context_menu(to_local(pos)).map(|menu| (pos, menu)));
        }

        let painter = ui.painter_at(rect);
        let mut surface = EguiSurface::new(&painter, origin);
        engine.render(&mut surface);

        if let Some(tip) = hover.tooltip.filter(|_| self.menu.is_none()) {
            response.on_hover_ui_at_pointer(|ui| {
                let [name, kind, size] = tip.lines();
                ui.strong(name);
                ui.label(kind);
                ui.label(size);
            });
        }

        self.draw_context_menu(ctx, menu_opened);
    }

    fn boot(&mut self, size: egui::Vec2) {
        let viewport = Viewport::new(size.x as f64, size.y as f64).ok();
        match Engine::boot(EngineConfig::default(), viewport, Capabilities::default()) {
            Ok(mut engine) => {
                engine.set_speed(self.speed);
                if let Some(record) = self.pending.take() {
                    engine.ingest(&record);
                }
                self.canvas_size = size;
                self.engine = Some(engine);
            }
            Err(e) => log::debug!("engine not started: {e}"),
        }
    }

    fn draw_context_menu(&mut self, ctx: &egui::Context, just_opened: bool) {
        let Some((pos, menu)) = self.menu.as_ref() else {
            return;
        };
        let mut chosen = None;
        let area = egui::Area::new(egui::Id::new("solaris_context_menu"))
            .fixed_pos(*pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(160.0);
                    for entry in &menu.entries {
                        match entry {
                            MenuEntry::Item { label, action } => {
                                if ui.button(label.as_str()).clicked() {
                                    chosen = Some(action.clone());
                                }
                            }
                            MenuEntry::Separator => {
                                ui.separator();
                            }
                        }
                    }
                });
            });

        let dismissed = ctx.input(|i| i.key_pressed(egui::Key::Escape))
            || (!just_opened && ctx.input(|i| i.pointer.any_click()) && !area.response.hovered());
        if let Some(action) = chosen {
            if let Some(engine) = self.engine.as_mut() {
                engine.choose(&action);
            }
            self.menu = None;
        } else if dismissed {
            self.menu = None;
        }
    }
}
