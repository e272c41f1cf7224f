//! `SolarisApp`: the top-level egui application state.
//!
//! The app plays the host: it owns the [`Engine`], feeds it the tree, frame
//! timestamps and pointer input, and receives its intents. Methods are split
//! across the sibling sub-modules:
//!
//! - `toolbar`: warp-speed slider and recenter button
//! - `canvas`: the orbital view, pointer handling and context menu
//! - `host`: demo host that logs intents instead of touching the disk

pub mod canvas;
pub mod host;
pub mod toolbar;

use eframe::egui;

use solaris::engine::Engine;
use solaris::interact::ContextMenu;
use solaris::tree::NodeRecord;

use self::host::HostLog;

// ─── Application state ───────────────────────────────────────────────────────

pub struct SolarisApp {
    /// Booted on the first frame, once the canvas has a size.
    pub engine: Option<Engine>,
    /// Tree waiting for the engine to boot.
    pub pending: Option<NodeRecord>,
    pub speed: f64,
    /// Open context menu and where it was requested (screen space).
    pub menu: Option<(egui::Pos2, ContextMenu)>,
    pub canvas_size: egui::Vec2,
    pub host_log: HostLog,
    pub show_log: bool,
}

impl SolarisApp {
    pub fn new(record: NodeRecord) -> Self {
        Self {
            engine: None,
            pending: Some(record),
            speed: 1.0,
            menu: None,
            canvas_size: egui::Vec2::ZERO,
            host_log: HostLog::default(),
            show_log: true,
        }
    }
}

impl eframe::App for SolarisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        if self.show_log {
            egui::TopBottomPanel::bottom("host_log")
                .resizable(true)
                .default_height(110.0)
                .show(ctx, |ui| {
                    self.host_log.draw(ui);
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_canvas(ui, ctx);
            });

        if let Some(engine) = self.engine.as_mut() {
            self.host_log.receive(engine.drain_intents());
        }
        ctx.request_repaint();
    }
}
