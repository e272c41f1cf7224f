use eframe::egui;

use solaris::error::EngineError;
use solaris::host::{self, HostMessage};
use solaris::tree::NodeRecord;

mod app;

use app::SolarisApp;

fn main() -> eframe::Result {
    env_logger::init();

    let record = match std::env::args().nth(1) {
        Some(path) => load_tree(&path).unwrap_or_else(|e| {
            log::error!("cannot load {path}: {e}; showing the sample system");
            sample_tree()
        }),
        None => sample_tree(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Solaris"),
        ..Default::default()
    };

    eframe::run_native(
        "Solaris",
        options,
        Box::new(|_cc| Ok(Box::new(SolarisApp::new(record)))),
    )
}

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Accept either a full `update` message or a bare node record.
fn load_tree(path: &str) -> Result<NodeRecord, LoadError> {
    let json = std::fs::read_to_string(path)?;
    if let Ok(HostMessage::Update { data }) = HostMessage::from_json(&json) {
        return Ok(data);
    }
    Ok(host::decode(&json)?)
}

fn sample_tree() -> NodeRecord {
    let now = solaris::engine::now_ms();
    let day = 24.0 * 60.0 * 60.0 * 1000.0;
    let file = |name: &str, dir: &str, bytes: f64, age_days: f64| {
        NodeRecord::planet(name, format!("{dir}/{name}"), (bytes + 1.0).ln() * 10.0, now - age_days * day)
    };
    NodeRecord::star("solaris", "/solaris")
        .with_child(file("Cargo.toml", "/solaris", 900.0, 2.0))
        .with_child(file("README.md", "/solaris", 4_200.0, 200.0))
        .with_child(
            NodeRecord::star("src", "/solaris/src")
                .with_child(file("lib.rs", "/solaris/src", 1_200.0, 1.0))
                .with_child(file("camera.rs", "/solaris/src", 9_800.0, 30.0))
                .with_child(file("hit.rs", "/solaris/src", 3_100.0, 90.0))
                .with_child(
                    NodeRecord::star("render", "/solaris/src/render")
                        .with_child(file("mod.rs", "/solaris/src/render", 8_000.0, 5.0))
                        .with_child(file("surface.rs", "/solaris/src/render", 4_500.0, 400.0)),
                ),
        )
        .with_child(
            NodeRecord::star("tests", "/solaris/tests")
                .with_child(file("scenarios.rs", "/solaris/tests", 6_000.0, 10.0)),
        )
}
