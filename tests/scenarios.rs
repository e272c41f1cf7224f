use std::f64::consts::PI;

use solaris::camera::Viewport;
use solaris::config::EngineConfig;
use solaris::engine::{Capabilities, Engine};
use solaris::geom::Point;
use solaris::error::EngineError;
use solaris::host::{Intent, MAX_NESTING};
use solaris::interact::{ClickOutcome, MenuAction, MenuTarget};
use solaris::render::{DrawCommand, Recorder};
use solaris::tree::{Body, NodeId, Tree};

const SCENARIO_A: &str = r#"{
    "type": "update",
    "data": {
        "name": "proj", "type": "star", "path": "/proj", "size": 500,
        "children": [
            { "name": "a.ts", "type": "planet", "path": "/proj/a.ts", "size": 10, "lastModified": 0 },
            { "name": "lib", "type": "star", "path": "/proj/lib", "size": 500,
              "children": [
                { "name": "b.ts", "type": "planet", "path": "/proj/lib/b.ts", "size": 5, "lastModified": 0 }
              ] }
        ]
    }
}"#;

fn booted() -> Engine {
    let mut engine = Engine::boot(
        EngineConfig::default().with_seed(2024),
        Some(Viewport::new(1200.0, 900.0).unwrap()),
        Capabilities::default(),
    )
    .unwrap();
    assert_eq!(engine.drain_intents(), [Intent::Ready]);
    engine.handle_json(SCENARIO_A).unwrap();
    engine.tick(0.0);
    engine
}

fn id_of(tree: &Tree, path: &str) -> NodeId {
    tree.find_by_path(path).unwrap()
}

fn screen_of(engine: &Engine, path: &str) -> Point {
    let tree = engine.tree().unwrap();
    let pos = tree.get(id_of(tree, path)).unwrap().orbit.position;
    engine.camera().to_screen(pos)
}

#[test]
fn scenario_a_ingest_layout() {
    let engine = booted();
    let tree = engine.tree().unwrap();
    assert_eq!(tree.len() - 1, 3);
    assert_eq!(tree.root().orbit.position, Point::ORIGIN);

    let a = tree.get(id_of(tree, "/proj/a.ts")).unwrap();
    let lib = tree.get(id_of(tree, "/proj/lib")).unwrap();
    assert_eq!(a.orbit.phase, 0.0);
    assert!((lib.orbit.phase - PI).abs() < 1e-12);
    assert!(a.orbit.radius > 0.0 && lib.orbit.radius > 0.0);
    assert_ne!(a.orbit.radius, lib.orbit.radius);
    assert!(matches!(lib.body, Body::Stellar { .. }));
}

#[test]
fn scenario_b_cut_and_paste() {
    let mut engine = booted();

    let menu = engine.context_menu(screen_of(&engine, "/proj/a.ts")).unwrap();
    let cut = menu.find("Cut").unwrap().clone();
    engine.choose(&cut);
    assert!(engine.drain_intents().is_empty());
    assert_eq!(engine.clipboard().holding(), Some("/proj/a.ts"));

    let menu = engine.context_menu(screen_of(&engine, "/proj/lib")).unwrap();
    let paste = menu.find("Paste 'a.ts'").unwrap().clone();
    engine.choose(&paste);
    assert_eq!(engine.drain_intents(), [Intent::move_to("/proj/a.ts", "/proj/lib")]);
    assert!(engine.clipboard().is_empty());

    engine.choose(&paste);
    assert!(engine.drain_intents().is_empty());
    let menu = engine.context_menu(screen_of(&engine, "/proj/lib")).unwrap();
    assert!(menu.labels().iter().all(|l| !l.starts_with("Paste")));
}

#[test]
fn scenario_c_zoom_clamps() {
    let mut engine = booted();
    engine.set_scale(0.01);
    assert_eq!(engine.camera().scale(), 0.1);
}

#[test]
fn scenario_d_frozen_speed() {
    let mut engine = booted();
    engine.set_speed(0.0);
    for frame in 0..300 {
        engine.tick_at(frame as f64 * 16.7);
    }
    for node in engine.tree().unwrap().nodes() {
        assert_eq!(node.orbit.angle, node.orbit.phase, "{}", node.name);
    }
}

#[test]
fn click_opens_files_and_flies_to_folders() {
    let mut engine = booted();
    let outcome = engine.click(screen_of(&engine, "/proj/a.ts"));
    assert_eq!(outcome, ClickOutcome::Open("/proj/a.ts".into()));
    assert_eq!(engine.drain_intents(), [Intent::Open("/proj/a.ts".into())]);

    engine.set_speed(0.0);
    let outcome = engine.click(screen_of(&engine, "/proj/lib"));
    assert!(matches!(outcome, ClickOutcome::FlyTo { .. }));
    assert!(engine.drain_intents().is_empty());
    for _ in 0..100 {
        engine.tick(16.0);
    }
    assert!(!engine.camera().is_flying());
    assert_eq!(engine.camera().scale(), 1.5);
    let centre = engine.camera().viewport().center();
    assert!(screen_of(&engine, "/proj/lib").distance(centre) < 1e-6);
}

#[test]
fn background_menu_creates_in_root() {
    let mut engine = booted();
    let menu = engine.context_menu(Point::new(3.0, 3.0)).unwrap();
    assert_eq!(menu.target, MenuTarget::Background);
    assert_eq!(menu.labels(), ["New File (Root)", "New Folder (Root)"]);
    let action = menu.find("New Folder (Root)").unwrap().clone();
    assert_eq!(action, MenuAction::NewFolder { parent: "/proj".into() });
    engine.choose(&action);
    assert_eq!(engine.drain_intents(), [Intent::CreateFolder("/proj".into())]);
}

#[test]
fn reingest_replaces_at_frame_boundary() {
    let mut engine = booted();
    engine.tick(500.0);
    let time = engine.sim_time();
    engine
        .handle_json(r#"{"type":"update","data":{"name":"other","type":"star","path":"/other"}}"#)
        .unwrap();
    assert_eq!(engine.tree().unwrap().root().name, "proj");
    engine.tick(16.0);
    assert_eq!(engine.tree().unwrap().root().name, "other");
    assert_eq!(engine.tree().unwrap().len(), 1);
    assert_eq!(engine.sim_time(), time + 16.0);
}

/// `update` message for a chain of `levels` folders ending in one file.
fn nested_update(levels: usize) -> String {
    let mut json = String::from(r#"{"type":"update","data":"#);
    for i in 0..levels {
        json.push_str(&format!(r#"{{"name":"d{i}","type":"star","path":"/d{i}","children":["#));
    }
    json.push_str(r#"{"name":"leaf","type":"planet","path":"/leaf","size":8,"lastModified":0}"#);
    json.push_str(&"]}".repeat(levels));
    json.push('}');
    json
}

#[test]
fn very_deep_trees_are_ingested() {
    let mut engine = booted();
    engine.handle_json(&nested_update(300)).unwrap();
    engine.tick(16.0);

    let tree = engine.tree().unwrap();
    assert_eq!(tree.root().name, "d0");
    assert_eq!(tree.len(), 301);
    let leaf = tree.get(id_of(tree, "/leaf")).unwrap();
    assert_eq!(leaf.depth, 300);
    assert!(leaf.orbit.position.is_finite());

    let mut rec = Recorder::new();
    engine.render(&mut rec);
    assert!(rec.texts().contains(&"d299"));
}

#[test]
fn absurdly_deep_messages_keep_the_current_tree() {
    let mut engine = booted();
    let err = engine.handle_json(&nested_update(MAX_NESTING)).unwrap_err();
    assert!(matches!(err, EngineError::TooDeep { limit: MAX_NESTING, .. }));
    engine.tick(16.0);
    assert_eq!(engine.tree().unwrap().root().name, "proj");
}

#[test]
fn frame_draws_back_to_front() {
    let mut engine = booted();
    let mut rec = Recorder::new();
    engine.frame(16.0, &mut rec);
    assert!(matches!(rec.commands[0], DrawCommand::Clear(_)));
    assert!(matches!(rec.commands[1], DrawCommand::Mapping(_)));
    assert_eq!(rec.texts(), [">> WARNING: DEEP SPACE <<", "proj", "lib"]);
    let first_line = rec.commands.iter().position(|c| matches!(c, DrawCommand::Line { .. })).unwrap();
    let first_text = rec.commands.iter().position(|c| matches!(c, DrawCommand::Text { .. })).unwrap();
    assert!(first_line < first_text);
    assert!(matches!(rec.commands.last(), Some(DrawCommand::Text { .. })));
}

#[test]
fn info_and_error_intents_serialize_for_host() {
    let mut engine = Engine::boot(
        EngineConfig::default().with_seed(1),
        Some(Viewport::new(640.0, 480.0).unwrap()),
        Capabilities { animation: false },
    )
    .unwrap();
    engine.info("scan finished");
    let json: Vec<String> = engine.drain_intents().iter().map(|i| i.to_json().unwrap()).collect();
    assert_eq!(
        json,
        [
            r#"{"type":"onReady"}"#.to_string(),
            r#"{"type":"onError","value":"Animation timer failed to load in Webview."}"#.into(),
            r#"{"type":"onInfo","value":"scan finished"}"#.into(),
        ]
    );
}
