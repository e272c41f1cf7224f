//! The engine context.
//!
//! Everything that used to live in ambient globals (tree, camera, clock,
//! clipboard) is owned by one [`Engine`]. The caller drives it:
//!
//!   host message → ingest (staged) → tick swaps it in at the frame boundary
//!   tick(dt)     → camera tween → sim clock → integrate whole tree
//!   render(s)    → full back-to-front pass onto a `Surface`
//!   pointer      → hit test → dispatcher → intents / camera moves
//!
//! Outbound intents queue up until [`Engine::drain_intents`].

pub mod clock;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::camera::{Camera, Viewport};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::geom::Point;
use crate::host::{HostMessage, Intent};
use crate::interact::{ClickOutcome, Clipboard, ContextMenu, Dispatcher, Hover, MenuAction};
use crate::orbit::{self, integrator::{self, SimClock}};
use crate::render::{Renderer, Starfield, Surface};
use crate::tree::{NodeRecord, Tree};

pub use clock::{now_ms, FrameClock};

/// Reported once when the host cannot drive animation frames.
pub const STATIC_MODE_MESSAGE: &str = "Animation timer failed to load in Webview.";

/// What the host environment can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// A per-frame timer is available. Without it the engine still draws,
    /// but time never advances and fly-to jumps instead of animating.
    pub animation: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { animation: true }
    }
}

pub struct Engine {
    config: EngineConfig,
    renderer: Renderer,
    camera: Camera,
    sim: SimClock,
    frames: FrameClock,
    dispatcher: Dispatcher,
    tree: Option<Tree>,
    /// Freshly assigned tree waiting for the next frame boundary.
    staged: Option<Tree>,
    starfield: Starfield,
    rng: SmallRng,
    intents: Vec<Intent>,
    animated: bool,
}

impl Engine {
    /// Start the engine against a drawing surface of size `viewport`.
    ///
    /// Without a surface nothing is initialized and nothing is reported.
    pub fn boot(config: EngineConfig, viewport: Option<Viewport>, caps: Capabilities) -> Result<Self> {
        let viewport = viewport.ok_or(EngineError::MissingSurface)?;
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let r = &config.render;
        let starfield = Starfield::generate(r.star_count, r.universe_radius, r.star_max_size, &mut rng);

        let mut engine = Self {
            renderer: Renderer::new(config.render.clone()),
            camera: Camera::new(config.camera.clone(), viewport),
            sim: SimClock::default(),
            frames: FrameClock::default(),
            dispatcher: Dispatcher::new(config.interaction.clone()),
            tree: None,
            staged: None,
            starfield,
            rng,
            intents: Vec::new(),
            animated: caps.animation,
            config,
        };

        log::info!("engine ready ({}x{})", viewport.width, viewport.height);
        engine.emit(Intent::Ready);
        if !caps.animation {
            log::warn!("no animation timer, static mode");
            engine.emit(Intent::Error(STATIC_MODE_MESSAGE.to_string()));
        }
        Ok(engine)
    }

    // ─── Host input ──────────────────────────────────────────────────────────

    pub fn handle_message(&mut self, msg: HostMessage) {
        match msg {
            HostMessage::Update { data } => self.ingest(&data),
        }
    }

    /// Decode and handle one raw host message.
    pub fn handle_json(&mut self, json: &str) -> Result<()> {
        let msg = HostMessage::from_json(json).inspect_err(|e| log::warn!("dropping host message: {e}"))?;
        self.handle_message(msg);
        Ok(())
    }

    pub fn ingest(&mut self, record: &NodeRecord) {
        self.ingest_at(record, now_ms());
    }

    /// Build and lay out a replacement tree, aging leaves against `now`
    /// (ms since the Unix epoch). It becomes visible on the next tick.
    pub fn ingest_at(&mut self, record: &NodeRecord, now: f64) {
        let mut tree = Tree::from_record(record);
        orbit::assign(&mut tree, &self.config.orbit, now, &mut self.rng);
        integrator::integrate(&mut tree, self.sim.time());
        log::info!("ingested '{}' ({} nodes)", tree.root().name, tree.len());
        self.staged = Some(tree);
    }

    /// New surface size. Timing restarts; pan, zoom and simulation time stay.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        let viewport = Viewport::new(width, height)?;
        self.camera.resize(viewport);
        self.frames.reset();
        log::debug!("resized to {width}x{height}");
        Ok(())
    }

    // ─── Frame loop ──────────────────────────────────────────────────────────

    /// Advance by `dt` time units and update every node position.
    pub fn tick(&mut self, dt: f64) {
        if let Some(tree) = self.staged.take() {
            log::debug!("swapping in tree '{}'", tree.root().name);
            self.tree = Some(tree);
        }
        if self.animated {
            self.camera.advance(dt);
            self.sim.advance(dt);
        }
        if let Some(tree) = self.tree.as_mut() {
            integrator::integrate(tree, self.sim.time());
        }
    }

    /// [`Engine::tick`] from an absolute frame timestamp.
    pub fn tick_at(&mut self, now: f64) {
        let dt = self.frames.delta(now);
        self.tick(dt);
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.renderer.draw(self.tree.as_ref(), &self.camera, &self.starfield, surface);
    }

    /// Tick then render.
    pub fn frame<S: Surface + ?Sized>(&mut self, dt: f64, surface: &mut S) {
        self.tick(dt);
        self.render(surface);
    }

    // ─── Pointer & controls ──────────────────────────────────────────────────

    pub fn hover(&mut self, screen: Point) -> &Hover {
        self.dispatcher.hover(self.tree.as_ref(), &self.camera, screen)
    }

    pub fn leave(&mut self) {
        self.dispatcher.leave();
    }

    pub fn click(&mut self, screen: Point) -> ClickOutcome {
        let outcome = self.dispatcher.click(self.tree.as_ref(), &self.camera, screen);
        match &outcome {
            ClickOutcome::Open(path) => self.emit(Intent::Open(path.clone())),
            ClickOutcome::FlyTo { target, .. } => self.camera.fly_to(*target, self.animated),
            ClickOutcome::Miss => {}
        }
        outcome
    }

    pub fn context_menu(&self, screen: Point) -> Option<ContextMenu> {
        self.dispatcher.context_menu(self.tree.as_ref(), &self.camera, screen)
    }

    pub fn choose(&mut self, action: &MenuAction) {
        if let Some(intent) = self.dispatcher.choose(action) {
            self.emit(intent);
        }
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.camera.pan(dx, dy);
    }

    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        self.camera.zoom_at(anchor, factor);
    }

    pub fn wheel(&mut self, anchor: Point, delta: f64) {
        self.camera.wheel(anchor, delta);
    }

    pub fn set_scale(&mut self, k: f64) {
        self.camera.set_scale(k);
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.sim.set_speed(speed);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.emit(Intent::Info(message.into()));
    }

    // ─── Outbound ────────────────────────────────────────────────────────────

    fn emit(&mut self, intent: Intent) {
        log::debug!("intent → host: {intent:?}");
        self.intents.push(intent);
    }

    /// Outbound intents in emission order.
    pub fn drain_intents(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    pub fn has_staged_tree(&self) -> bool {
        self.staged.is_some()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn sim_time(&self) -> f64 {
        self.sim.time()
    }

    pub fn speed(&self) -> f64 {
        self.sim.speed()
    }

    pub fn clipboard(&self) -> &Clipboard {
        self.dispatcher.clipboard()
    }

    pub fn is_static(&self) -> bool {
        !self.animated
    }
}
