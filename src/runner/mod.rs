//! Soul Runner: a side-scrolling jump-and-collect game.
//!
//! The [`Engine`] owns one [`World`] plus the lifecycle around it
//! (idle → running → game over) and talks to its host only through the traits
//! in [`host`]. The browser binding lives in `crate::web`; tests drive the
//! engine with in-memory fakes.
//!
//! Frame order is fixed: drain queued input, step the world, handle pickups
//! and crashes, draw, then schedule the next frame only if still running.

pub mod entities;
pub mod host;
pub mod input;
pub mod render;
pub mod world;

use log::{debug, info, trace, warn};
use rand::rngs::SmallRng;

use crate::config::RunnerConfig;
use host::{FrameHandle, FrameScheduler, Hud, ScoreStore};
use input::{InputDevice, InputQueue, Intent};
use render::Painter;
pub use world::{StepReport, World};

/// Lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Instructions shown, no frames scheduled.
    Idle,
    Running,
    /// Terminal frame drawn, waiting for restart or close.
    GameOver,
}

pub struct Engine<S, H, F> {
    config: RunnerConfig,
    world: World,
    phase: Phase,
    high_score: u32,
    last_time: f64,
    pending: Option<FrameHandle>,
    intents: InputQueue,
    store: S,
    hud: H,
    scheduler: F,
}

impl<S: ScoreStore, H: Hud, F: FrameScheduler> Engine<S, H, F> {
    /// Build an idle engine for a `width` x `height` surface and publish the
    /// persisted high score.
    pub fn new(config: RunnerConfig, width: u32, height: u32, store: S, mut hud: H, scheduler: F, rng: SmallRng) -> Self {
        let high_score = match store.load(&config.storage_key) {
            Ok(value) => value.unwrap_or(0),
            Err(err) => {
                warn!("high score unavailable, starting from 0: {err}");
                0
            }
        };
        hud.show_high_score(high_score);
        let world = World::new(config.tuning.clone(), width, height, rng);
        Self {
            config,
            world,
            phase: Phase::Idle,
            high_score,
            last_time: 0.0,
            pending: None,
            intents: InputQueue::default(),
            store,
            hud,
            scheduler,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> u32 {
        self.world.score()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    /// Whether a frame callback is currently scheduled.
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    // --- Lifecycle ---------------------------------------------------------------

    /// Begin a fresh run with `now` as the frame baseline. Ignored while a
    /// run is already in progress.
    pub fn start(&mut self, now: f64) {
        if self.phase == Phase::Running {
            debug!("start ignored: already running");
            return;
        }
        self.cancel_pending();
        self.world.reset();
        self.intents.clear();
        self.phase = Phase::Running;
        self.last_time = now;
        self.hud.show_score(0);
        self.hud.show_playing();
        info!("soul runner started (best {})", self.high_score);
        self.schedule();
    }

    /// Stop everything and return to the page with a clean session.
    pub fn close(&mut self) {
        self.cancel_pending();
        self.phase = Phase::Idle;
        self.intents.clear();
        self.world.reset();
        self.hud.show_score(0);
        self.hud.show_idle();
        debug!("soul runner closed");
    }

    /// Queue a jump for the next frame. Only meaningful while running.
    pub fn jump(&mut self, device: InputDevice) {
        if self.phase != Phase::Running {
            return;
        }
        if !self.intents.push(Intent::Jump(device)) {
            debug!("input queue full, dropped jump from {device:?}");
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.world.resize(width, height);
        debug!("surface resized to {width}x{height}");
    }

    // --- Frame -------------------------------------------------------------------

    /// One frame callback. Does nothing unless running; draws the terminal
    /// frame on game over without scheduling another.
    pub fn frame(&mut self, now: f64, painter: &mut impl Painter) {
        self.pending = None;
        if self.phase != Phase::Running {
            return;
        }
        let dt = ((now - self.last_time) / self.config.tuning.frame_ms).max(0.0);
        self.last_time = now;

        self.apply_intents();
        let report = self.world.step(dt);
        if report.collected > 0 {
            self.hud.show_score(self.world.score());
        }
        if report.crashed {
            self.game_over();
        }

        render::draw(&self.world, painter, now);

        if self.phase == Phase::Running {
            self.schedule();
        }
    }

    fn apply_intents(&mut self) {
        for intent in self.intents.drain() {
            match intent {
                Intent::Jump(device) => {
                    if !self.world.player_mut().jump() {
                        trace!("jump from {device:?} ignored: airborne");
                    }
                }
            }
        }
    }

    fn game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.cancel_pending();
        self.intents.clear();

        let score = self.world.score();
        if score > self.high_score {
            self.high_score = score;
            if let Err(err) = self.store.save(&self.config.storage_key, score) {
                warn!("could not persist high score {score}: {err}");
            }
            self.hud.show_high_score(score);
        }
        self.hud.show_game_over(score);
        info!("soul runner over: score {score}, best {}", self.high_score);
    }

    fn schedule(&mut self) {
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            warn!("host refused to schedule a frame, stopping the run");
            self.phase = Phase::Idle;
            self.intents.clear();
            self.hud.show_idle();
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}
