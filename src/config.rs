//! Runtime configuration: DOM element ids, the high-score storage key and the
//! physics / difficulty tuning. Defaults reproduce the shipped 404 page.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::RunnerError;

/// Top-level configuration handed to the web binding and the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RunnerConfig {
    /// `localStorage` key holding the best score.
    pub storage_key: String,
    pub elements: ElementIds,
    pub tuning: Tuning,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            storage_key: "oathbreaker_highscore".to_string(),
            elements: ElementIds::default(),
            tuning: Tuning::default(),
            log_level: "info".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, RunnerError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.tuning.validate()?;
        Ok(cfg)
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Ids of the page elements the game reads from or writes to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ElementIds {
    pub canvas: String,
    pub container: String,
    pub score: String,
    pub high_score: String,
    pub final_score: String,
    pub instructions: String,
    pub game_over: String,
    pub hint: String,
    pub error_container: String,
    pub start_button: String,
    pub restart_button: String,
    pub close_button: String,
    pub close_x: String,
    pub character_image: String,
    pub character_card: String,
    pub error_title: String,
    pub error_message: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: "game-canvas".into(),
            container: "minigame-container".into(),
            score: "game-score".into(),
            high_score: "high-score".into(),
            final_score: "final-score".into(),
            instructions: "game-instructions".into(),
            game_over: "game-over-screen".into(),
            hint: "game-hint".into(),
            error_container: "error-container".into(),
            start_button: "start-game-btn".into(),
            restart_button: "restart-btn".into(),
            close_button: "close-game-btn".into(),
            close_x: "close-game-x".into(),
            character_image: "random-character-img".into(),
            character_card: "error-character".into(),
            error_title: "error-title".into(),
            error_message: "error-message".into(),
        }
    }
}

/// Simulation constants. Distances are canvas pixels, times are normalized
/// frames (one frame = `frame_ms` milliseconds).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Tuning {
    pub frame_ms: f64,
    pub player_x: f64,
    pub player_width: f64,
    pub player_height: f64,
    pub jump_force: f64,
    pub gravity: f64,
    /// Distance from the bottom of the surface to the ground-contact line.
    pub ground_offset: f64,
    pub tile_width: f64,
    pub base_speed: f64,
    pub speed_step: f64,
    pub points_per_step: u32,
    pub soul_points: u32,
    pub soul_size: f64,
    pub soul_float_rate: f64,
    pub collision_padding: f64,
    pub obstacle_interval: (f64, f64),
    pub soul_interval: (f64, f64),
    /// Soul spawn height above the ground-contact line.
    pub soul_height: (f64, f64),
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            frame_ms: 16.67,
            player_x: 80.0,
            player_width: 40.0,
            player_height: 50.0,
            jump_force: -15.0,
            gravity: 0.8,
            ground_offset: 80.0,
            tile_width: 60.0,
            base_speed: 5.0,
            speed_step: 0.5,
            points_per_step: 50,
            soul_points: 10,
            soul_size: 20.0,
            soul_float_rate: 0.1,
            collision_padding: 8.0,
            obstacle_interval: (80.0, 140.0),
            soul_interval: (40.0, 70.0),
            soul_height: (50.0, 130.0),
        }
    }
}

impl Tuning {
    /// Step difficulty curve: `base + floor(score / points_per_step) * step`.
    pub fn speed_for(&self, score: u32) -> f64 {
        let steps = score / self.points_per_step.max(1);
        self.base_speed + steps as f64 * self.speed_step
    }

    /// Number of ground tiles needed to cover `width` with one spare each side.
    pub fn tile_count(&self, width: f64) -> usize {
        if self.tile_width.is_nan() || self.tile_width <= 0.0 {
            return 2;
        }
        (width.max(0.0) / self.tile_width).ceil() as usize + 2
    }

    /// Reject values the simulation cannot run with: a non-positive frame
    /// length or tile width, a zero speed step, or an empty spawn range.
    pub fn validate(&self) -> Result<(), RunnerError> {
        let invalid = |what: &str| Err(RunnerError::InvalidTuning(what.to_string()));
        if !(self.frame_ms.is_finite() && self.frame_ms > 0.0) {
            return invalid("frame_ms must be positive");
        }
        if !(self.tile_width.is_finite() && self.tile_width > 0.0) {
            return invalid("tile_width must be positive");
        }
        if self.points_per_step == 0 {
            return invalid("points_per_step must be at least 1");
        }
        for (name, (low, high)) in [
            ("obstacle_interval", self.obstacle_interval),
            ("soul_interval", self.soul_interval),
            ("soul_height", self.soul_height),
        ] {
            if !(low.is_finite() && high.is_finite() && low < high) {
                return Err(RunnerError::InvalidTuning(format!("{name} [{low}, {high}) is empty")));
            }
        }
        Ok(())
    }
}

/// Canvas size for the mini-game: fits the container (minus its 20px
/// gutters), capped at 800x400; 800x400 when there is no container.
pub fn fit_surface(container_width: Option<f64>, viewport_height: f64) -> (u32, u32) {
    match container_width {
        Some(cw) => {
            let w = (cw - 40.0).clamp(0.0, 800.0);
            let h = (viewport_height * 0.5).clamp(0.0, 400.0);
            (w as u32, h as u32)
        }
        None => (800, 400),
    }
}
