//! Soul Runner core crate.
//!
//! The side-scrolling mini-game on the Oathbreaker 404 page: a knight jumps
//! over spikes, shadows and pillars while collecting souls. Simulation and
//! rendering live in [`runner`] and run natively under test; [`web`] binds
//! them to the page's canvas, buttons and `localStorage`. The page calls
//! `init_soul_runner()` once loaded.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod logging;
pub mod page;
pub mod runner;
pub mod web;

pub use config::{RunnerConfig, Tuning};
pub use error::RunnerError;
pub use runner::{Engine, Phase};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(RunnerConfig::default().log_filter());
}
