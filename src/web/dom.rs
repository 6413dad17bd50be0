//! DOM-backed implementations of the engine's host traits.

use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Document, HtmlElement, Storage, Window};

use crate::config::ElementIds;
use crate::error::RunnerError;
use crate::runner::host::{FrameHandle, FrameScheduler, Hud, ScoreStore, parse_score};

// --- Storage -----------------------------------------------------------------

/// High score in `window.localStorage`, stored as decimal text.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    /// Private browsing and sandboxed frames may deny storage; the store then
    /// reports every access as unavailable.
    pub fn new(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            debug!("localStorage unavailable");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, RunnerError> {
        self.storage.as_ref().ok_or(RunnerError::StorageUnavailable)
    }
}

impl ScoreStore for LocalStore {
    fn load(&self, key: &str) -> Result<Option<u32>, RunnerError> {
        match self.storage()?.get_item(key)? {
            Some(raw) => parse_score(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), RunnerError> {
        self.storage()?.set_item(key, &value.to_string())?;
        Ok(())
    }
}

// --- HUD ---------------------------------------------------------------------

/// Writes scores and toggles panels by element id. Missing elements are
/// skipped.
pub struct DomHud {
    document: Document,
    ids: ElementIds,
}

impl DomHud {
    pub fn new(document: Document, ids: ElementIds) -> Self {
        Self { document, ids }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(&self, id: &str, class: &str, on: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let list = el.class_list();
            if on {
                list.add_1(class).ok();
            } else {
                list.remove_1(class).ok();
            }
        }
    }

    fn set_display(&self, id: &str, display: &str) {
        if let Some(el) = self.document.get_element_by_id(id).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
            el.style().set_property("display", display).ok();
        }
    }
}

impl Hud for DomHud {
    fn show_score(&mut self, score: u32) {
        self.set_text(&self.ids.score, &score.to_string());
    }

    fn show_high_score(&mut self, high_score: u32) {
        self.set_text(&self.ids.high_score, &high_score.to_string());
    }

    fn show_game_over(&mut self, final_score: u32) {
        self.set_text(&self.ids.final_score, &final_score.to_string());
        self.set_class(&self.ids.game_over, "visible", true);
    }

    fn show_playing(&mut self) {
        self.set_class(&self.ids.instructions, "visible", false);
        self.set_class(&self.ids.game_over, "visible", false);
    }

    fn show_idle(&mut self) {
        self.set_class(&self.ids.container, "active", false);
        self.set_display(&self.ids.hint, "");
        self.set_class(&self.ids.game_over, "visible", false);
        self.set_class(&self.ids.instructions, "visible", true);
    }
}

// --- Frames ------------------------------------------------------------------

/// `requestAnimationFrame` with a single long-lived callback.
pub struct RafScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl RafScheduler {
    pub fn new(window: Window, callback: Closure<dyn FnMut(f64)>) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
            .ok()
            .map(FrameHandle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.window.cancel_animation_frame(handle.0).ok();
    }
}
