//! Browser binding: one runner per page, driven by `requestAnimationFrame`
//! and wired to the error page's buttons, keys and touch events.

mod canvas;
mod dom;

pub use canvas::CanvasPainter;
pub use dom::{DomHud, LocalStore, RafScheduler};

use std::cell::RefCell;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlCanvasElement, HtmlElement,
    HtmlImageElement, KeyboardEvent, Window,
};

use crate::config::{ElementIds, RunnerConfig, fit_surface};
use crate::error::RunnerError;
use crate::page;
use crate::runner::input::InputDevice;
use crate::runner::{Engine, Phase};

type PageEngine = Engine<LocalStore, DomHud, RafScheduler>;

struct WebRunner {
    engine: PageEngine,
    painter: CanvasPainter,
    canvas: HtmlCanvasElement,
    window: Window,
    document: Document,
    ids: ElementIds,
}

impl WebRunner {
    fn now(&self) -> f64 {
        self.window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    fn frame(&mut self, ts: f64) {
        self.engine.frame(ts, &mut self.painter);
    }

    fn start(&mut self) {
        let now = self.now();
        self.engine.start(now);
    }

    /// Fit the canvas to its container and the viewport.
    fn fit(&mut self) {
        let container = self
            .document
            .get_element_by_id(&self.ids.container)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            .map(|e| e.offset_width() as f64);
        let viewport = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let (width, height) = fit_surface(container, viewport);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.engine.resize(width, height);
    }

    /// Reveal the game container from a click anywhere else on the page.
    fn open_from(&mut self, target: Option<EventTarget>) {
        let Some(target) = target.and_then(|t| t.dyn_into::<Element>().ok()) else { return };
        let container_sel = format!("#{}", self.ids.container);
        let tag = target.tag_name();
        if tag == "A"
            || tag == "BUTTON"
            || ["a", "button", container_sel.as_str()]
                .iter()
                .any(|sel| target.closest(sel).ok().flatten().is_some())
        {
            return;
        }
        let Some(container) = self.document.get_element_by_id(&self.ids.container) else { return };
        let classes = container.class_list();
        if classes.contains("active") {
            return;
        }
        classes.add_1("active").ok();
        let hint = self.document.get_element_by_id(&self.ids.hint).and_then(|e| e.dyn_into::<HtmlElement>().ok());
        if let Some(hint) = hint {
            hint.style().set_property("display", "none").ok();
        }
        self.fit();
    }
}

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the installed runner. Returns `None` when nothing is
/// installed or the runner is already borrowed further up the stack.
fn with_runner<R>(f: impl FnOnce(&mut WebRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.as_mut().map(f),
        Err(_) => {
            debug!("runner busy, event dropped");
            None
        }
    })
}

fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<(), RunnerError> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Like [`listen`] but allowed to `preventDefault` (touch listeners are
/// passive by default on most browsers).
fn listen_active(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<(), RunnerError> {
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

// --- Boot --------------------------------------------------------------------

/// Install everything once the DOM is parsed.
pub fn boot(config: RunnerConfig) -> Result<(), RunnerError> {
    let window = web_sys::window().ok_or(RunnerError::NoWindow)?;
    let document = window.document().ok_or(RunnerError::NoDocument)?;
    if document.ready_state() == "loading" {
        let deferred = Closure::once_into_js(move || {
            if let Err(err) = install(config) {
                warn!("soul runner disabled: {err}");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", deferred.unchecked_ref())?;
        return Ok(());
    }
    install(config)
}

fn install(config: RunnerConfig) -> Result<(), RunnerError> {
    if RUNNER.with(|cell| cell.borrow().is_some()) {
        debug!("soul runner already installed");
        return Ok(());
    }
    let window = web_sys::window().ok_or(RunnerError::NoWindow)?;
    let document = window.document().ok_or(RunnerError::NoDocument)?;

    if let Err(err) = show_character(&window, &document, &config.elements) {
        warn!("character card skipped: {err}");
    }

    let Some(canvas) = document.get_element_by_id(&config.elements.canvas) else {
        info!("no #{} on this page, soul runner not installed", config.elements.canvas);
        return Ok(());
    };
    let canvas: HtmlCanvasElement =
        canvas.dyn_into().map_err(|_| RunnerError::MissingElement(config.elements.canvas.clone()))?;
    let painter = CanvasPainter::new(&canvas)?;

    let on_frame = Closure::wrap(Box::new(move |ts: f64| {
        with_runner(|r| r.frame(ts));
    }) as Box<dyn FnMut(f64)>);
    let scheduler = RafScheduler::new(window.clone(), on_frame);
    let store = LocalStore::new(&window);
    let hud = DomHud::new(document.clone(), config.elements.clone());
    let ids = config.elements.clone();
    let engine = Engine::new(config, canvas.width(), canvas.height(), store, hud, scheduler, SmallRng::from_entropy());

    let mut runner = WebRunner {
        engine,
        painter,
        canvas: canvas.clone(),
        window: window.clone(),
        document: document.clone(),
        ids: ids.clone(),
    };
    runner.fit();
    RUNNER.with(|cell| cell.replace(Some(runner)));

    wire_events(&window, &document, &canvas, &ids)?;
    info!("soul runner ready");
    Ok(())
}

fn wire_events(
    window: &Window,
    document: &Document,
    canvas: &HtmlCanvasElement,
    ids: &ElementIds,
) -> Result<(), RunnerError> {
    listen(window, "resize", |_| {
        with_runner(|r| r.fit());
    })?;

    listen(document, "keydown", |evt| {
        let Some(key) = evt.dyn_ref::<KeyboardEvent>() else { return };
        if key.code() == "Space" || key.key() == " " {
            with_runner(|r| {
                if r.engine.is_running() {
                    evt.prevent_default();
                    r.engine.jump(InputDevice::Keyboard);
                }
            });
        } else if key.key() == "Escape" {
            with_runner(|r| r.engine.close());
        }
    })?;

    listen(canvas, "click", |_| {
        with_runner(|r| r.engine.jump(InputDevice::Pointer));
    })?;

    listen_active(canvas, "touchstart", |evt| {
        with_runner(|r| {
            if r.engine.is_running() {
                evt.prevent_default();
                r.engine.jump(InputDevice::Touch);
            }
        });
    })?;

    if let Some(area) = document.get_element_by_id(&ids.error_container) {
        listen(&area, "click", |evt| {
            with_runner(|r| r.open_from(evt.target()));
        })?;
    }

    for id in [&ids.start_button, &ids.restart_button] {
        if let Some(button) = document.get_element_by_id(id) {
            listen(&button, "click", |evt| {
                evt.stop_propagation();
                with_runner(|r| r.start());
            })?;
        }
    }

    let closers = [(&ids.close_button, "click"), (&ids.close_x, "click"), (&ids.close_x, "touchend")];
    for (id, kind) in closers {
        if let Some(button) = document.get_element_by_id(id) {
            listen(&button, kind, |evt| {
                evt.prevent_default();
                evt.stop_propagation();
                with_runner(|r| r.engine.close());
            })?;
        }
    }
    Ok(())
}

// --- Character card ----------------------------------------------------------

fn show_character(window: &Window, document: &Document, ids: &ElementIds) -> Result<(), RunnerError> {
    let Some(img) = document.get_element_by_id(&ids.character_image) else { return Ok(()) };
    let img: HtmlImageElement =
        img.dyn_into().map_err(|_| RunnerError::MissingElement(ids.character_image.clone()))?;

    let character = page::pick(&mut SmallRng::from_entropy());
    let now = window.performance().map(|p| p.time_origin() + p.now()).unwrap_or(0.0);
    img.set_src(&page::cache_busted(character.image, now));
    img.set_alt(character.name);

    if let Some(el) = document.get_element_by_id(&ids.error_title) {
        el.set_text_content(Some(character.title));
    }
    if let Some(el) = document.get_element_by_id(&ids.error_message) {
        el.set_text_content(Some(character.message));
    }

    let loaded = img.clone();
    let card = document.get_element_by_id(&ids.character_card);
    listen(&img, "load", move |_| {
        loaded.class_list().add_1("loaded").ok();
        if let Some(card) = &card {
            card.class_list().add_1("visible").ok();
        }
    })?;
    debug!("character card: {}", character.name);
    Ok(())
}

// --- Exports -----------------------------------------------------------------

/// Install the runner with the default page layout. Safe to call more than
/// once; a page without the game canvas is left untouched.
#[wasm_bindgen]
pub fn init_soul_runner() -> Result<(), JsValue> {
    boot(RunnerConfig::default())?;
    Ok(())
}

/// Same as [`init_soul_runner`] with a JSON config; missing fields default.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn init_soul_runner_with_config(json: &str) -> Result<(), JsValue> {
    let config = RunnerConfig::from_json(json)?;
    crate::logging::init(config.log_filter());
    boot(config)?;
    Ok(())
}

#[wasm_bindgen]
pub fn start_soul_runner() {
    with_runner(|r| r.start());
}

#[wasm_bindgen]
pub fn close_soul_runner() {
    with_runner(|r| r.engine.close());
}

#[wasm_bindgen]
pub fn resize_soul_runner() {
    with_runner(|r| r.fit());
}

#[wasm_bindgen]
pub fn soul_runner_high_score() -> u32 {
    with_runner(|r| r.engine.high_score()).unwrap_or(0)
}

/// `true` while a run is in progress.
#[wasm_bindgen]
pub fn soul_runner_is_running() -> bool {
    with_runner(|r| r.engine.phase() == Phase::Running).unwrap_or(false)
}
