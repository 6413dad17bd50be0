use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures surfaced by the browser binding and the score store.
///
/// None of these stop the page: the web layer logs them and disables the
/// affected feature.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("no global `window`")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("element #{0} not found")]
    MissingElement(String),

    #[error("canvas 2d context unavailable")]
    NoContext,

    #[error("local storage unavailable")]
    StorageUnavailable,

    #[error("stored high score {0:?} is not a number")]
    CorruptScore(String),

    #[error("javascript error: {0}")]
    Js(String),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[cfg(feature = "serde_json")]
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for RunnerError {
    fn from(value: JsValue) -> Self {
        RunnerError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<RunnerError> for JsValue {
    fn from(err: RunnerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
