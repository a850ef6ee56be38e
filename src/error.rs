// error.rs - Engine errors
//
// Rendering never fails: these cover setup (config, canvas lookup) only.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no drawing surface: {0}")]
    MissingSurface(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<EngineError> for wasm_bindgen::JsValue {
    fn from(e: EngineError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
