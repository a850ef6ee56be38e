use wasm_bindgen::prelude::*;

// ============================================================================
// WAVE FIELD - Perspective point lattice with pointer ripples
// ============================================================================

pub mod config;
pub mod error;
pub mod field;
pub mod frame;
pub mod grid;
pub mod pointer;
pub mod render;
pub mod shell;
pub mod solver;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::WaveConfig;
pub use error::EngineError;
pub use field::WaveField;

use frame::ManualScheduler;
use grid::DEFAULT_SEED;
use pointer::Pointer;
use render::{CommandBuffer, StaticTheme};
use shell::{Section, Session, ShellConfig};
use viewport::Viewport;

// ============================================================================
// JS-driven player: JS owns requestAnimationFrame and calls tick(), then
// replays the command buffer onto its own canvas.
// ============================================================================

#[wasm_bindgen]
pub struct WavePlayer {
    field: WaveField,
    buffer: CommandBuffer,
    scheduler: ManualScheduler,
    theme: StaticTheme,
    pointer: Pointer,
}

#[wasm_bindgen]
impl WavePlayer {
    #[wasm_bindgen(constructor)]
    pub fn new(w: u32, h: u32) -> Self {
        Self::build(WaveConfig::default(), w, h, DEFAULT_SEED)
    }

    /// Same as `new`, with a partial JSON config override and explicit seed.
    pub fn with_config(w: u32, h: u32, config_json: &str, seed: u32) -> Result<WavePlayer, JsValue> {
        let config = WaveConfig::from_json(config_json)?;
        Ok(Self::build(config, w, h, seed))
    }

    /// Cancel the running loop, rebuild for the new size and draw t = 0.
    pub fn resize(&mut self, w: u32, h: u32, now: f64) {
        if let Err(e) = self.field.restart(
            Viewport::new(w, h),
            now,
            self.pointer,
            &mut self.scheduler,
            &mut self.buffer,
            &self.theme,
        ) {
            log::error!("resize failed: {e}");
        }
        self.buffer.encode();
    }

    /// Fire the pending frame. Returns false if the loop is stopped.
    pub fn tick(&mut self, now: f64) -> bool {
        let Some(handle) = self.scheduler.take() else { return false };
        match self.field.on_frame(handle, now, self.pointer, &mut self.scheduler, &mut self.buffer, &self.theme) {
            Ok(Some(_)) => {
                self.buffer.encode();
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::error!("tick failed: {e}");
                false
            }
        }
    }

    pub fn stop(&mut self) {
        self.field.stop(&mut self.scheduler);
    }

    pub fn is_running(&self) -> bool {
        self.field.frames().is_running()
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Pointer::new(x, y);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = Pointer::ABSENT;
    }

    /// Update a theme colour; takes effect on the next frame.
    pub fn set_color(&mut self, name: &str, value: &str) {
        self.theme.set(name, value);
    }

    // Accessors for WASM
    pub fn output_ptr(&self) -> *const f32 { self.buffer.ptr() }
    pub fn output_len(&self) -> usize { self.buffer.len() }
    pub fn color(&self, i: usize) -> Option<String> { self.buffer.color(i).map(str::to_string) }
    pub fn grid_size(&self) -> u32 { self.field.grid().size() }
    pub fn point_count(&self) -> usize { self.field.grid().len() }
    pub fn width(&self) -> u32 { self.field.viewport().width }
    pub fn height(&self) -> u32 { self.field.viewport().height }
}

impl WavePlayer {
    fn build(config: WaveConfig, w: u32, h: u32, seed: u32) -> Self {
        let mut player = Self {
            field: WaveField::new(config, Viewport::new(w, h), seed),
            buffer: CommandBuffer::new(w, h),
            scheduler: ManualScheduler::new(),
            theme: StaticTheme::default(),
            pointer: Pointer::ABSENT,
        };
        player.resize(w, h, 0.0);
        player
    }

    pub fn field(&self) -> &WaveField { &self.field }
    pub fn buffer(&self) -> &CommandBuffer { &self.buffer }
}

// ============================================================================
// Terminal - command line and section navigation
// ============================================================================

#[wasm_bindgen]
pub struct Terminal {
    session: Session,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Terminal {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { session: Session::default() }
    }

    pub fn with_identity(user: &str, host: &str) -> Self {
        Self { session: Session::new(ShellConfig { user: user.into(), host: host.into() }) }
    }

    /// Run a line; returns the outcome as JSON, or undefined for blank input.
    pub fn execute(&mut self, line: &str) -> Result<Option<String>, JsValue> {
        match self.session.execute(line) {
            Some(out) => Ok(Some(serde_json::to_string(&out).map_err(EngineError::from)?)),
            None => Ok(None),
        }
    }

    /// Sidebar click. Returns the tab filename, or undefined for an unknown id.
    pub fn show(&mut self, section_id: &str) -> Option<String> {
        Section::from_id(section_id).map(|s| self.session.show(s).to_string())
    }

    pub fn active(&self) -> String {
        self.session.active().id().to_string()
    }

    pub fn card_action(&self, project_id: &str, viewport_width: u32) -> Result<Option<String>, JsValue> {
        match self.session.card_action(project_id, viewport_width) {
            Some(action) => Ok(Some(serde_json::to_string(&action).map_err(EngineError::from)?)),
            None => Ok(None),
        }
    }

    pub fn history_len(&self) -> usize {
        self.session.history().len()
    }
}
