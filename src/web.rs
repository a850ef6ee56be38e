// web.rs - Browser host: canvas, stylesheet theme, rAF loop, input events
//
// Everything here runs on the main thread. Input handlers only write the
// pointer cell; resize is the one event that touches the field, and it
// cancels the pending frame before starting a new loop.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use crate::config::WaveConfig;
use crate::error::EngineError;
use crate::field::WaveField;
use crate::frame::{FrameHandle, Scheduler};
use crate::pointer::PointerCell;
use crate::render::{StaticTheme, Surface, Theme};
use crate::viewport::{ResizeCallback, ViewportProvider};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

fn js_err(e: JsValue) -> EngineError {
    EngineError::Js(format!("{e:?}"))
}

// ============================================================================
// Surface
// ============================================================================

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_element_id(document: &Document, id: &str) -> Result<Self, EngineError> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| EngineError::MissingSurface(format!("no #{id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| EngineError::MissingSurface(format!("#{id} is not a canvas")))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| EngineError::MissingSurface("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::MissingSurface("not a 2d context".into()))?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_glow(&mut self, blur: f64, color: &str) {
        self.ctx.set_shadow_blur(blur);
        self.ctx.set_shadow_color(color);
    }

    fn set_stroke(&mut self, color: &str, width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(x1, y1);
        self.ctx.line_to(x2, y2);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: &str) {
        self.ctx.begin_path();
        if self.ctx.arc(x, y, r, 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn reset(&mut self) {
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_shadow_color("transparent");
        self.ctx.set_global_alpha(1.0);
    }
}

// ============================================================================
// Theme / viewport providers
// ============================================================================

/// Reads CSS custom properties off <body> on every call.
pub struct CssTheme {
    window: Window,
    body: HtmlElement,
    fallback: StaticTheme,
}

impl Theme for CssTheme {
    fn resolve_color(&self, name: &str) -> String {
        let value = self
            .window
            .get_computed_style(&self.body)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value(name).ok())
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        if value.is_empty() { self.fallback.resolve_color(name) } else { value }
    }
}

pub struct WindowViewport(Window);

impl ViewportProvider for WindowViewport {
    fn width(&self) -> u32 {
        self.0.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32
    }

    fn height(&self) -> u32 {
        self.0.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32
    }

    /// Listens for window `resize` for the life of the page.
    fn on_resize(&self, callback: ResizeCallback) -> Result<(), EngineError> {
        let closure = Closure::wrap(callback);
        self.0
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        closure.forget();
        Ok(())
    }
}

// ============================================================================
// Scheduler
// ============================================================================

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl Scheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, EngineError> {
        let cb = self.callback.borrow();
        let cb = cb.as_ref().ok_or_else(|| EngineError::Js("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(js_err)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.window.cancel_animation_frame(handle.0).ok();
    }
}

// ============================================================================
// Wiring
// ============================================================================

struct App {
    field: WaveField,
    surface: CanvasSurface,
    theme: CssTheme,
    viewport: WindowViewport,
    scheduler: RafScheduler,
    pointer: PointerCell,
}

impl App {
    fn restart(&mut self, now: f64) {
        let viewport = self.viewport.snapshot();
        if let Err(e) = self.field.restart(
            viewport,
            now,
            self.pointer.get(),
            &mut self.scheduler,
            &mut self.surface,
            &self.theme,
        ) {
            log::error!("wave restart failed: {e}");
        }
    }

    // rAF doesn't hand back its id, so fire the outstanding handle. A frame
    // superseded by a resize never arrives: restart cancels it with
    // cancelAnimationFrame before requesting the next one.
    fn frame(&mut self, now: f64) {
        let Some(handle) = self.field.frames().pending() else { return };
        if let Err(e) = self.field.on_frame(
            handle,
            now,
            self.pointer.get(),
            &mut self.scheduler,
            &mut self.surface,
            &self.theme,
        ) {
            log::error!("wave frame failed: {e}");
        }
    }
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

/// Start the wave background on `<canvas id=canvas_id>`.
///
/// A missing canvas or 2d context disables the effect without error.
#[wasm_bindgen(js_name = startWave)]
pub fn start_wave(canvas_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => WaveConfig::from_json(&json)?,
        None => WaveConfig::default(),
    };

    let window = web_sys::window().ok_or_else(|| EngineError::Js("no window".into()))?;
    let document = window.document().ok_or_else(|| EngineError::Js("no document".into()))?;
    let body = document.body().ok_or_else(|| EngineError::Js("no body".into()))?;

    let surface = match CanvasSurface::from_element_id(&document, canvas_id) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("wave background disabled: {e}");
            return Ok(());
        }
    };

    let viewport = WindowViewport(window.clone());
    let resize_source = WindowViewport(window.clone());
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u32;
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let pointer = PointerCell::new();

    let app = Rc::new(RefCell::new(App {
        field: WaveField::new(config, viewport.snapshot(), seed),
        surface,
        theme: CssTheme { window: window.clone(), body, fallback: StaticTheme::default() },
        viewport,
        scheduler: RafScheduler { window: window.clone(), callback: callback.clone() },
        pointer: pointer.clone(),
    }));

    {
        let app = app.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            app.borrow_mut().frame(now);
        }) as Box<dyn FnMut(f64)>));
    }

    {
        let app = app.clone();
        let win = window.clone();
        resize_source.on_resize(Box::new(move || {
            app.borrow_mut().restart(now_ms(&win));
        }))?;
    }

    {
        let pointer = pointer.clone();
        let on_move = Closure::wrap(Box::new(move |e: MouseEvent| {
            pointer.on_move(e.client_x() as f64, e.client_y() as f64);
        }) as Box<dyn FnMut(MouseEvent)>);
        document
            .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
            .map_err(js_err)?;
        on_move.forget();
    }

    {
        let on_leave = Closure::wrap(Box::new(move || {
            pointer.on_leave();
        }) as Box<dyn FnMut()>);
        document
            .add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())
            .map_err(js_err)?;
        on_leave.forget();
    }

    app.borrow_mut().restart(now_ms(&window));
    log::info!("wave background started on #{canvas_id}");
    Ok(())
}
