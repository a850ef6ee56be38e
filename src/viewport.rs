// viewport.rs - Viewport size and narrow/wide classification

use crate::config::{Breakpoint, Profile};
use crate::error::EngineError;
use crate::grid::select_profile;

pub type ResizeCallback = Box<dyn FnMut()>;

/// Anything that can report the current drawable size.
pub trait ViewportProvider {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Register `callback` to run whenever the size changes. A fixed-size
    /// viewport never resizes, so the default drops it.
    fn on_resize(&self, callback: ResizeCallback) -> Result<(), EngineError> {
        drop(callback);
        Ok(())
    }

    fn snapshot(&self) -> Viewport {
        Viewport::new(self.width(), self.height())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    #[inline]
    pub fn is_narrow(&self, breakpoint: &Breakpoint) -> bool {
        breakpoint.is_narrow(self.width)
    }

    pub fn profile(&self, breakpoint: &Breakpoint) -> Profile {
        select_profile(self.width, breakpoint)
    }
}

impl ViewportProvider for Viewport {
    fn width(&self) -> u32 { self.width }
    fn height(&self) -> u32 { self.height }
}
