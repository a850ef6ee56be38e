// pointer.rs - Latest cursor position
//
// Input handlers write, the frame loop reads. Both run on the same
// thread, so a shared Cell is enough.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    /// Far outside any canvas: every point's distance exceeds the ripple radius.
    pub const ABSENT: Pointer = Pointer { x: -999.0, y: -999.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dist_sq(&self, x: f64, y: f64) -> f64 {
        let (dx, dy) = (x - self.x, y - self.y);
        dx * dx + dy * dy
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Pointer::ABSENT
    }
}

/// Single-writer/single-reader pointer state shared with event callbacks.
#[derive(Debug, Clone, Default)]
pub struct PointerCell(Rc<Cell<Pointer>>);

impl PointerCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_move(&self, x: f64, y: f64) {
        self.0.set(Pointer::new(x, y));
    }

    pub fn on_leave(&self) {
        self.0.set(Pointer::ABSENT);
    }

    pub fn get(&self) -> Pointer {
        self.0.get()
    }
}
