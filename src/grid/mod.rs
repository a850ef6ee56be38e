// grid/ - Point lattice and its lifecycle
//
// Row-major storage: index = y * size + x. The lattice is never resized
// in place; a new size means a new grid.

mod point;

pub use point::Point;

use crate::config::{Breakpoint, Profile, MAX_GRID_SIZE};

/// Fallback seed; also replaces a zero state, which xorshift never leaves.
pub const DEFAULT_SEED: u32 = 0xDEADBEEF;

/// Density/fidelity profile for a viewport width.
#[inline]
pub fn select_profile(viewport_width: u32, breakpoint: &Breakpoint) -> Profile {
    if breakpoint.is_narrow(viewport_width) { breakpoint.narrow } else { breakpoint.wide }
}

#[inline]
pub fn select_grid_size(viewport_width: u32, breakpoint: &Breakpoint) -> u32 {
    select_profile(viewport_width, breakpoint).grid_size.clamp(1, MAX_GRID_SIZE)
}

// Random number generator (xorshift32), [0, 1)
#[inline(always)]
pub fn rand(rng: &mut u32) -> f64 {
    if *rng == 0 { *rng = DEFAULT_SEED; }
    *rng ^= *rng << 13;
    *rng ^= *rng >> 17;
    *rng ^= *rng << 5;
    (*rng >> 8) as f64 * (1.0 / 16777216.0)
}

#[inline]
fn cell_count(size: u32) -> Option<usize> {
    (size as usize).checked_mul(size as usize)
}

#[derive(Debug, Clone, Default)]
pub struct Grid {
    size: u32,
    points: Vec<Point>,
}

impl Grid {
    /// Allocate size² points in row-major order with fresh wobble offsets.
    /// `size` is clamped to `1..=MAX_GRID_SIZE`.
    pub fn build(size: u32, base_radius: f64, wobble_range: f64, rng: &mut u32) -> Self {
        let size = size.clamp(1, MAX_GRID_SIZE);
        let n = cell_count(size).unwrap_or(0);
        let mut points = Vec::with_capacity(n);
        for y in 0..size {
            for x in 0..size {
                let wobble = rand(rng) * wobble_range;
                points.push(Point::new(x, y, base_radius, wobble));
            }
        }
        log::debug!("grid rebuilt: {size}x{size} ({n} points)");
        Self { size, points }
    }

    /// Wrap prebuilt points. Used where wobble must be fixed.
    pub fn from_points(size: u32, points: Vec<Point>) -> Self {
        Self { size, points }
    }

    #[inline]
    pub fn size(&self) -> u32 { self.size }

    #[inline]
    pub fn len(&self) -> usize { self.points.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    #[inline]
    pub fn points(&self) -> &[Point] { &self.points }

    /// True when the live point count matches size².
    pub fn is_consistent(&self) -> bool {
        self.size > 0 && cell_count(self.size) == Some(self.points.len())
    }

    /// Index of the right-hand neighbour, if it is a real neighbour.
    #[inline]
    pub fn right_of(&self, i: usize) -> Option<usize> {
        let p = self.points.get(i)?;
        if p.grid_x + 1 >= self.size { return None; }
        let j = i + 1;
        let q = self.points.get(j)?;
        (q.grid_y == p.grid_y && q.grid_x == p.grid_x + 1).then_some(j)
    }

    /// Index of the neighbour one row down, if it is a real neighbour.
    #[inline]
    pub fn below(&self, i: usize) -> Option<usize> {
        let p = self.points.get(i)?;
        if p.grid_y + 1 >= self.size { return None; }
        let j = i + self.size as usize;
        let q = self.points.get(j)?;
        (q.grid_x == p.grid_x && q.grid_y == p.grid_y + 1).then_some(j)
    }
}
