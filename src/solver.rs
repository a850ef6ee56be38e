// solver.rs - Per-point screen placement
//
// Pure: the same (point, frame, config) always yields the same placement.
// Nothing is carried between frames.

use crate::config::WaveConfig;
use crate::grid::Point;
use crate::pointer::Pointer;

/// Everything a frame shares across all points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    /// Milliseconds since the loop (re)started.
    pub time: f64,
    pub pointer: Pointer,
    pub grid_size: u32,
}

impl FrameParams {
    pub fn new(width: u32, height: u32, time: f64, pointer: Pointer, grid_size: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        Self {
            width: w,
            height: h,
            center_x: w / 2.0,
            center_y: h / 2.0,
            time,
            pointer,
            grid_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Vertical wave displacement before the ripple, drives glow.
    pub wave_y: f64,
    /// Perspective scale: small for far (top) rows, 1 at the nearest row.
    pub scale: f64,
}

/// Perspective scale for a row: far rows (small grid_y) shrink.
#[inline]
pub fn row_scale(grid_y: u32, grid_size: u32, perspective: f64) -> f64 {
    let depth = 1.0 - grid_y as f64 / grid_size as f64;
    1.0 - depth * perspective
}

/// Upward push for a point at squared distance `dist_sq` from the pointer.
/// Zero at and beyond the ripple radius, linear falloff inside.
#[inline]
pub fn ripple_lift(dist_sq: f64, radius: f64, force: f64) -> f64 {
    if dist_sq < radius * radius {
        let d = dist_sq.sqrt();
        (1.0 - d / radius) * force
    } else {
        0.0
    }
}

pub fn solve(p: &Point, f: &FrameParams, cfg: &WaveConfig) -> Placement {
    let g = f.grid_size as f64;
    let gx = p.grid_x as f64;
    let gy = p.grid_y as f64;

    let scale = row_scale(p.grid_y, f.grid_size, cfg.perspective_factor);
    let radius = p.base_radius * scale;

    let turbulence = (f.time * cfg.turbulence_speed + p.wobble).sin() * cfg.turbulence_amplitude * scale;
    let wave_y = ((gx + gy) * 0.5 + f.time * cfg.wave_speed).sin() * cfg.wave_amplitude * scale + turbulence;

    let x = f.center_x + (gx - g / 2.0) * (f.width / g) * scale * cfg.coverage_factor;
    let mut y = f.center_y + (gy - g / 2.0) * (f.height / g) * scale * cfg.coverage_factor + wave_y;

    y -= ripple_lift(f.pointer.dist_sq(x, y), cfg.ripple_radius, cfg.ripple_force);

    Placement { x, y, radius, wave_y, scale }
}

/// Solve every point into `out`, reusing its allocation.
pub fn solve_all(points: &[Point], f: &FrameParams, cfg: &WaveConfig, out: &mut Vec<Placement>) {
    out.clear();
    out.extend(points.iter().map(|p| solve(p, f, cfg)));
}
