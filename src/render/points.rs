// points.rs - Filled dots with wave-driven glow

use super::Surface;
use crate::solver::Placement;

/// Dots shrunk below this by perspective are not drawn.
pub const MIN_RADIUS: f64 = 0.1;

/// Glow grows with the local wave height and shrinks with distance.
#[inline]
pub fn glow_radius(p: &Placement, blur_factor: f64, amplitude: f64) -> f64 {
    let wave_height = p.wave_y.abs() / amplitude;
    p.radius * blur_factor * wave_height * p.scale
}

/// Draw one dot. Returns false if it was too small to draw.
pub fn draw_point<S: Surface + ?Sized>(
    surface: &mut S,
    p: &Placement,
    blur_factor: f64,
    amplitude: f64,
    dot: &str,
    shadow: &str,
) -> bool {
    if p.radius < MIN_RADIUS { return false; }

    surface.set_alpha(p.scale * 0.9);
    surface.set_glow(glow_radius(p, blur_factor, amplitude), shadow);
    surface.fill_circle(p.x, p.y, p.radius, dot);
    surface.reset();
    true
}
