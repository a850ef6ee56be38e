// render/ - Draw a solved frame
//
// Backend-agnostic: anything implementing Surface can be drawn to. The
// browser canvas lives in web.rs; CommandBuffer records into a flat
// buffer for JS-driven playback and for tests.

mod edges;
mod encoder;
mod points;
mod theme;

pub use edges::{draw_edges, edge_alpha};
pub use encoder::{CommandBuffer, DrawOp};
pub use points::{draw_point, glow_radius, MIN_RADIUS};
pub use theme::{StaticTheme, Theme};

use crate::config::WaveConfig;
use crate::grid::Grid;
use crate::solver::Placement;

/// Minimal 2D drawing API, shaped after CanvasRenderingContext2d.
pub trait Surface {
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    fn set_alpha(&mut self, alpha: f64);
    fn set_glow(&mut self, blur: f64, color: &str);
    fn set_stroke(&mut self, color: &str, width: f64);
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: &str);
    /// Back to neutral: alpha 1, no glow.
    fn reset(&mut self);
}

/// Colours for one frame. Resolved at the start of every frame, never kept.
#[derive(Debug, Clone)]
pub struct Palette {
    pub dot: String,
    pub shadow: String,
    pub line: String,
}

impl Palette {
    pub fn resolve<T: Theme + ?Sized>(theme: &T, cfg: &WaveConfig) -> Self {
        Self {
            dot: theme.resolve_color(&cfg.colors.dot),
            shadow: theme.resolve_color(&cfg.colors.shadow),
            line: theme.resolve_color(&cfg.colors.line),
        }
    }
}

/// Stats for one drawn frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub edges: usize,
    pub points: usize,
}

/// Clear, draw edges, then points in painter's order (far rows first).
pub fn draw_frame<S, T>(
    surface: &mut S,
    theme: &T,
    grid: &Grid,
    placements: &[Placement],
    order: &mut Vec<usize>,
    blur_factor: f64,
    cfg: &WaveConfig,
) -> FrameStats
where
    S: Surface + ?Sized,
    T: Theme + ?Sized,
{
    surface.clear();
    let palette = Palette::resolve(theme, cfg);

    let points = grid.points();
    let n = points.len().min(placements.len());

    order.clear();
    order.extend(0..n);
    order.sort_by_key(|&i| points[i].grid_y);

    let edges = draw_edges(surface, grid, placements, &palette.line, cfg);

    let mut drawn = 0;
    for &i in order.iter() {
        if draw_point(surface, &placements[i], blur_factor, cfg.wave_amplitude, &palette.dot, &palette.shadow) {
            drawn += 1;
        }
    }

    FrameStats { edges, points: drawn }
}
