// edges.rs - Mesh lines between right/bottom neighbours

use super::Surface;
use crate::config::WaveConfig;
use crate::grid::Grid;
use crate::solver::Placement;

/// Opacity for an edge of screen length `dist` between rows `ya` and `yb`.
/// None when the edge is too long to draw (boundary excluded).
#[inline]
pub fn edge_alpha(dist: f64, max_dist: f64, ya: u32, yb: u32, grid_size: u32) -> Option<f64> {
    if !(dist < max_dist) { return None; }
    let g = grid_size as f64;
    let row_factor = (ya as f64 / g + yb as f64 / g) / 2.0;
    Some((1.0 - dist / max_dist) * row_factor * 0.7)
}

/// Draw every short-enough neighbour edge. Returns how many were drawn.
pub fn draw_edges<S: Surface + ?Sized>(
    surface: &mut S,
    grid: &Grid,
    placements: &[Placement],
    color: &str,
    cfg: &WaveConfig,
) -> usize {
    surface.set_stroke(color, cfg.line_width);

    let n = grid.len().min(placements.len());
    let mut drawn = 0;
    for i in 0..n {
        for j in [grid.right_of(i), grid.below(i)].into_iter().flatten() {
            if j < n && connect(surface, grid, placements, i, j, cfg) {
                drawn += 1;
            }
        }
    }
    drawn
}

fn connect<S: Surface + ?Sized>(
    surface: &mut S,
    grid: &Grid,
    placements: &[Placement],
    i: usize,
    j: usize,
    cfg: &WaveConfig,
) -> bool {
    let (a, b) = (&placements[i], &placements[j]);
    let dist = (a.x - b.x).hypot(a.y - b.y);
    let points = grid.points();

    let Some(alpha) = edge_alpha(dist, cfg.line_max_distance, points[i].grid_y, points[j].grid_y, grid.size())
    else {
        return false;
    };

    surface.set_alpha(alpha);
    surface.stroke_line(a.x, a.y, b.x, b.y);
    surface.set_alpha(1.0);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Point;
    use crate::render::{CommandBuffer, DrawOp};
    use rstest::rstest;

    #[rstest]
    #[case(0.0, true)]
    #[case(149.999, true)]
    #[case(150.0, false)]
    #[case(150.001, false)]
    #[case(f64::NAN, false)]
    fn boundary_excluded(#[case] dist: f64, #[case] drawn: bool) {
        assert_eq!(edge_alpha(dist, 150.0, 10, 11, 30).is_some(), drawn);
    }

    #[rstest]
    #[case(75.0, 15, 15, 0.5 * 0.5 * 0.7)]
    #[case(0.0, 30, 30, 0.7)]
    #[case(50.0, 6, 9, (2.0 / 3.0) * 0.25 * 0.7)]
    #[case(120.0, 29, 30, 0.2 * (59.0 / 60.0) * 0.7)]
    fn alpha_follows_distance_and_row_depth(
        #[case] dist: f64,
        #[case] ya: u32,
        #[case] yb: u32,
        #[case] expected: f64,
    ) {
        let alpha = edge_alpha(dist, 150.0, ya, yb, 30).unwrap();
        assert!((alpha - expected).abs() < 1e-12, "{alpha} != {expected}");
    }

    #[test]
    fn far_rows_are_fainter() {
        let near = edge_alpha(50.0, 150.0, 28, 29, 30).unwrap();
        let far = edge_alpha(50.0, 150.0, 1, 2, 30).unwrap();
        assert!(far < near);
        assert_eq!(edge_alpha(0.0, 150.0, 0, 0, 30), Some(0.0));
    }

    fn lattice(size: u32, spacing: f64) -> (Grid, Vec<Placement>) {
        let points: Vec<Point> = (0..size * size).map(|i| Point::new(i % size, i / size, 1.5, 0.0)).collect();
        let placements = points
            .iter()
            .map(|p| Placement {
                x: p.grid_x as f64 * spacing,
                y: p.grid_y as f64 * spacing,
                radius: 1.0,
                wave_y: 0.0,
                scale: 1.0,
            })
            .collect();
        (Grid::from_points(size, points), placements)
    }

    #[test]
    fn full_mesh_when_close() {
        let (grid, placements) = lattice(4, 10.0);
        let mut buf = CommandBuffer::new(100, 100);
        let drawn = draw_edges(&mut buf, &grid, &placements, "#fff", &WaveConfig::default());
        // 2 * g * (g - 1) edges in a g x g lattice.
        assert_eq!(drawn, 24);
        let lines = buf.ops().iter().filter(|op| matches!(op, DrawOp::Line { .. })).count();
        assert_eq!(lines, 24);
    }

    #[test]
    fn nothing_when_spread_out() {
        let (grid, placements) = lattice(4, 150.0);
        let mut buf = CommandBuffer::new(100, 100);
        assert_eq!(draw_edges(&mut buf, &grid, &placements, "#fff", &WaveConfig::default()), 0);
    }

    #[test]
    fn short_placements_are_skipped() {
        let (grid, mut placements) = lattice(4, 10.0);
        placements.truncate(5);
        let mut buf = CommandBuffer::new(100, 100);
        // Only edges among the first five points: 0-1, 1-2, 2-3, 0-4.
        assert_eq!(draw_edges(&mut buf, &grid, &placements, "#fff", &WaveConfig::default()), 4);
    }

    #[test]
    fn alpha_restored_after_each_line() {
        let (grid, placements) = lattice(2, 10.0);
        let mut buf = CommandBuffer::new(100, 100);
        draw_edges(&mut buf, &grid, &placements, "#fff", &WaveConfig::default());
        let ops = buf.ops();
        for (k, op) in ops.iter().enumerate() {
            if matches!(op, DrawOp::Line { .. }) {
                assert!(matches!(ops[k + 1], DrawOp::Alpha(a) if a == 1.0));
            }
        }
    }
}
