use wave_engine::config::WaveConfig;
use wave_engine::field::WaveField;
use wave_engine::frame::ManualScheduler;
use wave_engine::grid::{Grid, Point};
use wave_engine::pointer::Pointer;
use wave_engine::render::{CommandBuffer, DrawOp, StaticTheme};
use wave_engine::solver::{solve, FrameParams};
use wave_engine::viewport::Viewport;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn golden_corner_positions() {
    let cfg = WaveConfig::default();
    let frame = FrameParams::new(800, 600, 0.0, Pointer::ABSENT, 30);

    let top_left = solve(&Point::new(0, 0, 1.5, 0.0), &frame, &cfg);
    assert!(close(top_left.x, 176.0));
    assert!(close(top_left.y, 132.0));
    assert!(close(top_left.radius, 0.525));
    assert!(close(top_left.scale, 0.35));
    assert!(close(top_left.wave_y, 0.0));

    let bottom_right = solve(&Point::new(29, 29, 1.5, 0.0), &frame, &cfg);
    assert!(close(bottom_right.x, 984.391_111_111_111_3));
    assert!(close(bottom_right.y, 725.308_230_332_232_9));
    assert!(close(bottom_right.radius, 1.4675));
    assert!(close(bottom_right.wave_y, -12.985_103_001_100_399));
}

#[test]
fn resize_wide_to_narrow_rebuilds_before_next_tick() {
    let theme = StaticTheme::default();
    let mut s = ManualScheduler::new();
    let mut buf = CommandBuffer::new(1280, 800);
    let mut field = WaveField::new(WaveConfig::default(), Viewport::new(1280, 800), 42);

    field.restart(Viewport::new(1280, 800), 0.0, Pointer::ABSENT, &mut s, &mut buf, &theme).unwrap();
    assert_eq!(field.grid().len(), 900);
    let stale = s.pending().unwrap();

    field.restart(Viewport::new(600, 800), 2000.0, Pointer::ABSENT, &mut s, &mut buf, &theme).unwrap();
    assert_eq!(field.grid().size(), 15);
    assert_eq!(field.grid().len(), 225);
    assert_eq!(field.placements().len(), 225);
    assert_eq!(s.last_cancelled(), Some(stale));
    assert_eq!(buf.circles(), 225);

    // The cancelled frame must not render against the new grid.
    assert_eq!(field.on_frame(stale, 2016.0, Pointer::ABSENT, &mut s, &mut buf, &theme).unwrap(), None);

    let next = s.take().unwrap();
    let stats = field.on_frame(next, 2016.0, Pointer::ABSENT, &mut s, &mut buf, &theme).unwrap().unwrap();
    assert_eq!(stats.points, 225);
}

#[test]
fn narrow_profile_uses_weaker_glow() {
    let theme = StaticTheme::default();
    let cfg = WaveConfig::default();

    let mut wide = WaveField::new(cfg.clone(), Viewport::new(1280, 800), 1);
    let mut narrow = WaveField::new(cfg, Viewport::new(700, 800), 1);
    assert_eq!(wide.profile().blur_factor, 7.0);
    assert_eq!(narrow.profile().blur_factor, 3.0);

    let mut a = CommandBuffer::new(1280, 800);
    let mut b = CommandBuffer::new(700, 800);
    wide.draw(300.0, Pointer::ABSENT, &mut a, &theme);
    narrow.draw(300.0, Pointer::ABSENT, &mut b, &theme);
    assert_eq!(a.circles(), 900);
    assert_eq!(b.circles(), 225);
}

#[test]
fn points_drawn_far_rows_first() {
    let theme = StaticTheme::default();
    let mut field = WaveField::new(WaveConfig::default(), Viewport::new(1280, 800), 9);
    let mut buf = CommandBuffer::new(1280, 800);
    field.draw(1234.0, Pointer::ABSENT, &mut buf, &theme);

    // Circle radii grow with the row, so draw order must be non-decreasing in radius.
    let radii: Vec<f64> = buf
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Circle { r, .. } => Some(*r),
            _ => None,
        })
        .collect();
    assert_eq!(radii.len(), 900);
    assert!(radii.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn edges_are_drawn_before_points() {
    let theme = StaticTheme::default();
    let mut field = WaveField::new(WaveConfig::default(), Viewport::new(1280, 800), 9);
    let mut buf = CommandBuffer::new(1280, 800);
    field.draw(0.0, Pointer::ABSENT, &mut buf, &theme);

    let ops = buf.ops();
    let last_line = ops.iter().rposition(|op| matches!(op, DrawOp::Line { .. })).unwrap();
    let first_circle = ops.iter().position(|op| matches!(op, DrawOp::Circle { .. })).unwrap();
    assert!(last_line < first_circle);
}

#[test]
fn pointer_lifts_only_nearby_points() {
    let theme = StaticTheme::default();
    let cfg = WaveConfig::default();
    let points: Vec<Point> = (0..900).map(|i| Point::new(i % 30, i / 30, 1.5, 0.0)).collect();

    let mut still = WaveField::new(cfg.clone(), Viewport::new(800, 600), 1);
    still.set_grid(Grid::from_points(30, points.clone()));
    let mut buf = CommandBuffer::new(800, 600);
    still.draw(0.0, Pointer::ABSENT, &mut buf, &theme);
    let rest = still.placements().to_vec();

    // Centre point (15, 15) sits at x = 400.
    let target = rest[15 * 30 + 15];
    let mut poked = WaveField::new(cfg.clone(), Viewport::new(800, 600), 1);
    poked.set_grid(Grid::from_points(30, points));
    poked.draw(0.0, Pointer::new(target.x, target.y), &mut buf, &theme);

    for (before, after) in rest.iter().zip(poked.placements()) {
        assert_eq!(before.x, after.x);
        let d2 = (before.x - target.x).powi(2) + (before.y - target.y).powi(2);
        if d2 >= cfg.ripple_radius * cfg.ripple_radius {
            assert_eq!(before.y, after.y);
        } else {
            assert!(after.y < before.y);
        }
    }
}

#[test]
fn tiny_perspective_points_are_skipped() {
    let theme = StaticTheme::default();
    let mut cfg = WaveConfig::default();
    // Top row radius = 0.15 * (1 - 0.9) = 0.015, below the cutoff.
    cfg.base_radius = 0.15;
    cfg.perspective_factor = 0.9;
    let mut field = WaveField::new(cfg, Viewport::new(1280, 800), 3);
    let mut buf = CommandBuffer::new(1280, 800);
    let stats = field.draw(0.0, Pointer::ABSENT, &mut buf, &theme);

    let visible = field.placements().iter().filter(|p| p.radius >= 0.1).count();
    assert!(visible < 900);
    assert_eq!(stats.points, visible);
    assert_eq!(buf.circles(), visible);
}
