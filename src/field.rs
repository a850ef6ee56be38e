// field.rs - The wave field: grid lifecycle + frame loop + drawing
//
// Owns the lattice and the loop state. Per tick it solves every point
// once, then draws edges and dots from those placements.

use crate::config::{Profile, WaveConfig};
use crate::error::EngineError;
use crate::frame::{FrameHandle, FrameLoop, Scheduler};
use crate::grid::{select_grid_size, select_profile, Grid};
use crate::pointer::Pointer;
use crate::render::{draw_frame, FrameStats, Surface, Theme};
use crate::solver::{solve_all, FrameParams, Placement};
use crate::viewport::Viewport;

pub struct WaveField {
    config: WaveConfig,
    viewport: Viewport,
    profile: Profile,
    grid: Grid,
    frames: FrameLoop,
    rng: u32,

    // Per-frame scratch, reused across ticks
    placements: Vec<Placement>,
    order: Vec<usize>,
}

impl WaveField {
    pub fn new(config: WaveConfig, viewport: Viewport, seed: u32) -> Self {
        let mut rng = seed;
        let profile = select_profile(viewport.width, &config.breakpoint);
        let grid = Grid::build(profile.grid_size, config.base_radius, config.wobble_range, &mut rng);
        Self {
            config,
            viewport,
            profile,
            grid,
            frames: FrameLoop::new(),
            rng,
            placements: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn config(&self) -> &WaveConfig { &self.config }
    pub fn viewport(&self) -> Viewport { self.viewport }
    pub fn profile(&self) -> Profile { self.profile }
    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn frames(&self) -> &FrameLoop { &self.frames }

    /// Placements from the last drawn frame.
    pub fn placements(&self) -> &[Placement] { &self.placements }

    /// Replace the grid, e.g. with fixed wobble offsets. Rebuilt again on
    /// the next frame if it doesn't match the active profile.
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// Cancel, resize, rebuild, and start again from t = 0.
    pub fn restart<Sc, Su, Th>(
        &mut self,
        viewport: Viewport,
        now: f64,
        pointer: Pointer,
        scheduler: &mut Sc,
        surface: &mut Su,
        theme: &Th,
    ) -> Result<FrameStats, EngineError>
    where
        Sc: Scheduler + ?Sized,
        Su: Surface + ?Sized,
        Th: Theme + ?Sized,
    {
        self.frames.cancel(scheduler);

        self.viewport = viewport;
        surface.resize(viewport.width, viewport.height);
        self.rebuild();

        self.frames.start(now, scheduler)?;
        log::debug!(
            "wave field restarted: {}x{} grid {}",
            viewport.width,
            viewport.height,
            self.profile.grid_size
        );
        Ok(self.draw(0.0, pointer, surface, theme))
    }

    /// A scheduled frame fired. Draws and schedules the next one; stale
    /// handles are ignored.
    pub fn on_frame<Sc, Su, Th>(
        &mut self,
        handle: FrameHandle,
        now: f64,
        pointer: Pointer,
        scheduler: &mut Sc,
        surface: &mut Su,
        theme: &Th,
    ) -> Result<Option<FrameStats>, EngineError>
    where
        Sc: Scheduler + ?Sized,
        Su: Surface + ?Sized,
        Th: Theme + ?Sized,
    {
        let Some(t) = self.frames.fire(handle, now) else {
            return Ok(None);
        };
        let stats = self.draw(t, pointer, surface, theme);
        self.frames.schedule_next(scheduler)?;
        Ok(Some(stats))
    }

    pub fn stop<Sc: Scheduler + ?Sized>(&mut self, scheduler: &mut Sc) {
        self.frames.cancel(scheduler);
    }

    /// One tick at clock time `t`, no scheduling.
    pub fn draw<Su, Th>(&mut self, t: f64, pointer: Pointer, surface: &mut Su, theme: &Th) -> FrameStats
    where
        Su: Surface + ?Sized,
        Th: Theme + ?Sized,
    {
        self.ensure_grid();

        let frame = FrameParams::new(self.viewport.width, self.viewport.height, t, pointer, self.grid.size());
        solve_all(self.grid.points(), &frame, &self.config, &mut self.placements);

        draw_frame(
            surface,
            theme,
            &self.grid,
            &self.placements,
            &mut self.order,
            self.profile.blur_factor,
            &self.config,
        )
    }

    /// Rebuild if the viewport class flipped or the point count drifted.
    fn ensure_grid(&mut self) -> bool {
        let profile = select_profile(self.viewport.width, &self.config.breakpoint);
        let size = select_grid_size(self.viewport.width, &self.config.breakpoint);
        if profile == self.profile && self.grid.size() == size && self.grid.is_consistent() {
            return false;
        }
        log::debug!(
            "grid out of date ({} points for size {}), rebuilding",
            self.grid.len(),
            profile.grid_size
        );
        self.rebuild();
        true
    }

    fn rebuild(&mut self) {
        self.profile = select_profile(self.viewport.width, &self.config.breakpoint);
        self.grid = Grid::build(
            self.profile.grid_size,
            self.config.base_radius,
            self.config.wobble_range,
            &mut self.rng,
        );
        self.placements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ManualScheduler;
    use crate::grid::Point;
    use crate::render::{CommandBuffer, StaticTheme};
    use std::cell::RefCell;
    use std::sync::Once;

    thread_local! {
        static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    struct Capture;

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata) -> bool { true }

        fn log(&self, record: &log::Record) {
            RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture;
    static INSTALL: Once = Once::new();

    fn capture_logs() {
        INSTALL.call_once(|| {
            if log::set_logger(&CAPTURE).is_ok() {
                log::set_max_level(log::LevelFilter::Trace);
            }
        });
        RECORDS.with(|r| r.borrow_mut().clear());
    }

    #[test]
    fn new_field_is_stopped_with_matching_grid() {
        let field = WaveField::new(WaveConfig::default(), Viewport::new(1280, 720), 1);
        assert!(!field.frames().is_running());
        assert_eq!(field.grid().len(), 900);
    }

    #[test]
    fn drifted_grid_heals_on_next_draw() {
        let mut field = WaveField::new(WaveConfig::default(), Viewport::new(1280, 720), 1);
        let points: Vec<Point> = (0..10).map(|i| Point::new(i, 0, 1.5, 0.0)).collect();
        field.set_grid(Grid::from_points(30, points));

        let mut buf = CommandBuffer::new(1280, 720);
        field.draw(0.0, Pointer::ABSENT, &mut buf, &StaticTheme::default());
        assert_eq!(field.grid().len(), 900);
        assert_eq!(field.placements().len(), 900);
    }

    #[test]
    fn unvalidated_oversized_profile_builds_once() {
        let mut config = WaveConfig::default();
        config.breakpoint.wide.grid_size = 70_000;
        let mut field = WaveField::new(config, Viewport::new(1280, 800), 1);
        assert_eq!(field.grid().size(), crate::config::MAX_GRID_SIZE);
        assert!(!field.ensure_grid());
    }

    #[test]
    fn draws_every_visible_point_once() {
        let mut field = WaveField::new(WaveConfig::default(), Viewport::new(1280, 720), 5);
        let mut buf = CommandBuffer::new(1280, 720);
        let stats = field.draw(250.0, Pointer::ABSENT, &mut buf, &StaticTheme::default());
        // Smallest radius is 1.5 * 0.35, well above the cutoff.
        assert_eq!(stats.points, 900);
        assert_eq!(buf.circles(), 900);
        assert_eq!(buf.lines(), stats.edges);
    }

    #[test]
    fn restart_renders_immediately_at_time_zero() {
        let mut field = WaveField::new(WaveConfig::default(), Viewport::new(1280, 720), 5);
        let mut s = ManualScheduler::new();
        let mut buf = CommandBuffer::new(1, 1);
        let theme = StaticTheme::default();
        field.restart(Viewport::new(1024, 768), 4000.0, Pointer::ABSENT, &mut s, &mut buf, &theme).unwrap();

        assert!(field.frames().is_running());
        assert!(s.pending().is_some());
        assert_eq!(buf.ops()[0], crate::render::DrawOp::Clear { width: 1024, height: 768 });

        let mut reference = WaveField::new(WaveConfig::default(), Viewport::new(1024, 768), 1);
        reference.set_grid(field.grid().clone());
        let mut other = CommandBuffer::new(1024, 768);
        reference.draw(0.0, Pointer::ABSENT, &mut other, &theme);
        assert_eq!(field.placements(), reference.placements());
    }

    #[test]
    fn restarts_stay_below_info() {
        capture_logs();
        let mut field = WaveField::new(WaveConfig::default(), Viewport::new(1280, 720), 5);
        let mut s = ManualScheduler::new();
        let mut buf = CommandBuffer::new(1280, 720);
        let theme = StaticTheme::default();
        for w in [1280, 1100, 700] {
            field.restart(Viewport::new(w, 720), 0.0, Pointer::ABSENT, &mut s, &mut buf, &theme).unwrap();
        }

        let records = RECORDS.with(|r| r.borrow().clone());
        assert!(records.iter().any(|(_, msg)| msg.starts_with("wave field restarted")));
        assert!(records.iter().all(|(level, _)| *level >= log::Level::Debug), "{records:?}");
    }

    #[test]
    fn stale_frame_draws_nothing() {
        let mut field = WaveField::new(WaveConfig::default(), Viewport::new(1280, 720), 5);
        let mut s = ManualScheduler::new();
        let mut buf = CommandBuffer::new(1280, 720);
        let theme = StaticTheme::default();
        field.restart(Viewport::new(1280, 720), 0.0, Pointer::ABSENT, &mut s, &mut buf, &theme).unwrap();
        let h = s.take().unwrap();
        field.stop(&mut s);
        let out = field.on_frame(h, 16.0, Pointer::ABSENT, &mut s, &mut buf, &theme).unwrap();
        assert!(out.is_none());
        assert!(s.pending().is_none());
    }
}
