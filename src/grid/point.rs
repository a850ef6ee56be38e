// point.rs - One lattice cell
//
// Plain data. Screen position is derived every frame by the solver and
// never stored here.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub grid_x: u32,
    pub grid_y: u32,
    pub base_radius: f64,
    /// Phase offset so neighbouring points don't jitter in lockstep.
    pub wobble: f64,
}

impl Point {
    pub const fn new(grid_x: u32, grid_y: u32, base_radius: f64, wobble: f64) -> Self {
        Self { grid_x, grid_y, base_radius, wobble }
    }
}
