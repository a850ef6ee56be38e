// config.rs - Tunable wave field parameters
//
// Defaults reproduce the reference look. JS may pass a partial JSON
// object; missing keys fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Viewport widths at or below this are "narrow".
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Largest accepted lattice side; size² must fit comfortably in a frame.
pub const MAX_GRID_SIZE: u32 = 1024;

/// Grid density and glow fidelity for one viewport class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub grid_size: u32,
    pub blur_factor: f64,
}

impl Profile {
    pub const NARROW: Profile = Profile { grid_size: 15, blur_factor: 3.0 };
    pub const WIDE: Profile = Profile { grid_size: 30, blur_factor: 7.0 };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoint {
    pub width: u32,
    pub narrow: Profile,
    pub wide: Profile,
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self {
            width: MOBILE_BREAKPOINT,
            narrow: Profile::NARROW,
            wide: Profile::WIDE,
        }
    }
}

impl Breakpoint {
    #[inline]
    pub fn is_narrow(&self, viewport_width: u32) -> bool {
        viewport_width <= self.width
    }
}

/// Theme property names resolved on every draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorNames {
    pub dot: String,
    pub shadow: String,
    pub line: String,
}

impl Default for ColorNames {
    fn default() -> Self {
        Self {
            dot: "--wave-dot-color".into(),
            shadow: "--wave-shadow-color".into(),
            line: "--wave-line-color".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub wave_amplitude: f64,
    pub wave_speed: f64,
    /// How strongly far rows shrink (0 = flat, 1 = vanish at the top row).
    pub perspective_factor: f64,
    /// Overscan so shrunk far rows still fill the frame.
    pub coverage_factor: f64,
    pub line_max_distance: f64,
    pub line_width: f64,
    pub ripple_radius: f64,
    pub ripple_force: f64,
    pub base_radius: f64,
    pub turbulence_amplitude: f64,
    pub turbulence_speed: f64,
    /// Wobble phase offsets are drawn from [0, wobble_range).
    pub wobble_range: f64,
    pub breakpoint: Breakpoint,
    pub colors: ColorNames,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            wave_amplitude: 20.0,
            wave_speed: 0.005,
            perspective_factor: 0.65,
            coverage_factor: 1.6,
            line_max_distance: 150.0,
            line_width: 1.0,
            ripple_radius: 100.0,
            ripple_force: 30.0,
            base_radius: 1.5,
            turbulence_amplitude: 2.0,
            turbulence_speed: 0.01,
            wobble_range: 20.0,
            breakpoint: Breakpoint::default(),
            colors: ColorNames::default(),
        }
    }
}

impl WaveConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: WaveConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let finite = [
            ("wave_amplitude", self.wave_amplitude),
            ("wave_speed", self.wave_speed),
            ("perspective_factor", self.perspective_factor),
            ("coverage_factor", self.coverage_factor),
            ("turbulence_amplitude", self.turbulence_amplitude),
            ("turbulence_speed", self.turbulence_speed),
            ("ripple_force", self.ripple_force),
            ("narrow.blur_factor", self.breakpoint.narrow.blur_factor),
            ("wide.blur_factor", self.breakpoint.wide.blur_factor),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(EngineError::InvalidConfig(format!("{name} must be finite")));
            }
        }

        let positive = [
            ("wave_amplitude", self.wave_amplitude),
            ("line_max_distance", self.line_max_distance),
            ("line_width", self.line_width),
            ("ripple_radius", self.ripple_radius),
            ("base_radius", self.base_radius),
            ("wobble_range", self.wobble_range),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(EngineError::InvalidConfig(format!("{name} must be positive, got {v}")));
            }
        }

        for (name, p) in [("narrow", &self.breakpoint.narrow), ("wide", &self.breakpoint.wide)] {
            if p.grid_size == 0 || p.grid_size > MAX_GRID_SIZE {
                return Err(EngineError::InvalidConfig(format!(
                    "{name}.grid_size must be in 1..={MAX_GRID_SIZE}, got {}",
                    p.grid_size
                )));
            }
        }
        Ok(())
    }
}
