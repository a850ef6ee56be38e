// theme.rs - Colour lookup by property name

use std::collections::HashMap;

/// Resolves a named colour (e.g. a CSS custom property) to a colour value.
/// Called every frame, so implementations must not hold stale values.
pub trait Theme {
    fn resolve_color(&self, name: &str) -> String;
}

const FALLBACK: &str = "#ffffff";

/// Fixed name -> colour table. Used when no stylesheet is available.
#[derive(Debug, Clone)]
pub struct StaticTheme {
    colors: HashMap<String, String>,
}

impl Default for StaticTheme {
    fn default() -> Self {
        let mut t = Self { colors: HashMap::new() };
        t.set("--wave-dot-color", "#00ffcc");
        t.set("--wave-shadow-color", "rgba(0, 255, 204, 0.8)");
        t.set("--wave-line-color", "rgba(0, 255, 204, 0.35)");
        t
    }
}

impl StaticTheme {
    pub fn set(&mut self, name: &str, value: &str) {
        self.colors.insert(name.to_string(), value.trim().to_string());
    }
}

impl Theme for StaticTheme {
    fn resolve_color(&self, name: &str) -> String {
        self.colors.get(name).cloned().unwrap_or_else(|| FALLBACK.to_string())
    }
}
