use crate::glider::MIN_SPAWN_MARGIN;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// All simulation settings consolidated into one struct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeSettings {
    // === Geometry ===
    /// Canvas dots per cell side (1, 2, 4 or 8)
    pub cell_size: usize,
    /// Hidden cells around the viewport on every side (6-40)
    pub margin: usize,

    // === Population ===
    /// Probability a cell starts alive when randomizing (0.05-0.9)
    pub density: f64,

    // === Timing ===
    /// Milliseconds between generations (20-2000)
    pub step_interval_ms: u64,
    /// Inject gliders from the viewport edges
    pub glider_spawning: bool,
    /// Seconds between glider spawns (1-60)
    pub glider_interval_secs: u64,
    /// Seconds from startup until the first glider (0-60)
    pub first_glider_delay_secs: u64,
    /// Seconds the timer holds after a click so more cells can be toggled (0-10)
    pub click_cooldown_secs: u64,
}

impl Default for LifeSettings {
    fn default() -> Self {
        Self {
            cell_size: 4,
            margin: 10,
            density: 0.3,
            step_interval_ms: 200,
            glider_spawning: true,
            glider_interval_secs: 5,
            first_glider_delay_secs: 2,
            click_cooldown_secs: 2,
        }
    }
}

impl LifeSettings {
    /// Settings without glider injection: sparser fill, faster clock
    pub fn calm() -> Self {
        Self {
            density: 0.2,
            step_interval_ms: 100,
            glider_spawning: false,
            ..Self::default()
        }
    }

    /// Clamp every field into its supported range
    pub fn sanitized(mut self) -> Self {
        // Powers of two keep cell and character boundaries aligned (2x4 dots per character)
        self.cell_size = 1 << self.cell_size.clamp(1, 8).ilog2();
        self.margin = self.margin.clamp(MIN_SPAWN_MARGIN, 40);
        self.density = self.density.clamp(0.05, 0.9);
        self.step_interval_ms = self.step_interval_ms.clamp(20, 2000);
        self.glider_interval_secs = self.glider_interval_secs.clamp(1, 60);
        self.first_glider_delay_secs = self.first_glider_delay_secs.min(60);
        self.click_cooldown_secs = self.click_cooldown_secs.min(10);
        self
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn glider_interval(&self) -> Duration {
        Duration::from_secs(self.glider_interval_secs)
    }

    pub fn first_glider_delay(&self) -> Duration {
        Duration::from_secs(self.first_glider_delay_secs)
    }

    pub fn click_cooldown(&self) -> Duration {
        Duration::from_secs(self.click_cooldown_secs)
    }

    /// Adjust step interval within bounds
    pub fn adjust_step_interval(&mut self, delta_ms: i64) {
        self.step_interval_ms = (self.step_interval_ms as i64 + delta_ms).clamp(20, 2000) as u64;
    }

    /// Adjust random-fill density within bounds
    pub fn adjust_density(&mut self, delta: f64) {
        self.density = ((self.density + delta).clamp(0.05, 0.9) * 100.0).round() / 100.0;
    }

    /// Adjust glider spawn interval within bounds
    pub fn adjust_glider_interval(&mut self, delta: i64) {
        self.glider_interval_secs = (self.glider_interval_secs as i64 + delta).clamp(1, 60) as u64;
    }

    /// Adjust click cooldown within bounds
    pub fn adjust_click_cooldown(&mut self, delta: i64) {
        self.click_cooldown_secs = (self.click_cooldown_secs as i64 + delta).clamp(0, 10) as u64;
    }

    /// Toggle glider spawning on/off
    pub fn toggle_glider_spawning(&mut self) {
        self.glider_spawning = !self.glider_spawning;
    }
}
