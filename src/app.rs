use crate::braille;
use crate::color::ColorScheme;
use crate::config::AppConfig;
use crate::presets::PresetManager;
use crate::settings::LifeSettings;
use crate::simulation::LifeSimulation;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How long a status message stays in the sidebar
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Focus state for parameter editing in the sidebar
/// Ordered as shown in the parameters box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    #[default]
    None,
    // Parameters box order
    ColorScheme,
    Cooldown,
    Density,
    Gliders,
    GliderInterval,
    Interval,
    // Controls box (not a param)
    Controls,
}

impl Focus {
    /// Tab cycles through parameters in display order
    pub fn next(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::ColorScheme,
            Focus::ColorScheme => Focus::Cooldown,
            Focus::Cooldown => Focus::Density,
            Focus::Density => Focus::Gliders,
            Focus::Gliders => Focus::GliderInterval,
            Focus::GliderInterval => Focus::Interval,
            Focus::Interval => Focus::ColorScheme, // Loop back
        }
    }

    /// Shift+Tab cycles through parameters in reverse display order
    pub fn prev(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Interval,
            Focus::ColorScheme => Focus::Interval, // Loop back
            Focus::Cooldown => Focus::ColorScheme,
            Focus::Density => Focus::Cooldown,
            Focus::Gliders => Focus::Density,
            Focus::GliderInterval => Focus::Gliders,
            Focus::Interval => Focus::GliderInterval,
        }
    }

    /// Get the line index in the parameters box for this focus
    pub fn line_index(&self) -> u16 {
        match self {
            Focus::None | Focus::Controls => 0,
            Focus::ColorScheme => 0,
            Focus::Cooldown => 1,
            Focus::Density => 2,
            Focus::Gliders => 3,
            Focus::GliderInterval => 4,
            Focus::Interval => 5,
        }
    }

    /// Check if focus is on a parameter (not Controls or None)
    pub fn is_param(&self) -> bool {
        !matches!(self, Focus::None | Focus::Controls)
    }
}

/// Main application state: owns the simulation and the timer schedule around it
pub struct App {
    pub simulation: LifeSimulation,
    pub color_scheme: ColorScheme,
    pub presets: PresetManager,
    pub preset_name: String,
    pub focus: Focus,
    pub fullscreen_mode: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    pub config_path: Option<PathBuf>,
    canvas_width: u16,
    canvas_height: u16,
    last_step: Instant,
    /// Steps are suppressed until this instant after a click
    hold_until: Option<Instant>,
    next_glider_at: Instant,
    status: Option<(String, Instant)>,
}

impl App {
    pub fn new(canvas_width: u16, canvas_height: u16, settings: LifeSettings, now: Instant) -> Self {
        let (px, py) = braille::canvas_pixel_size(canvas_width, canvas_height);
        let simulation = LifeSimulation::new(px, py, settings);
        let next_glider_at = now + simulation.settings.first_glider_delay();
        Self {
            simulation,
            color_scheme: ColorScheme::default(),
            presets: PresetManager::new(),
            preset_name: String::from("custom"),
            focus: Focus::Controls,
            fullscreen_mode: false,
            show_help: false,
            help_scroll: 0,
            config_path: None,
            canvas_width,
            canvas_height,
            last_step: now,
            hold_until: None,
            next_glider_at,
            status: None,
        }
    }

    /// Timer callback: spawn a glider when due, then advance one generation
    pub fn tick(&mut self, now: Instant) {
        if self.simulation.paused {
            return;
        }
        if now.saturating_duration_since(self.last_step) < self.simulation.settings.step_interval() {
            return;
        }
        self.last_step = now;

        if let Some(until) = self.hold_until {
            if now < until {
                return;
            }
            self.hold_until = None;
        }

        if self.simulation.settings.glider_spawning && now >= self.next_glider_at {
            self.simulation.spawn_glider();
            self.next_glider_at = now + self.simulation.settings.glider_interval();
        }

        self.simulation.step();
    }

    /// True while a click cooldown is holding the timer
    pub fn is_holding(&self, now: Instant) -> bool {
        self.hold_until.is_some_and(|until| now < until)
    }

    /// Handle a left click at a canvas-relative character position
    pub fn click(&mut self, column: u16, row: u16, now: Instant) {
        if column >= self.canvas_width || row >= self.canvas_height {
            return;
        }
        let (px, py) = braille::char_to_pixel(column, row);
        self.simulation.toggle_pixels(
            px,
            py,
            braille::DOTS_X as usize,
            braille::DOTS_Y as usize,
        );
        self.hold_until = Some(now + self.simulation.settings.click_cooldown());
    }

    /// Advance exactly one generation regardless of the timer
    pub fn single_step(&mut self) {
        self.simulation.step();
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.simulation.toggle_pause();
    }

    /// Randomize the grid with the current density
    pub fn randomize(&mut self) {
        self.simulation.randomize();
    }

    /// Clear all cells
    pub fn clear(&mut self) {
        self.simulation.clear();
    }

    /// Clear everything and restart the glider schedule
    pub fn reset(&mut self, now: Instant) {
        self.simulation.reset();
        self.hold_until = None;
        self.next_glider_at = now + self.simulation.settings.first_glider_delay();
    }

    /// Resize simulation to match new canvas size
    pub fn resize(&mut self, canvas_width: u16, canvas_height: u16) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
        let (px, py) = braille::canvas_pixel_size(canvas_width, canvas_height);
        self.simulation.resize(px, py);
    }

    /// Replace simulation settings, keeping the grid for the current canvas
    pub fn apply_settings(&mut self, settings: LifeSettings) {
        let (px, py) = braille::canvas_pixel_size(self.canvas_width, self.canvas_height);
        self.simulation.apply_settings(settings, px, py);
    }

    /// Switch to the next preset in the list
    pub fn cycle_preset(&mut self, now: Instant) {
        let names = self.presets.preset_names();
        if names.is_empty() {
            return;
        }
        let current = names
            .iter()
            .position(|n| n.eq_ignore_ascii_case(&self.preset_name));
        let next = match current {
            Some(idx) => (idx + 1) % names.len(),
            None => 0,
        };
        let name = names[next].to_string();
        if let Some(preset) = self.presets.find(&name) {
            let settings = preset.settings.clone();
            log::info!("preset {}: {}", preset.name, preset.description);
            let was_spawning = self.simulation.settings.glider_spawning;
            self.apply_settings(settings);
            if !was_spawning && self.simulation.settings.glider_spawning {
                self.next_glider_at = now + self.simulation.settings.glider_interval();
            }
            self.preset_name = name;
            self.set_status(format!("Preset: {}", self.preset_name), now);
        }
    }

    /// Toggle glider injection
    pub fn toggle_gliders(&mut self, now: Instant) {
        self.simulation.settings.toggle_glider_spawning();
        if self.simulation.settings.glider_spawning {
            // Resume the cadence from now rather than spawning a backlog
            self.next_glider_at = now + self.simulation.settings.glider_interval();
        }
    }

    /// Cycle color scheme
    pub fn cycle_color_scheme(&mut self) {
        self.color_scheme = self.color_scheme.next();
    }

    /// Make steps faster
    pub fn increase_speed(&mut self) {
        self.simulation.settings.adjust_step_interval(-50);
    }

    /// Make steps slower
    pub fn decrease_speed(&mut self) {
        self.simulation.settings.adjust_step_interval(50);
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_up(&mut self, now: Instant) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::ColorScheme => self.color_scheme = self.color_scheme.next(),
            Focus::Cooldown => self.simulation.settings.adjust_click_cooldown(1),
            Focus::Density => self.simulation.settings.adjust_density(0.05),
            Focus::Gliders => self.toggle_gliders(now),
            Focus::GliderInterval => self.simulation.settings.adjust_glider_interval(1),
            Focus::Interval => self.decrease_speed(),
        }
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_down(&mut self, now: Instant) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::ColorScheme => self.color_scheme = self.color_scheme.prev(),
            Focus::Cooldown => self.simulation.settings.adjust_click_cooldown(-1),
            Focus::Density => self.simulation.settings.adjust_density(-0.05),
            Focus::Gliders => self.toggle_gliders(now),
            Focus::GliderInterval => self.simulation.settings.adjust_glider_interval(-1),
            Focus::Interval => self.increase_speed(),
        }
    }

    /// Cycle to next focus
    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Navigate to previous parameter (Shift+Tab)
    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0; // Reset scroll when opening
        }
    }

    /// Scroll help content up
    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    /// Scroll help content down
    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }

    /// Snapshot of the persisted settings
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            settings: self.simulation.settings.clone(),
            color_scheme: self.color_scheme,
            fullscreen: self.fullscreen_mode,
            ..AppConfig::default()
        }
    }

    /// Write the current settings to the config file
    pub fn save_config(&mut self, now: Instant) {
        let path = match self.config_path.clone().or_else(AppConfig::default_path) {
            Some(path) => path,
            None => {
                self.set_status("No config directory".to_string(), now);
                return;
            }
        };

        match self.to_config().save_to_file(&path) {
            Ok(()) => {
                log::info!("saved config to {}", path.display());
                self.set_status("Config saved".to_string(), now);
            }
            Err(err) => {
                log::warn!("{}", err);
                self.set_status("Config save failed".to_string(), now);
            }
        }
    }

    pub fn set_status(&mut self, message: String, now: Instant) {
        self.status = Some((message, now));
    }

    /// Current status message, if it has not expired
    pub fn status_message(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|(_, at)| now.saturating_duration_since(*at) < STATUS_MESSAGE_TTL)
            .map(|(msg, _)| msg.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn quiet_settings() -> LifeSettings {
        LifeSettings {
            glider_spawning: false,
            ..LifeSettings::default()
        }
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let t0 = Instant::now();
        let mut app = App::new(20, 10, quiet_settings(), t0);

        app.tick(t0 + 100 * MS);
        assert_eq!(app.simulation.generation, 0);
        app.tick(t0 + 200 * MS);
        assert_eq!(app.simulation.generation, 1);
        app.tick(t0 + 250 * MS);
        assert_eq!(app.simulation.generation, 1);
        app.tick(t0 + 400 * MS);
        assert_eq!(app.simulation.generation, 2);
    }

    #[test]
    fn test_paused_does_not_step() {
        let t0 = Instant::now();
        let mut app = App::new(20, 10, quiet_settings(), t0);
        app.toggle_pause();
        app.tick(t0 + 1000 * MS);
        assert_eq!(app.simulation.generation, 0);

        app.single_step();
        assert_eq!(app.simulation.generation, 1);
    }

    #[test]
    fn test_click_toggles_and_holds_steps() {
        let t0 = Instant::now();
        let mut app = App::new(20, 10, quiet_settings(), t0);

        app.click(3, 2, t0);
        // Default cell size 4: column 3 -> cell 1, row 2 -> cell 2, plus margin 10
        assert!(app.simulation.grid().get(11, 12));
        assert!(app.is_holding(t0 + 1000 * MS));

        app.tick(t0 + 1000 * MS);
        assert_eq!(app.simulation.generation, 0);

        app.tick(t0 + 2200 * MS);
        assert_eq!(app.simulation.generation, 1);
        assert!(!app.is_holding(t0 + 2200 * MS));
    }

    #[test]
    fn test_click_outside_canvas_is_ignored() {
        let t0 = Instant::now();
        let mut app = App::new(20, 10, quiet_settings(), t0);
        app.click(20, 0, t0);
        app.click(0, 10, t0);
        assert_eq!(app.simulation.live_count(), 0);
        assert!(!app.is_holding(t0));
    }

    #[test]
    fn test_first_glider_after_delay_then_every_interval() {
        let t0 = Instant::now();
        let mut app = App::new(20, 10, LifeSettings::default(), t0);

        app.tick(t0 + 1800 * MS);
        assert_eq!(app.simulation.live_count(), 0);

        // First spawn is placed, then stepped once
        app.tick(t0 + 2000 * MS);
        assert_eq!(app.simulation.generation, 2);
        assert!(app.simulation.live_count() > 0);
        assert_eq!(app.next_glider_at, t0 + 7000 * MS);
    }

    #[test]
    fn test_cycle_preset_rearms_glider_schedule() {
        let t0 = Instant::now();
        let mut app = App::new(20, 10, LifeSettings::calm(), t0);
        app.presets = PresetManager::builtin_only();
        app.preset_name = String::from("calm");

        let later = t0 + 30_000 * MS;
        app.cycle_preset(later);
        assert_eq!(app.preset_name, "drifting");
        assert!(app.simulation.settings.glider_spawning);
        assert_eq!(app.next_glider_at, later + 5000 * MS);

        // No backlog spawn on the next step
        app.tick(later + 200 * MS);
        assert_eq!(app.simulation.live_count(), 0);
    }

    #[test]
    fn test_click_reaches_every_visible_cell() {
        let t0 = Instant::now();
        for cell_size in [1, 2, 4, 8] {
            for (cols, rows) in [(12, 6), (7, 5), (13, 9)] {
                let settings = LifeSettings {
                    cell_size,
                    ..quiet_settings()
                };
                let mut app = App::new(cols, rows, settings, t0);
                let (view_w, view_h) = app.simulation.visible_size();
                let margin = app.simulation.settings.margin;

                let mut reached = std::collections::HashSet::new();
                for row in 0..rows {
                    for col in 0..cols {
                        app.click(col, row, t0);
                        let grid = app.simulation.grid();
                        for y in 0..grid.height() {
                            for x in 0..grid.width() {
                                if grid.get(x, y) {
                                    reached.insert((x, y));
                                }
                            }
                        }
                        // Second click restores the empty grid
                        app.click(col, row, t0);
                        assert_eq!(app.simulation.live_count(), 0);
                    }
                }

                for y in margin..margin + view_h {
                    for x in margin..margin + view_w {
                        assert!(
                            reached.contains(&(x, y)),
                            "cell_size {} canvas {}x{}: ({}, {}) unreachable",
                            cell_size,
                            cols,
                            rows,
                            x,
                            y
                        );
                    }
                }
                assert_eq!(reached.len(), view_w * view_h);
            }
        }
    }

    #[test]
    fn test_no_gliders_when_disabled() {
        let t0 = Instant::now();
        let mut app = App::new(20, 10, quiet_settings(), t0);
        for i in 1..=50 {
            app.tick(t0 + i * 200 * MS);
        }
        assert_eq!(app.simulation.generation, 50);
        assert_eq!(app.simulation.live_count(), 0);
    }

    #[test]
    fn test_resize_preserves_cells() {
        let t0 = Instant::now();
        let mut app = App::new(20, 10, quiet_settings(), t0);
        app.click(1, 1, t0);
        app.resize(40, 20);
        app.resize(20, 10);
        assert!(app.simulation.grid().get(10, 11));
    }

    #[test]
    fn test_speed_adjustments() {
        let t0 = Instant::now();
        let mut app = App::new(20, 10, quiet_settings(), t0);
        app.increase_speed();
        assert_eq!(app.simulation.settings.step_interval_ms, 150);
        app.decrease_speed();
        app.decrease_speed();
        assert_eq!(app.simulation.settings.step_interval_ms, 250);
    }

    #[test]
    fn test_focus_cycle_round_trip() {
        let mut focus = Focus::ColorScheme;
        for _ in 0..6 {
            assert_eq!(focus.next().prev(), focus);
            focus = focus.next();
        }
        assert_eq!(focus, Focus::ColorScheme);
    }

    #[test]
    fn test_status_message_expires() {
        let t0 = Instant::now();
        let mut app = App::new(20, 10, quiet_settings(), t0);
        app.set_status("hello".to_string(), t0);
        assert_eq!(app.status_message(t0 + 1000 * MS), Some("hello"));
        assert_eq!(app.status_message(t0 + 4000 * MS), None);
    }

    #[test]
    fn test_to_config_carries_settings() {
        let t0 = Instant::now();
        let mut app = App::new(20, 10, LifeSettings::calm(), t0);
        app.cycle_color_scheme();
        let config = app.to_config();
        assert_eq!(config.settings, LifeSettings::calm());
        assert_eq!(config.color_scheme, ColorScheme::Phosphor);
    }
}
