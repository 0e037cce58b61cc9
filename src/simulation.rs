use crate::glider::{GliderInjector, Spawn};
use crate::grid::Grid;
use crate::settings::LifeSettings;
use crate::viewport::Viewport;
use rand::rngs::ThreadRng;

/// B3/S23: survive with 2 or 3 neighbours, birth with exactly 3
pub fn rule(alive: bool, neighbours: u8) -> bool {
    matches!((alive, neighbours), (true, 2) | (_, 3))
}

/// Compute the generation after `current` into `next`. Only `current` is read.
pub fn step_into(current: &Grid, next: &mut Grid) {
    if next.width() != current.width() || next.height() != current.height() {
        *next = Grid::new(current.width(), current.height());
    }

    for y in 0..current.height() {
        for x in 0..current.width() {
            let alive = rule(current.get(x, y), current.count_neighbours(x, y));
            next.set(x, y, alive);
        }
    }
}

/// One generation as a fresh grid
#[cfg(test)]
pub fn step_grid(current: &Grid) -> Grid {
    let mut next = Grid::new(current.width(), current.height());
    step_into(current, &mut next);
    next
}

/// Game of Life state: the current generation plus a back buffer for the next one
pub struct LifeSimulation {
    grid: Grid,
    back: Grid,
    pub generation: u64,
    pub paused: bool,
    pub settings: LifeSettings,
    injector: GliderInjector,
    rng: ThreadRng,
}

impl LifeSimulation {
    /// Create a simulation sized for a canvas of `pixel_width` x `pixel_height` dots
    pub fn new(pixel_width: usize, pixel_height: usize, settings: LifeSettings) -> Self {
        let settings = settings.sanitized();
        let (width, height) = Viewport::new(settings.cell_size, settings.margin)
            .grid_size(pixel_width, pixel_height);
        Self {
            grid: Grid::new(width, height),
            back: Grid::new(width, height),
            generation: 0,
            paused: false,
            settings,
            injector: GliderInjector::new(),
            rng: rand::thread_rng(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.settings.cell_size, self.settings.margin)
    }

    /// Visible (width, height) in cells
    pub fn visible_size(&self) -> (usize, usize) {
        self.viewport().visible_size(self.grid.width(), self.grid.height())
    }

    /// Advance one generation: read the front buffer, write the back buffer, swap
    pub fn step(&mut self) {
        step_into(&self.grid, &mut self.back);
        std::mem::swap(&mut self.grid, &mut self.back);
        self.generation += 1;
    }

    /// Stamp the next glider into the margin band
    pub fn spawn_glider(&mut self) -> Spawn {
        let spawn = self.injector.spawn(&mut self.grid, self.settings.margin, &mut self.rng);
        log::debug!(
            "glider {:?} from {:?} at ({}, {}), generation {}",
            spawn.heading,
            spawn.edge,
            spawn.x,
            spawn.y,
            self.generation
        );
        spawn
    }

    /// Grid cells covered by a `width` x `height` block of viewport pixels at (px, py)
    pub fn cells_under(&self, px: usize, py: usize, width: usize, height: usize) -> Vec<(usize, usize)> {
        if width == 0 || height == 0 {
            return Vec::new();
        }
        let viewport = self.viewport();
        let (x0, y0) = viewport.pixel_to_cell(px, py);
        let (x1, y1) = viewport.pixel_to_cell(px + width - 1, py + height - 1);
        (y0..=y1)
            .flat_map(|y| (x0..=x1).map(move |x| (x, y)))
            .collect()
    }

    /// Toggle every cell under a block of viewport pixels. Returns how many cells flipped.
    pub fn toggle_pixels(&mut self, px: usize, py: usize, width: usize, height: usize) -> usize {
        self.cells_under(px, py, width, height)
            .into_iter()
            .filter(|&(x, y)| self.grid.toggle(x, y))
            .count()
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Fill randomly with the configured density
    pub fn randomize(&mut self) {
        self.grid.randomize(self.settings.density, &mut self.rng);
    }

    /// Clear everything and restart the generation count and glider schedule
    pub fn reset(&mut self) {
        self.grid.clear();
        self.generation = 0;
        self.injector.reset();
    }

    /// Resize for a new canvas pixel size, keeping overlapping cells
    pub fn resize(&mut self, pixel_width: usize, pixel_height: usize) {
        let (width, height) = self.viewport().grid_size(pixel_width, pixel_height);
        if width != self.grid.width() || height != self.grid.height() {
            log::debug!(
                "grid resize {}x{} -> {}x{}",
                self.grid.width(),
                self.grid.height(),
                width,
                height
            );
            self.grid.resize(width, height);
            self.back = Grid::new(width, height);
        }
    }

    /// Replace settings. Geometry changes rebuild the grid for the same canvas.
    pub fn apply_settings(&mut self, settings: LifeSettings, pixel_width: usize, pixel_height: usize) {
        let settings = settings.sanitized();
        let geometry_changed =
            settings.cell_size != self.settings.cell_size || settings.margin != self.settings.margin;
        self.settings = settings;
        if geometry_changed {
            self.resize(pixel_width, pixel_height);
        }
    }

    pub fn live_count(&self) -> usize {
        self.grid.live_count()
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}
