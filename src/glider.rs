use crate::grid::Grid;
use rand::Rng;

/// Smallest margin that leaves room for a spawn band on every edge
pub const MIN_SPAWN_MARGIN: usize = 6;

/// Direction a glider travels in (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
}

impl Heading {
    /// 3x3 live/dead stencil, indexed `[row][column]`, centered on (1, 1)
    pub fn stencil(&self) -> [[bool; 3]; 3] {
        const O: bool = false;
        const X: bool = true;
        match self {
            Heading::DownRight => [
                [O, X, O],
                [O, O, X],
                [X, X, X],
            ],
            Heading::UpRight => [
                [X, X, X],
                [O, O, X],
                [O, X, O],
            ],
            Heading::UpLeft => [
                [X, X, X],
                [X, O, O],
                [O, X, O],
            ],
            Heading::DownLeft => [
                [X, O, O],
                [X, O, X],
                [X, X, O],
            ],
        }
    }
}

/// Edge of the viewport a glider enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Left,
    Bottom,
    Right,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Left, Edge::Bottom, Edge::Right];

    /// Gliders always head into the viewport
    pub fn heading(&self) -> Heading {
        match self {
            Edge::Top => Heading::DownRight,
            Edge::Left => Heading::UpRight,
            Edge::Bottom => Heading::UpLeft,
            Edge::Right => Heading::DownLeft,
        }
    }
}

/// Where a glider was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub x: usize,
    pub y: usize,
    pub heading: Heading,
    /// `None` for the fixed first spawn
    pub edge: Option<Edge>,
}

/// Write all nine stencil cells centered at (x, y). Cells past the grid edge are clipped.
pub fn stamp(grid: &mut Grid, x: usize, y: usize, heading: Heading) {
    let stencil = heading.stencil();
    for (row, cells) in stencil.iter().enumerate() {
        for (col, &alive) in cells.iter().enumerate() {
            let gx = x as isize + col as isize - 1;
            let gy = y as isize + row as isize - 1;
            grid.set_signed(gx, gy, alive);
        }
    }
}

/// Inclusive random pick that collapses to `lo` when the range is empty
fn pick<R: Rng + ?Sized>(rng: &mut R, lo: usize, hi: usize) -> usize {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Places gliders in the margin band around the viewport
#[derive(Debug, Clone)]
pub struct GliderInjector {
    first_spawn: bool,
}

impl Default for GliderInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl GliderInjector {
    pub fn new() -> Self {
        Self { first_spawn: true }
    }

    /// Choose a spawn position for the current grid without stamping it.
    ///
    /// The first call is fixed: an up-right glider just left of the viewport,
    /// vertically centered. Later calls pick a random edge.
    pub fn next_spawn<R: Rng + ?Sized>(&mut self, grid: &Grid, margin: usize, rng: &mut R) -> Spawn {
        let width = grid.width();
        let height = grid.height();
        let view_w = width.saturating_sub(2 * margin);
        let view_h = height.saturating_sub(2 * margin);

        if self.first_spawn {
            self.first_spawn = false;
            return Spawn {
                x: margin.saturating_sub(3),
                y: margin + view_h.div_ceil(2),
                heading: Heading::UpRight,
                edge: None,
            };
        }

        let bottom_row = margin + view_h;
        let right_col = margin + view_w;
        let band_end = margin.saturating_sub(3);

        let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
        let (x, y) = match edge {
            Edge::Top => (
                pick(rng, margin, width.saturating_sub(3)),
                pick(rng, 3, band_end),
            ),
            Edge::Left => (
                pick(rng, 3, band_end),
                pick(rng, margin, height.saturating_sub(3)),
            ),
            Edge::Bottom => (
                pick(rng, margin, width.saturating_sub(3)),
                pick(rng, bottom_row, bottom_row + band_end),
            ),
            Edge::Right => (
                pick(rng, right_col, right_col + band_end),
                pick(rng, margin, height.saturating_sub(3)),
            ),
        };

        Spawn {
            x,
            y,
            heading: edge.heading(),
            edge: Some(edge),
        }
    }

    /// Pick a position and stamp a glider there
    pub fn spawn<R: Rng + ?Sized>(&mut self, grid: &mut Grid, margin: usize, rng: &mut R) -> Spawn {
        let spawn = self.next_spawn(grid, margin, rng);
        stamp(grid, spawn.x, spawn.y, spawn.heading);
        spawn
    }

    /// Forget that the first glider was placed
    pub fn reset(&mut self) {
        self.first_spawn = true;
    }
}
