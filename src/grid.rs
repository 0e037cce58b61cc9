use rand::Rng;

/// Moore neighbourhood offsets
#[rustfmt::skip]
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Finite cell grid. Cells outside the bounds are treated as dead.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Cell state at (x, y), dead when out of bounds
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.index(x, y).is_some_and(|idx| self.cells[idx])
    }

    /// Signed lookup used by neighbour counting and stamping
    fn get_signed(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get(x as usize, y as usize)
    }

    /// Set a cell. Out-of-bounds writes are dropped; returns whether the write landed.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = alive;
                true
            }
            None => false,
        }
    }

    /// Signed variant of [`Grid::set`] for stencils centered near the edges
    pub fn set_signed(&mut self, x: isize, y: isize, alive: bool) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.set(x as usize, y as usize, alive)
    }

    /// Flip one cell. Silently ignored when out of bounds.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = !self.cells[idx];
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Fill every cell independently with probability `density`
    pub fn randomize<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) {
        let density = density.clamp(0.0, 1.0);
        for cell in self.cells.iter_mut() {
            *cell = rng.gen_bool(density);
        }
    }

    /// Reallocate to a new size, keeping the overlapping sub-rectangle
    pub fn resize(&mut self, new_width: usize, new_height: usize) {
        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut cells = vec![false; new_width * new_height];
        let keep_w = self.width.min(new_width);
        let keep_h = self.height.min(new_height);
        for y in 0..keep_h {
            let old_row = y * self.width;
            let new_row = y * new_width;
            cells[new_row..new_row + keep_w].copy_from_slice(&self.cells[old_row..old_row + keep_w]);
        }

        self.width = new_width;
        self.height = new_height;
        self.cells = cells;
    }

    /// Live cells among the 8 surrounding positions. Edges do not wrap.
    pub fn count_neighbours(&self, x: usize, y: usize) -> u8 {
        let (x, y) = (x as isize, y as isize);
        NEIGHBOUR_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| self.get_signed(x + dx, y + dy))
            .count() as u8
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(5, 4);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn test_toggle_in_bounds() {
        let mut grid = Grid::new(5, 5);
        assert!(grid.toggle(2, 3));
        assert!(grid.get(2, 3));
        assert!(grid.toggle(2, 3));
        assert!(!grid.get(2, 3));
    }

    #[test]
    fn test_toggle_out_of_bounds_is_noop() {
        let mut grid = Grid::new(4, 4);
        grid.set(1, 1, true);
        let before = grid.clone();

        assert!(!grid.toggle(4, 0));
        assert!(!grid.toggle(0, 4));
        assert!(!grid.toggle(100, 100));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_set_signed_drops_negative() {
        let mut grid = Grid::new(3, 3);
        assert!(!grid.set_signed(-1, 0, true));
        assert!(!grid.set_signed(0, -1, true));
        assert!(grid.set_signed(2, 2, true));
        assert_eq!(grid.live_count(), 1);
    }

    #[test]
    fn test_count_neighbours_corners_and_edges() {
        let mut grid = Grid::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                grid.set(x, y, true);
            }
        }

        assert_eq!(grid.count_neighbours(0, 0), 3);
        assert_eq!(grid.count_neighbours(2, 2), 3);
        assert_eq!(grid.count_neighbours(1, 0), 5);
        assert_eq!(grid.count_neighbours(0, 1), 5);
        assert_eq!(grid.count_neighbours(1, 1), 8);
    }

    #[test]
    fn test_count_neighbours_excludes_self() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, true);
        assert_eq!(grid.count_neighbours(1, 1), 0);
        assert_eq!(grid.count_neighbours(0, 0), 1);
    }

    #[test]
    fn test_count_neighbours_single_cell_grid() {
        let mut grid = Grid::new(1, 1);
        grid.set(0, 0, true);
        assert_eq!(grid.count_neighbours(0, 0), 0);
    }

    #[test]
    fn test_resize_same_size_keeps_content() {
        let mut grid = Grid::new(6, 6);
        grid.set(5, 5, true);
        grid.set(0, 3, true);
        let before = grid.clone();

        grid.resize(6, 6);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_resize_shrink_then_grow_keeps_overlap() {
        let mut grid = Grid::new(8, 6);
        grid.set(1, 1, true);
        grid.set(3, 2, true);
        grid.set(7, 5, true); // lost on shrink

        grid.resize(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert!(grid.get(1, 1));
        assert!(grid.get(3, 2));

        grid.resize(8, 6);
        assert!(grid.get(1, 1));
        assert!(grid.get(3, 2));
        assert!(!grid.get(7, 5));
        assert_eq!(grid.live_count(), 2);
    }

    #[test]
    fn test_resize_grow_fills_dead() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 0, true);
        grid.resize(5, 3);
        assert!(grid.get(1, 0));
        assert_eq!(grid.live_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::new(4, 4);
        grid.set(0, 0, true);
        grid.set(3, 3, true);
        grid.clear();
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn test_randomize_density_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(10, 10);

        grid.randomize(0.0, &mut rng);
        assert_eq!(grid.live_count(), 0);

        grid.randomize(1.0, &mut rng);
        assert_eq!(grid.live_count(), 100);
    }

    #[test]
    fn test_randomize_density_roughly_matches() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(100, 100);
        grid.randomize(0.3, &mut rng);

        let ratio = grid.live_count() as f64 / 10_000.0;
        assert!((0.25..0.35).contains(&ratio), "ratio was {}", ratio);
    }
}
