// --- File: grid.rs ---
use rand::Rng;

const NEIGHBOUR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// --- Grid ---

// Row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
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

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            None
        } else {
            Some(y as usize * self.width + x as usize)
        }
    }

    // Anything outside the field reads as dead.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    #[inline]
    pub fn set(&mut self, x: i64, y: i64, alive: bool) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = alive;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn count_neighbours(&self, x: usize, y: usize) -> u8 {
        let (x, y) = (x as i64, y as i64);
        NEIGHBOUR_OFFSETS
            .iter()
            .filter(|(dx, dy)| self.get(x + dx, y + dy))
            .count() as u8
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(i, _)| (i % width, i / width))
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = density.clamp(0.0, 1.0);
        for cell in self.cells.iter_mut() {
            *cell = rng.gen_bool(density);
        }
    }

    /// Writes the generation following `self` into `next`, which must share its dimensions.
    fn write_next_generation(&self, next: &mut Grid) {
        debug_assert_eq!((self.width, self.height), (next.width, next.height));
        for y in 0..self.height {
            for x in 0..self.width {
                let alive = self.cells[y * self.width + x];
                next.cells[y * self.width + x] = next_state(alive, self.count_neighbours(x, y));
            }
        }
    }
}

/// B3/S23: a live cell survives with 2 or 3 neighbours, a dead one is born with exactly 3.
#[inline]
pub fn next_state(alive: bool, neighbours: u8) -> bool {
    matches!((alive, neighbours), (true, 2) | (true, 3) | (false, 3))
}

// --- Double Buffer ---
#[derive(Debug, Clone)]
pub struct GridStore {
    buffers: [Grid; 2],
    active: usize,
}

impl GridStore {
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Self {
            buffers: [Grid::new(width, height), Grid::new(width, height)],
            active: 0,
        }
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn active(&self) -> &Grid {
        &self.buffers[self.active]
    }

    #[inline]
    pub fn active_mut(&mut self) -> &mut Grid {
        &mut self.buffers[self.active]
    }

    pub fn get_cell(&self, buffer: usize, x: i64, y: i64) -> bool {
        self.buffers.get(buffer).is_some_and(|grid| grid.get(x, y))
    }

    pub fn set_cell(&mut self, buffer: usize, x: i64, y: i64, alive: bool) -> bool {
        let written = self
            .buffers
            .get_mut(buffer)
            .is_some_and(|grid| grid.set(x, y, alive));
        if !written {
            log::warn!("Rejected write to buffer {} at ({}, {})", buffer, x, y);
        }
        written
    }

    pub fn clear(&mut self, buffer: usize) {
        if let Some(grid) = self.buffers.get_mut(buffer) {
            grid.clear();
        }
    }

    /// Computes the next generation into the inactive buffer, then makes it active.
    pub fn step(&mut self) {
        let [first, second] = &mut self.buffers;
        let (current, next) = if self.active == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        };
        current.write_next_generation(next);
        self.active = 1 - self.active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn store_with(cells: &[(i64, i64)]) -> GridStore {
        let mut store = GridStore::new(30, 30);
        for &(x, y) in cells {
            assert!(store.set_cell(0, x, y, true));
        }
        store
    }

    fn live(store: &GridStore) -> Vec<(usize, usize)> {
        let mut cells: Vec<_> = store.active().live_cells().collect();
        cells.sort();
        cells
    }

    #[test]
    fn rule_table() {
        for n in 0..=8u8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "live cell, {} neighbours", n);
            assert_eq!(next_state(false, n), n == 3, "dead cell, {} neighbours", n);
        }
    }

    #[test]
    fn out_of_range_reads_are_dead() {
        let mut grid = Grid::new(5, 5);
        grid.cells.fill(true);
        assert!(!grid.get(-1, 0));
        assert!(!grid.get(0, -1));
        assert!(!grid.get(5, 0));
        assert!(!grid.get(0, 5));
        assert!(grid.get(4, 4));
    }

    #[test]
    fn out_of_range_writes_are_rejected() {
        let mut store = GridStore::new(5, 5);
        assert!(!store.set_cell(0, 5, 0, true));
        assert!(!store.set_cell(0, -1, 2, true));
        assert!(!store.set_cell(2, 1, 1, true));
        assert_eq!(store.active().population(), 0);
        assert!(!store.get_cell(2, 1, 1));
    }

    #[test]
    fn three_neighbours_give_life_regardless_of_state() {
        // (5,5) dead with three live neighbours; (15,5) live with three live neighbours.
        let mut store = store_with(&[(4, 4), (5, 4), (6, 4), (14, 4), (15, 4), (16, 4), (15, 5)]);
        assert_eq!(store.active().count_neighbours(5, 5), 3);
        assert_eq!(store.active().count_neighbours(15, 5), 3);
        store.step();
        assert!(store.get_cell(store.active_index(), 5, 5));
        assert!(store.get_cell(store.active_index(), 15, 5));
    }

    #[test]
    fn underpopulated_cells_die() {
        let mut store = store_with(&[(3, 3), (4, 3), (20, 20)]);
        store.step();
        assert!(!store.get_cell(store.active_index(), 3, 3));
        assert!(!store.get_cell(store.active_index(), 4, 3));
        assert!(!store.get_cell(store.active_index(), 20, 20));
    }

    #[test]
    fn overcrowded_cell_dies() {
        // Centre of a plus sign has four neighbours.
        let mut store = store_with(&[(10, 10), (9, 10), (11, 10), (10, 9), (10, 11)]);
        assert_eq!(store.active().count_neighbours(10, 10), 4);
        store.step();
        assert!(!store.get_cell(store.active_index(), 10, 10));
    }

    #[test]
    fn corner_cell_only_touches_three_neighbours() {
        let store = store_with(&[(0, 0)]);
        let grid = store.active();
        assert_eq!(grid.count_neighbours(1, 0), 1);
        assert_eq!(grid.count_neighbours(0, 1), 1);
        assert_eq!(grid.count_neighbours(1, 1), 1);
        assert_eq!(grid.count_neighbours(29, 29), 0);
        assert_eq!(grid.count_neighbours(29, 0), 0);
        assert_eq!(grid.count_neighbours(0, 29), 0);
        assert_eq!(grid.count_neighbours(2, 2), 0);
    }

    #[test]
    fn no_wraparound_across_edges() {
        // A vertical blinker on the left edge would be fed by the right edge on a torus.
        let mut store = store_with(&[(0, 4), (0, 5), (0, 6), (29, 5)]);
        store.step();
        assert!(!store.get_cell(store.active_index(), 29, 5));
        assert!(store.get_cell(store.active_index(), 1, 5));
        assert!(store.get_cell(store.active_index(), 0, 5));
    }

    #[test]
    fn empty_grid_stays_empty() {
        let mut store = GridStore::new(12, 8);
        store.step();
        assert_eq!(store.active().population(), 0);
        store.step();
        assert_eq!(store.active().population(), 0);
    }

    #[test]
    fn lone_cell_dies() {
        let mut store = store_with(&[(7, 7)]);
        store.step();
        assert_eq!(store.active().population(), 0);
    }

    #[test]
    fn blinker_has_period_two() {
        let mut store = store_with(&[(10, 10), (11, 10), (12, 10)]);
        store.step();
        assert_eq!(live(&store), vec![(11, 9), (11, 10), (11, 11)]);
        store.step();
        assert_eq!(live(&store), vec![(10, 10), (11, 10), (12, 10)]);
    }

    #[test]
    fn step_flips_active_index() {
        let mut store = GridStore::new(4, 4);
        assert_eq!(store.active_index(), 0);
        store.step();
        assert_eq!(store.active_index(), 1);
        store.step();
        assert_eq!(store.active_index(), 0);
    }

    #[test]
    fn block_is_stable_and_previous_generation_is_kept() {
        let block = [(3, 3), (4, 3), (3, 4), (4, 4)];
        let mut store = store_with(&block);
        store.step();
        assert_eq!(live(&store), vec![(3, 3), (3, 4), (4, 3), (4, 4)]);
        // The stale buffer still holds the prior generation.
        assert!(store.get_cell(0, 3, 3));
    }

    #[test]
    fn clear_only_touches_given_buffer() {
        let mut store = store_with(&[(1, 1)]);
        store.set_cell(1, 2, 2, true);
        store.clear(0);
        assert!(!store.get_cell(0, 1, 1));
        assert!(store.get_cell(1, 2, 2));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "grid dimensions must be non-zero")]
    fn zero_sized_store_is_rejected() {
        let _ = GridStore::new(0, 10);
    }

    #[test]
    fn live_cells_reports_coordinates() {
        let store = store_with(&[(2, 5), (29, 0)]);
        let cells = live(&store);
        assert_eq!(cells, vec![(2, 5), (29, 0)]);
    }

    #[test]
    fn randomize_respects_density_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(20, 20);
        grid.randomize(&mut rng, 1.0);
        assert_eq!(grid.population(), 400);
        grid.randomize(&mut rng, 0.0);
        assert_eq!(grid.population(), 0);
        grid.randomize(&mut rng, 0.5);
        assert!(grid.population() > 0 && grid.population() < 400);
    }
}
