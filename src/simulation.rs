// --- File: simulation.rs ---
use crate::config::LifeConfig;
use crate::constants::SEED_PATTERN;
use crate::grid::{Grid, GridStore};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub type SimRng = StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_grid_lines: bool,
    pub show_fps: bool,
    pub show_controls: bool,
}

pub struct SimulationState {
    pub(crate) store: GridStore,
    running: bool,
    generation: u64,
    step_rate: u32,
    pub display: DisplayOptions,
    config: LifeConfig,
    rng: SimRng,
}

impl SimulationState {
    pub fn new(config: LifeConfig) -> Self {
        let mut state = Self {
            store: GridStore::new(config.grid_width, config.grid_height),
            running: false,
            generation: 0,
            step_rate: config.clamp_step_rate(config.initial_step_rate),
            display: DisplayOptions {
                show_grid_lines: config.show_grid_lines,
                show_fps: config.show_fps,
                show_controls: config.show_controls,
            },
            config,
            rng: SimRng::from_entropy(),
        };
        state.seed();
        state
    }

    fn seed(&mut self) {
        let active = self.store.active_index();
        self.store.clear(active);
        for &(x, y) in SEED_PATTERN {
            self.store.set_cell(active, x as i64, y as i64, true);
        }
    }

    // --- Frame Update ---
    pub fn update(&mut self) {
        if self.running {
            self.step();
        }
    }

    pub fn step(&mut self) {
        self.store.step();
        self.generation += 1;
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        log::info!(
            "Simulation {} at generation {}",
            if self.running { "Running" } else { "Paused" },
            self.generation
        );
    }

    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) {
        let active = self.store.active_index();
        self.store.set_cell(active, x as i64, y as i64, alive);
    }

    pub fn clear(&mut self) {
        let active = self.store.active_index();
        self.store.clear(active);
        log::info!("Cleared grid");
    }

    pub fn randomize(&mut self) {
        let density = self.config.soup_density;
        self.store.active_mut().randomize(&mut self.rng, density);
        log::info!(
            "Random soup: {} live cells",
            self.store.active().population()
        );
    }

    pub fn restart(&mut self) {
        log::info!("Restarting simulation from seed pattern...");
        self.seed();
        self.generation = 0;
        self.running = false;
        self.step_rate = self.config.clamp_step_rate(self.config.initial_step_rate);
    }

    pub fn set_step_rate(&mut self, rate: u32) {
        let rate = self.config.clamp_step_rate(rate);
        if rate != self.step_rate {
            self.step_rate = rate;
            log::debug!("Step rate: {}/s", self.step_rate);
        }
    }

    pub fn adjust_step_rate(&mut self, increase: bool) {
        let delta = self.config.step_rate_adjust;
        let rate = if increase {
            self.step_rate.saturating_add(delta)
        } else {
            self.step_rate.saturating_sub(delta)
        };
        self.set_step_rate(rate);
    }

    pub fn toggle_grid_lines(&mut self) {
        self.display.show_grid_lines = !self.display.show_grid_lines;
        log::debug!("Grid lines: {}", self.display.show_grid_lines);
    }

    pub fn toggle_fps(&mut self) {
        self.display.show_fps = !self.display.show_fps;
        log::debug!("FPS display: {}", self.display.show_fps);
    }

    pub fn toggle_controls(&mut self) {
        self.display.show_controls = !self.display.show_controls;
        log::debug!("Controls panel: {}", self.display.show_controls);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
    #[inline]
    pub fn step_rate(&self) -> u32 {
        self.step_rate
    }
    #[inline]
    pub fn config(&self) -> &LifeConfig {
        &self.config
    }
    #[inline]
    pub fn grid(&self) -> &Grid {
        self.store.active()
    }
}
