// --- File: config.rs ---
use crate::constants::*;
use glam::Vec2;
use winit::dpi::LogicalSize;

#[derive(Debug, Clone)]
pub struct LifeConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub cell_width: u32,
    pub cell_height: u32,

    // --- Step rate range (steps per second) ---
    pub initial_step_rate: u32,
    pub min_step_rate: u32,
    pub max_step_rate: u32,
    pub step_rate_adjust: u32,

    // --- Initial display flags ---
    pub show_grid_lines: bool,
    pub show_fps: bool,
    pub show_controls: bool,

    pub soup_density: f64,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            initial_step_rate: INITIAL_STEP_RATE,
            min_step_rate: MIN_STEP_RATE,
            max_step_rate: MAX_STEP_RATE,
            step_rate_adjust: STEP_RATE_ADJUST,
            show_grid_lines: true,
            show_fps: true,
            show_controls: false,
            soup_density: SOUP_DENSITY,
        }
    }
}

impl LifeConfig {
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(self.cell_width as f32, self.cell_height as f32)
    }

    /// Canvas size in logical pixels; the window is created at exactly this size.
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(
            (self.grid_width as u32 * self.cell_width) as f32,
            (self.grid_height as u32 * self.cell_height) as f32,
        )
    }

    pub fn window_size(&self) -> LogicalSize<u32> {
        LogicalSize::new(
            self.grid_width as u32 * self.cell_width,
            self.grid_height as u32 * self.cell_height,
        )
    }

    pub fn clamp_step_rate(&self, rate: u32) -> u32 {
        rate.clamp(self.min_step_rate, self.max_step_rate)
    }
}
// --- End of File: config.rs ---
