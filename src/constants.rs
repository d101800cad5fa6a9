// --- File: constants.rs ---
// --- Global Simulation Constants ---
pub const BACKGROUND_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
pub const GRID_LINE_COLOR: [f32; 4] = [0.51, 0.51, 0.51, 1.0];
pub const LIVE_CELL_COLOR: [f32; 4] = [0.96, 0.96, 0.96, 1.0];
pub const PANEL_COLOR: [f32; 4] = [0.15, 0.15, 0.18, 0.85];
pub const WIDGET_TRACK_COLOR: [f32; 4] = [0.35, 0.35, 0.4, 1.0];
pub const WIDGET_FILL_COLOR: [f32; 4] = [0.2, 0.6, 0.9, 1.0];

pub const GRID_WIDTH: usize = 100;
pub const GRID_HEIGHT: usize = 100;
pub const CELL_WIDTH: u32 = 10;
pub const CELL_HEIGHT: u32 = 10;
pub const GRID_LINE_THICKNESS: f32 = 1.0;

pub const WINDOW_TITLE: &str = "Conway's Game of Life";

// Steps per second; the frame loop runs one step per frame.
pub const INITIAL_STEP_RATE: u32 = 60;
pub const MIN_STEP_RATE: u32 = 0;
pub const MAX_STEP_RATE: u32 = 100;
pub const STEP_RATE_ADJUST: u32 = 5;

pub const FPS_UPDATE_INTERVAL_SECS: f64 = 0.5;

// Fraction of cells brought to life by a random soup.
pub const SOUP_DENSITY: f64 = 0.25;

// Placed into the active grid at start-up and on restart, as (x, y).
pub const SEED_PATTERN: &[(usize, usize)] = &[(10, 10), (11, 10), (12, 10), (11, 11), (12, 12)];

// --- Controls panel layout, in canvas pixels: [x, y, width, height] ---
pub const CONTROLS_PANEL_RECT: [f32; 4] = [590.0, 30.0, 140.0, 320.0];
pub const STEP_RATE_SLIDER_RECT: [f32; 4] = [600.0, 40.0, 120.0, 20.0];
pub const GRID_CHECKBOX_RECT: [f32; 4] = [600.0, 320.0, 20.0, 20.0];
pub const CHECKBOX_INSET: f32 = 4.0;
