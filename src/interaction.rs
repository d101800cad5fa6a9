// --- File: interaction.rs ---
use crate::config::LifeConfig;
use crate::constants::{CONTROLS_PANEL_RECT, GRID_CHECKBOX_RECT, STEP_RATE_SLIDER_RECT};
use crate::simulation::SimulationState;
use glam::Vec2;
use winit::{
    event::{ElementState, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleRunning,
    ToggleControls,
    ToggleGridLines,
    ToggleFps,
    FasterSteps,
    SlowerSteps,
    Restart,
    Clear,
    Randomize,
}

pub fn command_for_key(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Space => Some(Command::ToggleRunning),
        KeyCode::Tab => Some(Command::ToggleControls),
        KeyCode::KeyG => Some(Command::ToggleGridLines),
        KeyCode::KeyF => Some(Command::ToggleFps),
        KeyCode::ArrowUp => Some(Command::FasterSteps),
        KeyCode::ArrowDown => Some(Command::SlowerSteps),
        KeyCode::KeyR => Some(Command::Restart),
        KeyCode::KeyC => Some(Command::Clear),
        KeyCode::KeyN => Some(Command::Randomize),
        _ => None,
    }
}

fn execute(command: Command, sim: &mut SimulationState) {
    match command {
        Command::ToggleRunning => sim.toggle_running(),
        Command::ToggleControls => sim.toggle_controls(),
        Command::ToggleGridLines => sim.toggle_grid_lines(),
        Command::ToggleFps => sim.toggle_fps(),
        Command::FasterSteps => sim.adjust_step_rate(true),
        Command::SlowerSteps => sim.adjust_step_rate(false),
        Command::Restart => sim.restart(),
        Command::Clear => sim.clear(),
        Command::Randomize => sim.randomize(),
    }
}

// --- Controls Panel Layout ---

// Axis-aligned, canvas pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn from_array(r: [f32; 4]) -> Self {
        Self {
            min: Vec2::new(r[0], r[1]),
            size: Vec2::new(r[2], r[3]),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.min + self.size;
        p.x >= self.min.x && p.y >= self.min.y && p.x < max.x && p.y < max.y
    }
}

pub const CONTROLS_PANEL: Rect = Rect::from_array(CONTROLS_PANEL_RECT);
pub const STEP_RATE_SLIDER: Rect = Rect::from_array(STEP_RATE_SLIDER_RECT);
pub const GRID_CHECKBOX: Rect = Rect::from_array(GRID_CHECKBOX_RECT);

pub fn slider_value(x: f32, min: u32, max: u32) -> u32 {
    let t = ((x - STEP_RATE_SLIDER.min.x) / STEP_RATE_SLIDER.size.x).clamp(0.0, 1.0);
    (min as f32 + t * (max - min) as f32).round() as u32
}

// --- Pointer Mapping ---

pub fn pointer_to_cell(
    pos: Vec2,
    cell_size: Vec2,
    grid_width: usize,
    grid_height: usize,
) -> (usize, usize) {
    debug_assert!(grid_width > 0 && grid_height > 0);
    let gx = (pos.x / cell_size.x).floor() as i64;
    let gy = (pos.y / cell_size.y).floor() as i64;
    (
        gx.clamp(0, grid_width as i64 - 1) as usize,
        gy.clamp(0, grid_height as i64 - 1) as usize,
    )
}

// --- Input State ---

#[derive(Debug, Default)]
pub struct InputState {
    cursor: Option<Vec2>,
    primary_down: bool,
    secondary_down: bool,
    primary_pressed: bool,
    secondary_pressed: bool,
    pressed_keys: Vec<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a window event; returns true if it was an input event.
    pub fn handle_window_event(&mut self, event: &WindowEvent, scale_factor: f64) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(scale_factor);
                self.set_cursor(Some(Vec2::new(logical.x, logical.y)));
            }
            WindowEvent::CursorLeft { .. } => self.set_cursor(None),
            WindowEvent::MouseInput { state, button, .. } => {
                self.set_button(*button, *state == ElementState::Pressed);
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.state == ElementState::Pressed && !key_event.repeat {
                    if let PhysicalKey::Code(code) = key_event.physical_key {
                        self.press_key(code);
                    }
                }
            }
            WindowEvent::Focused(false) => {
                self.primary_down = false;
                self.secondary_down = false;
            }
            _ => return false,
        }
        true
    }

    pub fn set_cursor(&mut self, cursor: Option<Vec2>) {
        self.cursor = cursor;
    }

    pub fn set_button(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => {
                if down && !self.primary_down {
                    self.primary_pressed = true;
                }
                self.primary_down = down;
            }
            MouseButton::Right => {
                if down && !self.secondary_down {
                    self.secondary_pressed = true;
                }
                self.secondary_down = down;
            }
            _ => {}
        }
    }

    pub fn press_key(&mut self, key: KeyCode) {
        self.pressed_keys.push(key);
    }

    pub fn apply(&mut self, sim: &mut SimulationState) {
        for key in self.pressed_keys.drain(..) {
            if let Some(command) = command_for_key(key) {
                execute(command, sim);
            }
        }

        if let Some(cursor) = self.cursor {
            if !self.apply_widgets(cursor, sim) {
                self.apply_paint(cursor, sim);
            }
        }
        self.primary_pressed = false;
        self.secondary_pressed = false;
    }

    // True when a visible widget consumed the pointer.
    fn apply_widgets(&self, cursor: Vec2, sim: &mut SimulationState) -> bool {
        if !sim.display.show_controls {
            return false;
        }
        if STEP_RATE_SLIDER.contains(cursor) {
            if self.primary_down {
                let config = sim.config();
                let rate = slider_value(cursor.x, config.min_step_rate, config.max_step_rate);
                sim.set_step_rate(rate);
            }
            return true;
        }
        if GRID_CHECKBOX.contains(cursor) {
            if self.primary_pressed {
                sim.toggle_grid_lines();
            }
            return true;
        }
        CONTROLS_PANEL.contains(cursor)
    }

    // A press released before the frame still paints once.
    fn apply_paint(&self, cursor: Vec2, sim: &mut SimulationState) {
        let alive = if self.primary_down || self.primary_pressed {
            true
        } else if self.secondary_down || self.secondary_pressed {
            false
        } else {
            return;
        };
        let config: &LifeConfig = sim.config();
        let (x, y) = pointer_to_cell(
            cursor,
            config.cell_size(),
            config.grid_width,
            config.grid_height,
        );
        sim.set_cell(x, y, alive);
    }
}
