// --- Modules ---
pub mod config;
pub mod constants;
pub mod grid;
pub mod interaction;
pub mod renderer;
pub mod simulation;
pub mod utils;
