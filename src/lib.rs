/*
 * Particle Fluid Simulation - Module Definitions
 *
 * This file defines the module structure of the particle fluid sandbox.
 * The simulation core (particle, spatial_grid, physics, environment, cursor,
 * params, error) has no window dependency; app, input, renderer, ui and debug
 * form the nannou front end that drives and displays it.
 */

// Re-export key components for easier access
pub use app::Model;
pub use cursor::{CursorEvent, CursorSlot};
pub use debug::DebugInfo;
pub use environment::ParticleEnvironment;
pub use error::{Error, Result};
pub use params::{ForceModel, SimulationParams, SpawnRegion};
pub use particle::Particle;
pub use spatial_grid::SpatialGrid;

// Define modules
pub mod app;
pub mod cursor;
pub mod debug;
pub mod environment;
pub mod error;
pub mod input;
pub mod params;
pub mod particle;
pub mod physics;
pub mod renderer;
pub mod spatial_grid;
pub mod ui;

// Constants
pub const WINDOW_SIZE: u32 = 600;
pub const PARTICLE_SIZE: f32 = 4.0;
pub const CURSOR_SIZE: f32 = 10.0;
// Seconds for the cursor indicator to fade out after release
pub const CURSOR_FADE_SECS: f32 = 0.25;
