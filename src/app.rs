/*
 * Application Module
 *
 * This module defines the main application model and the per-frame update
 * of the particle simulation. The simulation advances on a fixed timestep
 * of 1/frame_rate seconds: real elapsed time is accumulated and one step is
 * run per whole timestep, capped per frame. Time beyond the cap is dropped
 * rather than caught up.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::cursor::CursorSlot;
use crate::debug::DebugInfo;
use crate::environment::ParticleEnvironment;
use crate::input::{mouse_moved, mouse_pressed, mouse_released, raw_window_event};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::ui;
use crate::{CURSOR_FADE_SECS, WINDOW_SIZE};

// Main model for the application
pub struct Model {
    pub env: ParticleEnvironment,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub cursor: CursorSlot,
    pub mouse_position: Vec2,
    // Polarity of the held mouse button, if any
    pub pressed: Option<bool>,
    // Opacity of the cursor indicator
    pub cursor_fade: f32,
    pub frame_failed: Cell<bool>,
    // Fixed timestep physics variables
    pub physics_accumulator: Duration,
    pub physics_step_size: Duration,
    pub last_update_time: Instant,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let window_id = match app
        .new_window()
        .title("Particle-Based Fluid Simulator")
        .size(WINDOW_SIZE, WINDOW_SIZE)
        .resizable(false)
        .view(view)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .raw_event(raw_window_event)
        .build()
    {
        Ok(id) => id,
        Err(e) => {
            log::error!("unable to create window: {e:?}");
            std::process::exit(1);
        }
    };

    let Some(window) = app.window(window_id) else {
        log::error!("window {window_id:?} disappeared after creation");
        std::process::exit(1);
    };

    // Create the UI
    let egui = Egui::from_window(&window);

    let params = SimulationParams::default();

    let env = match ParticleEnvironment::new(&params) {
        Ok(env) => env,
        Err(e) => {
            log::error!("unable to initialize particles: {e}");
            std::process::exit(1);
        }
    };

    let physics_step_size = Duration::from_secs_f64(1.0 / params.frame_rate);
    let debug_info = DebugInfo {
        particle_count: env.particles().len(),
        ..DebugInfo::default()
    };

    Model {
        env,
        params,
        egui,
        debug_info,
        cursor: CursorSlot::new(),
        mouse_position: Vec2::ZERO,
        pressed: None,
        cursor_fade: 0.0,
        frame_failed: Cell::new(false),
        physics_accumulator: Duration::ZERO,
        physics_step_size,
        last_update_time: Instant::now(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.egui.set_elapsed_time(update.since_start);

    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let cursor = model.cursor.latest();
    let (should_reset, count_changed, ui_changed) =
        ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info, cursor);

    if ui_changed {
        // Live tuning applies from the next step on
        *model.env.force_model_mut() = model.params.forces;
        log::debug!(
            "controls changed: gravity {:.2}, damping {:.3}, paused {}",
            model.params.forces.gravity,
            model.params.forces.damping,
            model.params.pause_simulation
        );
    }

    if should_reset || count_changed {
        reset_particles(model);
    }

    // Calculate time since last update
    let current_time = Instant::now();
    let frame_time = current_time.duration_since(model.last_update_time);
    model.last_update_time = current_time;

    if model.params.pause_simulation {
        model.physics_accumulator = Duration::ZERO;
        model.debug_info.steps_per_frame = 0;
    } else {
        run_fixed_steps(model, frame_time);
    }

    update_cursor_fade(model, update.since_last);
}

// Advance the simulation by as many whole timesteps as have accumulated
fn run_fixed_steps(model: &mut Model, frame_time: Duration) {
    model.physics_accumulator += frame_time;

    let start = Instant::now();
    let mut steps_this_frame = 0;
    while model.physics_accumulator >= model.physics_step_size
        && steps_this_frame < model.params.max_steps_per_frame
    {
        // Read the cursor once per step
        let cursor = model.cursor.latest();
        model.env.step(cursor.as_ref());

        model.physics_accumulator -= model.physics_step_size;
        steps_this_frame += 1;
    }

    // Frame took too long: drop the backlog instead of catching up
    if model.physics_accumulator >= model.physics_step_size {
        model.physics_accumulator = Duration::ZERO;
    }

    model.debug_info.steps_per_frame = steps_this_frame;
    model.debug_info.step_time = start.elapsed();
    model.debug_info.total_steps = model.env.steps();
}

// Rebuild the population from the current parameters
fn reset_particles(model: &mut Model) {
    match ParticleEnvironment::new(&model.params) {
        Ok(env) => {
            log::debug!("reset to {} particles", env.particles().len());
            model.env = env;
            model.debug_info.particle_count = model.env.particles().len();
            model.physics_accumulator = Duration::ZERO;
        }
        Err(e) => log::error!("unable to reset particles: {e}"),
    }
}

fn update_cursor_fade(model: &mut Model, since_last: Duration) {
    model.cursor_fade = match model.cursor.latest() {
        Some(event) if event.live => 1.0,
        Some(_) => (model.cursor_fade - since_last.as_secs_f32() / CURSOR_FADE_SECS).max(0.0),
        None => 0.0,
    };
}
