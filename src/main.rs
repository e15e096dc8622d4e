/*
 * Particle Fluid Simulation
 *
 * This application simulates a fluid-like cloud of particles held together
 * by short range repulsion and cohesion and pulled down by gravity.
 * Drag with the left mouse button to attract particles, with the right
 * button to repel them.
 *
 * Set RUST_LOG to control log verbosity (defaults to info).
 */

use particle_fluid::app::{model, update};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting particle fluid simulation...");

    nannou::app(model).update(update).run();
}
