/*
 * UI Module
 *
 * This module contains the egui control panel of the particle simulation.
 * It exposes the population size, pause and debug toggles, and live tuning
 * of gravity and damping. Change detection is handled by SimulationParams.
 */

use nannou_egui::{egui, Egui};

use crate::cursor::CursorEvent;
use crate::debug::DebugInfo;
use crate::params::SimulationParams;

// Update the UI and return whether the particles should be reset, whether
// the particle count changed, and whether any UI value changed
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    cursor: Option<CursorEvent>,
) -> (bool, bool, bool) {
    let mut should_reset = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Particles", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.num_particles, SimulationParams::get_num_particles_range())
                        .text("Number of Particles"),
                );

                if ui.button("Reset Particles").clicked() {
                    should_reset = true;
                }
            });

            ui.collapsing("Forces", |ui| {
                ui.add(egui::Slider::new(&mut params.forces.gravity, SimulationParams::get_gravity_range()).text("Gravity"));
                ui.add(egui::Slider::new(&mut params.forces.damping, SimulationParams::get_damping_range()).text("Damping"));
            });

            ui.collapsing("Cursor", |ui| {
                ui.label("Left drag: attract, right drag: repel");
                match cursor {
                    Some(event) => ui.label(format!(
                        "({}, {}) {} {}",
                        event.x,
                        event.y,
                        if event.attract { "attract" } else { "repel" },
                        if event.live { "live" } else { "released" }
                    )),
                    None => ui.label("No input yet"),
                };
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");

            if params.show_debug {
                ui.separator();
                for line in debug_info.overlay_lines() {
                    ui.label(line);
                }
            }
        });

    let (count_changed, ui_changed) = params.detect_changes();
    (should_reset, count_changed, ui_changed)
}
