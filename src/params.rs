/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains the world,
 * population, grid and cadence settings of the particle simulation, together
 * with the ForceModel constants that shape the force field. Some of these
 * can be modified through the UI; the struct also provides snapshot-based
 * change detection so the app knows when the population must be rebuilt.
 */

use crate::error::{Error, Result};

// Upper bound on rows * cols of the spatial grid
pub const MAX_GRID_CELLS: usize = 1 << 22;

// Sub-rectangle of the world used for initial particle placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRegion {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl SpawnRegion {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }
}

// Constants of the heuristic force field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    pub gravity: f64,
    // Pair force: repulsive below `repulsion_radius`, cohesive up to `interaction_radius`
    pub repulsion_radius: f64,
    pub repulsion_offset: f64,
    pub interaction_radius: f64,
    // Cursor force: `cursor_offset - d` within `cursor_range`
    pub cursor_range: f64,
    pub cursor_offset: f64,
    // Walls overwrite the force component inside this margin
    pub wall_margin: f64,
    pub wall_push: f64,
    pub floor_push: f64,
    pub damping: f64,
    pub restitution: f64,
}

impl Default for ForceModel {
    fn default() -> Self {
        Self {
            gravity: 10.0,
            repulsion_radius: 35.0,
            repulsion_offset: 30.0,
            interaction_radius: 40.0,
            cursor_range: 100.0,
            cursor_offset: 40.0,
            wall_margin: 5.0,
            wall_push: 5.0,
            floor_push: 20.0,
            damping: 0.99,
            restitution: 0.5,
        }
    }
}

// Parameters for the simulation, some adjustable via UI
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub num_particles: usize,
    pub world_width: f64,
    pub world_height: f64,
    pub cell_size: f64,
    pub frame_rate: f64,
    pub spawn_region: SpawnRegion,
    pub seed: Option<u64>,
    // Bounds-check the bottom-right neighbour cell instead of always skipping it
    pub full_diagonal_lookup: bool,
    pub forces: ForceModel,
    pub max_steps_per_frame: usize,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Debug, Clone)]
struct ParamSnapshot {
    num_particles: usize,
    gravity: f64,
    damping: f64,
    show_debug: bool,
    pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_particles: 1500,
            world_width: 580.0,
            world_height: 555.0,
            cell_size: 40.0,
            frame_rate: 120.0,
            // Lower portion of the world
            spawn_region: SpawnRegion::new(0.0, 580.0, 350.0, 555.0),
            seed: None,
            full_diagonal_lookup: false,
            forces: ForceModel::default(),
            max_steps_per_frame: 4,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    /// Reference parameters with a world of the given size. The spawn region
    /// keeps the reference proportions: full width, below 350/555 of the height.
    pub fn with_world(world_width: f64, world_height: f64) -> Self {
        Self {
            world_width,
            world_height,
            spawn_region: SpawnRegion::new(0.0, world_width, world_height * 350.0 / 555.0, world_height),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidParam(format!("{name} must be finite and > 0, got {v}")))
            }
        };
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("cell_size", self.cell_size)?;
        positive("frame_rate", self.frame_rate)?;

        // Neighbors must fit in the 3x3 block around a particle's cell
        if self.cell_size < self.forces.interaction_radius {
            return Err(Error::InvalidParam(format!(
                "cell_size {} is smaller than the interaction radius {}",
                self.cell_size, self.forces.interaction_radius
            )));
        }
        let rows = (self.world_height / self.cell_size).ceil() + 1.0;
        let cols = (self.world_width / self.cell_size).ceil() + 1.0;
        if rows * cols > MAX_GRID_CELLS as f64 {
            return Err(Error::InvalidParam(format!(
                "a {rows}x{cols} grid exceeds {MAX_GRID_CELLS} cells"
            )));
        }

        let r = &self.spawn_region;
        if !(r.x_min < r.x_max && r.y_min < r.y_max) {
            return Err(Error::InvalidParam(format!("spawn region is empty: {r:?}")));
        }
        if r.x_min < 0.0 || r.y_min < 0.0 || r.x_max > self.world_width || r.y_max > self.world_height {
            return Err(Error::InvalidParam(format!(
                "spawn region {r:?} exceeds world {}x{}",
                self.world_width, self.world_height
            )));
        }
        Ok(())
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            num_particles: self.num_particles,
            gravity: self.forces.gravity,
            damping: self.forces.damping,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        });
    }

    // Check if any parameters have changed since the last snapshot
    // Returns a tuple of (num_particles_changed, any_ui_changed)
    pub fn detect_changes(&self) -> (bool, bool) {
        let Some(prev) = &self.previous_values else {
            return (false, false);
        };

        let count_changed = self.num_particles != prev.num_particles;
        let ui_changed = count_changed
            || self.forces.gravity != prev.gravity
            || self.forces.damping != prev.damping
            || self.show_debug != prev.show_debug
            || self.pause_simulation != prev.pause_simulation;

        (count_changed, ui_changed)
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_particles_range() -> std::ops::RangeInclusive<usize> {
        0..=5000
    }

    pub fn get_gravity_range() -> std::ops::RangeInclusive<f64> {
        0.0..=30.0
    }

    pub fn get_damping_range() -> std::ops::RangeInclusive<f64> {
        0.9..=1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_world() {
        let p = SimulationParams::default();
        assert_eq!(p.num_particles, 1500);
        assert_eq!((p.world_width, p.world_height), (580.0, 555.0));
        assert_eq!(p.cell_size, 40.0);
        assert_eq!(p.frame_rate, 120.0);
        assert_eq!(p.spawn_region, SpawnRegion::new(0.0, 580.0, 350.0, 555.0));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn with_world_scales_spawn_region() {
        let p = SimulationParams::with_world(580.0, 555.0);
        assert_eq!(p.spawn_region, SimulationParams::default().spawn_region);
        assert!(SimulationParams::with_world(200.0, 111.0).validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_cell_size() {
        let p = SimulationParams { cell_size: 0.0, ..SimulationParams::default() };
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("cell_size"));
    }

    #[test]
    fn rejects_cells_smaller_than_interaction_radius() {
        let p = SimulationParams { cell_size: 10.0, ..SimulationParams::default() };
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("interaction radius"));

        let mut wide = SimulationParams::default();
        wide.forces.interaction_radius = 50.0;
        assert!(wide.validate().is_err());
        wide.cell_size = 50.0;
        assert!(wide.validate().is_ok());
    }

    #[test]
    fn rejects_oversized_grid() {
        let huge = SimulationParams {
            spawn_region: SpawnRegion::new(0.0, 580.0, 350.0, 555.0),
            ..SimulationParams::with_world(1.0e12, 555.0)
        };
        let err = huge.validate().unwrap_err();
        assert!(err.to_string().contains("cells"));
    }

    #[test]
    fn rejects_spawn_region_outside_world() {
        let p = SimulationParams {
            spawn_region: SpawnRegion::new(0.0, 600.0, 350.0, 555.0),
            ..SimulationParams::default()
        };
        assert!(p.validate().is_err());

        let empty = SimulationParams {
            spawn_region: SpawnRegion::new(10.0, 10.0, 350.0, 555.0),
            ..SimulationParams::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn detects_count_and_ui_changes() {
        let mut p = SimulationParams::default();
        assert_eq!(p.detect_changes(), (false, false));

        p.take_snapshot();
        p.forces.gravity = 5.0;
        assert_eq!(p.detect_changes(), (false, true));

        p.take_snapshot();
        p.num_particles = 10;
        assert_eq!(p.detect_changes(), (true, true));
    }
}
