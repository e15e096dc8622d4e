/*
 * Particle Environment Module
 *
 * This module owns the particle population and its spatial grid, and runs
 * the simulation step. One step, in this order:
 * 1. Grid refresh: particles whose bucket changed are moved
 * 2. Forces: gravity baseline, neighbor pair forces, cursor force, walls;
 *    velocity += force / frame_rate
 * 3. Position integration with velocity damping
 * 4. Boundary clamp and bounce
 *
 * The refresh for the next step is done as the last thing of the current
 * one (and at construction), so between steps every particle is filed under
 * the bucket of its current position. Forces read positions only, so every
 * particle sees the same pre-step layout regardless of processing order.
 */

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cursor::CursorEvent;
use crate::error::{Error, Result};
use crate::params::{ForceModel, SimulationParams};
use crate::particle::Particle;
use crate::physics;
use crate::spatial_grid::SpatialGrid;

pub struct ParticleEnvironment {
    particles: Vec<Particle>,
    grid: SpatialGrid,
    params: SimulationParams,
    steps: u64,
}

impl ParticleEnvironment {
    /// Create `params.num_particles` particles at rest, randomly placed in the
    /// spawn region. Positions are truncated to whole units. The same seed
    /// always gives the same layout.
    pub fn new(params: &SimulationParams) -> Result<Self> {
        params.validate()?;

        let mut rng: StdRng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let region = params.spawn_region;
        let particles = (0..params.num_particles)
            .map(|_| {
                let y = rng.gen_range(region.y_min..region.y_max).trunc();
                let x = rng.gen_range(region.x_min..region.x_max).trunc();
                Particle::new(x, y)
            })
            .collect();

        let env = Self::build(params, particles);
        log::info!(
            "Initialized {} particles in a {}x{} world ({}x{} grid, seed {:?})",
            env.particles.len(),
            params.world_width,
            params.world_height,
            env.grid.rows(),
            env.grid.cols(),
            params.seed
        );
        Ok(env)
    }

    /// Build an environment from explicitly placed particles. Every particle
    /// must lie inside the world.
    pub fn from_particles(params: &SimulationParams, particles: Vec<Particle>) -> Result<Self> {
        params.validate()?;

        for (i, p) in particles.iter().enumerate() {
            let inside = (0.0..=params.world_width).contains(&p.x) && (0.0..=params.world_height).contains(&p.y);
            if !inside {
                return Err(Error::InvalidParam(format!(
                    "particle {i} at ({}, {}) lies outside the {}x{} world",
                    p.x, p.y, params.world_width, params.world_height
                )));
            }
        }

        Ok(Self::build(params, particles))
    }

    fn build(params: &SimulationParams, mut particles: Vec<Particle>) -> Self {
        let mut grid = SpatialGrid::new(
            params.cell_size,
            params.world_width,
            params.world_height,
            params.full_diagonal_lookup,
        );
        for (i, p) in particles.iter_mut().enumerate() {
            grid.insert(i, p);
        }

        Self {
            particles,
            grid,
            params: params.clone(),
            steps: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    // Snapshot of particle positions as [x, y]
    pub fn positions(&self) -> Vec<[f64; 2]> {
        self.particles.iter().map(|p| [p.x, p.y]).collect()
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn force_model(&self) -> &ForceModel {
        &self.params.forces
    }

    pub fn force_model_mut(&mut self) -> &mut ForceModel {
        &mut self.params.forces
    }

    // Number of completed steps
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advance the simulation by one tick. A missing or released cursor
    /// event contributes no force.
    pub fn step(&mut self, cursor: Option<&CursorEvent>) {
        let max_x = self.params.world_width;
        let max_y = self.params.world_height;
        let dt_divisor = self.params.frame_rate;
        let model = self.params.forces;
        let cursor = cursor.filter(|event| event.live);

        for i in 0..self.particles.len() {
            let (fx, fy) = self.accumulate_force(i, cursor, &model);

            let p = &mut self.particles[i];
            p.fx = fx;
            p.fy = fy;
            physics::apply_wall_forces(p, max_x, max_y, &model);

            p.vx += p.fx / dt_divisor;
            p.vy += p.fy / dt_divisor;
        }

        for p in &mut self.particles {
            p.integrate(model.damping);
        }

        for p in &mut self.particles {
            physics::enforce_boundaries(p, max_x, max_y, model.restitution);
        }

        let moved = self.update_grid();
        log::trace!("step {}: {} particles changed cell", self.steps, moved);

        self.steps += 1;
    }

    // Move particles whose position now maps to a different bucket
    fn update_grid(&mut self) -> usize {
        let mut moved = 0;
        for (i, p) in self.particles.iter_mut().enumerate() {
            if self.grid.reinsert(i, p) {
                moved += 1;
            }
        }
        moved
    }

    // Gravity baseline plus neighbor and cursor forces for particle `i`
    fn accumulate_force(&self, i: usize, cursor: Option<&CursorEvent>, model: &ForceModel) -> (f64, f64) {
        let p = &self.particles[i];

        let neighbors = self.grid.neighbors_of(p.cell());
        let (px, py) = physics::pair_force(p, i, neighbors, &self.particles, model);
        let mut fx = px;
        let mut fy = model.gravity + py;

        if let Some(event) = cursor {
            let (cx, cy) = (f64::from(event.x), f64::from(event.y));
            let magnitude = physics::cursor_force_magnitude(p.distance_to(cx, cy), event.attract, model);
            let (x, y) = physics::decompose(magnitude, p.x, p.y, cx, cy);
            fx += x;
            fy += y;
        }

        (fx, fy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(count: usize, seed: u64) -> SimulationParams {
        let mut params = SimulationParams::default();
        params.num_particles = count;
        params.seed = Some(seed);
        params
    }

    #[test]
    fn initial_particles_lie_in_spawn_region() -> Result<()> {
        let params = seeded(500, 3);
        let env = ParticleEnvironment::new(&params)?;
        assert_eq!(env.particles().len(), 500);

        for p in env.particles() {
            assert!((0.0..580.0).contains(&p.x));
            assert!((350.0..555.0).contains(&p.y));
            assert_eq!(p.x.fract(), 0.0);
            assert_eq!(p.y.fract(), 0.0);
            assert_eq!((p.vx, p.vy, p.fx, p.fy), (0.0, 0.0, 0.0, 0.0));
        }
        assert_eq!(env.grid().len(), 500);
        Ok(())
    }

    #[test]
    fn same_seed_same_layout() -> Result<()> {
        let a = ParticleEnvironment::new(&seeded(200, 11))?;
        let b = ParticleEnvironment::new(&seeded(200, 11))?;
        let c = ParticleEnvironment::new(&seeded(200, 12))?;
        assert_eq!(a.positions(), b.positions());
        assert_ne!(a.positions(), c.positions());
        Ok(())
    }

    #[test]
    fn from_particles_rejects_out_of_world_positions() {
        let params = SimulationParams::default();
        let err = ParticleEnvironment::from_particles(&params, vec![Particle::new(600.0, 10.0)])
            .err()
            .unwrap();
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn lone_particle_falls_under_gravity() -> Result<()> {
        let params = SimulationParams::default();
        let mut env = ParticleEnvironment::from_particles(&params, vec![Particle::new(290.0, 100.0)])?;
        env.step(None);

        let p = env.particles()[0];
        assert_eq!(p.fx, 0.0);
        assert_eq!(p.fy, 10.0);
        // v = 10/120, moved by v, then damped
        assert_eq!(p.y, 100.0 + 10.0 / 120.0);
        assert_eq!(p.vy, 10.0 / 120.0 * 0.99);
        assert_eq!(env.steps(), 1);
        Ok(())
    }

    #[test]
    fn attracting_cursor_pulls_particle_in_from_afar() -> Result<()> {
        let params = SimulationParams::default();
        let mut env = ParticleEnvironment::from_particles(&params, vec![Particle::new(300.0, 200.0)])?;
        let cursor = CursorEvent::new(360, 200, true);
        env.step(Some(&cursor));

        // d = 60: magnitude 40 - 60 = -20, directed toward the cursor on +x
        let p = env.particles()[0];
        assert_eq!(p.fx, 20.0);
        assert!(p.vx > 0.0);
        Ok(())
    }

    #[test]
    fn attracting_cursor_keeps_a_core_around_itself() -> Result<()> {
        let params = SimulationParams::default();
        let mut env = ParticleEnvironment::from_particles(&params, vec![Particle::new(300.0, 200.0)])?;
        env.step(Some(&CursorEvent::new(320, 200, true)));

        // d = 20 is inside the 40 unit core, so the particle is pushed back
        assert_eq!(env.particles()[0].fx, -20.0);
        Ok(())
    }

    #[test]
    fn repelling_cursor_pushes_particle_away() -> Result<()> {
        let params = SimulationParams::default();
        let mut env = ParticleEnvironment::from_particles(&params, vec![Particle::new(300.0, 200.0)])?;
        env.step(Some(&CursorEvent::new(360, 200, false)));
        assert_eq!(env.particles()[0].fx, -20.0);
        Ok(())
    }

    #[test]
    fn force_model_changes_apply_to_next_step() -> Result<()> {
        let params = SimulationParams::default();
        let mut env = ParticleEnvironment::from_particles(&params, vec![Particle::new(290.0, 100.0)])?;
        env.force_model_mut().gravity = 0.0;
        env.step(None);
        assert_eq!(env.particles()[0].vy, 0.0);
        Ok(())
    }
}
