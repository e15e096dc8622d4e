/*
 * Particle Module
 *
 * This module defines the Particle struct: position, velocity, the force
 * accumulated during the current step, and the grid cell the particle was
 * last filed under. World coordinates have their origin at the top left
 * corner with y growing downward, so gravity is a positive y force.
 */

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub fx: f64,
    pub fy: f64,
    // Cached bucket, refreshed at the end of every step
    pub cell_y: usize,
    pub cell_x: usize,
}

impl Particle {
    /// A particle at rest at (`x`, `y`). Its cell is assigned when it is
    /// inserted into a grid.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            fx: 0.0,
            fy: 0.0,
            cell_y: 0,
            cell_x: 0,
        }
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    #[inline]
    pub fn cell(&self) -> (usize, usize) {
        (self.cell_y, self.cell_x)
    }

    #[inline]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x) * (self.x - x) + (self.y - y) * (self.y - y)).sqrt()
    }

    // Advance position by the current velocity, then decay the velocity
    pub fn integrate(&mut self, damping: f64) {
        self.x += self.vx;
        self.y += self.vy;

        self.vx *= damping;
        self.vy *= damping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_particle_is_at_rest() {
        let p = Particle::new(3.0, 4.0);
        assert_eq!((p.vx, p.vy, p.fx, p.fy), (0.0, 0.0, 0.0, 0.0));
        assert_eq!(p.distance_to(0.0, 0.0), 5.0);
    }

    #[test]
    fn integrate_moves_then_damps() {
        let mut p = Particle::new(10.0, 10.0).with_velocity(2.0, -1.0);
        p.integrate(0.5);
        assert_eq!((p.x, p.y), (12.0, 9.0));
        assert_eq!((p.vx, p.vy), (1.0, -0.5));
    }
}
