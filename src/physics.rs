/*
 * Physics Module
 *
 * This module holds the force law of the particle fluid as plain functions:
 * - Pair force: short range repulsion with a narrow cohesion band
 * - Cursor force: attraction or repulsion around the pointer
 * - Walls: overwrite the force component near an edge
 * - Boundary enforcement: clamp into the world and bounce with energy loss
 *
 * None of this is physically rigorous. Magnitudes are split into x/y parts
 * through atan of the coordinate ratio, and a zero denominator produces
 * +infinity which atan maps to pi/2.
 */

use crate::params::ForceModel;
use crate::particle::Particle;

// Quotient with a zero denominator defined as +infinity
#[inline]
pub fn divide(n1: f64, n2: f64) -> f64 {
    if n2 == 0.0 {
        return f64::INFINITY;
    }
    n1 / n2
}

/// Pair force magnitude at distance `d`. Positive pushes apart, negative
/// pulls together, zero beyond the interaction radius.
#[inline]
pub fn pair_force_magnitude(d: f64, model: &ForceModel) -> f64 {
    if d < model.repulsion_radius {
        model.repulsion_offset - d
    } else if d < model.interaction_radius {
        d - model.interaction_radius
    } else {
        0.0
    }
}

/// Cursor force magnitude at distance `d`. Sign flips for repel events.
#[inline]
pub fn cursor_force_magnitude(d: f64, attract: bool, model: &ForceModel) -> f64 {
    let force = if d < model.cursor_range { model.cursor_offset - d } else { 0.0 };
    if attract {
        force
    } else {
        -force
    }
}

/// Split `magnitude` into x/y components for a body at (`px`, `py`) relative
/// to a source at (`sx`, `sy`). A positive magnitude points away from the source.
#[inline]
pub fn decompose(magnitude: f64, px: f64, py: f64, sx: f64, sy: f64) -> (f64, f64) {
    let dx = px - sx;
    let dy = py - sy;

    let mut fx = magnitude * divide(dy, dx).atan().cos();
    let mut fy = magnitude * divide(dx, dy).atan().cos();

    if px < sx {
        fx = -fx;
    }
    if py < sy {
        fy = -fy;
    }
    (fx, fy)
}

/// Force on `p` from every particle listed in `neighbors`, `p` itself
/// (`self_index`) excluded.
pub fn pair_force<I>(p: &Particle, self_index: usize, neighbors: I, particles: &[Particle], model: &ForceModel) -> (f64, f64)
where
    I: IntoIterator<Item = usize>,
{
    let mut fx = 0.0;
    let mut fy = 0.0;
    for i in neighbors {
        if i == self_index {
            continue;
        }
        let n = &particles[i];
        let magnitude = pair_force_magnitude(p.distance_to(n.x, n.y), model);
        let (x, y) = decompose(magnitude, p.x, p.y, n.x, n.y);
        fx += x;
        fy += y;
    }
    (fx, fy)
}

/// Replace force components for a particle within the wall margin. The
/// earlier accumulated force on that axis is discarded.
pub fn apply_wall_forces(p: &mut Particle, max_x: f64, max_y: f64, model: &ForceModel) {
    if p.x < model.wall_margin {
        p.fx = model.wall_push;
    }
    if p.x > max_x - model.wall_margin {
        p.fx = -model.wall_push;
    }
    if p.y < model.wall_margin {
        p.fy = model.wall_push;
    }
    // Stronger push off the floor to hold up against gravity
    if p.y > max_y - model.wall_margin {
        p.fy = -model.floor_push;
    }
}

/// Clamp the particle into `[0, max_x] x [0, max_y]`, then reflect any
/// velocity component still pointing into the wall it sits on.
pub fn enforce_boundaries(p: &mut Particle, max_x: f64, max_y: f64, restitution: f64) {
    p.x = p.x.min(max_x).max(0.0);
    p.y = p.y.min(max_y).max(0.0);

    if p.x == 0.0 && p.vx < 0.0 {
        p.vx = -p.vx * restitution;
    }
    if p.x == max_x && p.vx > 0.0 {
        p.vx = -p.vx * restitution;
    }
    if p.y == 0.0 && p.vy < 0.0 {
        p.vy = -p.vy * restitution;
    }
    if p.y == max_y && p.vy > 0.0 {
        p.vy = -p.vy * restitution;
    }
}
