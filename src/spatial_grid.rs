/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor lookups.
 * It divides the bounded world into a grid of fixed-size cells, so a particle
 * only has to look at its own cell and the 8 surrounding ones instead of the
 * whole population.
 *
 * - Buckets hold particle indices and are allocated once; a step only moves
 *   membership between them.
 * - Cells are computed with ceil(), so the grid has one extra row and column
 *   to hold positions lying exactly on the far edge of the world.
 */

use crate::particle::Particle;

// Neighbor slots in lookup order: top-left, top, top-right, left, own,
// right, bottom-left, bottom, bottom-right
pub const NEIGHBOR_OFFSETS: [(isize, isize); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const BOTTOM_RIGHT: usize = 8;

pub struct SpatialGrid {
    cell_size: f64,
    rows: usize,
    cols: usize,
    // Row-major buckets. Index = row * cols + col
    buckets: Vec<Vec<usize>>,
    full_diagonal_lookup: bool,
}

impl SpatialGrid {
    pub fn new(cell_size: f64, world_width: f64, world_height: f64, full_diagonal_lookup: bool) -> Self {
        let rows = (world_height / cell_size).ceil() as usize + 1;
        let cols = (world_width / cell_size).ceil() as usize + 1;

        Self {
            cell_size,
            rows,
            cols,
            buckets: vec![Vec::new(); rows * cols],
            full_diagonal_lookup,
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    // Total number of filed particle indices
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Bucket `(row, col)` for a world position. Uses the ceiling of the
    /// scaled coordinate; the result is clamped into the grid.
    #[inline]
    pub fn bucket_for(&self, y: f64, x: f64) -> (usize, usize) {
        let row = ((y / self.cell_size).ceil() as usize).min(self.rows - 1);
        let col = ((x / self.cell_size).ceil() as usize).min(self.cols - 1);
        (row, col)
    }

    pub fn bucket(&self, row: usize, col: usize) -> &[usize] {
        if row >= self.rows || col >= self.cols {
            return &[];
        }
        &self.buckets[row * self.cols + col]
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    // File a particle under the bucket for its current position
    pub fn insert(&mut self, index: usize, particle: &mut Particle) {
        let (row, col) = self.bucket_for(particle.y, particle.x);
        self.buckets[row * self.cols + col].push(index);
        particle.cell_y = row;
        particle.cell_x = col;
    }

    /// Move a particle from its cached bucket to the bucket for its current
    /// position. Returns false without touching the grid when the bucket is
    /// unchanged.
    pub fn reinsert(&mut self, index: usize, particle: &mut Particle) -> bool {
        let cell = self.bucket_for(particle.y, particle.x);
        if cell == particle.cell() {
            return false;
        }

        let old = &mut self.buckets[particle.cell_y * self.cols + particle.cell_x];
        if let Some(pos) = old.iter().position(|&i| i == index) {
            old.remove(pos);
        }

        self.buckets[cell.0 * self.cols + cell.1].push(index);
        particle.cell_y = cell.0;
        particle.cell_x = cell.1;
        true
    }

    /// Contents of one neighbor slot (see `NEIGHBOR_OFFSETS`) around `cell`.
    /// Slots falling outside the grid are empty.
    pub fn neighbor_bucket(&self, slot: usize, cell: (usize, usize)) -> &[usize] {
        // The bottom-right cell is only consulted with the full lookup enabled
        if slot == BOTTOM_RIGHT && !self.full_diagonal_lookup {
            return &[];
        }
        let Some(&(dy, dx)) = NEIGHBOR_OFFSETS.get(slot) else {
            return &[];
        };

        let row = cell.0 as isize + dy;
        let col = cell.1 as isize + dx;
        if row < 0 || col < 0 {
            return &[];
        }
        self.bucket(row as usize, col as usize)
    }

    // Indices in the 3x3 block around `cell`, own bucket included
    pub fn neighbors_of(&self, cell: (usize, usize)) -> impl Iterator<Item = usize> + '_ {
        (0..NEIGHBOR_OFFSETS.len()).flat_map(move |slot| self.neighbor_bucket(slot, cell).iter().copied())
    }
}
