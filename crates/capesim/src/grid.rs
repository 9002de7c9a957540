// Shared cloth topology: a row-major particle arena plus its constraint set

use crate::constraint::{BendingConstraint, DistanceConstraint};
use crate::particle::Particle;
use crate::vector::SimVector;

/// Stiffness of each constraint family in the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStiffness {
    /// Row to row, along the hanging direction
    pub stretch: f32,
    /// Column to column, across the attachment line
    pub lateral: f32,
    /// Cross-braces inside every quad
    pub diagonal: f32,
    /// Bending along each column
    pub bend_rows: f32,
    /// Bending along each row
    pub bend_columns: f32,
}

/// `segments × width` particles connected into a cloth.
///
/// Row `attach_row` is the attachment line and is pinned at construction.
/// Constraints refer to particles by index; the particle count and the
/// connectivity never change after construction, only positions do.
#[derive(Debug, Clone)]
pub struct ClothGrid<V: SimVector> {
    particles: Vec<Particle<V>>,
    distance_constraints: Vec<DistanceConstraint>,
    bending_constraints: Vec<BendingConstraint>,
    segments: usize,
    width: usize,
    attach_row: usize,
}

impl<V: SimVector> ClothGrid<V> {
    /// Build the grid from a layout closure returning `(position, mass)` per cell.
    ///
    /// Preconditions: `segments >= 2`, `width >= 2`, every mass `> 0`.
    /// Rest lengths and rest angles are taken from the laid-out positions.
    pub fn new(
        segments: usize,
        width: usize,
        stiffness: GridStiffness,
        damping: f32,
        layout: impl Fn(usize, usize) -> (V, f32),
    ) -> Self {
        let attach_row = 0;
        let mut particles = Vec::with_capacity(segments * width);
        for row in 0..segments {
            for col in 0..width {
                let (position, mass) = layout(row, col);
                particles.push(Particle::new(position, mass, row == attach_row).with_damping(damping));
            }
        }

        let mut grid = Self {
            particles,
            distance_constraints: Vec::new(),
            bending_constraints: Vec::new(),
            segments,
            width,
            attach_row,
        };
        grid.build_distance_constraints(&stiffness);
        grid.build_bending_constraints(&stiffness);

        log::debug!(
            "Built {}x{} cloth grid with {} distance and {} bending constraints",
            segments,
            width,
            grid.distance_constraints.len(),
            grid.bending_constraints.len()
        );
        grid
    }

    fn build_distance_constraints(&mut self, stiffness: &GridStiffness) {
        let mut constraints = Vec::new();
        let particles = &self.particles;

        for row in 0..self.segments {
            for col in 0..self.width {
                let here = self.index(row, col);
                let has_next_row = row + 1 < self.segments;

                if has_next_row {
                    let below = self.index(row + 1, col);
                    constraints.push(DistanceConstraint::from_current(particles, here, below, stiffness.stretch));
                }
                if col + 1 < self.width {
                    let right = self.index(row, col + 1);
                    constraints.push(DistanceConstraint::from_current(particles, here, right, stiffness.lateral));
                }
                if has_next_row && col + 1 < self.width {
                    let diagonal = self.index(row + 1, col + 1);
                    constraints.push(DistanceConstraint::from_current(particles, here, diagonal, stiffness.diagonal));
                }
                if has_next_row && col > 0 {
                    let diagonal = self.index(row + 1, col - 1);
                    constraints.push(DistanceConstraint::from_current(particles, here, diagonal, stiffness.diagonal));
                }
            }
        }

        self.distance_constraints = constraints;
    }

    fn build_bending_constraints(&mut self, stiffness: &GridStiffness) {
        let mut constraints = Vec::new();
        let particles = &self.particles;

        for row in 0..self.segments.saturating_sub(2) {
            for col in 0..self.width {
                constraints.push(BendingConstraint::new(
                    particles,
                    self.index(row, col),
                    self.index(row + 1, col),
                    self.index(row + 2, col),
                    stiffness.bend_rows,
                ));
            }
        }

        for row in 0..self.segments {
            for col in 0..self.width.saturating_sub(2) {
                constraints.push(BendingConstraint::new(
                    particles,
                    self.index(row, col),
                    self.index(row, col + 1),
                    self.index(row, col + 2),
                    stiffness.bend_columns,
                ));
            }
        }

        self.bending_constraints = constraints;
    }

    /// Gauss-Seidel relaxation. Bending is solved on even passes only.
    pub fn solve_constraints(&mut self, iterations: usize) {
        for i in 0..iterations {
            for constraint in &self.distance_constraints {
                constraint.solve(&mut self.particles);
            }

            if i % 2 == 0 {
                for bend in &self.bending_constraints {
                    bend.solve(&mut self.particles);
                }
            }
        }
    }

    /// Integrate every particle; pinned ones only drop their accumulated force
    pub fn integrate(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.update(dt);
        }
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn attach_row(&self) -> usize {
        self.attach_row
    }

    /// Arena indices of the attachment line, left to right
    pub fn attach_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.width).map(move |col| self.index(self.attach_row, col))
    }

    pub fn particle(&self, row: usize, col: usize) -> &Particle<V> {
        &self.particles[self.index(row, col)]
    }

    pub fn particle_mut(&mut self, row: usize, col: usize) -> &mut Particle<V> {
        let index = self.index(row, col);
        &mut self.particles[index]
    }

    pub fn position(&self, row: usize, col: usize) -> V {
        self.particle(row, col).position
    }

    pub fn velocity(&self, row: usize, col: usize) -> V {
        self.particle(row, col).velocity()
    }

    pub fn particles(&self) -> &[Particle<V>] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle<V>] {
        &mut self.particles
    }

    pub fn positions(&self) -> impl Iterator<Item = V> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    pub fn distance_constraints(&self) -> &[DistanceConstraint] {
        &self.distance_constraints
    }

    pub fn bending_constraints(&self) -> &[BendingConstraint] {
        &self.bending_constraints
    }

    /// Mean distance between `row` and `row + 1` over all columns
    pub fn row_spacing(&self, row: usize) -> f32 {
        let total: f32 = (0..self.width)
            .map(|col| (self.position(row + 1, col) - self.position(row, col)).length())
            .sum();
        total / self.width as f32
    }

    pub fn average_row_spacing(&self) -> f32 {
        let rows = self.segments.saturating_sub(1);
        if rows == 0 {
            return 0.0;
        }
        (0..rows).map(|row| self.row_spacing(row)).sum::<f32>() / rows as f32
    }

    pub fn is_finite(&self) -> bool {
        self.particles
            .iter()
            .all(|p| p.position.is_finite() && p.previous_position.is_finite())
    }
}
