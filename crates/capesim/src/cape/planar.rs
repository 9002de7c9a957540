use super::{column_offset, motion_forces, row_factor};
use crate::config::CapeConfig;
use crate::grid::{ClothGrid, GridStiffness};
use crate::particle::Particle;
use crate::wind::WindSampler;
use glam::Vec2;

/// Side-on cape in the XY plane, y up.
///
/// Rows hang from the attachment line along -Y, columns run along +X.
#[derive(Debug, Clone)]
pub struct Cape {
    grid: ClothGrid<Vec2>,
    config: CapeConfig,
    attach_velocity: Vec2,
    clock: f32,
}

impl Cape {
    /// Preconditions: `config.segments >= 2`, `config.width >= 2`
    pub fn new(attach_point: Vec2, config: CapeConfig) -> Self {
        let spacing = config.segment_length * config.width_ratio;
        let stiffness = GridStiffness {
            stretch: config.stiffness,
            lateral: config.stiffness * 0.8,
            diagonal: config.stiffness * 0.5,
            bend_rows: config.bend_stiffness,
            bend_columns: config.bend_stiffness * 0.5,
        };

        let grid = ClothGrid::new(config.segments, config.width, stiffness, config.damping, |row, col| {
            let position = attach_point
                + Vec2::new(
                    column_offset(col, config.width, spacing),
                    -(row as f32) * config.segment_length,
                );
            (position, 1.0 + 0.1 * row as f32)
        });

        log::info!(
            "Created {}x{} cape at {:?}",
            config.segments,
            config.width,
            attach_point
        );

        Self {
            grid,
            config,
            attach_velocity: Vec2::ZERO,
            clock: 0.0,
        }
    }

    /// Accumulate forces on every free particle, then integrate
    pub fn update(&mut self, dt: f32, wind: &impl WindSampler<Vec2>) {
        self.clock += dt;
        let gravity = Vec2::new(0.0, -self.config.gravity);
        let segments = self.config.segments;

        for row in 0..segments {
            let wind_scale = self.config.wind_influence * (0.5 + 0.5 * row_factor(row, segments));
            let wake = motion_forces(
                self.attach_velocity,
                Vec2::X,
                row,
                segments,
                self.clock,
                self.config.billow,
                self.config.sway,
            );

            for col in 0..self.config.width {
                let particle = self.grid.particle_mut(row, col);
                if particle.pinned {
                    continue;
                }

                let air = wind.wind_at(particle.position) * wind_scale;
                let drag = particle.velocity() * -self.config.drag;
                particle.apply_force(gravity * particle.mass + air + wake + drag);
            }
        }

        self.grid.integrate(dt);
    }

    pub fn solve_constraints(&mut self, iterations: usize) {
        self.grid.solve_constraints(iterations);
    }

    /// Move the attachment line rigidly so its centre sits at `point`
    pub fn set_attach_point(&mut self, point: Vec2) {
        let spacing = self.config.segment_length * self.config.width_ratio;
        let width = self.config.width;
        let row = self.grid.attach_row();
        for col in 0..width {
            let target = point + Vec2::new(column_offset(col, width, spacing), 0.0);
            self.grid.particle_mut(row, col).move_to(target);
        }
    }

    pub fn set_attach_velocity(&mut self, velocity: Vec2) {
        self.attach_velocity = velocity;
        let share = velocity * self.config.attach_velocity_share;
        let row = self.grid.attach_row();
        for col in 0..self.config.width {
            self.grid.particle_mut(row, col).set_velocity(share);
        }
    }

    pub fn attach_velocity(&self) -> Vec2 {
        self.attach_velocity
    }

    pub fn position(&self, row: usize, col: usize) -> Vec2 {
        self.grid.position(row, col)
    }

    pub fn velocity(&self, row: usize, col: usize) -> Vec2 {
        self.grid.velocity(row, col)
    }

    pub fn particle(&self, row: usize, col: usize) -> &Particle<Vec2> {
        self.grid.particle(row, col)
    }

    pub fn grid(&self) -> &ClothGrid<Vec2> {
        &self.grid
    }

    pub fn config(&self) -> &CapeConfig {
        &self.config
    }

    pub fn segments(&self) -> usize {
        self.config.segments
    }

    pub fn width(&self) -> usize {
        self.config.width
    }
}
