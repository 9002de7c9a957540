use super::{column_offset, motion_forces, row_factor};
use crate::config::CapeConfig3d;
use crate::constants::{MIN_DRAG_SPEED, MIN_LIFT_DIR_SQ, MIN_RIGHT_AXIS_SQ};
use crate::grid::{ClothGrid, GridStiffness};
use crate::particle::Particle;
use crate::wind::WindSampler;
use glam::Vec3;

/// Cape hanging off a character flying through 3D space.
///
/// Rows trail behind the attachment line along `-forward`, columns span the
/// character's shoulders along `right`. Besides gravity and wind, interior
/// particles feel aerodynamic drag and lift through their surface normal.
#[derive(Debug, Clone)]
pub struct Cape3d {
    grid: ClothGrid<Vec3>,
    config: CapeConfig3d,
    forward: Vec3,
    attach_velocity: Vec3,
    clock: f32,
}

/// Lateral axis for a heading, with a fallback when flying straight up or down
fn right_axis(forward: Vec3) -> Vec3 {
    let right = Vec3::Y.cross(forward).normalize_or_zero();
    if right.length_squared() < MIN_RIGHT_AXIS_SQ {
        Vec3::X.cross(forward).normalize_or_zero()
    } else {
        right
    }
}

impl Cape3d {
    /// Preconditions: `config.segments >= 2`, `config.width >= 2`, non-zero `forward`
    pub fn new(attach_point: Vec3, forward: Vec3, config: CapeConfig3d) -> Self {
        let forward = forward.normalize_or_zero();
        let right = right_axis(forward);
        let stiffness = GridStiffness {
            stretch: config.stiffness,
            lateral: config.stiffness * 0.9,
            diagonal: config.stiffness * 0.5,
            bend_rows: config.bend_stiffness,
            bend_columns: config.bend_stiffness * 0.6,
        };

        let grid = ClothGrid::new(config.segments, config.width, stiffness, config.damping, |row, col| {
            let position = attach_point - forward * (row as f32 * config.segment_length)
                + right * column_offset(col, config.width, config.width_spacing);
            (position, 1.0 + 0.08 * row as f32)
        });

        log::info!(
            "Created {}x{} 3d cape at {:?} heading {:?}",
            config.segments,
            config.width,
            attach_point,
            forward
        );

        Self {
            grid,
            config,
            forward,
            attach_velocity: Vec3::ZERO,
            clock: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, wind: &impl WindSampler<Vec3>) {
        self.clock += dt;
        let gravity = Vec3::new(0.0, -self.config.gravity, 0.0);
        let lateral = self.forward.cross(Vec3::Y);
        let segments = self.config.segments;

        for row in 0..segments {
            let wind_scale = self.config.wind_influence * (0.3 + 0.7 * row_factor(row, segments));
            let wake = motion_forces(
                self.attach_velocity,
                lateral,
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
                let velocity = particle.velocity();
                let speed = velocity.length();
                let drag = if speed > MIN_DRAG_SPEED {
                    velocity.normalize_or_zero() * (-self.config.drag * speed * speed)
                } else {
                    Vec3::ZERO
                };
                particle.apply_force(gravity * particle.mass + air + wake + drag);
            }
        }

        self.apply_aerodynamics(wind);
        self.grid.integrate(dt);
    }

    /// Pressure drag and lift through the surface of every interior particle
    fn apply_aerodynamics(&mut self, wind: &impl WindSampler<Vec3>) {
        let segments = self.config.segments;
        let width = self.config.width;

        for row in 1..segments.saturating_sub(1) {
            for col in 1..width.saturating_sub(1) {
                let normal = self.normal(row, col);
                let particle = self.grid.particle_mut(row, col);
                if particle.pinned {
                    continue;
                }

                let relative = wind.wind_at(particle.position) - particle.velocity();
                let pressure = relative.dot(normal);
                particle.apply_force(normal * (pressure * pressure.abs() * self.config.aerodynamic_drag));

                if pressure > 0.0 {
                    let lift_dir = Vec3::Y - normal * normal.y;
                    if lift_dir.length_squared() > MIN_LIFT_DIR_SQ {
                        let lift = pressure * pressure * self.config.lift_coefficient;
                        particle.apply_force(lift_dir.normalize() * lift);
                    }
                }
            }
        }
    }

    pub fn solve_constraints(&mut self, iterations: usize) {
        self.grid.solve_constraints(iterations);
    }

    /// Re-orient the attachment line along the new heading and move it to `point`
    pub fn set_attach_point(&mut self, point: Vec3, forward: Vec3) {
        let forward = forward.normalize_or_zero();
        if forward != Vec3::ZERO {
            self.forward = forward;
        }
        let right = right_axis(self.forward);
        let width = self.config.width;
        let row = self.grid.attach_row();

        for col in 0..width {
            let target = point + right * column_offset(col, width, self.config.width_spacing);
            self.grid.particle_mut(row, col).move_to(target);
        }
    }

    pub fn set_attach_velocity(&mut self, velocity: Vec3) {
        self.attach_velocity = velocity;
        let share = velocity * self.config.attach_velocity_share;
        let row = self.grid.attach_row();
        for col in 0..self.config.width {
            self.grid.particle_mut(row, col).set_velocity(share);
        }
    }

    fn has_interior(&self) -> bool {
        self.config.segments >= 3 && self.config.width >= 3
    }

    /// Surface normal from the four neighbours, with `row`/`col` clamped to the interior
    pub fn normal(&self, row: usize, col: usize) -> Vec3 {
        if !self.has_interior() {
            return Vec3::Z;
        }
        let row = row.clamp(1, self.config.segments - 2);
        let col = col.clamp(1, self.config.width - 2);

        let up = self.grid.position(row - 1, col);
        let down = self.grid.position(row + 1, col);
        let left = self.grid.position(row, col - 1);
        let right = self.grid.position(row, col + 1);

        let along_row = (right - left).normalize_or_zero();
        let along_column = (down - up).normalize_or_zero();
        along_row.cross(along_column).normalize_or_zero()
    }

    /// Mean interior normal, `+Z` when the cape has no interior
    pub fn average_normal(&self) -> Vec3 {
        if !self.has_interior() {
            return Vec3::Z;
        }
        let mut sum = Vec3::ZERO;
        for row in 1..self.config.segments - 1 {
            for col in 1..self.config.width - 1 {
                sum += self.normal(row, col);
            }
        }
        let average = sum.normalize_or_zero();
        if average == Vec3::ZERO { Vec3::Z } else { average }
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn attach_velocity(&self) -> Vec3 {
        self.attach_velocity
    }

    pub fn position(&self, row: usize, col: usize) -> Vec3 {
        self.grid.position(row, col)
    }

    pub fn velocity(&self, row: usize, col: usize) -> Vec3 {
        self.grid.velocity(row, col)
    }

    pub fn particle(&self, row: usize, col: usize) -> &Particle<Vec3> {
        self.grid.particle(row, col)
    }

    pub fn grid(&self) -> &ClothGrid<Vec3> {
        &self.grid
    }

    pub fn config(&self) -> &CapeConfig3d {
        &self.config
    }

    pub fn segments(&self) -> usize {
        self.config.segments
    }

    pub fn width(&self) -> usize {
        self.config.width
    }
}
