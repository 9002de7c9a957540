pub use crate::cape::{Cape, Cape3d};
pub use crate::config::{
    CapeConfig, CapeConfig3d, CapeSimConfig, GustSchedulerConfig, SolverConfig, WindConfig, WindConfig3d,
};
pub use crate::constraint::{BendingConstraint, DistanceConstraint};
pub use crate::grid::{ClothGrid, GridStiffness};
pub use crate::noise::NoiseGenerator;
pub use crate::particle::Particle;
pub use crate::vector::SimVector;
pub use crate::wind::scheduler::WindEvent;
pub use crate::wind::{Gust, GustScheduler, Lifetime, Vortex, WindField, WindField3d, WindSampler};
