// Distance constraints skip pairs closer than this to avoid dividing by ~0
pub const MIN_CONSTRAINT_LENGTH: f32 = 1e-4;

// Bending constraints skip near-zero edges, near-zero axes and negligible errors
pub const MIN_BEND_EDGE: f32 = 1e-3;
pub const MIN_BEND_ERROR: f32 = 1e-3;

/// Central-difference step used by the curl operator in world units
pub const CURL_EPSILON: f32 = 0.5;

/// Vortices exert no swirl inside this distance from their axis
pub const VORTEX_CORE_RADIUS: f32 = 0.1;

/// Per-axis offsets that decorrelate the turbulence channels
pub const AXIS_OFFSETS: [f32; 3] = [0.0, 100.0, 200.0];
pub const AXIS_TIME_OFFSETS: [f32; 3] = [0.0, 50.0, 100.0];

pub const TURBULENCE_OCTAVES: u32 = 3;
pub const GUST_OCTAVES: u32 = 2;
pub const NOISE_PERSISTENCE: f32 = 0.5;

/// Gust noise runs at half the spatial frequency of the turbulence
pub const GUST_SPATIAL_FACTOR: f32 = 0.5;
pub const GUST_TIME_FACTOR: f32 = 0.3;

pub const DEFAULT_NOISE_SEED: u32 = 12345;
pub const DEFAULT_NOISE_SEED_Y: u32 = 54321;
pub const DEFAULT_NOISE_SEED_Z: u32 = 98765;

/// Below this squared length the lateral axis is re-derived from world X
pub const MIN_RIGHT_AXIS_SQ: f32 = 0.01;
pub const MIN_LIFT_DIR_SQ: f32 = 0.01;

/// Quadratic air drag only kicks in above this per-step speed
pub const MIN_DRAG_SPEED: f32 = 0.1;
