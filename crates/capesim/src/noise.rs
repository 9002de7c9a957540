use ::noise::{NoiseFn, Perlin, Seedable};

/// Seeded gradient noise with fractal summation.
///
/// Wraps a Perlin permutation table. Outputs are continuous, zero on integer
/// lattice points and practically within [-1, 1]. Reseeding with the same
/// value always reproduces the same field.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    perlin: Perlin,
}

impl NoiseGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    pub fn reseed(&mut self, seed: u32) {
        self.perlin = self.perlin.set_seed(seed);
    }

    pub fn seed(&self) -> u32 {
        self.perlin.seed()
    }

    pub fn noise1(&self, x: f32) -> f32 {
        self.noise2(x, 0.0)
    }

    pub fn noise2(&self, x: f32, y: f32) -> f32 {
        self.perlin.get([x as f64, y as f64]) as f32
    }

    pub fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.perlin.get([x as f64, y as f64, z as f64]) as f32
    }

    /// Sum `octaves` copies of 2D noise, doubling frequency and scaling amplitude
    /// by `persistence` each time, normalized by the total amplitude.
    pub fn octave2(&self, x: f32, y: f32, octaves: u32, persistence: f32) -> f32 {
        fractal_sum(octaves, persistence, |frequency| {
            self.noise2(x * frequency, y * frequency)
        })
    }

    pub fn octave3(&self, x: f32, y: f32, z: f32, octaves: u32, persistence: f32) -> f32 {
        fractal_sum(octaves, persistence, |frequency| {
            self.noise3(x * frequency, y * frequency, z * frequency)
        })
    }
}

fn fractal_sum(octaves: u32, persistence: f32, sample: impl Fn(f32) -> f32) -> f32 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += sample(frequency) * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= 2.0;
    }

    if max_value > 0.0 { total / max_value } else { 0.0 }
}
