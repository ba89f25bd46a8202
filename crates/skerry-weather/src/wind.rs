//! Global wind vector and the parametric flow field.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use skerry_core::Cell;
use skerry_space::Torus;

/// The rotating global wind and its combination with the saddle flow.
///
/// A single unit-length wind vector is shared by the whole world. Each
/// tick it is perturbed by a bounded random rotation (Gaussian angle, mean
/// zero), then a fixed quadratic saddle form over normalised grid
/// coordinates gives each cell its own wind vector:
///
/// ```text
/// u = wind.x − nx² + ny
/// v = wind.y + nx − ny²        nx, ny ∈ [−1, 1]
/// ```
#[derive(Clone, Debug)]
pub struct WindModel {
    wind: (f64, f64),
    rotation_std_dev: f64,
}

impl WindModel {
    /// Create a wind model pointing at `initial_angle` (radians).
    pub fn new(initial_angle: f64, rotation_std_dev: f64) -> Self {
        Self {
            wind: (initial_angle.cos(), initial_angle.sin()),
            rotation_std_dev,
        }
    }

    /// The current global wind vector.
    pub fn global_wind(&self) -> (f64, f64) {
        self.wind
    }

    /// Generate a standard Gaussian sample via the Box-Muller transform.
    /// Avoids the `rand_distr` dependency.
    fn gaussian(rng: &mut ChaCha8Rng) -> f64 {
        let u1: f64 = rng.gen::<f64>().max(1e-300); // avoid ln(0)
        let u2: f64 = rng.gen();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Rotate the global wind by a Gaussian angle drawn from `rng`.
    pub fn rotate(&mut self, rng: &mut ChaCha8Rng) {
        let angle = Self::gaussian(rng) * self.rotation_std_dev;
        let (sin, cos) = angle.sin_cos();
        let (u, v) = self.wind;
        self.wind = (u * cos - v * sin, u * sin + v * cos);
    }

    /// The per-cell wind vector: global wind plus the saddle flow.
    pub fn local_wind(&self, torus: &Torus, cell: Cell) -> (f64, f64) {
        let (nx, ny) = torus.normalised(cell);
        (
            self.wind.0 - nx * nx + ny,
            self.wind.1 + nx - ny * ny,
        )
    }
}
