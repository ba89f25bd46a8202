//! The weather engine: four phase barriers per tick over all parcels.

use crate::config::WeatherConfig;
use crate::parcel::AirParcel;
use crate::wind::WindModel;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use skerry_core::Cell;
use skerry_space::{Adjacency, LandMask, Torus};

/// Advances one [`AirParcel`] per cell through four synchronized phases.
///
/// Each phase runs to completion across *all* parcels before the next
/// begins; this barrier discipline is what makes a tick deterministic:
///
/// 1. **Advect**: every parcel writes its current temperature and
///    humidity into the staged buffer of its downwind cell.
/// 2. **Commit & physics**: every parcel adopts its staged values, then
///    applies the local warming/evaporation deltas.
/// 3. **Diffuse**: every parcel is averaged with the mean of its 8
///    toroidal Moore neighbours, all reads taken from a pre-phase
///    snapshot so the result is independent of iteration order.
/// 4. **Classify**: cloud and rain flags are recomputed from
///    temperature-scaled humidity thresholds.
///
/// Before phase 1 the global wind is rotated by a Gaussian angle and each
/// parcel receives its per-tick wind vector from the saddle flow.
pub struct WeatherEngine {
    torus: Torus,
    config: WeatherConfig,
    wind: WindModel,
    /// One parcel per cell, canonical row-major order.
    parcels: Vec<AirParcel>,
}

impl WeatherEngine {
    /// Create the engine with one parcel per cell of `torus`.
    ///
    /// Parcels start at the configured temperature with humidity drawn
    /// uniformly from `[0, 1)` using `rng`.
    ///
    /// # Errors
    ///
    /// Returns the validation message if `config` contains a non-finite
    /// constant.
    pub fn new(
        torus: Torus,
        config: WeatherConfig,
        initial_wind_angle: f64,
        rng: &mut ChaCha8Rng,
    ) -> Result<Self, String> {
        config.validate()?;
        let wind = WindModel::new(initial_wind_angle, config.rotation_std_dev);
        let parcels = (0..torus.cell_count())
            .map(|_| AirParcel::new(config.initial_temperature, rng.gen::<f64>()))
            .collect();
        Ok(Self {
            torus,
            config,
            wind,
            parcels,
        })
    }

    /// The topology the engine runs over.
    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    /// The physics constants in effect.
    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// The current global wind vector.
    pub fn global_wind(&self) -> (f64, f64) {
        self.wind.global_wind()
    }

    /// The parcel at `cell` (any coordinate; wrapped onto the torus).
    pub fn parcel_at(&self, cell: Cell) -> &AirParcel {
        &self.parcels[self.torus.index_of(cell)]
    }

    /// All parcels in canonical cell order.
    pub fn parcels(&self) -> &[AirParcel] {
        &self.parcels
    }

    /// Advance the weather by one tick.
    ///
    /// `mask` must cover the same torus the engine was built over; the
    /// land layer is read, never written.
    pub fn step(&mut self, mask: &LandMask, rng: &mut ChaCha8Rng) {
        assert_eq!(
            mask.torus(),
            &self.torus,
            "land mask topology does not match the weather grid"
        );
        self.wind.rotate(rng);
        self.assign_winds();
        self.advect();
        self.commit_and_force(mask);
        self.diffuse();
        self.classify();
    }

    /// Give every parcel its per-tick wind vector from the flow field.
    fn assign_winds(&mut self) {
        for rank in 0..self.parcels.len() {
            let cell = self.torus.cell_at(rank);
            self.parcels[rank].wind = self.wind.local_wind(&self.torus, cell);
        }
    }

    /// Phase 1: carry temperature and humidity downwind.
    ///
    /// Staged buffers are first reset to each parcel's own values, so a
    /// cell nobody advects into keeps what it had. Parcels then write
    /// their *current* values into their target's staged buffer in
    /// canonical order; when several parcels share a target the last
    /// writer wins.
    fn advect(&mut self) {
        for parcel in &mut self.parcels {
            parcel.staged_temperature = parcel.temperature;
            parcel.staged_humidity = parcel.humidity;
        }
        for rank in 0..self.parcels.len() {
            let cell = self.torus.cell_at(rank);
            let (u, v) = self.parcels[rank].wind;
            let target = Cell::new(cell.x + u.round() as i32, cell.y + v.round() as i32);
            let target_rank = self.torus.index_of(target);
            let (temperature, humidity) = {
                let parcel = &self.parcels[rank];
                (parcel.temperature, parcel.humidity)
            };
            self.parcels[target_rank].staged_temperature = temperature;
            self.parcels[target_rank].staged_humidity = humidity;
        }
    }

    /// Phase 2: adopt staged values, then apply the local physics deltas.
    fn commit_and_force(&mut self, mask: &LandMask) {
        let config = self.config.clone();
        for rank in 0..self.parcels.len() {
            let cell = self.torus.cell_at(rank);
            let land = mask.is_land(cell);
            let parcel = &mut self.parcels[rank];

            parcel.temperature = parcel.staged_temperature;
            parcel.humidity = parcel.staged_humidity;

            let mut delta = if land {
                config.land_warming
            } else {
                config.water_warming
            };
            if parcel.cloudy {
                delta *= config.cloud_damping;
            }
            parcel.temperature += delta;
            if parcel.raining {
                parcel.temperature -= delta;
            }
            parcel.temperature -= parcel.wind_speed() * config.wind_chill;

            if parcel.raining {
                parcel.humidity *= config.rain_decay;
            } else if land {
                parcel.humidity += config.land_evaporation;
            } else {
                parcel.humidity += config.water_evaporation;
            }
        }
    }

    /// Phase 3: average each parcel with the mean of its Moore
    /// neighbours.
    ///
    /// All neighbour values come from a snapshot taken at the phase
    /// barrier, never from partially-diffused parcels, so results do not
    /// depend on iteration order.
    fn diffuse(&mut self) {
        let snapshot: Vec<(f64, f64)> = self
            .parcels
            .iter()
            .map(|parcel| (parcel.temperature, parcel.humidity))
            .collect();
        for rank in 0..self.parcels.len() {
            let cell = self.torus.cell_at(rank);
            let neighbours = self.torus.neighbourhood(cell, Adjacency::Moore);
            let mut temperature_sum = 0.0;
            let mut humidity_sum = 0.0;
            for neighbour in &neighbours {
                let (temperature, humidity) = snapshot[self.torus.index_of(*neighbour)];
                temperature_sum += temperature;
                humidity_sum += humidity;
            }
            let count = neighbours.len() as f64;
            let parcel = &mut self.parcels[rank];
            parcel.temperature = (snapshot[rank].0 + temperature_sum / count) / 2.0;
            parcel.humidity = (snapshot[rank].1 + humidity_sum / count) / 2.0;
        }
    }

    /// Phase 4: recompute cloud and rain flags from the thresholds.
    fn classify(&mut self) {
        let config = &self.config;
        for parcel in &mut self.parcels {
            parcel.cloudy =
                parcel.humidity > config.cloud_base + config.cloud_temp_coeff * parcel.temperature;
            parcel.raining =
                parcel.humidity > config.rain_base + config.rain_temp_coeff * parcel.temperature;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use skerry_core::{EntityId, LayerKind};
    use skerry_space::{LayerSchema, LayeredGrid};

    fn mask(width: u32, height: u32, land: &[(i32, i32)]) -> LandMask {
        let torus = Torus::new(width, height).unwrap();
        let schema = LayerSchema::new().with_layer("Land", LayerKind::Single);
        let mut grid = LayeredGrid::new(torus, schema);
        for (i, &(x, y)) in land.iter().enumerate() {
            grid.place(EntityId(i as u64), "Land", Cell::new(x, y)).unwrap();
        }
        LandMask::capture(&grid, "Land").unwrap()
    }

    fn engine(width: u32, height: u32, seed: u64) -> (WeatherEngine, ChaCha8Rng) {
        let torus = Torus::new(width, height).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let engine = WeatherEngine::new(torus, WeatherConfig::default(), 0.8, &mut rng).unwrap();
        (engine, rng)
    }

    #[test]
    fn invalid_config_is_rejected() {
        let torus = Torus::new(4, 4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = WeatherConfig {
            wind_chill: f64::INFINITY,
            ..WeatherConfig::default()
        };
        assert!(WeatherEngine::new(torus, config, 0.0, &mut rng).is_err());
    }

    #[test]
    fn full_tick_is_deterministic_per_seed() {
        let mask = mask(8, 8, &[(1, 1), (1, 2), (2, 1)]);
        let (mut a, mut rng_a) = engine(8, 8, 99);
        let (mut b, mut rng_b) = engine(8, 8, 99);
        for _ in 0..3 {
            a.step(&mask, &mut rng_a);
            b.step(&mask, &mut rng_b);
        }
        assert_eq!(a.parcels(), b.parcels());
        assert_eq!(a.global_wind(), b.global_wind());
    }

    #[test]
    fn different_seeds_diverge() {
        let mask = mask(8, 8, &[(1, 1)]);
        let (mut a, mut rng_a) = engine(8, 8, 1);
        let (mut b, mut rng_b) = engine(8, 8, 2);
        a.step(&mask, &mut rng_a);
        b.step(&mask, &mut rng_b);
        assert_ne!(a.parcels(), b.parcels());
    }

    #[test]
    fn diffusion_keeps_a_uniform_field_uniform() {
        let (mut engine, _) = engine(6, 6, 5);
        for parcel in &mut engine.parcels {
            parcel.temperature = 0.7;
            parcel.humidity = 0.4;
        }
        engine.diffuse();
        for parcel in engine.parcels() {
            assert!((parcel.temperature - 0.7).abs() < 1e-12);
            assert!((parcel.humidity - 0.4).abs() < 1e-12);
        }
    }

    #[test]
    fn diffusion_reads_the_snapshot_not_partial_updates() {
        // A single hot parcel: with snapshot semantics its western
        // neighbour and eastern neighbour must warm by exactly the same
        // amount, whatever order the cells are visited in.
        let (mut engine, _) = engine(5, 5, 5);
        for parcel in &mut engine.parcels {
            parcel.temperature = 0.0;
            parcel.humidity = 0.0;
        }
        let centre = engine.torus.index_of(Cell::new(2, 2));
        engine.parcels[centre].temperature = 8.0;
        engine.diffuse();
        let west = engine.parcel_at(Cell::new(1, 2)).temperature;
        let east = engine.parcel_at(Cell::new(3, 2)).temperature;
        assert_eq!(west, east);
        // Each neighbour sees the hot cell contribute 8/8 to its mean.
        assert!((west - 0.5).abs() < 1e-12, "got {west}");
    }

    #[test]
    fn advection_carries_values_downwind() {
        // Uniform wind: the target map is a bijection, every cell stages
        // exactly its upwind neighbour's values.
        let (mut engine, _) = engine(5, 5, 5);
        for parcel in &mut engine.parcels {
            parcel.temperature = 0.0;
            parcel.humidity = 0.0;
            parcel.wind = (1.0, 0.0);
        }
        let source = engine.torus.index_of(Cell::new(1, 1));
        engine.parcels[source].temperature = 3.0;
        engine.parcels[source].humidity = 0.9;
        engine.advect();
        let target = engine.parcel_at(Cell::new(2, 1));
        assert_eq!(target.staged_temperature, 3.0);
        assert_eq!(target.staged_humidity, 0.9);
        // The source stages what its own upwind neighbour carried.
        let source = engine.parcel_at(Cell::new(1, 1));
        assert_eq!(source.staged_temperature, 0.0);
    }

    #[test]
    fn advection_wraps_at_the_edge() {
        let (mut engine, _) = engine(5, 5, 5);
        for parcel in &mut engine.parcels {
            parcel.temperature = 0.0;
            parcel.humidity = 0.0;
            parcel.wind = (1.0, -1.0);
        }
        let source = engine.torus.index_of(Cell::new(4, 0));
        engine.parcels[source].temperature = 2.0;
        engine.advect();
        // (4, 0) + (1, -1) wraps to (0, 4) on both axes.
        let target = engine.parcel_at(Cell::new(0, 4));
        assert_eq!(target.staged_temperature, 2.0);
    }

    #[test]
    fn untargeted_cell_keeps_its_own_staged_values() {
        // Only one parcel advects away; nothing targets it, so its staged
        // buffer retains its own values after the reset pass.
        let (mut engine, _) = engine(5, 5, 5);
        for parcel in &mut engine.parcels {
            parcel.temperature = 0.0;
            parcel.humidity = 0.0;
            parcel.wind = (0.0, 0.0);
        }
        let source = engine.torus.index_of(Cell::new(2, 2));
        engine.parcels[source].temperature = 3.0;
        engine.parcels[source].wind = (2.0, 2.0);
        engine.advect();
        assert_eq!(engine.parcel_at(Cell::new(2, 2)).staged_temperature, 3.0);
    }

    #[test]
    fn rain_cancels_warming_and_decays_humidity() {
        let mask = mask(3, 3, &[]);
        let (mut engine, _) = engine(3, 3, 5);
        for parcel in &mut engine.parcels {
            parcel.temperature = 0.5;
            parcel.humidity = 1.0;
            parcel.staged_temperature = 0.5;
            parcel.staged_humidity = 1.0;
            parcel.wind = (0.0, 0.0);
            parcel.cloudy = true;
            parcel.raining = true;
        }
        engine.commit_and_force(&mask);
        for parcel in engine.parcels() {
            // Warming added then subtracted: temperature is unchanged.
            assert!((parcel.temperature - 0.5).abs() < 1e-12);
            assert!((parcel.humidity - 0.8).abs() < 1e-12);
        }
    }

    #[test]
    fn wind_speed_cools_the_parcel() {
        let mask = mask(3, 3, &[]);
        let (mut engine, _) = engine(3, 3, 5);
        for parcel in &mut engine.parcels {
            parcel.temperature = 0.5;
            parcel.humidity = 0.0;
            parcel.staged_temperature = 0.5;
            parcel.staged_humidity = 0.0;
            parcel.wind = (3.0, 4.0); // speed 5
            parcel.cloudy = false;
            parcel.raining = false;
        }
        engine.commit_and_force(&mask);
        let expected = 0.5 + 0.01 - 5.0 * 0.01;
        for parcel in engine.parcels() {
            assert!((parcel.temperature - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn land_warms_faster_than_water() {
        let mask = mask(3, 1, &[(0, 0)]);
        let (mut engine, _) = engine(3, 1, 5);
        for parcel in &mut engine.parcels {
            parcel.temperature = 0.0;
            parcel.humidity = 0.0;
            parcel.staged_temperature = 0.0;
            parcel.staged_humidity = 0.0;
            parcel.wind = (0.0, 0.0);
        }
        engine.commit_and_force(&mask);
        let land = engine.parcel_at(Cell::new(0, 0));
        let water = engine.parcel_at(Cell::new(1, 0));
        assert!(land.temperature > water.temperature);
        // Water evaporates faster than land.
        assert!(water.humidity > land.humidity);
    }

    #[test]
    fn classify_uses_temperature_scaled_thresholds() {
        let (mut engine, _) = engine(2, 2, 5);
        for parcel in &mut engine.parcels {
            parcel.temperature = 1.0;
            parcel.humidity = 1.0;
        }
        engine.classify();
        // cloud threshold 0.6 + 0.3 = 0.9 < 1.0; rain 0.6 + 0.5 = 1.1 > 1.0.
        for parcel in engine.parcels() {
            assert!(parcel.cloudy);
            assert!(!parcel.raining);
        }
        for parcel in &mut engine.parcels {
            parcel.humidity = 1.2;
        }
        engine.classify();
        for parcel in engine.parcels() {
            assert!(parcel.cloudy && parcel.raining);
        }
    }
}
