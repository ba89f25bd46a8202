//! Weather physics constants.

/// Physics constants for the weather engine.
///
/// All values must be finite; [`validate`](Self::validate) is called by
/// the engine constructor.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherConfig {
    /// Per-tick warming over land cells.
    pub land_warming: f64,
    /// Per-tick warming over water cells.
    pub water_warming: f64,
    /// Factor applied to the warming rate under cloud cover.
    pub cloud_damping: f64,
    /// Temperature lost per unit of wind speed.
    pub wind_chill: f64,
    /// Per-tick humidity gain over land cells.
    pub land_evaporation: f64,
    /// Per-tick humidity gain over water cells.
    pub water_evaporation: f64,
    /// Multiplicative humidity decay while raining.
    pub rain_decay: f64,
    /// Cloud threshold: cloudy when `humidity > cloud_base +
    /// cloud_temp_coeff * temperature`.
    pub cloud_base: f64,
    /// Temperature coefficient of the cloud threshold.
    pub cloud_temp_coeff: f64,
    /// Rain threshold: raining when `humidity > rain_base +
    /// rain_temp_coeff * temperature`.
    pub rain_base: f64,
    /// Temperature coefficient of the rain threshold.
    pub rain_temp_coeff: f64,
    /// Standard deviation (radians) of the per-tick global wind rotation.
    pub rotation_std_dev: f64,
    /// Starting temperature for every parcel.
    pub initial_temperature: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            land_warming: 0.012,
            water_warming: 0.01,
            cloud_damping: 0.75,
            wind_chill: 0.01,
            land_evaporation: 0.01,
            water_evaporation: 0.05,
            rain_decay: 0.8,
            cloud_base: 0.6,
            cloud_temp_coeff: 0.3,
            rain_base: 0.6,
            rain_temp_coeff: 0.5,
            rotation_std_dev: 0.5,
            initial_temperature: 0.7,
        }
    }
}

impl WeatherConfig {
    /// Check every constant for finiteness.
    ///
    /// # Errors
    ///
    /// Returns the name of the first non-finite constant.
    pub fn validate(&self) -> Result<(), String> {
        let named = [
            ("land_warming", self.land_warming),
            ("water_warming", self.water_warming),
            ("cloud_damping", self.cloud_damping),
            ("wind_chill", self.wind_chill),
            ("land_evaporation", self.land_evaporation),
            ("water_evaporation", self.water_evaporation),
            ("rain_decay", self.rain_decay),
            ("cloud_base", self.cloud_base),
            ("cloud_temp_coeff", self.cloud_temp_coeff),
            ("rain_base", self.rain_base),
            ("rain_temp_coeff", self.rain_temp_coeff),
            ("rotation_std_dev", self.rotation_std_dev),
            ("initial_temperature", self.initial_temperature),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(format!("{name} must be finite, got {value}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(WeatherConfig::default().validate().is_ok());
    }

    #[test]
    fn non_finite_constant_is_named() {
        let config = WeatherConfig {
            rain_decay: f64::NAN,
            ..WeatherConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("rain_decay"), "got: {err}");
    }
}
