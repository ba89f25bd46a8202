//! Per-cell atmospheric state.

/// One cell's atmospheric state.
///
/// Parcels are created once at world setup, mutated every tick, and never
/// destroyed during a run. The staged fields are the double buffer for the
/// advection phase: parcels write into their downwind target's staged
/// values, and the commit phase adopts them as the new baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct AirParcel {
    /// Air temperature (dimensionless model units).
    pub temperature: f64,
    /// Humidity; conceptually never negative.
    pub humidity: f64,
    /// Wind vector at this cell, reassigned every tick before advection.
    pub wind: (f64, f64),
    /// Whether humidity exceeds the cloud threshold.
    pub cloudy: bool,
    /// Whether humidity exceeds the rain threshold.
    pub raining: bool,
    /// Temperature staged by the advection phase.
    pub staged_temperature: f64,
    /// Humidity staged by the advection phase.
    pub staged_humidity: f64,
}

impl AirParcel {
    /// Create a calm parcel with the given starting state.
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
            wind: (0.0, 0.0),
            cloudy: false,
            raining: false,
            staged_temperature: temperature,
            staged_humidity: humidity,
        }
    }

    /// Magnitude of the wind vector.
    pub fn wind_speed(&self) -> f64 {
        let (u, v) = self.wind;
        (u * u + v * v).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_parcel_is_calm_and_clear() {
        let parcel = AirParcel::new(0.7, 0.4);
        assert_eq!(parcel.wind, (0.0, 0.0));
        assert!(!parcel.cloudy);
        assert!(!parcel.raining);
        assert_eq!(parcel.staged_temperature, 0.7);
        assert_eq!(parcel.staged_humidity, 0.4);
    }

    #[test]
    fn wind_speed_is_vector_magnitude() {
        let mut parcel = AirParcel::new(0.0, 0.0);
        parcel.wind = (3.0, 4.0);
        assert!((parcel.wind_speed() - 5.0).abs() < 1e-12);
    }
}
