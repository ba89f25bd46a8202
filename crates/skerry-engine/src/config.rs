//! World configuration and validation.

use skerry_core::LayerKind;
use skerry_route::CoastPreference;
use skerry_space::{LayerSchema, SpaceError};
use skerry_weather::WeatherConfig;
use std::error::Error;
use std::fmt;

/// Name of the `Single` layer holding island tiles.
pub const LAND_LAYER: &str = "Land";
/// Name of the `Multi` layer holding ports and ships.
pub const SHIPS_LAYER: &str = "Ships";
/// Name of the `Multi` layer holding settlers.
pub const PEOPLE_LAYER: &str = "People";

/// Construction-time configuration for a [`World`](crate::World).
///
/// Validated by [`validate()`](Self::validate) before any allocation
/// happens; a world is never half-built from a bad configuration.
/// Display names for ports, ships, and settlers come from the naming
/// collaborator as opaque strings; when a list runs short the engine
/// synthesizes numbered fallbacks.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Layer schema; must declare the `Land`, `Ships`, and `People`
    /// layers with their standard kinds.
    pub schema: LayerSchema,
    /// Number of islands to seed.
    pub islands: u32,
    /// Fraction of the grid to cover with land, in `[0, 1)`.
    pub land_fraction: f64,
    /// Ports placed on the coast of each island.
    pub ports_per_island: u32,
    /// Number of ships.
    pub ships: u32,
    /// Number of settlers.
    pub settlers: u32,
    /// Initial global wind angle, radians.
    pub initial_wind_angle: f64,
    /// Weather physics constants.
    pub weather: WeatherConfig,
    /// Sign convention for sea-lane edge weights.
    pub coast_preference: CoastPreference,
    /// Per-tick probability that a docked ship picks a destination.
    pub departure_probability: f64,
    /// Master seed for the world's RNG stream.
    pub seed: u64,
    /// Port display names, consumed in order.
    pub port_names: Vec<String>,
    /// Ship display names, consumed in order.
    pub ship_names: Vec<String>,
    /// Settler display names, consumed in order.
    pub settler_names: Vec<String>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 48,
            height: 32,
            schema: default_schema(),
            islands: 3,
            land_fraction: 0.25,
            ports_per_island: 2,
            ships: 5,
            settlers: 20,
            initial_wind_angle: 0.0,
            weather: WeatherConfig::default(),
            coast_preference: CoastPreference::default(),
            departure_probability: 0.25,
            seed: 0,
            port_names: Vec::new(),
            ship_names: Vec::new(),
            settler_names: Vec::new(),
        }
    }
}

/// The standard three-layer schema.
pub fn default_schema() -> LayerSchema {
    LayerSchema::new()
        .with_layer(LAND_LAYER, LayerKind::Single)
        .with_layer(SHIPS_LAYER, LayerKind::Multi)
        .with_layer(PEOPLE_LAYER, LayerKind::Multi)
}

impl WorldConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Space(SpaceError::EmptySpace));
        }
        for (name, kind) in [
            (LAND_LAYER, LayerKind::Single),
            (SHIPS_LAYER, LayerKind::Multi),
            (PEOPLE_LAYER, LayerKind::Multi),
        ] {
            match self.schema.kind_of(name) {
                None => return Err(ConfigError::MissingLayer { name }),
                Some(declared) if declared != kind => {
                    return Err(ConfigError::WrongLayerKind {
                        name,
                        expected: kind,
                        declared,
                    })
                }
                Some(_) => {}
            }
        }
        if !self.land_fraction.is_finite()
            || self.land_fraction < 0.0
            || self.land_fraction >= 1.0
        {
            return Err(ConfigError::InvalidLandFraction {
                value: self.land_fraction,
            });
        }
        if !self.departure_probability.is_finite()
            || !(0.0..=1.0).contains(&self.departure_probability)
        {
            return Err(ConfigError::InvalidProbability {
                value: self.departure_probability,
            });
        }
        if !self.initial_wind_angle.is_finite() {
            return Err(ConfigError::InvalidWindAngle {
                value: self.initial_wind_angle,
            });
        }
        if self.land_fraction > 0.0 && self.islands == 0 {
            return Err(ConfigError::NoIslandsForLand);
        }
        self.weather
            .validate()
            .map_err(|reason| ConfigError::InvalidWeather { reason })?;
        Ok(())
    }
}

/// Errors detected during [`WorldConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The grid dimensions are unusable.
    Space(SpaceError),
    /// A required layer is missing from the schema.
    MissingLayer {
        /// The missing layer's name.
        name: &'static str,
    },
    /// A required layer is declared with the wrong occupancy kind.
    WrongLayerKind {
        /// The layer's name.
        name: &'static str,
        /// The kind the engine requires.
        expected: LayerKind,
        /// The kind the schema declares.
        declared: LayerKind,
    },
    /// `land_fraction` is outside `[0, 1)` or non-finite.
    InvalidLandFraction {
        /// The offending value.
        value: f64,
    },
    /// `departure_probability` is outside `[0, 1]` or non-finite.
    InvalidProbability {
        /// The offending value.
        value: f64,
    },
    /// `initial_wind_angle` is non-finite.
    InvalidWindAngle {
        /// The offending value.
        value: f64,
    },
    /// A positive land fraction needs at least one island to grow from.
    NoIslandsForLand,
    /// A weather constant failed validation.
    InvalidWeather {
        /// The weather config's own message.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(err) => write!(f, "{err}"),
            Self::MissingLayer { name } => {
                write!(f, "schema must declare the '{name}' layer")
            }
            Self::WrongLayerKind {
                name,
                expected,
                declared,
            } => write!(
                f,
                "layer '{name}' must be {expected}, schema declares {declared}"
            ),
            Self::InvalidLandFraction { value } => {
                write!(f, "land_fraction must be in [0, 1), got {value}")
            }
            Self::InvalidProbability { value } => {
                write!(f, "departure_probability must be in [0, 1], got {value}")
            }
            Self::InvalidWindAngle { value } => {
                write!(f, "initial_wind_angle must be finite, got {value}")
            }
            Self::NoIslandsForLand => {
                write!(f, "land_fraction > 0 requires at least one island")
            }
            Self::InvalidWeather { reason } => write!(f, "weather: {reason}"),
        }
    }
}

impl Error for ConfigError {}

impl From<SpaceError> for ConfigError {
    fn from(err: SpaceError) -> Self {
        Self::Space(err)
    }
}
