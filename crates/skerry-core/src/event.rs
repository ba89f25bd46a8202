//! Simulation events for the logging collaborator.

use crate::cell::Cell;
use crate::id::TickId;
use std::fmt;

/// A point-in-time weather observation taken by a ship at its own cell.
///
/// A pure side channel: ships read parcel state, never mutate it, and the
/// reading plays no part in state-machine correctness.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReading {
    /// Air temperature at the observed cell.
    pub temperature: f64,
    /// Humidity at the observed cell.
    pub humidity: f64,
    /// Per-cell wind vector at the observed cell.
    pub wind: (f64, f64),
    /// Whether the cell is under cloud cover.
    pub cloudy: bool,
    /// Whether it is raining at the cell.
    pub raining: bool,
}

/// What happened.
#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    /// A ship left its port, bound for another.
    Departure {
        /// Display name of the ship.
        ship: String,
        /// Port the ship left.
        origin: String,
        /// Port the ship is bound for.
        destination: String,
    },
    /// A ship reached its destination port.
    Arrival {
        /// Display name of the ship.
        ship: String,
        /// Port the ship arrived at.
        port: String,
    },
    /// A sailing ship's weather observation at its current cell.
    WeatherSnapshot {
        /// Display name of the observing ship.
        ship: String,
        /// Cell the observation was taken at.
        cell: Cell,
        /// The observation itself.
        reading: WeatherReading,
    },
    /// A non-fatal problem found during world setup.
    SetupWarning {
        /// Human-readable description of the degraded condition.
        message: String,
    },
}

/// An ordered, tick-tagged simulation event.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Tick on which the event was emitted (0 = world setup).
    pub tick: TickId,
    /// What happened.
    pub kind: EventKind,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[tick {}] ", self.tick)?;
        match &self.kind {
            EventKind::Departure {
                ship,
                origin,
                destination,
            } => write!(f, "{ship} departed {origin} for {destination}"),
            EventKind::Arrival { ship, port } => write!(f, "{ship} arrived at {port}"),
            EventKind::WeatherSnapshot { ship, cell, reading } => {
                let sky = if reading.raining {
                    "raining"
                } else if reading.cloudy {
                    "cloudy"
                } else {
                    "clear"
                };
                write!(
                    f,
                    "{ship} at {cell}: {sky}, wind {:.2} by {:.2}, temperature {:.1}",
                    reading.wind.0, reading.wind.1, reading.temperature
                )
            }
            EventKind::SetupWarning { message } => write!(f, "warning: {message}"),
        }
    }
}
