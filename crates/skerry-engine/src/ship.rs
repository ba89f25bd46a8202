//! Ships: the two-state agents that consume sea lanes and weather.

use crate::agent::AgentContext;
use crate::config::SHIPS_LAYER;
use crate::port::Port;
use rand::Rng;
use skerry_core::{Cell, EntityId, EventKind, WeatherReading};
use skerry_space::GridError;

/// Display state of a ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipState {
    /// Docked at its current port.
    AtPort,
    /// Under way along a bound lane.
    Sailing,
}

/// The lane a sailing ship is bound to.
///
/// Only exists while the ship is under way, so "sailing without a lane"
/// is unrepresentable.
#[derive(Clone, Debug)]
struct Voyage {
    destination: String,
    lane: Vec<Cell>,
    step: usize,
}

/// A ship travelling scripted sea lanes between ports.
///
/// Each tick while docked it departs with a fixed probability toward a
/// uniformly sampled port, silently staying put when no lane connects
/// the pair. Under way it advances one lane coordinate per tick; on the
/// tick after reaching the final coordinate it flips back to docked and
/// emits an arrival event.
#[derive(Clone, Debug)]
pub struct Ship {
    /// Registry id of the ship entity.
    pub id: EntityId,
    /// Display name (opaque string from the naming collaborator).
    pub name: String,
    current_port: String,
    position: Cell,
    voyage: Option<Voyage>,
}

impl Ship {
    /// Create a docked ship at `starting_port`.
    pub fn new(id: EntityId, name: impl Into<String>, starting_port: &Port) -> Self {
        Self {
            id,
            name: name.into(),
            current_port: starting_port.name.clone(),
            position: starting_port.position,
            voyage: None,
        }
    }

    /// Current state, derived from whether a lane is bound.
    pub fn state(&self) -> ShipState {
        if self.voyage.is_some() {
            ShipState::Sailing
        } else {
            ShipState::AtPort
        }
    }

    /// The port the ship is docked at, or last departed from.
    pub fn current_port(&self) -> &str {
        &self.current_port
    }

    /// The port the ship is bound for, if under way.
    pub fn destination(&self) -> Option<&str> {
        self.voyage.as_ref().map(|voyage| voyage.destination.as_str())
    }

    /// Current grid position.
    pub fn position(&self) -> Cell {
        self.position
    }

    /// Current index into the bound lane, if under way.
    pub fn step_index(&self) -> Option<usize> {
        self.voyage.as_ref().map(|voyage| voyage.step)
    }

    /// Run one tick of the ship's state machine.
    ///
    /// Grid errors indicate an internal inconsistency (the ship missing
    /// from its own cell) and poison the tick.
    pub fn step(&mut self, ctx: &mut AgentContext<'_>) -> Result<(), GridError> {
        // Observation hook: read-only weather snapshot before the
        // transition is evaluated. Only meaningful under way.
        if self.voyage.is_some() {
            self.observe_weather(ctx);
        }

        if self.voyage.is_none() {
            if ctx.rng.gen::<f64>() < ctx.departure_probability {
                self.choose_destination(ctx);
            }
            return Ok(());
        }
        self.sail(ctx)
    }

    /// Sample a candidate port and depart if a lane exists.
    ///
    /// The candidate is drawn uniformly from *all* ports, including the
    /// current one. Lanes never connect a port to itself, so that draw,
    /// like any other laneless pair, is abandoned silently until the
    /// next tick.
    fn choose_destination(&mut self, ctx: &mut AgentContext<'_>) {
        if ctx.ports.is_empty() {
            return;
        }
        let index = ctx.rng.gen_range(0..ctx.ports.len());
        let Some((candidate, _)) = ctx.ports.get_index(index) else {
            return;
        };
        let Some(lane) = ctx.lanes.lane(&self.current_port, candidate) else {
            return;
        };
        self.voyage = Some(Voyage {
            destination: candidate.clone(),
            lane: lane.to_vec(),
            step: 0,
        });
        ctx.events.record(
            ctx.tick,
            EventKind::Departure {
                ship: self.name.clone(),
                origin: self.current_port.clone(),
                destination: candidate.clone(),
            },
        );
    }

    /// Advance one lane coordinate, or arrive.
    fn sail(&mut self, ctx: &mut AgentContext<'_>) -> Result<(), GridError> {
        let Some(voyage) = self.voyage.as_mut() else {
            return Ok(());
        };
        voyage.step += 1;
        if voyage.step >= voyage.lane.len() {
            // Already on the final coordinate from the previous tick:
            // no grid move, just flip back to docked.
            if let Some(voyage) = self.voyage.take() {
                self.current_port = voyage.destination;
                ctx.events.record(
                    ctx.tick,
                    EventKind::Arrival {
                        ship: self.name.clone(),
                        port: self.current_port.clone(),
                    },
                );
            }
            return Ok(());
        }
        let target = voyage.lane[voyage.step];
        ctx.grid.relocate(self.id, SHIPS_LAYER, self.position, target)?;
        self.position = target;
        Ok(())
    }

    fn observe_weather(&self, ctx: &mut AgentContext<'_>) {
        let parcel = ctx.weather.parcel_at(self.position);
        ctx.events.record(
            ctx.tick,
            EventKind::WeatherSnapshot {
                ship: self.name.clone(),
                cell: self.position,
                reading: WeatherReading {
                    temperature: parcel.temperature,
                    humidity: parcel.humidity,
                    wind: parcel.wind,
                    cloudy: parcel.cloudy,
                    raining: parcel.raining,
                },
            },
        );
    }
}
