//! The per-tick context handed to each scheduled agent.

use crate::event::EventLog;
use crate::port::Port;
use indexmap::IndexMap;
use rand_chacha::ChaCha8Rng;
use skerry_core::TickId;
use skerry_route::SeaLaneTable;
use skerry_space::LayeredGrid;
use skerry_weather::WeatherEngine;

/// Everything an agent may touch during its step.
///
/// The grid and the event log are the only mutable surfaces; lanes,
/// ports, and weather are read-only. The RNG is the world's single
/// deterministic stream, threaded through explicitly so no agent ever
/// reaches for a hidden global.
pub struct AgentContext<'a> {
    /// The tick being executed.
    pub tick: TickId,
    /// The shared grid; all agent movement funnels through it.
    pub grid: &'a mut LayeredGrid,
    /// The precomputed sea lanes.
    pub lanes: &'a SeaLaneTable,
    /// All ports, in deterministic insertion order.
    pub ports: &'a IndexMap<String, Port>,
    /// The weather engine, for read-only observations.
    pub weather: &'a WeatherEngine,
    /// The world's RNG stream.
    pub rng: &'a mut ChaCha8Rng,
    /// The event journal.
    pub events: &'a mut EventLog,
    /// Per-tick probability that a docked ship departs.
    pub departure_probability: f64,
}
