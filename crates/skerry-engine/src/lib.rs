//! World assembly, tick loop, and agents for the Skerry archipelago
//! simulator.
//!
//! [`World::new`] assembles everything from a validated [`WorldConfig`]:
//! the land-generation collaborator populates the Land layer, the weather
//! engine and distance-to-land field derive from the captured mask, ports
//! go on the coasts, and the sea-lane table is computed last. Each
//! [`World::tick`] runs the weather's four phase barriers to completion,
//! then steps every agent once in a freshly randomized order.
//!
//! The world is single-threaded by construction: `tick` takes `&mut
//! self`, so library callers get compile-time exclusion over the grid and
//! the lane table instead of locks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod agent;
mod config;
mod entity;
mod event;
mod port;
mod settler;
mod ship;
mod view;
mod world;
mod worldgen;

pub use agent::AgentContext;
pub use config::{
    default_schema, ConfigError, WorldConfig, LAND_LAYER, PEOPLE_LAYER, SHIPS_LAYER,
};
pub use entity::{EntityRecord, EntityRegistry};
pub use event::EventLog;
pub use port::Port;
pub use settler::Settler;
pub use ship::{Ship, ShipState};
pub use view::{CellView, OccupantView};
pub use world::{World, WorldError};
pub use worldgen::{Island, NamePool};
