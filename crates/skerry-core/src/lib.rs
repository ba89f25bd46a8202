//! Core types for the Skerry archipelago simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! fundamental vocabulary shared by every other Skerry crate: typed IDs,
//! grid coordinates, layer occupancy kinds, entity tags, and the simulation
//! event types consumed by the logging collaborator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod cell;
mod event;
mod id;
mod layer;

pub use cell::Cell;
pub use event::{Event, EventKind, WeatherReading};
pub use id::{EntityId, TickId};
pub use layer::{EntityKind, LayerKind};
