//! Skerry: a procedural archipelago world simulator.
//!
//! This is the top-level facade crate re-exporting the public API from
//! all Skerry sub-crates. For most users, adding `skerry` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use skerry::prelude::*;
//!
//! let mut world = World::new(WorldConfig {
//!     width: 24,
//!     height: 16,
//!     islands: 2,
//!     land_fraction: 0.2,
//!     seed: 7,
//!     ..WorldConfig::default()
//! })
//! .unwrap();
//!
//! world.run(10).unwrap();
//! assert_eq!(world.tick_id(), skerry::types::TickId(10));
//! for line in world.events().rendered() {
//!     println!("{line}");
//! }
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `skerry-core` | IDs, cells, layer kinds, events |
//! | [`space`] | `skerry-space` | Torus, layered grid, land mask |
//! | [`weather`] | `skerry-weather` | Parcels and the four-phase engine |
//! | [`route`] | `skerry-route` | Navigable graph and sea lanes |
//! | [`engine`] | `skerry-engine` | World assembly, tick loop, agents |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`skerry-core`).
pub use skerry_core as types;

/// Toroidal topology and layered-grid storage (`skerry-space`).
///
/// Provides [`space::Torus`], [`space::LayeredGrid`], [`space::LandMask`],
/// and [`space::DistanceToLandField`].
pub use skerry_space as space;

/// The weather cellular automaton (`skerry-weather`).
///
/// [`weather::WeatherEngine`] advances one [`weather::AirParcel`] per
/// cell through four synchronized phases per tick.
pub use skerry_weather as weather;

/// Sea-lane routing (`skerry-route`).
///
/// [`route::SeaLaneTable`] caches a shortest lane for every connected
/// pair of ports.
pub use skerry_route as route;

/// World assembly, tick loop, and agents (`skerry-engine`).
///
/// [`engine::World`] owns the grid, the weather, the lanes, and every
/// agent; [`engine::World::tick`] advances everything once.
pub use skerry_engine as engine;

/// Common imports for typical Skerry usage.
///
/// ```rust
/// use skerry::prelude::*;
/// ```
pub mod prelude {
    // Core vocabulary
    pub use skerry_core::{Cell, EntityId, EntityKind, Event, EventKind, LayerKind, TickId};

    // Space
    pub use skerry_space::{
        Adjacency, DistanceToLandField, GridError, LandMask, LayerSchema, LayeredGrid, Torus,
    };

    // Weather
    pub use skerry_weather::{AirParcel, WeatherConfig, WeatherEngine};

    // Routing
    pub use skerry_route::{CoastPreference, LaneDiagnostic, SeaLaneTable};

    // Engine
    pub use skerry_engine::{
        ConfigError, Ship, ShipState, World, WorldConfig, WorldError,
    };
}
