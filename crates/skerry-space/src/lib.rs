//! Toroidal topology and layered-grid storage for Skerry worlds.
//!
//! The [`Torus`] supplies pure coordinate math: wrapping, 4- and
//! 8-adjacency, wrap-aware distance, and canonical row-major ordering. The
//! [`LayeredGrid`] layers entity occupancy on top of it: one slot per
//! declared layer per cell, with `Single` or `Multi` discipline. The
//! [`LandMask`] and [`DistanceToLandField`] are read-only derivations
//! consumed by the weather engine and the sea-lane router.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod distance_field;
mod error;
mod grid;
mod land;
mod schema;
mod torus;

pub use distance_field::DistanceToLandField;
pub use error::{GridError, SpaceError};
pub use grid::LayeredGrid;
pub use land::LandMask;
pub use schema::LayerSchema;
pub use torus::{Adjacency, Torus};
