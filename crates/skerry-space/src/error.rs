//! Error types for topology construction and grid mutation.

use skerry_core::Cell;
use std::fmt;

/// Errors arising from torus construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a torus with a zero-length axis.
    EmptySpace,
    /// An axis exceeds the maximum representable size.
    DimensionTooLarge {
        /// Which axis was too large.
        name: &'static str,
        /// The offending value.
        value: u32,
        /// The maximum allowed value.
        max: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "torus must have at least one cell per axis"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
        }
    }
}

impl std::error::Error for SpaceError {}

/// Errors arising from grid mutation.
///
/// Each variant is a programming-contract violation on the caller's part:
/// the grid fails fast rather than silently repairing state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A `Single` layer slot at the target cell is already filled.
    OccupiedSlot {
        /// The layer whose slot was filled.
        layer: String,
        /// The cell that was targeted.
        cell: Cell,
    },
    /// The named layer is not part of the grid's schema.
    InvalidLayer {
        /// The unknown layer name.
        layer: String,
    },
    /// The entity being removed is not present in the slot.
    NotPresent {
        /// The layer that was searched.
        layer: String,
        /// The cell that was searched.
        cell: Cell,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OccupiedSlot { layer, cell } => {
                write!(f, "layer '{layer}' slot at {cell} is already occupied")
            }
            Self::InvalidLayer { layer } => {
                write!(f, "layer '{layer}' is not declared in the grid schema")
            }
            Self::NotPresent { layer, cell } => {
                write!(f, "entity not present in layer '{layer}' at {cell}")
            }
        }
    }
}

impl std::error::Error for GridError {}
