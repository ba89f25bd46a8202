//! Layer occupancy disciplines and entity tags.

use std::fmt;

/// Occupancy discipline of a grid layer.
///
/// Declared per layer name when the grid schema is built and fixed for the
/// lifetime of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// At most one entity per cell. Placing into an occupied slot fails.
    Single,
    /// A set of entities per cell. Re-inserting a member is a no-op;
    /// membership never contains duplicates.
    Multi,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Multi => write!(f, "multi"),
        }
    }
}

/// Tag identifying what kind of thing an entity is.
///
/// The read-only view hands these to the renderer in place of dynamic
/// dispatch on concrete entity types; the renderer maps tag → portrayal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// One tile of an island.
    LandTile,
    /// A person wandering an island.
    Settler,
    /// A named harbour that ships sail between.
    Port,
    /// A ship travelling a sea lane.
    Ship,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LandTile => write!(f, "land"),
            Self::Settler => write!(f, "settler"),
            Self::Port => write!(f, "port"),
            Self::Ship => write!(f, "ship"),
        }
    }
}
