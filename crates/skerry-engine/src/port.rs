//! Ports: named harbours on island coasts.

use skerry_core::{Cell, EntityId};

/// A named harbour.
///
/// Created during world setup and immutable thereafter. The name is the
/// key into the sea-lane table; the position is the first and last cell
/// of every lane touching the port.
#[derive(Clone, Debug)]
pub struct Port {
    /// The registry id of the port entity.
    pub id: EntityId,
    /// Unique display name (opaque string from the naming collaborator).
    pub name: String,
    /// Grid position, on an island's coast.
    pub position: Cell,
}
