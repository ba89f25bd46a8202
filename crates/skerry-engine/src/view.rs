//! The read-only surface exposed to the visualization collaborator.

use crate::ship::ShipState;
use crate::world::World;
use skerry_core::{Cell, EntityId, EntityKind};

/// One occupant of a cell, reduced to display-relevant attributes.
///
/// The kind tag replaces dynamic dispatch on concrete entity types: the
/// renderer maps tag → portrayal with a lookup table and never needs the
/// entities themselves.
#[derive(Clone, Debug)]
pub struct OccupantView<'a> {
    /// The entity's id.
    pub id: EntityId,
    /// What kind of thing it is.
    pub kind: EntityKind,
    /// The layer it lives on.
    pub layer: &'static str,
    /// Display name, if it has one.
    pub name: Option<&'a str>,
    /// Ship state, for ship occupants only.
    pub ship_state: Option<ShipState>,
}

/// One cell's display state: terrain, weather, and occupants.
#[derive(Clone, Debug)]
pub struct CellView<'a> {
    /// The cell's position.
    pub cell: Cell,
    /// Whether the cell is land.
    pub land: bool,
    /// Parcel temperature.
    pub temperature: f64,
    /// Parcel humidity.
    pub humidity: f64,
    /// Parcel wind vector.
    pub wind: (f64, f64),
    /// Cloud flag.
    pub cloudy: bool,
    /// Rain flag.
    pub raining: bool,
    /// Everything standing in the cell, in layer-declaration order.
    pub occupants: Vec<OccupantView<'a>>,
}

impl World {
    /// Iterate every cell's display state in canonical order.
    ///
    /// This is the whole interface offered to the renderer: no mutation
    /// path leads back into the world from here.
    pub fn cells(&self) -> impl Iterator<Item = CellView<'_>> + '_ {
        self.grid().torus().cells().map(move |cell| {
            let parcel = self.weather().parcel_at(cell);
            let occupants = self
                .grid()
                .cell_contents(cell)
                .map(|id| {
                    let record = self.registry().get(id);
                    OccupantView {
                        id,
                        kind: record.map_or(EntityKind::LandTile, |r| r.kind),
                        layer: record.map_or("", |r| r.layer),
                        name: record.and_then(|r| r.name.as_deref()),
                        ship_state: self
                            .ships()
                            .iter()
                            .find(|ship| ship.id == id)
                            .map(|ship| ship.state()),
                    }
                })
                .collect();
            CellView {
                cell,
                land: self.land_mask().is_land(cell),
                temperature: parcel.temperature,
                humidity: parcel.humidity,
                wind: parcel.wind,
                cloudy: parcel.cloudy,
                raining: parcel.raining,
                occupants,
            }
        })
    }
}
