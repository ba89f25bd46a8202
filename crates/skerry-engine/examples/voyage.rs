//! Build a seeded archipelago, run it for a season, and print the log.
//!
//! ```sh
//! cargo run --example voyage
//! ```

use skerry_engine::{World, WorldConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = WorldConfig {
        width: 40,
        height: 28,
        islands: 3,
        land_fraction: 0.22,
        ports_per_island: 2,
        ships: 4,
        settlers: 12,
        seed: 1717,
        port_names: vec![
            "Vekka".into(),
            "Orlen".into(),
            "Skarholm".into(),
            "Brine Hollow".into(),
            "Tarn Quay".into(),
            "Mossund".into(),
        ],
        ship_names: vec![
            "Petrel".into(),
            "Gannet".into(),
            "Kittiwake".into(),
            "Stormcrow".into(),
        ],
        ..WorldConfig::default()
    };

    let mut world = World::new(config)?;
    world.run(120)?;

    // A coarse map: land, ports, ships, rain.
    let torus = *world.grid().torus();
    let mut rows = vec![vec!['.'; torus.width() as usize]; torus.height() as usize];
    for view in world.cells() {
        let glyph = if view.occupants.iter().any(|o| o.ship_state.is_some()) {
            'S'
        } else if view
            .occupants
            .iter()
            .any(|o| o.kind == skerry_core::EntityKind::Port)
        {
            'P'
        } else if view.land {
            '#'
        } else if view.raining {
            ','
        } else {
            '.'
        };
        rows[view.cell.y as usize][view.cell.x as usize] = glyph;
    }
    for row in rows {
        println!("{}", row.into_iter().collect::<String>());
    }

    println!();
    for line in world.events().rendered().iter().rev().take(12).rev() {
        println!("{line}");
    }
    println!(
        "ran {} ticks: {} events, global wind {:.2?},",
        world.tick_id(),
        world.events().events().len(),
        world.weather().global_wind(),
    );
    Ok(())
}
