use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use hexrail::config;
use hexrail::map::{HexCoordinates, MapManager};

#[derive(Parser)]
#[command(name = "hexrail")]
#[command(about = "18xx map topology: adjacency, hex distances and stop access")]
struct Cli {
    /// Map definition file (YAML); the built-in demo board when omitted
    #[arg(long)]
    map: Option<PathBuf>,

    /// Hex to measure distances from, e.g. A2
    #[arg(long)]
    from: Option<String>,

    /// Hex to measure the distance to (requires --from)
    #[arg(long, requires = "from")]
    to: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut map = match &cli.map {
        Some(path) => config::load_map(path)?,
        None => config::demo_map()?,
    };

    print_summary(&map);

    match (&cli.from, &cli.to) {
        (Some(from), Some(to)) => {
            let a = map.locate(from)?;
            let b = map.locate(to)?;
            match map.get_hex_distance(a, b) {
                Some(hops) => info!("Distance {from} -> {to}: {hops}"),
                None => info!("Distance {from} -> {to}: unreachable"),
            }
        }
        (Some(from), None) => {
            let a = map.locate(from)?;
            report_city_distances(&mut map, a);
        }
        _ => {
            let mut stations: Vec<HexCoordinates> = map
                .hexes()
                .filter(|hex| hex.has_stops())
                .map(|hex| hex.coordinates())
                .collect();
            stations.sort();
            for hex in stations {
                report_city_distances(&mut map, hex);
            }
        }
    }

    info!("=== DONE ===");
    Ok(())
}

fn print_summary(map: &MapManager) {
    info!("=== MAP SUMMARY ===");
    info!("Hexes: {}", map.hex_count());
    info!("Adjacencies: {}", map.adjacency_count());
    info!("Tiles: {}", map.tiles().tile_count());
    info!("Tile costs: {:?}", map.tile_costs());

    let mut hexes: Vec<_> = map.hexes().collect();
    hexes.sort_by_key(|hex| hex.coordinates());
    for hex in hexes {
        let neighbours: Vec<String> = map
            .neighbours(hex.coordinates())
            .into_iter()
            .map(|(side, neighbour)| format!("{}:{}", side.number(), map.hex_name(neighbour)))
            .collect();
        info!(
            "{} tile {} stops {} impassable {} invalid {} -> [{}]",
            hex.name(),
            hex.current_tile(),
            hex.stops().len(),
            hex.impassable_sides(),
            hex.invalid_sides(),
            neighbours.join(" ")
        );
        for stop in hex.stops() {
            info!(
                "  stop {} {:?} runTo {:?} runThrough {:?} loop {} score {:?}",
                stop.number(),
                stop.kind(),
                stop.run_to(),
                stop.run_through(),
                stop.loop_allowed(),
                stop.score_type()
            );
        }
    }
}

fn report_city_distances(map: &mut MapManager, hex: HexCoordinates) {
    let distances = map.get_city_distances(hex);
    info!("City distances from {}: {:?}", map.hex_name(hex), distances);
}
