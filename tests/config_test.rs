//! Map definition loading and the demo board

use hexrail::config::{self, MapDefinition};
use hexrail::map::{CompanyId, HexSide, RunThrough, Score, StationKind};

const LINE: &str = r#"
orientation:
  tile_orientation: NS
  letter_orientation: vertical
  even: A
tiles:
  - id: -1
    colour: white
    stations:
      - { id: city1, kind: city }
hexes:
  - { name: A2, tile: -1 }
  - { name: C2, tile: -1 }
  - { name: E2, tile: -1 }
"#;

/// Test that a minimal definition builds a configured map
#[test]
fn test_line_definition() {
    let mut map = MapDefinition::parse(LINE).unwrap().build().unwrap();
    assert!(map.is_configured());
    assert_eq!(map.hex_count(), 3);

    let a = map.locate("A2").unwrap();
    let c = map.locate("E2").unwrap();
    assert_eq!(map.get_hex_distance(a, c), Some(2));
    assert_eq!(map.get_city_distances(a), vec![1, 2]);
}

/// Test that a missing orientation attribute is a configuration error
#[test]
fn test_missing_orientation_attribute() {
    let yaml = LINE.replace("  letter_orientation: vertical\n", "");
    let error = MapDefinition::parse(&yaml).unwrap().build().unwrap_err();
    assert!(format!("{error:#}").contains("Letter orientation"));
}

/// Test that two tiles with the same id are rejected
#[test]
fn test_duplicate_tile_id() {
    let yaml = LINE.replace(
        "hexes:",
        "  - id: -1\n    colour: grey\nhexes:",
    );
    let error = MapDefinition::parse(&yaml).unwrap().build().unwrap_err();
    assert!(format!("{error:#}").contains("Duplicate tile id"));
}

/// Test that a hex naming an undefined stop type is rejected
#[test]
fn test_unknown_stop_type() {
    let yaml = LINE.replace(
        "{ name: C2, tile: -1 }",
        "{ name: C2, tile: -1, access: { type: HARBOUR } }",
    );
    assert!(MapDefinition::parse(&yaml).unwrap().build().is_err());
}

/// Test that a track to a station the tile lacks is rejected
#[test]
fn test_bad_track_point() {
    let yaml = LINE.replace(
        "      - { id: city1, kind: city }\n",
        "      - { id: city1, kind: city }\n    tracks:\n      - { from: side0, to: city2 }\n",
    );
    let error = MapDefinition::parse(&yaml).unwrap().build().unwrap_err();
    assert!(format!("{error:#}").contains("no station 2"));
}

/// Test that station number 0 is rejected
#[test]
fn test_station_zero_rejected() {
    let yaml = LINE.replace("{ id: city1, kind: city }", "{ id: city0, kind: city }");
    let error = MapDefinition::parse(&yaml).unwrap().build().unwrap_err();
    assert!(format!("{error:#}").contains("Invalid station id 'city0'"));
}

/// Test that a home on a city the hex does not have is rejected
#[test]
fn test_invalid_home_city() {
    let yaml = format!("{LINE}homes:\n  - {{ company: PRR, hex: A2, city: 3 }}\n");
    let error = MapDefinition::parse(&yaml).unwrap().build().unwrap_err();
    assert!(format!("{error:#}").contains("Invalid home city number"));
}

/// Test that malformed YAML is reported as an error
#[test]
fn test_malformed_yaml() {
    assert!(MapDefinition::parse("hexes: [ { name: A2").is_err());
}

/// Test that the demo board has the expected hexes, distances and costs
#[test]
fn test_demo_map() {
    let mut map = config::demo_map().unwrap();
    assert_eq!(map.hex_count(), 11);
    assert_eq!(map.tile_costs(), vec![40, 120]);

    let a2 = map.locate("A2").unwrap();
    let b3 = map.locate("B3").unwrap();
    let c4 = map.locate("C4").unwrap();

    // The river between B3 and C4 forces a detour
    assert_eq!(map.get_neighbour(b3, HexSide::get(5)), None);
    assert_eq!(map.get_neighbour(c4, HexSide::get(2)), None);
    assert_eq!(map.get_hex_distance(a2, c4), Some(3));
    assert_eq!(map.get_city_distances(a2), vec![1, 3, 4]);

    let prr = CompanyId::from("PRR");
    let nyc = CompanyId::from("NYC");
    assert_eq!(map.home_hexes(&prr), vec![a2]);
    assert_eq!(map.home_hexes(&nyc), vec![c4]);
    assert_eq!(map.destination_hexes(&prr), vec![c4]);
}

/// Test that the demo board's off-board and town stops resolve their access rules
#[test]
fn test_demo_map_offboard_access() {
    let map = config::demo_map().unwrap();
    let b1 = map.hex_by_name("B1").unwrap();
    let stop = b1.stop(1).unwrap();
    assert_eq!(stop.kind(), StationKind::OffMapCity);
    assert_eq!(stop.value(), 40);
    assert_eq!(stop.run_through(), RunThrough::No);
    assert_eq!(stop.score_type(), Score::Major);
    assert!(!stop.is_run_through_allowed_for(&CompanyId::from("PRR")));

    let town = map.hex_by_name("D5").unwrap().stop(1).unwrap();
    assert_eq!(town.score_type(), Score::Minor);
    assert!(town.loop_allowed());
}
