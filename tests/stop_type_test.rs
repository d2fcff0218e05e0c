//! Stop access rules and their fallback chain

use hexrail::map::{
    AccessLayers, AccessSpec, BaseToken, CompanyId, HexCoordinates, Loop, RunThrough, RunTo,
    Score, Station, StationKind, StationNumber, Stop, StopId, StopType, StopTypeDefaults,
    TokenId, CITY, OFFMAP, TOWN,
};

fn rules(type_name: Option<&str>) -> AccessSpec {
    AccessSpec {
        type_name: type_name.map(str::to_string),
        ..AccessSpec::default()
    }
}

fn stop_with(station: &Station, hex: StopType, tile: StopType, defaults: &StopTypeDefaults) -> Stop {
    let kind_default = station
        .kind()
        .default_stop_type()
        .and_then(|name| defaults.get(name))
        .cloned()
        .unwrap_or_else(StopType::null);
    let layers = AccessLayers {
        hex,
        tile,
        station: station.stop_type().clone(),
        kind_default,
    };
    Stop::new(
        StopId {
            hex: HexCoordinates::new(1, 2),
            number: 1,
        },
        station,
        layers,
    )
}

/// Test that CITY, TOWN and OFFMAP are seeded
#[test]
fn test_system_defaults() {
    let defaults = StopTypeDefaults::default();

    let city = defaults.get(CITY).unwrap();
    assert_eq!(city.run_to(), Some(RunTo::Yes));
    assert_eq!(city.run_through(), Some(RunThrough::Yes));
    assert_eq!(city.loop_allowed(), Some(Loop::Yes));
    assert_eq!(city.score(), Some(Score::Major));

    let town = defaults.get(TOWN).unwrap();
    assert_eq!(town.score(), Some(Score::Minor));
    assert_eq!(town.run_through(), Some(RunThrough::Yes));

    let offmap = defaults.get(OFFMAP).unwrap();
    assert_eq!(offmap.run_to(), Some(RunTo::Yes));
    assert_eq!(offmap.run_through(), Some(RunThrough::No));
    assert_eq!(offmap.loop_allowed(), Some(Loop::No));
    assert_eq!(offmap.score(), Some(Score::Major));
}

/// Test that map defaults override named types and add new ones
#[test]
fn test_parse_defaults_overrides_and_adds() {
    let specs = vec![
        AccessSpec {
            run_through: Some("tokenOnly".to_string()),
            ..rules(Some(CITY))
        },
        AccessSpec {
            run_to: Some("no".to_string()),
            ..rules(Some("MINE"))
        },
    ];
    let defaults = StopTypeDefaults::parse_defaults(&specs).unwrap();

    let city = defaults.get(CITY).unwrap();
    assert_eq!(city.run_through(), Some(RunThrough::TokenOnly));
    assert_eq!(city.run_to(), Some(RunTo::Yes));

    let mine = defaults.get("MINE").unwrap();
    assert_eq!(mine.run_to(), Some(RunTo::No));
    assert_eq!(mine.score(), None);
}

/// Test that a default stop type must name its type
#[test]
fn test_parse_defaults_requires_type_name() {
    let specs = vec![AccessSpec {
        run_to: Some("no".to_string()),
        ..AccessSpec::default()
    }];
    assert!(StopTypeDefaults::parse_defaults(&specs).is_err());
}

/// Test that unknown types and bad values are rejected
#[test]
fn test_parse_stop_errors() {
    let defaults = StopTypeDefaults::default();
    assert!(defaults.parse_stop("B3", Some(&rules(Some("HARBOUR")))).is_err());

    let bad_value = AccessSpec {
        loop_allowed: Some("sometimes".to_string()),
        ..AccessSpec::default()
    };
    assert!(defaults.parse_stop("B3", Some(&bad_value)).is_err());
}

/// Test that a missing access block gives the NULL type
#[test]
fn test_parse_stop_without_rules_is_null() {
    let defaults = StopTypeDefaults::default();
    let stop_type = defaults.parse_stop("B3", None).unwrap();
    assert!(stop_type.is_null());
    assert_eq!(stop_type, StopType::null());
}

/// Test that local overrides are layered over the named type
#[test]
fn test_parse_stop_layers_overrides_on_named_type() {
    let defaults = StopTypeDefaults::default();
    let overridden = AccessSpec {
        score: Some("minor".to_string()),
        ..rules(Some(OFFMAP))
    };
    let stop_type = defaults.parse_stop("A1", Some(&overridden)).unwrap();
    assert_eq!(stop_type.score(), Some(Score::Minor));
    assert_eq!(stop_type.run_through(), Some(RunThrough::No));
    assert_ne!(stop_type, StopType::offmap());
}

/// Test that a station's own type beats its kind's default
#[test]
fn test_station_override_beats_named_default() {
    let defaults = StopTypeDefaults::default();
    let no_through = AccessSpec {
        run_through: Some("no".to_string()),
        ..AccessSpec::default()
    };
    let station = Station::new(StationNumber(1), StationKind::City, 1, 20)
        .with_stop_type(defaults.parse_stop("city1", Some(&no_through)).unwrap());

    let stop = stop_with(&station, StopType::null(), StopType::null(), &defaults);
    assert_eq!(stop.run_through(), RunThrough::No);
    // Unset fields still come from the CITY default
    assert_eq!(stop.run_to(), RunTo::Yes);
    assert!(stop.loop_allowed());
    assert_eq!(stop.score_type(), Score::Major);
}

/// Test that the hex level beats the tile and station levels
#[test]
fn test_hex_level_beats_tile_and_station() {
    let defaults = StopTypeDefaults::default();
    let hex = StopType::new("hex", Some(RunTo::No), None, None, None);
    let tile = StopType::new("tile", Some(RunTo::Yes), Some(RunThrough::TokenOnly), None, None);
    let station = Station::new(StationNumber(1), StationKind::Town, 0, 10);

    let stop = stop_with(&station, hex, tile, &defaults);
    assert_eq!(stop.run_to(), RunTo::No);
    assert_eq!(stop.run_through(), RunThrough::TokenOnly);
    assert_eq!(stop.score_type(), Score::Minor);
}

/// Test that a kind without a default falls back to city rules
#[test]
fn test_kind_without_default_falls_back_to_city() {
    let defaults = StopTypeDefaults::default();
    let station = Station::new(StationNumber(1), StationKind::Port, 0, 30);
    let stop = stop_with(&station, StopType::null(), StopType::null(), &defaults);
    assert_eq!(stop.run_to(), RunTo::Yes);
    assert_eq!(stop.run_through(), RunThrough::Yes);
    assert!(stop.loop_allowed());
    assert_eq!(stop.score_type(), Score::Major);
}

/// Test that off-board stops block running through
#[test]
fn test_offmap_stop_blocks_run_through() {
    let defaults = StopTypeDefaults::default();
    let station = Station::new(StationNumber(1), StationKind::OffMapCity, 0, 40);
    let stop = stop_with(&station, StopType::null(), StopType::null(), &defaults);
    let prr = CompanyId::from("PRR");
    assert!(stop.is_run_to_allowed_for(&prr));
    assert!(!stop.is_run_through_allowed_for(&prr));
    assert!(!stop.loop_allowed());
}

/// Test that token-only access depends on the company's token
#[test]
fn test_token_only_access() {
    let defaults = StopTypeDefaults::default();
    let tile = StopType::new(
        "tile",
        Some(RunTo::TokenOnly),
        Some(RunThrough::TokenOnly),
        None,
        None,
    );
    let station = Station::new(StationNumber(1), StationKind::City, 2, 30);
    let mut stop = stop_with(&station, StopType::null(), tile, &defaults);

    let prr = CompanyId::from("PRR");
    let nyc = CompanyId::from("NYC");
    assert!(!stop.is_run_to_allowed_for(&prr));

    stop.add_token(BaseToken::new(TokenId(1), prr.clone())).unwrap();
    assert!(stop.is_run_to_allowed_for(&prr));
    assert!(stop.is_run_through_allowed_for(&prr));
    assert!(!stop.is_run_through_allowed_for(&nyc));
}

/// Test that a stop accepts tokens up to its slots, one per company
#[test]
fn test_stop_token_slots() {
    let defaults = StopTypeDefaults::default();
    let station = Station::new(StationNumber(1), StationKind::City, 1, 20);
    let mut stop = stop_with(&station, StopType::null(), StopType::null(), &defaults);
    let prr = CompanyId::from("PRR");
    let nyc = CompanyId::from("NYC");

    assert_eq!(stop.free_slots(), 1);
    stop.add_token(BaseToken::new(TokenId(1), prr.clone())).unwrap();
    assert_eq!(stop.free_slots(), 0);
    assert!(stop.add_token(BaseToken::new(TokenId(2), nyc.clone())).is_err());

    let removed = stop.remove_token(TokenId(1)).unwrap();
    assert_eq!(removed.company, prr);
    assert!(stop.remove_token(TokenId(1)).is_none());
    stop.add_token(BaseToken::new(TokenId(2), nyc)).unwrap();
    assert!(stop.add_token(BaseToken::new(TokenId(3), CompanyId::from("NYC"))).is_err());
}
