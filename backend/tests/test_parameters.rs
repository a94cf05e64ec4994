//! ParameterSet defaults, validation, bounds and serialization

use traffic_flow_core_rs::{ParameterBounds, ParameterError, ParameterKey, ParameterSet};

#[test]
fn test_defaults() {
    let params = ParameterSet::default();
    assert_eq!(params.spawn_probability, 0.3);
    assert_eq!(params.min_speed, 2.0);
    assert_eq!(params.max_speed, 5.0);
    assert_eq!(params.max_acceleration, 2.0);
    assert_eq!(params.comfortable_deceleration, 2.0);
    assert_eq!(params.min_gap, 2.0);
    assert_eq!(params.reaction_time, 1.5);
    assert_eq!(params.validate(), Ok(()));
}

#[test]
fn test_equal_speed_bounds_allowed() {
    let params = ParameterSet {
        min_speed: 3.0,
        max_speed: 3.0,
        ..ParameterSet::default()
    };
    assert_eq!(params.validate(), Ok(()));
}

#[test]
fn test_rejections() {
    let base = ParameterSet::default();
    let cases = [
        (
            ParameterSet {
                spawn_probability: 1.5,
                ..base
            },
            ParameterError::SpawnProbabilityOutOfRange(1.5),
        ),
        (
            ParameterSet {
                min_speed: -1.0,
                ..base
            },
            ParameterError::NonPositiveSpeed { min_speed: -1.0 },
        ),
        (
            ParameterSet {
                min_speed: 6.0,
                ..base
            },
            ParameterError::InvertedSpeedRange {
                min_speed: 6.0,
                max_speed: 5.0,
            },
        ),
        (
            ParameterSet {
                comfortable_deceleration: 0.0,
                ..base
            },
            ParameterError::NonPositive {
                name: "comfortable_deceleration",
                value: 0.0,
            },
        ),
        (
            ParameterSet {
                reaction_time: -0.5,
                ..base
            },
            ParameterError::Negative {
                name: "reaction_time",
                value: -0.5,
            },
        ),
    ];

    for (params, expected) in cases {
        assert_eq!(params.validate(), Err(expected));
    }
}

#[test]
fn test_infinite_value_rejected() {
    let params = ParameterSet {
        max_speed: f64::INFINITY,
        ..ParameterSet::default()
    };
    assert!(matches!(
        params.validate(),
        Err(ParameterError::NonFinite { name: "max_speed", .. })
    ));
}

#[test]
fn test_zero_gap_and_reaction_allowed() {
    let params = ParameterSet {
        min_gap: 0.0,
        reaction_time: 0.0,
        ..ParameterSet::default()
    };
    assert_eq!(params.validate(), Ok(()));
}

#[test]
fn test_get_set_by_key() {
    let mut params = ParameterSet::default();
    params.set(ParameterKey::MinGap, 4.25);
    assert_eq!(params.get(ParameterKey::MinGap), 4.25);
    assert_eq!(params.min_gap, 4.25);
}

#[test]
fn test_entries_in_display_order() {
    let names: Vec<&str> = ParameterSet::default()
        .entries()
        .map(|(key, _)| key.name())
        .collect();
    assert_eq!(
        names,
        vec![
            "spawn_probability",
            "min_speed",
            "max_speed",
            "max_acceleration",
            "comfortable_deceleration",
            "min_gap",
            "reaction_time",
        ]
    );
}

#[test]
fn test_bounds_clamp() {
    let raw = ParameterSet {
        spawn_probability: 2.0,
        max_speed: 50.0,
        min_gap: 0.0,
        ..ParameterSet::default()
    };
    let clamped = ParameterBounds::clamp(&raw);
    assert_eq!(clamped.spawn_probability, 1.0);
    assert_eq!(clamped.max_speed, 10.0);
    assert_eq!(clamped.min_gap, 1.0);
    assert_eq!(clamped.reaction_time, raw.reaction_time);
}

#[test]
fn test_defaults_inside_bounds() {
    let params = ParameterSet::default();
    assert_eq!(ParameterBounds::clamp(&params), params);
}

#[test]
fn test_partial_json_uses_defaults() {
    let params: ParameterSet = serde_json::from_str(r#"{ "min_gap": 3.0 }"#).unwrap();
    assert_eq!(params.min_gap, 3.0);
    assert_eq!(params.max_speed, 5.0);
}

#[test]
fn test_json_round_trip() {
    let params = ParameterSet {
        reaction_time: 2.25,
        ..ParameterSet::default()
    };
    let json = serde_json::to_string(&params).unwrap();
    assert!(json.contains("\"reaction_time\":2.25"));
    let back: ParameterSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
}
