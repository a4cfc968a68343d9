//! Tests for routing configuration.

use std::io::Write;

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "full_assert"
        average_speed_kmph = 65.5
        score_director = "easy"
    "#;

    let config = RoutingConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.average_speed_kmph, 65.5);
    assert_eq!(config.score_director, ScoreDirectorType::Easy);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: fast_assert
        average_speed_kmph: 30
    "#;

    let config = RoutingConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FastAssert);
    assert_eq!(config.average_speed_kmph, 30.0);
    assert_eq!(config.score_director, ScoreDirectorType::Incremental);
}

#[test]
fn test_defaults() {
    let config = RoutingConfig::from_toml_str("").unwrap();
    assert_eq!(config, RoutingConfig::default());
    assert_eq!(config.environment_mode, EnvironmentMode::NonReproducible);
    assert_eq!(config.average_speed_kmph, DEFAULT_AVERAGE_SPEED_KMPH);
    assert_eq!(config.score_director, ScoreDirectorType::Incremental);
}

#[test]
fn test_builder() {
    let config = RoutingConfig::new()
        .with_environment_mode(EnvironmentMode::FullAssert)
        .with_average_speed_kmph(80.0)
        .with_score_director(ScoreDirectorType::Easy);

    assert!(config.environment_mode.is_asserted());
    assert!(config.environment_mode.is_fully_asserted());
    assert_eq!(config.average_speed_kmph, 80.0);
    assert_eq!(config.score_director, ScoreDirectorType::Easy);
    config.validate().unwrap();
}

#[test]
fn test_assert_modes() {
    assert!(!EnvironmentMode::NonReproducible.is_asserted());
    assert!(EnvironmentMode::FastAssert.is_asserted());
    assert!(!EnvironmentMode::FastAssert.is_fully_asserted());
}

#[test]
fn test_unknown_environment_mode_rejected() {
    assert!(matches!(
        RoutingConfig::from_toml_str(r#"environment_mode = "reproducible""#),
        Err(ConfigError::Toml(_))
    ));
    assert!(matches!(
        RoutingConfig::from_yaml_str("environment_mode: reproducible"),
        Err(ConfigError::Yaml(_))
    ));
}

#[test]
fn test_invalid_speed() {
    assert!(matches!(
        RoutingConfig::from_toml_str("average_speed_kmph = 0.0"),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        RoutingConfig::from_yaml_str("average_speed_kmph: -5"),
        Err(ConfigError::Invalid(_))
    ));
    assert!(RoutingConfig::new()
        .with_average_speed_kmph(f64::NAN)
        .validate()
        .is_err());
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        RoutingConfig::from_toml_str("score_director = \"bavet\""),
        Err(ConfigError::Toml(_))
    ));
    assert!(matches!(
        RoutingConfig::from_yaml_str("environment_mode: [1, 2]"),
        Err(ConfigError::Yaml(_))
    ));
}

#[test]
fn test_file_loading() {
    let dir = std::env::temp_dir();
    let toml_path = dir.join(format!("routeforge-config-{}.toml", std::process::id()));
    let yaml_path = dir.join(format!("routeforge-config-{}.yaml", std::process::id()));

    std::fs::File::create(&toml_path)
        .unwrap()
        .write_all(b"average_speed_kmph = 42.0\n")
        .unwrap();
    std::fs::File::create(&yaml_path)
        .unwrap()
        .write_all(b"score_director: easy\n")
        .unwrap();

    assert_eq!(RoutingConfig::load(&toml_path).unwrap().average_speed_kmph, 42.0);
    assert_eq!(
        RoutingConfig::from_yaml_file(&yaml_path).unwrap().score_director,
        ScoreDirectorType::Easy
    );

    std::fs::remove_file(&toml_path).unwrap();
    std::fs::remove_file(&yaml_path).unwrap();
}

#[test]
fn test_missing_file() {
    let err = RoutingConfig::load("/nonexistent/routing.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
