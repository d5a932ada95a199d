//! Tests for the configuration system.

use itz_core::config::{ItzConfig, PathConfig, SynthesisConfig};
use itz_core::errors::{ConfigError, ItzErrorCode};

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

#[test]
fn defaults_match_documented_values() {
    let config = ItzConfig::default();
    assert_eq!(config.synthesis.latent_name, "densification");
    assert_eq!(config.synthesis.regression_threshold, 0.05);
    assert_eq!(config.synthesis.covariance_threshold, 0.01);
    assert!(!config.synthesis.gate_early_upzoning);
    assert_eq!(config.transforms.log_shift, 0.001);
    assert_eq!(config.transforms.reciprocal_shift, 0.001);
    assert_eq!(config.paths, PathConfig::default());
    assert!(config.paths.max_depth.is_none());
    assert_eq!(config.refine.threshold, 0.2);
    config.validate().unwrap();
}

#[test]
fn partial_toml_fills_defaults() {
    let config = ItzConfig::from_toml_str(
        r#"
[synthesis]
regression_threshold = 0.1

[paths]
max_depth = 3
"#,
    )
    .unwrap();
    assert_eq!(config.synthesis.regression_threshold, 0.1);
    assert_eq!(config.synthesis.covariance_threshold, 0.01);
    assert_eq!(config.paths.max_depth, Some(3));
    assert_eq!(config.transforms.log_shift, 0.001);
}

#[test]
fn load_from_file() {
    let dir = tempdir();
    let path = dir.path().join("itz.toml");
    std::fs::write(
        &path,
        r#"
[synthesis]
latent_name = "growth"
gate_early_upzoning = true

[refine]
threshold = 0.3
"#,
    )
    .unwrap();

    let config = ItzConfig::load(&path).unwrap();
    assert_eq!(config.synthesis.latent_name, "growth");
    assert!(config.synthesis.gate_early_upzoning);
    assert_eq!(config.refine.threshold, 0.3);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir();
    let err = ItzConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = ItzConfig::from_toml_str("[synthesis\nregression_threshold = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn out_of_range_threshold_rejected() {
    let err = ItzConfig::from_toml_str("[synthesis]\nregression_threshold = 1.5\n").unwrap_err();
    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "synthesis.regression_threshold"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_depth_rejected() {
    let config = ItzConfig {
        paths: PathConfig {
            max_depth: Some(0),
            ..PathConfig::default()
        },
        ..ItzConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn negative_shift_rejected() {
    let err = ItzConfig::from_toml_str("[transforms]\nlog_shift = -1.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn empty_latent_name_rejected() {
    let config = ItzConfig {
        synthesis: SynthesisConfig {
            latent_name: "  ".to_string(),
            ..SynthesisConfig::default()
        },
        ..ItzConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn toml_rendering_reparses() {
    let mut config = ItzConfig::default();
    config.synthesis = SynthesisConfig::with_threshold(1.0);
    config.paths.max_paths = Some(500);
    config.paths.time_limit_ms = Some(250);

    let text = config.to_toml_string().unwrap();
    let back = ItzConfig::from_toml_str(&text).unwrap();
    assert_eq!(back, config);
    assert_eq!(back.paths.time_limit(), Some(std::time::Duration::from_millis(250)));
}
