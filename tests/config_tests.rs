use interactive_pipeline::{DisplayOptions, InteractiveConfig, InteractiveError, Location};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[display]
max_rows = 25
loc = "left_top"
dmap = true

[logging]
level = "debug"

[logging.features]
interactive_pipeline = "trace"
"#
    )
    .unwrap();

    let config = InteractiveConfig::from_file(file.path()).unwrap();
    assert_eq!(config.display.max_rows, 25);
    assert_eq!(config.display.loc, Location::LeftTop);
    assert!(config.display.dmap);
    assert_eq!(config.logging.level, "debug");

    let options = DisplayOptions::from_config(&config);
    assert_eq!(options.max_rows, 25);
    assert!(options.dmap);
}

#[test]
fn test_save_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("interactive.toml");
    let mut config = InteractiveConfig::default();
    config.display.center = true;
    config.display.loc = Location::Right;
    config.save_to_file(&path).unwrap();

    let reloaded = InteractiveConfig::from_file(&path).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let config = InteractiveConfig::load(dir.path().join("absent.toml"));
    // Environment overrides may apply, but loading itself succeeds.
    assert!(config.is_ok());
}

#[test]
fn test_invalid_toml_is_a_serialization_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[display\nmax_rows = ").unwrap();
    let err = InteractiveConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, InteractiveError::Serialization { .. }));
}

#[test]
fn test_unknown_location_rejected() {
    let err = InteractiveConfig::from_toml_str("[display]\nloc = \"middle\"").unwrap_err();
    assert!(matches!(err, InteractiveError::Serialization { .. }));
}
