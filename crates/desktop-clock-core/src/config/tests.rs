use std::fs;

use super::loader::{LoadError, parse, read};
use super::*;

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();

    assert_eq!(config.window.width, 1280);
    assert_eq!(config.window.height, 720);
    assert!(config.window.topmost);
    assert!(config.window.start_maximized);
    assert_eq!(config.window.drag_strip, 10);
    assert_eq!(config.text.font, "Chakra Petch");
    assert_eq!(config.text.time_weight, 900);
    assert_eq!(config.text.label_weight, 300);
    assert_eq!(config.text.band_offset, 300.0);
    assert!(!config.logging.enabled);
}

#[test]
fn default_palette_is_black_white_gray() {
    let palette = ColorConfig::default().palette();

    assert_eq!(
        palette,
        Palette {
            background: Color::BLACK,
            time: Color::WHITE,
            label: Color::GRAY,
        }
    );
}

#[test]
fn partial_toml_uses_defaults_for_missing_sections() {
    // Arrange
    let toml_str = "[text]\ntime_size = 160.0\n";

    // Act
    let config = parse(toml_str).unwrap();

    // Assert
    assert_eq!(config.text.time_size, 160.0);
    assert_eq!(config.text.label_size, 48.0);
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.colors.time, "#ffffff");
}

#[test]
fn empty_file_is_all_defaults() {
    let config = parse("").unwrap();

    assert_eq!(config.window.drag_strip, 10);
    assert_eq!(config.text.font, "Chakra Petch");
}

#[test]
fn validate_clamps_out_of_range_values() {
    // Arrange
    let toml_str = r#"
[window]
width = 0
height = -5
drag_strip = 5000

[text]
font = "   "
time_size = 0.5
label_weight = 4000
band_offset = -20.0
"#;

    // Act
    let config = parse(toml_str).unwrap();

    // Assert
    assert_eq!(config.window.width, 200);
    assert_eq!(config.window.height, 120);
    assert_eq!(config.window.drag_strip, 200);
    assert_eq!(config.text.font, "Chakra Petch");
    assert_eq!(config.text.time_size, 4.0);
    assert_eq!(config.text.label_weight, 999);
    assert_eq!(config.text.band_offset, 0.0);
}

#[test]
fn validate_replaces_non_finite_sizes() {
    let mut config = Config::default();
    config.text.label_size = f32::NAN;
    config.text.band_offset = f32::INFINITY;

    config.validate();

    assert_eq!(config.text.label_size, 48.0);
    assert_eq!(config.text.band_offset, 300.0);
}

#[test]
fn invalid_colors_fall_back_per_field() {
    // Arrange
    let config = parse("[colors]\nbackground = \"#102030\"\ntime = \"white\"\n").unwrap();

    // Act
    let palette = config.colors.palette();

    // Assert
    assert_eq!(palette.background, Color::rgb(0x10, 0x20, 0x30));
    assert_eq!(palette.time, Color::WHITE);
    assert_eq!(palette.label, Color::GRAY);
}

#[test]
fn logging_section_parses() {
    let config = parse("[logging]\nenabled = true\nlevel = \"debug\"\n").unwrap();

    assert!(config.logging.enabled);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.max_file_mb, 10);
}

#[test]
fn malformed_toml_is_an_error() {
    assert!(parse("[window\nwidth = 3").is_err());
    assert!(parse("[window]\nwidth = \"wide\"").is_err());
}

#[test]
fn config_path_ends_with_expected_file() {
    if let Some(path) = config_path() {
        assert!(path.ends_with(".config/desktop-clock/config.toml"));
    }
}

#[test]
fn read_distinguishes_missing_from_invalid_files() {
    // Arrange
    let dir = std::env::temp_dir().join(format!("desktop-clock-config-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    let good = dir.join("good.toml");
    let bad = dir.join("bad.toml");
    fs::write(&good, "[window]\nwidth = 640\n").unwrap();
    fs::write(&bad, "[window\n").unwrap();

    // Act
    let missing = read(&dir.join("absent.toml"));
    let invalid = read(&bad);
    let loaded = read(&good);

    // Assert
    assert!(matches!(missing, Err(LoadError::Missing)));
    match invalid {
        Err(LoadError::Invalid(msg)) => assert!(msg.contains("bad.toml"), "{msg}"),
        other => panic!("expected an invalid file, got {other:?}"),
    }
    assert_eq!(loaded.unwrap().window.width, 640);

    let _ = fs::remove_dir_all(&dir);
}
