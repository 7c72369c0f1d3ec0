//! Tests for the icon lookup service

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use alchetree::application::services::{icon_key, IconService};

const FALLBACK: &str = "icons/unknown.svg";

fn create_icon(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok();
    }
    fs::write(&path, "<svg/>").expect("write icon");
    path
}

fn service_over(dir: &TempDir) -> IconService {
    IconService::new(Some(dir.path().to_path_buf()), FALLBACK.to_string())
}

#[test]
fn given_element_name_when_keying_then_lowercases_and_underscores() {
    assert_eq!(icon_key("Volcanic Rock"), "volcanic_rock");
    assert_eq!(icon_key("air"), "air");
    assert_eq!(icon_key("Mud"), "mud");
}

#[test]
fn given_asset_directory_when_resolving_then_returns_icon_path() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let icon = create_icon(&temp, "pressure_2.svg");
    let icons = service_over(&temp);

    // Act
    let resolved = icons.resolve("pressure");

    // Assert
    assert_eq!(resolved, icon.to_string_lossy());
}

#[test]
fn given_spaced_uppercase_name_when_resolving_then_normalizes_key() {
    // Arrange
    let temp = TempDir::new().unwrap();
    create_icon(&temp, "volcanic_rock_2.svg");
    let icons = service_over(&temp);

    // Act
    let resolved = icons.resolve("Volcanic Rock");

    // Assert
    assert!(resolved.ends_with("volcanic_rock_2.svg"));
}

#[test]
fn given_uppercase_filename_when_scanning_then_key_lowercased() {
    // Arrange
    let temp = TempDir::new().unwrap();
    create_icon(&temp, "Stone_2.svg");
    let icons = service_over(&temp);

    // Assert
    assert!(icons.resolve("stone").ends_with("Stone_2.svg"));
}

#[test]
fn given_nested_asset_directory_when_scanning_then_finds_icons() {
    // Arrange
    let temp = TempDir::new().unwrap();
    create_icon(&temp, "extra/lava_2.svg");
    let icons = service_over(&temp);

    // Assert
    assert!(icons.resolve("lava").ends_with("lava_2.svg"));
}

#[test]
fn given_files_without_suffix_when_scanning_then_ignored() {
    // Arrange
    let temp = TempDir::new().unwrap();
    create_icon(&temp, "pressure.svg");
    create_icon(&temp, "readme.txt");
    let icons = service_over(&temp);

    // Assert
    assert_eq!(icons.resolve("pressure"), FALLBACK);
    assert_eq!(icons.resolve("readme"), FALLBACK);
}

#[test]
fn given_unknown_element_when_resolving_then_falls_back_and_records_once() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let icons = service_over(&temp);

    // Act
    let first = icons.resolve("unobtainium");
    let second = icons.resolve("unobtainium");

    // Assert
    assert_eq!(first, FALLBACK);
    assert_eq!(second, FALLBACK);
    assert_eq!(icons.missing(), vec!["unobtainium"]);
}

#[test]
fn given_several_misses_when_listing_missing_then_sorted_keys() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let icons = service_over(&temp);

    // Act
    icons.resolve("zinc");
    icons.resolve("Amber Dust");

    // Assert
    assert_eq!(icons.missing(), vec!["amber_dust", "zinc"]);
}

#[test]
fn given_no_directory_configured_when_resolving_then_fallback() {
    // Arrange
    let icons = IconService::new(None, FALLBACK.to_string());

    // Assert
    assert_eq!(icons.resolve("anything"), FALLBACK);
    assert_eq!(icons.fallback(), FALLBACK);
}

#[test]
fn given_missing_directory_when_resolving_then_fallback_without_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let gone = temp.path().join("never-created");
    let icons = IconService::new(Some(gone), FALLBACK.to_string());

    // Assert
    assert_eq!(icons.resolve("air"), FALLBACK);
}

#[test]
fn given_loaded_table_when_directory_changes_then_scan_not_repeated() {
    // Arrange
    let temp = TempDir::new().unwrap();
    create_icon(&temp, "air_2.svg");
    let icons = service_over(&temp);
    icons.ensure_loaded();

    // Act: add an icon after the first load
    create_icon(&temp, "fire_2.svg");

    // Assert: the late file is invisible, the early one still resolves
    assert_eq!(icons.resolve("fire"), FALLBACK);
    assert!(icons.resolve("air").ends_with("air_2.svg"));
}

#[test]
fn given_repeated_ensure_loaded_when_called_then_idempotent() {
    // Arrange
    let temp = TempDir::new().unwrap();
    create_icon(&temp, "air_2.svg");
    let icons = service_over(&temp);

    // Act
    icons.ensure_loaded();
    icons.ensure_loaded();

    // Assert
    assert!(icons.resolve("air").ends_with("air_2.svg"));
}
