//! Machine file loading

use rf_spin::presets::atkins_diet;
use rf_spin::{ConfigError, MachineConfig, SpinError};

const ATKINS_YAML: &str = include_str!("../../../machines/atkins-diet.yaml");

fn machines_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../machines")
}

#[test]
fn test_shipped_yaml_matches_preset() {
    let config = MachineConfig::from_yaml(ATKINS_YAML).unwrap();
    assert_eq!(config, atkins_diet());
}

#[test]
fn test_load_shipped_machine_by_path() {
    let config = MachineConfig::load(machines_dir().join("atkins-diet.yaml")).unwrap();
    assert_eq!(config.name, "Atkins Diet");
    assert_eq!(config.paylines.len(), 20);
}

#[test]
fn test_export_and_reload_both_formats() {
    let dir = tempfile::tempdir().unwrap();
    let preset = atkins_diet();

    let json_path = dir.path().join("atkins.json");
    std::fs::write(&json_path, preset.to_json_pretty().unwrap()).unwrap();
    assert_eq!(MachineConfig::load(&json_path).unwrap(), preset);

    let yaml_path = dir.path().join("atkins.yml");
    std::fs::write(&yaml_path, preset.to_yaml().unwrap()).unwrap();
    assert_eq!(MachineConfig::load(&yaml_path).unwrap(), preset);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        MachineConfig::load(dir.path().join("nope.yaml")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_malformed_files_rejected() {
    assert!(matches!(
        MachineConfig::from_json("{ \"reels\": 3 }"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        MachineConfig::from_yaml("reels: [[1, 2]\n"),
        Err(ConfigError::Yaml(_))
    ));
}

#[test]
fn test_bad_row_offset_in_file_rejected() {
    let broken = ATKINS_YAML.replacen("  - [2, 2, 2, 2, 2]", "  - [2, 2, 4, 2, 2]", 1);
    assert!(matches!(
        MachineConfig::from_yaml(&broken),
        Err(ConfigError::Invalid(SpinError::InvalidRowOffset {
            line: 1,
            column: 3,
            offset: 4
        }))
    ));
}
