use pathquill::config::{Config, OutputFormat};
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.ambiguity_threshold, 3);
    assert_eq!(config.output_format, OutputFormat::Yaml);
    assert!(config.typed_arguments);
    assert_eq!(config.null_exit_code, 1);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        ambiguity_threshold: 5,
        output_format: OutputFormat::Json,
        typed_arguments: false,
        null_exit_code: 4,
    };
    config.save_to(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("output_format = \"json\""));
    assert_eq!(Config::load_from(&path), config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        Config::load_from(&dir.path().join("absent.toml")),
        Config::default()
    );
}

#[test]
fn test_invalid_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "ambiguity_threshold = \"many\"").unwrap();
    assert_eq!(Config::load_from(&path), Config::default());
}
