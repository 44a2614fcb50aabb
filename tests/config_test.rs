// tests/config_test.rs
use git_flexver::config::{load_config, AnchorKind, Config, LOCAL_CONFIG_FILE};
use git_flexver::domain::{BumpStrategy, PatternSyntax};
use git_flexver::FlexVersionError;
use serial_test::serial;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/flexver.toml");

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.baseline, "0.1.0");
    assert_eq!(config.default_strategy, BumpStrategy::Patch);
    assert_eq!(config.anchor.kind, AnchorKind::Tag);
    assert_eq!(config.outputs[0].name, "semver");
}

#[test]
fn test_load_fixture() {
    let config = load_config(Some(Path::new(FIXTURE))).expect("Failed to load test config");

    assert_eq!(config.baseline, "1.0.0");
    assert_eq!(config.default_strategy, BumpStrategy::Unchanged);
    assert_eq!(config.anchor.kind, AnchorKind::Message);
    assert_eq!(config.branches.len(), 3);
    assert_eq!(config.branches[0].syntax, PatternSyntax::Glob);
    assert_eq!(config.branches[1].syntax, PatternSyntax::Regex);
    assert!(config.branches[2].case_insensitive);
    assert_eq!(
        config.branches[1].label.as_deref(),
        Some("{short_branch}.{count}")
    );

    let names: Vec<&str> = config.outputs.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["semver", "docker"]);
}

#[test]
fn test_fixture_blank_replacement_is_not_configured() {
    let config = load_config(Some(Path::new(FIXTURE))).unwrap();
    assert!(config.clean_output[0].is_configured());
    assert!(!config.clean_output[1].is_configured());

    let rules = config.validate().unwrap();
    assert_eq!(rules.clean_rules.len(), 1);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
default_strategy = "custom"

[[branches]]
pattern = "develop"
strategy = "prerelease"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.default_strategy, BumpStrategy::Unchanged);
    assert_eq!(config.branches.len(), 1);
    // Unspecified sections fall back to defaults
    assert_eq!(config.baseline, "0.1.0");
    assert_eq!(config.outputs.len(), 2);
}

#[test]
fn test_unknown_strategy_is_rejected() {
    let result = Config::from_toml_str(
        r#"
[[branches]]
pattern = "main"
strategy = "sideways"
"#,
    );
    assert!(matches!(
        result,
        Err(FlexVersionError::ConfigurationInvalid(_))
    ));
}

#[test]
fn test_missing_explicit_file_is_io_error() {
    let result = load_config(Some(Path::new("tests/fixtures/does-not-exist.toml")));
    assert!(matches!(result, Err(FlexVersionError::Io(_))));
}

#[test]
fn test_duplicate_output_name_fails_validation() {
    let config = Config::from_toml_str(
        r#"
[[outputs]]
name = "semver"
template = "{major}"

[[outputs]]
name = "semver"
template = "{minor}"
"#,
    )
    .unwrap();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate output name"));
}

#[test]
fn test_invalid_clean_pattern_fails_validation() {
    let config = Config::from_toml_str(
        r#"
[[clean_output]]
invalid_pattern = "[a-"
output_match = "semver"
replacement = "-"
"#,
    )
    .unwrap();

    assert!(matches!(
        config.validate(),
        Err(FlexVersionError::ConfigurationInvalid(_))
    ));
}

#[test]
#[serial]
fn test_local_config_file_is_picked_up() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(LOCAL_CONFIG_FILE),
        "baseline = \"4.5.6\"\n",
    )
    .unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let config = load_config(None);
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(config.unwrap().baseline, "4.5.6");
}
