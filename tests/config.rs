use std::fs;

use booking_wizard::models::config::WizardConfig;

#[test]
fn test_defaults_fill_missing_keys() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("default.yaml"), "directory_file: data/dir.json\n").unwrap();

    let config = WizardConfig::load(dir.path(), "local").unwrap();

    assert_eq!(config.lookup_debounce_ms, 500);
    assert_eq!(config.directory_file, "data/dir.json");
}

#[test]
fn test_profile_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.yaml"),
        "lookup_debounce_ms: 500\ndirectory_file: config/directory.json\n",
    )
    .unwrap();
    fs::write(dir.path().join("staging.yaml"), "lookup_debounce_ms: 250\n").unwrap();

    let config = WizardConfig::load(dir.path(), "staging").unwrap();

    assert_eq!(config.lookup_debounce().as_millis(), 250);
    assert_eq!(config.directory_file, "config/directory.json");
}

#[test]
fn test_missing_default_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(WizardConfig::load(dir.path(), "local").is_err());
}
