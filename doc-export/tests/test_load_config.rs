use serial_test::serial;
use std::env;
use std::fs::write;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::NamedTempFile;

use doc_export::load_config::{load_config, TOKEN_ENV};

fn config_file(yaml: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("temp file");
    write(file.path(), yaml).unwrap();
    file
}

#[test]
#[serial]
fn loads_static_config_and_token_from_env() {
    let file = config_file(
        r#"
api:
  base_url: "https://erp.example.com/api"
  timeout_secs: 15
export:
  output_dir: ./tmp/exports
"#,
    );
    env::set_var(TOKEN_ENV, "token-123");

    let config = load_config(file.path()).expect("Config should load");
    env::remove_var(TOKEN_ENV);

    assert_eq!(config.api.base_url, "https://erp.example.com/api");
    assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    assert_eq!(config.export.output_dir, PathBuf::from("./tmp/exports"));
    assert_eq!(config.api_token.as_deref(), Some("token-123"));
}

#[test]
#[serial]
fn timeout_defaults_and_token_is_optional() {
    let file = config_file(
        r#"
api:
  base_url: "http://localhost:8000"
export:
  output_dir: out
"#,
    );
    env::remove_var(TOKEN_ENV);

    let config = load_config(file.path()).expect("Config should load");
    assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
    assert_eq!(config.api_token, None);
}

#[test]
#[serial]
fn zero_timeout_disables_it() {
    let file = config_file(
        "api:\n  base_url: http://localhost\n  timeout_secs: 0\nexport:\n  output_dir: out\n",
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.timeout(), None);
}

#[test]
fn missing_file_is_an_error() {
    let err = load_config("/definitely/not/here.yaml").unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read config file"));
}

#[test]
fn malformed_yaml_is_an_error() {
    let file = config_file("api: [unterminated\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config YAML"));
}

#[test]
fn missing_section_is_an_error() {
    let file = config_file("api:\n  base_url: http://localhost\n");
    assert!(load_config(file.path()).is_err());
}

#[test]
fn empty_base_url_is_rejected() {
    let file = config_file("api:\n  base_url: \"  \"\nexport:\n  output_dir: out\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("api.base_url"));
}
