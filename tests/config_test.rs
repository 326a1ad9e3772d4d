//! Tests for configuration and manager inventory loading

use serial_test::serial;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use nsx_collector::config::{load_managers, Config, INFLUX_TOKEN_ENV};

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_shipped_config_is_valid() {
    let config = Config::from_file(Path::new("config.toml")).unwrap();
    config.validate().unwrap();
    assert_eq!(config.intervals.default_secs, 40);
    assert_eq!(config.intervals.slow_secs, 300);
    assert_eq!(config.telemetry.address, "0.0.0.0:9101");
}

#[test]
fn test_partial_config_uses_defaults() {
    let file = write_temp(
        r#"
[influxdb]
url = "https://influx.example.com"
bucket = "nsx-prod"
"#,
    );

    let config = Config::from_file(file.path()).unwrap();
    config.validate().unwrap();
    assert_eq!(config.influxdb.bucket, "nsx-prod");
    assert_eq!(config.influxdb.org, "nsx");
    assert_eq!(config.nsx.page_size, 100);
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_invalid_intervals_rejected() {
    let file = write_temp(
        r#"
[intervals]
default_secs = 60
slow_secs = 30
"#,
    );

    let config = Config::from_file(file.path()).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_malformed_config_rejected() {
    let file = write_temp("[influxdb\nurl = ");
    assert!(Config::from_file(file.path()).is_err());
}

#[test]
#[serial]
fn test_token_file_wins_over_env() {
    let token = write_temp("  from-file\n");
    std::env::set_var(INFLUX_TOKEN_ENV, "from-env");

    let mut config = Config::default();
    config.influxdb.token_file = Some(token.path().to_path_buf());
    assert_eq!(config.influx_token().unwrap(), "from-file");

    std::env::remove_var(INFLUX_TOKEN_ENV);
}

#[test]
#[serial]
fn test_unreadable_token_file_falls_back_to_env() {
    std::env::set_var(INFLUX_TOKEN_ENV, "from-env");

    let mut config = Config::default();
    config.influxdb.token_file = Some("/nonexistent/influx_token".into());
    assert_eq!(config.influx_token().unwrap(), "from-env");

    std::env::remove_var(INFLUX_TOKEN_ENV);
}

#[test]
#[serial]
fn test_missing_token_is_an_error() {
    std::env::remove_var(INFLUX_TOKEN_ENV);
    assert!(Config::default().influx_token().is_err());
}

#[test]
#[serial]
fn test_load_managers_from_env() {
    std::env::set_var("NSXC_TEST_DC1_USER", "admin");
    std::env::set_var("NSXC_TEST_DC1_PASSWORD", " s3cret ");

    let file = write_temp(
        r#"
[[managers]]
site = "dc1"
url = "https://nsx-dc1.example.com"
user_env = "NSXC_TEST_DC1_USER"
password_env = "NSXC_TEST_DC1_PASSWORD"

[[managers]]
site = "dc2"
url = "https://nsx-dc2.example.com"
user_env = "NSXC_TEST_DC2_USER"
password_env = "NSXC_TEST_DC2_PASSWORD"
enabled = false
"#,
    );

    let managers = load_managers(file.path()).unwrap();
    assert_eq!(managers.len(), 1);
    assert_eq!(managers[0].site, "dc1");
    assert_eq!(managers[0].username, "admin");
    assert_eq!(managers[0].password, "s3cret");
    assert!(!managers[0].tls_skip_verify);
    assert!(!format!("{:?}", managers[0]).contains("s3cret"));

    std::env::remove_var("NSXC_TEST_DC1_USER");
    std::env::remove_var("NSXC_TEST_DC1_PASSWORD");
}

#[test]
#[serial]
fn test_load_managers_missing_credential() {
    std::env::remove_var("NSXC_TEST_DC3_PASSWORD");
    std::env::set_var("NSXC_TEST_DC3_USER", "admin");

    let file = write_temp(
        r#"
[[managers]]
site = "dc3"
url = "https://nsx-dc3.example.com"
user_env = "NSXC_TEST_DC3_USER"
password_env = "NSXC_TEST_DC3_PASSWORD"
"#,
    );

    let err = load_managers(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("NSXC_TEST_DC3_PASSWORD"));

    std::env::remove_var("NSXC_TEST_DC3_USER");
}

#[test]
fn test_shipped_managers_file_parses() {
    let file =
        nsx_collector::config::ManagersFile::from_file(Path::new("managers.toml")).unwrap();
    assert_eq!(file.managers.len(), 2);
    assert!(file.managers[0].enabled);
    assert!(!file.managers[1].enabled);
}
