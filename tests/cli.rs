//! Command-line behaviour of the `vision` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `vision` with its config directory redirected into `home`
fn vision(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vision").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("OPENWEATHER_API_KEY")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    vision(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("weather"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--mute"));
}

#[test]
fn test_lat_without_lon_is_rejected() {
    let home = TempDir::new().unwrap();
    vision(&home)
        .args(["weather", "here", "--lat", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--lon"));
}

#[test]
fn test_config_path_points_at_toml() {
    let home = TempDir::new().unwrap();
    vision(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vision-hud"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_invalid_unit_exits_with_error() {
    let home = TempDir::new().unwrap();
    vision(&home)
        .args(["config", "set", "unit", "kelvin"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Invalid unit 'kelvin'"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_set_get_reset() {
    let home = TempDir::new().unwrap();
    vision(&home)
        .args(["config", "set", "unit", "imperial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imperial"));

    vision(&home)
        .args(["config", "get", "unit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit: Imperial"));

    vision(&home)
        .args(["config", "reset", "unit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit: Metric"));
}

#[test]
fn test_search_without_api_key_explains_setup() {
    let home = TempDir::new().unwrap();
    vision(&home)
        .args(["weather", "search", "London"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("OpenWeatherMap API key is not set up."))
        .stderr(predicate::str::contains("vision config set openweather-key"));
}
