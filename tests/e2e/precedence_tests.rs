//! Precedence between defaults, the config file and the command line.

use crate::common::{app_flags, load, loader_for, ConfigDir};
use flagfile::config::{ConfigLoader, Options, Outcome};
use serial_test::serial;

#[test]
fn test_file_values_override_defaults() {
    let dir = ConfigDir::new();
    let path = dir.write(
        "app.conf",
        "# server\nhost example.org\nport 9000\ndebug true\n\n; sampling\nratio 0.75\n",
    );
    let mut flags = app_flags();

    let (result, output) = load(&loader_for(&path), &mut flags, &[]);

    assert_eq!(result.unwrap(), Outcome::Parsed { loaded: Some(path) });
    assert!(output.is_empty());
    assert_eq!(flags.get::<String>("host").as_deref(), Some("example.org"));
    assert_eq!(flags.get::<u64>("port"), Some(9000));
    assert_eq!(flags.get::<bool>("debug"), Some(true));
    assert_eq!(flags.get::<f64>("ratio"), Some(0.75));
}

#[test]
fn test_command_line_overrides_file() {
    let dir = ConfigDir::new();
    let path = dir.write("app.conf", "port 9000\nhost file.example\n");
    let mut flags = app_flags();

    let (result, _) = load(&loader_for(&path), &mut flags, &["-port", "7000"]);

    assert!(result.is_ok());
    assert_eq!(flags.get::<u64>("port"), Some(7000));
    assert_eq!(flags.get::<String>("host").as_deref(), Some("file.example"));
}

#[test]
fn test_value_keeps_inner_spaces() {
    let dir = ConfigDir::new();
    let path = dir.write("app.conf", "   motd    welcome to   the machine   \n");
    let mut flags = app_flags();

    load(&loader_for(&path), &mut flags, &[]).0.unwrap();

    assert_eq!(
        flags.get::<String>("motd").as_deref(),
        Some("welcome to   the machine")
    );
}

#[test]
fn test_duplicate_key_last_wins() {
    let dir = ConfigDir::new();
    let path = dir.write("app.conf", "port 1000\nport 2000\n");
    let mut flags = app_flags();

    load(&loader_for(&path), &mut flags, &[]).0.unwrap();

    assert_eq!(flags.get::<u64>("port"), Some(2000));
}

#[test]
fn test_missing_default_file_keeps_defaults() {
    let dir = ConfigDir::new();
    let mut flags = app_flags();

    let (result, _) = load(&loader_for(&dir.path("absent.conf")), &mut flags, &[]);

    assert_eq!(result.unwrap(), Outcome::Parsed { loaded: None });
    assert_eq!(flags.get::<String>("host").as_deref(), Some("localhost"));
    assert_eq!(flags.get::<u64>("port"), Some(8080));
    assert_eq!(flags.get::<bool>("debug"), Some(false));
}

#[test]
fn test_config_flag_selects_file() {
    let dir = ConfigDir::new();
    dir.write("default.conf", "port 1111\n");
    let other = dir.write("other.conf", "port 2222\n");
    let other_arg = format!("-config={}", other.display());
    let mut flags = app_flags();

    let (result, _) = load(
        &loader_for(&dir.path("default.conf")),
        &mut flags,
        &["-debug", other_arg.as_str()],
    );

    assert_eq!(result.unwrap(), Outcome::Parsed { loaded: Some(other.clone()) });
    assert_eq!(flags.get::<u64>("port"), Some(2222));
    assert_eq!(flags.get::<bool>("debug"), Some(true));
    assert_eq!(
        flags.get::<String>("config").as_deref(),
        Some(other.to_string_lossy().as_ref())
    );
}

#[test]
fn test_renamed_config_flag() {
    let dir = ConfigDir::new();
    let path = dir.write("custom.conf", "host renamed.example\n");
    let path_arg = path.display().to_string();
    let loader = ConfigLoader::new(
        Options::with_path(dir.path("absent.conf")).config_flag("settings"),
    );
    let mut flags = app_flags();

    let (result, _) = load(&loader, &mut flags, &["-settings", path_arg.as_str()]);

    assert!(result.is_ok());
    assert_eq!(flags.get::<String>("host").as_deref(), Some("renamed.example"));
    assert!(flags.get::<String>("config").is_none());
}

#[test]
fn test_positional_args_survive() {
    let dir = ConfigDir::new();
    let mut flags = app_flags();

    load(
        &loader_for(&dir.path("absent.conf")),
        &mut flags,
        &["-debug", "serve", "--fast"],
    )
    .0
    .unwrap();

    assert_eq!(flags.args(), ["serve", "--fast"]);
}

#[test]
fn test_config_after_positional_stays_positional() {
    let dir = ConfigDir::new();
    let default = dir.write("default.conf", "port 1111\n");
    let other = dir.write("other.conf", "port 2222\n");
    let other_arg = other.display().to_string();
    let mut flags = app_flags();

    let (result, _) = load(
        &loader_for(&default),
        &mut flags,
        &["serve", "-config", other_arg.as_str()],
    );

    assert_eq!(result.unwrap(), Outcome::Parsed { loaded: Some(default.clone()) });
    assert_eq!(flags.get::<u64>("port"), Some(1111));
    assert_eq!(
        flags.get::<String>("config").as_deref(),
        Some(default.to_string_lossy().as_ref())
    );
    assert_eq!(flags.args(), ["serve", "-config", other_arg.as_str()]);
}

#[test]
fn test_config_taken_as_flag_value_is_not_loaded() {
    let dir = ConfigDir::new();
    let missing = dir.path("missing.conf");
    let missing_arg = missing.display().to_string();
    let mut flags = app_flags();

    let (result, _) = load(
        &loader_for(&dir.path("absent.conf")),
        &mut flags,
        &["-motd", "-config", missing_arg.as_str()],
    );

    assert_eq!(result.unwrap(), Outcome::Parsed { loaded: None });
    assert_eq!(flags.get::<String>("motd").as_deref(), Some("-config"));
    assert_eq!(flags.args(), [missing_arg.as_str()]);
}

#[test]
#[serial]
fn test_env_var_selects_file() {
    let dir = ConfigDir::new();
    let path = dir.write("env.conf", "host env.example\n");
    let loader = ConfigLoader::new(
        Options::with_path(dir.path("absent.conf")).env_var("FLAGFILE_TEST_E2E_CONFIG"),
    );
    std::env::set_var("FLAGFILE_TEST_E2E_CONFIG", &path);
    let mut flags = app_flags();

    let (result, _) = load(&loader, &mut flags, &[]);
    std::env::remove_var("FLAGFILE_TEST_E2E_CONFIG");

    assert_eq!(result.unwrap(), Outcome::Parsed { loaded: Some(path) });
    assert_eq!(flags.get::<String>("host").as_deref(), Some("env.example"));
}

#[test]
#[serial]
fn test_config_flag_beats_env_var() {
    let dir = ConfigDir::new();
    let env_file = dir.write("env.conf", "host env.example\n");
    let flag_file = dir.write("flag.conf", "host flag.example\n");
    let flag_arg = flag_file.display().to_string();
    let loader = ConfigLoader::new(
        Options::with_path(dir.path("absent.conf")).env_var("FLAGFILE_TEST_E2E_CONFIG"),
    );
    std::env::set_var("FLAGFILE_TEST_E2E_CONFIG", &env_file);
    let mut flags = app_flags();

    let (result, _) = load(&loader, &mut flags, &["-config", flag_arg.as_str()]);
    std::env::remove_var("FLAGFILE_TEST_E2E_CONFIG");

    assert!(result.is_ok());
    assert_eq!(flags.get::<String>("host").as_deref(), Some("flag.example"));
}
