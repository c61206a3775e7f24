//! Writing the merged configuration and reading it back.

use crate::common::{app_flags, args, load, loader_for, ConfigDir};
use flagfile::config::{save_config, write_config, ConfigLoader, Options, Outcome};
use flagfile::flag::FlagRegistry;
use pretty_assertions::assert_eq;

#[test]
fn test_write_config_outputs_merged_state() {
    let dir = ConfigDir::new();
    let path = dir.write("app.conf", "host example.org\n");
    let mut flags = app_flags();

    let (result, output) = load(
        &loader_for(&path),
        &mut flags,
        &["-debug", "-write-config"],
    );

    assert_eq!(result.unwrap(), Outcome::ConfigWritten);
    let active: Vec<&str> = output
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    assert_eq!(active, ["debug true", "host example.org"]);
}

#[test]
fn test_write_config_layout() {
    let dir = ConfigDir::new();
    let mut flags = flagfile::flag::FlagSet::new("app");
    flags.uint("port", 8080, "port to listen on\nuse 0 for any").unwrap();

    let (result, output) = load(
        &loader_for(&dir.path("absent.conf")),
        &mut flags,
        &["-port=9090", "-write-config"],
    );

    assert!(result.unwrap().is_config_written());
    let expected = "\
# flagfile syntax:
# \n\
#   flag-name flag-value
# \n\
# where flag-name is an argument name without the \"-\" prefix.
# \n\
# Comments begin with any of these: # ' ; //
# \n\
# Leading and trailing whitespace is ignored on each line, key and value.

# port
#   port to listen on
#   use 0 for any
#
# default:
# port 8080
port 9090

";
    assert_eq!(output, expected);
}

#[test]
fn test_control_flags_are_not_written() {
    let dir = ConfigDir::new();
    let mut flags = app_flags();

    let (_, output) = load(
        &loader_for(&dir.path("absent.conf")),
        &mut flags,
        &["-write-config"],
    );

    assert!(!output.contains("# config\n"));
    assert!(!output.contains("write-config true"));
    assert!(output.contains("# host\n"));
}

#[test]
fn test_without_write_flag_the_flag_is_unknown() {
    let dir = ConfigDir::new();
    let loader = ConfigLoader::new(
        Options::with_path(dir.path("absent.conf")).without_write_config_flag(),
    );
    let mut flags = app_flags();

    let (result, output) = load(&loader, &mut flags, &["-write-config"]);

    assert!(result.is_err());
    assert!(output.is_empty());
}

#[test]
fn test_round_trip_through_a_fresh_registry() {
    let dir = ConfigDir::new();
    let mut original = app_flags();
    for (name, value) in [
        ("host", "round.example"),
        ("port", "1234"),
        ("motd", "hello   there world"),
        ("debug", "true"),
    ] {
        original.set(name, value).unwrap();
    }

    let mut dump = Vec::new();
    write_config(&mut dump, &original, &[]).unwrap();
    let path = dir.path("dump.conf");
    std::fs::write(&path, dump).unwrap();

    let mut copy = app_flags();
    load(&loader_for(&path), &mut copy, &[]).0.unwrap();

    for name in ["host", "port", "motd", "debug", "ratio"] {
        assert_eq!(
            copy.lookup(name).map(|f| f.value),
            original.lookup(name).map(|f| f.value),
            "{name}"
        );
    }
    assert_eq!(copy.get::<f64>("ratio"), Some(0.25), "defaults stay defaults");
}

#[test]
fn test_save_config_then_load() {
    let dir = ConfigDir::new();
    let path = dir.path("saved/app.conf");
    let mut flags = app_flags();
    flags.parse(&args(&["-port", "4242"])).unwrap();

    save_config(&path, &flags, &[]).unwrap();

    let mut reloaded = app_flags();
    load(&loader_for(&path), &mut reloaded, &[]).0.unwrap();
    assert_eq!(reloaded.get::<u64>("port"), Some(4242));
}

#[test]
fn test_write_config_line_in_file_does_not_dump() {
    let dir = ConfigDir::new();
    let path = dir.write("app.conf", "write-config true\nport 9000\n");
    let mut flags = app_flags();

    let (result, output) = load(&loader_for(&path), &mut flags, &[]);

    assert_eq!(result.unwrap(), Outcome::Parsed { loaded: Some(path.clone()) });
    assert_eq!(output, "");
    assert_eq!(flags.get::<u64>("port"), Some(9000));
}

#[test]
fn test_multi_line_value_reads_back_cleanly() {
    let dir = ConfigDir::new();
    let mut original = app_flags();
    original.set("motd", "line one\nline two").unwrap();
    original.set("port", "7000").unwrap();

    let path = dir.path("dump.conf");
    save_config(&path, &original, &[]).unwrap();

    let mut copy = app_flags();
    load(&loader_for(&path), &mut copy, &[]).0.unwrap();
    assert_eq!(copy.get::<u64>("port"), Some(7000));
    assert_eq!(copy.get::<String>("motd").as_deref(), Some(""));
}
