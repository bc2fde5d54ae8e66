//! Integration tests for layered config loading.
//!
//! Exercises the full pipeline against real files:
//! - fragment directories merged in lexicographic order
//! - system vs user precedence and extra paths
//! - discovery skipping missing locations while parse failures abort

use confight::paths::AppPaths;
use confight::{AppOptions, Error, Loader, Tree, load, load_app, load_paths, load_user_app};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Failed to write fixture");
}

/// System prefix with a main file and two fragments.
fn system_fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "config.toml",
        r#"
[server]
host = "localhost"
port = 8080

[logging]
level = "info"
"#,
    );
    fs::create_dir(temp.path().join("conf.d")).unwrap();
    write(
        &temp.path().join("conf.d"),
        "10_port.json",
        r#"{"server": {"port": 9090}}"#,
    );
    write(
        &temp.path().join("conf.d"),
        "20_logging.ini",
        "[logging]\nlevel = debug\n",
    );
    temp
}

#[test]
fn test_fragments_merge_in_lexicographic_order() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "00_base.toml", "[section]\nkey = \"zero\"\n");
    write(temp.path(), "01_first.json", r#"{"section": {"key": "first"}}"#);
    write(temp.path(), "AA_second.ini", "[section]\nkey = second\n");

    let config = load_paths(&[temp.path()]).unwrap();
    assert_eq!(serde_json::Value::Object(config), json!({"section": {"key": "second"}}));
}

#[test]
fn test_load_app_reads_file_then_fragments() {
    let system = system_fixture();
    let options = AppOptions::new().prefix(system.path());

    let config = load_app("myapp", &options).unwrap();
    assert_eq!(config["server"]["host"], "localhost");
    assert_eq!(config["server"]["port"], 9090);
    assert_eq!(config["logging"]["level"], "debug");
}

#[test]
fn test_user_config_overrides_system() {
    let system = system_fixture();
    let user = TempDir::new().unwrap();
    write(user.path(), "config.toml", "[server]\nhost = \"example.org\"\n");

    let options = AppOptions::new()
        .prefix(system.path())
        .user_prefix(user.path());
    let config = load_user_app("myapp", &options).unwrap();

    assert_eq!(config["server"]["host"], "example.org");
    assert_eq!(config["server"]["port"], 9090);
}

#[test]
fn test_extra_paths_win_over_user_config() {
    let system = system_fixture();
    let user = TempDir::new().unwrap();
    write(user.path(), "config.toml", "[server]\nport = 1\n");
    let extra = TempDir::new().unwrap();
    write(extra.path(), "override.json", r#"{"server": {"port": 2}}"#);

    let options = AppOptions::new()
        .prefix(system.path())
        .user_prefix(user.path())
        .extra_path(extra.path().join("override.json"));
    let config = load_user_app("myapp", &options).unwrap();

    assert_eq!(config["server"]["port"], 2);
}

#[test]
fn test_missing_locations_are_skipped() {
    let temp = TempDir::new().unwrap();
    let options = AppOptions::new()
        .prefix(temp.path().join("nowhere"))
        .user_prefix(temp.path().join("nobody"));

    let config = load_user_app("myapp", &options).unwrap();
    assert!(config.is_empty());
}

#[test]
fn test_force_extension_skips_other_fragments() {
    let system = system_fixture();
    let options = AppOptions::new()
        .prefix(system.path())
        .extension("json")
        .force_extension(true)
        .file_path(system.path().join("conf.d").join("10_port.json"));

    let config = load_app("myapp", &options).unwrap();
    assert_eq!(config["server"]["port"], 9090);
    assert!(config.get("logging").is_none());
}

#[test]
fn test_default_file_has_lowest_precedence() {
    let system = system_fixture();
    let defaults = TempDir::new().unwrap();
    write(
        defaults.path(),
        "defaults.toml",
        "[server]\nhost = \"0.0.0.0\"\nworkers = 4\n",
    );

    let options = AppOptions::new()
        .prefix(system.path())
        .default_file(defaults.path().join("defaults.toml"));
    let config = load_app("myapp", &options).unwrap();

    assert_eq!(config["server"]["host"], "localhost");
    assert_eq!(config["server"]["workers"], 4);
}

#[test]
fn test_null_does_not_unset_section() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "00_base.toml", "[section]\nkey = \"value\"\n");
    write(temp.path(), "10_unset.json", r#"{"section": null}"#);

    let config = load_paths(&[temp.path()]).unwrap();
    assert_eq!(config["section"]["key"], "value");
}

#[test]
fn test_broken_fragment_aborts_load() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "00_base.toml", "[section]\nkey = \"value\"\n");
    write(temp.path(), "10_broken.json", "{\"section\": ");

    let err = load_paths(&[temp.path()]).unwrap_err();
    assert!(matches!(err, Error::Format { .. }));
}

#[test]
fn test_subdirectory_fragment_is_io_error() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "00_base.toml", "[section]\nkey = \"value\"\n");
    fs::create_dir(temp.path().join("10_sub.toml")).unwrap();

    let err = load_paths(&[temp.path()]).unwrap_err();
    assert!(matches!(err, Error::Io { ref path, .. } if path.ends_with("10_sub.toml")));
}

#[test]
fn test_unknown_fragment_extension_aborts_load() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "00_base.toml", "[section]\nkey = \"value\"\n");
    write(temp.path(), "README.md", "# notes\n");

    let err = load_paths(&[temp.path()]).unwrap_err();
    assert!(err.is_unknown_format());
}

#[test]
fn test_explicit_format_for_extensionless_files() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "settings", r#"{"a": 1}"#);

    let config = Loader::new()
        .format("json")
        .load(&[temp.path().join("settings")])
        .unwrap();
    assert_eq!(config["a"], 1);
}

#[test]
fn test_load_app_paths_candidate_order() {
    let temp = TempDir::new().unwrap();
    for (name, value) in [
        ("default.json", 0),
        ("system.json", 1),
        ("user.json", 3),
        ("extra.json", 5),
    ] {
        write(temp.path(), name, &format!(r#"{{"layer": {value}, "{name}": true}}"#));
    }

    let app_paths = AppPaths {
        default: Some(temp.path().join("default.json")),
        file_path: Some(temp.path().join("system.json")),
        dir_path: None,
        user_file_path: Some(temp.path().join("user.json")),
        user_dir_path: None,
        paths: vec![temp.path().join("extra.json")],
    };
    let config: Tree = Loader::new().load_app_paths(&app_paths, None).unwrap();

    assert_eq!(config["layer"], 5);
    assert_eq!(
        config.keys().collect::<Vec<_>>(),
        vec!["layer", "default.json", "system.json", "user.json", "extra.json"]
    );
}

#[test]
fn test_missing_file_is_io_error_when_loaded_directly() {
    let err = load(&["/path/to/nowhere.toml"]).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_skipped_by_find_but_fails_parse() {
    use std::os::unix::fs::PermissionsExt;

    if nix::unistd::geteuid().is_root() {
        return;
    }

    let temp = TempDir::new().unwrap();
    let file = temp.path().join("secret.toml");
    write(temp.path(), "secret.toml", "key = 1\n");
    fs::set_permissions(&file, fs::Permissions::from_mode(0o200)).unwrap();

    assert!(confight::find(&file).is_empty());
    let err = confight::parse(&file, None).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
