//! Layered configuration loading: global file, workspace files, environment

use frameslide::config::{global_config_path, ConfigLoader};
use frameslide::GranularityKind;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes access to process environment variables across tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const VARS: [&str; 4] = [
    "HOME",
    "XDG_CONFIG_HOME",
    "FRAMESLIDE_ENV",
    "FRAMESLIDE_FRAMES__RETENTION_BOUND",
];

/// Runs `f` with the given variables set and every other tracked variable
/// removed, restoring the previous environment afterwards.
fn with_env<T>(vars: &[(&str, String)], f: impl FnOnce() -> T) -> T {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(&str, Option<String>)> =
        VARS.iter().map(|v| (*v, std::env::var(v).ok())).collect();

    for var in VARS {
        std::env::remove_var(var);
    }
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let result = f();

    for (name, value) in saved {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }
    result
}

fn s(path: &Path) -> String {
    path.display().to_string()
}

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn global_config_path_prefers_xdg_config_home() {
    let temp = TempDir::new().unwrap();
    let xdg = temp.path().join("xdg");
    let path = with_env(&[("XDG_CONFIG_HOME", s(&xdg))], global_config_path).unwrap();
    assert_eq!(path, xdg.join("frameslide").join("config.toml"));

    let home = temp.path().join("home");
    let path = with_env(&[("HOME", s(&home))], global_config_path).unwrap();
    assert_eq!(path, home.join(".config").join("frameslide").join("config.toml"));
}

#[test]
fn workspace_config_overrides_global_config() {
    let temp = TempDir::new().unwrap();
    let xdg = temp.path().join("xdg");
    write(
        &xdg.join("frameslide").join("config.toml"),
        "[frames]\nretention_bound = 6\ngranularity = \"month\"\noffset_threshold = 12.0\n",
    );
    let workspace = temp.path().join("workspace");
    write(
        &workspace.join("config").join("config.toml"),
        "[frames]\nretention_bound = 4\n",
    );

    let config = with_env(&[("XDG_CONFIG_HOME", s(&xdg))], || ConfigLoader::load(&workspace)).unwrap();
    assert_eq!(config.frames.retention_bound, 4);
    assert_eq!(config.frames.granularity, GranularityKind::Month);
    assert_eq!(config.frames.offset_threshold, 12.0);
}

#[test]
fn environment_overrides_files() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("workspace");
    write(
        &workspace.join("config").join("config.toml"),
        "[frames]\nretention_bound = 4\n",
    );

    let config = with_env(
        &[
            ("HOME", s(&temp.path().join("home"))),
            ("FRAMESLIDE_FRAMES__RETENTION_BOUND", "8".to_string()),
        ],
        || ConfigLoader::load(&workspace),
    )
    .unwrap();
    assert_eq!(config.frames.retention_bound, 8);
}

#[test]
fn selected_environment_file_is_layered_last() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("workspace");
    write(
        &workspace.join("config").join("config.toml"),
        "[frames]\ngranularity = \"week\"\n",
    );
    write(
        &workspace.join("config").join("staging.toml"),
        "[frames]\ngranularity = \"day\"\nretention_bound = 7\n",
    );

    let config = with_env(
        &[
            ("HOME", s(&temp.path().join("home"))),
            ("FRAMESLIDE_ENV", "staging".to_string()),
        ],
        || ConfigLoader::load(&workspace),
    )
    .unwrap();
    assert_eq!(config.frames.granularity, GranularityKind::Day);
    assert_eq!(config.frames.retention_bound, 7);
}

#[test]
fn invalid_workspace_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("workspace");
    write(
        &workspace.join("config").join("config.toml"),
        "[frames]\nretention_bound = 1\n",
    );

    let result = with_env(&[("HOME", s(&temp.path().join("home")))], || {
        ConfigLoader::load(&workspace)
    });
    assert!(result.is_err());
}
