// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use yare::parameterized;

const ENV_KEYS: [&str; 4] = ["VSH_VFS", "VSH_CONFIG", "VSH_LOG", "VSH_STATE_DIR"];

/// Clear the shell's variables, run `f` with `vars` set, then clear again.
fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
    for (k, v) in vars {
        std::env::set_var(k, v);
    }
    let out = f();
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
    out
}

fn parse(content: &str) -> Result<FileConfig, ConfigError> {
    FileConfig::parse(content, Path::new("config.toml"))
}

#[test]
fn parses_every_key() {
    let file = parse(
        r#"
vfs_file = "/data/store.dat"
history_size = 50
max_jobs = 4
log_level = "debug"
banner = false
"#,
    )
    .unwrap();
    assert_eq!(
        file,
        FileConfig {
            vfs_file: Some(PathBuf::from("/data/store.dat")),
            history_size: Some(50),
            max_jobs: Some(4),
            log_level: Some("debug".to_string()),
            banner: Some(false),
        }
    );
}

#[test]
fn empty_file_is_all_defaults() {
    assert_eq!(parse("").unwrap(), FileConfig::default());
}

#[parameterized(
    unknown_key = { "colour = true" },
    wrong_type = { "history_size = \"lots\"" },
    negative = { "max_jobs = -1" },
    not_toml = { "history_size =" },
)]
fn rejects_bad_config(content: &str) {
    let err = parse(content).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    assert!(err.to_string().starts_with("invalid config config.toml: "));
}

#[test]
fn missing_optional_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let file = FileConfig::load(&dir.path().join("absent.toml"), false).unwrap();
    assert_eq!(file, FileConfig::default());
}

#[test]
fn missing_required_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FileConfig::load(&dir.path().join("absent.toml"), true).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
#[serial]
fn defaults_without_any_source() {
    let config = with_env(&[], || {
        Config::merge(Overrides::default(), FileConfig::default(), PathBuf::from("/state"))
    });
    assert_eq!(
        config,
        Config {
            vfs_file: PathBuf::from(DEFAULT_VFS_FILE),
            history_size: DEFAULT_HISTORY_SIZE,
            max_jobs: DEFAULT_MAX_JOBS,
            log_filter: DEFAULT_LOG_LEVEL.to_string(),
            banner: true,
            state_dir: PathBuf::from("/state"),
            log_path: PathBuf::from("/state/vsh.log"),
        }
    );
}

#[test]
#[serial]
fn flag_beats_env_beats_file() {
    let file = FileConfig {
        vfs_file: Some(PathBuf::from("file.dat")),
        log_level: Some("error".to_string()),
        ..FileConfig::default()
    };

    let config = with_env(&[("VSH_VFS", "env.dat"), ("VSH_LOG", "info")], || {
        let flags = Overrides {
            vfs_file: Some(PathBuf::from("flag.dat")),
            log_level: Some("trace".to_string()),
            ..Overrides::default()
        };
        Config::merge(flags, file.clone(), PathBuf::from("/s"))
    });
    assert_eq!(config.vfs_file, PathBuf::from("flag.dat"));
    assert_eq!(config.log_filter, "trace");

    let config = with_env(&[("VSH_VFS", "env.dat"), ("VSH_LOG", "info")], || {
        Config::merge(Overrides::default(), file.clone(), PathBuf::from("/s"))
    });
    assert_eq!(config.vfs_file, PathBuf::from("env.dat"));
    assert_eq!(config.log_filter, "info");

    let config = with_env(&[], || {
        Config::merge(Overrides::default(), file.clone(), PathBuf::from("/s"))
    });
    assert_eq!(config.vfs_file, PathBuf::from("file.dat"));
    assert_eq!(config.log_filter, "error");
}

#[parameterized(
    default_on = { false, None, true },
    file_off = { false, Some(false), false },
    flag_off = { true, Some(true), false },
)]
fn banner_setting(no_banner: bool, file_banner: Option<bool>, expected: bool) {
    let overrides = Overrides {
        no_banner,
        ..Overrides::default()
    };
    let file = FileConfig {
        banner: file_banner,
        ..FileConfig::default()
    };
    let config = Config::merge(overrides, file, PathBuf::from("/s"));
    assert_eq!(config.banner, expected);
}

#[test]
#[serial]
fn load_reads_explicit_config_and_state_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vsh.toml");
    std::fs::write(&path, "history_size = 7\nmax_jobs = 2\n").unwrap();
    let state = dir.path().join("state");

    let config = with_env(&[("VSH_STATE_DIR", state.to_str().unwrap())], || {
        Config::load(Overrides {
            config: Some(path.clone()),
            ..Overrides::default()
        })
    })
    .unwrap();
    assert_eq!(config.history_size, 7);
    assert_eq!(config.max_jobs, 2);
    assert_eq!(config.log_path, state.join("vsh.log"));
}

#[test]
#[serial]
fn load_uses_config_env_var() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("env.toml");
    std::fs::write(&path, "vfs_file = \"from-env-config.dat\"\n").unwrap();

    let config = with_env(
        &[
            ("VSH_CONFIG", path.to_str().unwrap()),
            ("VSH_STATE_DIR", dir.path().to_str().unwrap()),
        ],
        || Config::load(Overrides::default()),
    )
    .unwrap();
    assert_eq!(config.vfs_file, PathBuf::from("from-env-config.dat"));
}

#[test]
#[serial]
fn load_fails_on_missing_explicit_config() {
    let dir = tempfile::tempdir().unwrap();
    let result = with_env(&[("VSH_STATE_DIR", dir.path().to_str().unwrap())], || {
        Config::load(Overrides {
            config: Some(dir.path().join("nope.toml")),
            ..Overrides::default()
        })
    });
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}
