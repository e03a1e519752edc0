use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_encore_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", "/tmp/encore-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/encore-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("encore")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("encore")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_sane_and_validate() {
    let s = Settings::default();
    assert_eq!(s.storage.songs_file, std::path::PathBuf::from("songs.csv"));
    assert_eq!(
        s.storage.recordings_dir,
        std::path::PathBuf::from("recordings")
    );
    assert_eq!(s.review.persist, PersistMode::AfterSession);
    assert_eq!(s.recording.default_seconds, 30);
    assert_eq!(s.recording.sample_rate, 44_100);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_persist_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[storage]
songs_file = "/tmp/pieces.csv"
recordings_dir = "/tmp/takes"

[review]
persist = "each-song"

[recording]
default_seconds = 45
sample_rate = 48000
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ENCORE__RECORDING__DEFAULT_SECONDS");

    let s = Settings::load().unwrap();
    assert_eq!(
        s.storage.songs_file,
        std::path::PathBuf::from("/tmp/pieces.csv")
    );
    assert_eq!(
        s.storage.recordings_dir,
        std::path::PathBuf::from("/tmp/takes")
    );
    assert_eq!(s.review.persist, PersistMode::AfterEachSong);
    assert_eq!(s.recording.default_seconds, 45);
    assert_eq!(s.recording.sample_rate, 48_000);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[recording]
default_seconds = 30
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("ENCORE__RECORDING__DEFAULT_SECONDS", "10");

    let s = Settings::load().unwrap();
    assert_eq!(s.recording.default_seconds, 10);
}

#[test]
fn validate_rejects_zero_recording_values() {
    let mut s = Settings::default();
    s.recording.default_seconds = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.recording.sample_rate = 0;
    assert!(s.validate().is_err());
}
