use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub review: ReviewSettings,
    pub recording: RecordingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage: StorageSettings::default(),
            review: ReviewSettings::default(),
            recording: RecordingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Path of the songs CSV store.
    pub songs_file: PathBuf,
    /// Folder holding per-song recording subfolders.
    pub recordings_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            songs_file: PathBuf::from("songs.csv"),
            recordings_dir: PathBuf::from("recordings"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReviewSettings {
    /// When a review session writes graded songs back to the store.
    pub persist: PersistMode,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            persist: PersistMode::AfterSession,
        }
    }
}

/// Persistence timing for a review session.
///
/// `after-session` keeps the single whole-store rewrite at the end of the
/// batch; an interrupted session loses its in-memory grades.
/// `after-each-song` rewrites after every graded song instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersistMode {
    #[serde(alias = "after_session", alias = "session")]
    AfterSession,
    #[serde(alias = "after_each_song", alias = "each-song", alias = "each_song")]
    AfterEachSong,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecordingSettings {
    /// Recording length used when the prompt is left empty (seconds).
    pub default_seconds: u32,
    /// Requested capture sample rate (Hz); the device default is used when
    /// the hardware does not support it.
    pub sample_rate: u32,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            default_seconds: 30,
            sample_rate: 44_100,
        }
    }
}
