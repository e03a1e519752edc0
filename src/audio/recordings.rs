//! Per-song recording folders and their contents.
//!
//! Each song stores its practice takes under `<recordings_dir>/<slug>/`,
//! one WAV per take, named by capture timestamp so lexical order is
//! chronological order.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use walkdir::WalkDir;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Folder name derived from a song name: lowercased, every
/// non-alphanumeric character replaced with `-`, outer hyphens trimmed.
pub fn song_slug(name: &str) -> String {
    let slug: String = name
        .chars()
        .flat_map(|ch| {
            if ch.is_alphanumeric() {
                ch.to_lowercase().collect::<Vec<char>>()
            } else {
                vec!['-']
            }
        })
        .collect();
    slug.trim_matches('-').to_string()
}

/// The recordings folder for one song.
pub fn song_dir(recordings_dir: &Path, song_name: &str) -> PathBuf {
    recordings_dir.join(song_slug(song_name))
}

/// Path for a new take captured at `now`.
pub fn new_recording_path(recordings_dir: &Path, song_name: &str, now: NaiveDateTime) -> PathBuf {
    song_dir(recordings_dir, song_name).join(format!("{}.wav", now.format(TIMESTAMP_FORMAT)))
}

/// WAV files in the song's folder, sorted by name. A missing folder simply
/// yields no recordings.
pub fn list_recordings(recordings_dir: &Path, song_name: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(song_dir(recordings_dir, song_name))
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file() && is_wav(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}
