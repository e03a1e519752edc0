//! CSV repository for songs.
//!
//! The store is a flat UTF-8 CSV file read in full and rewritten in full on
//! every mutation. Rewrites go through a temp file followed by a rename so
//! an interrupted save never leaves a truncated store behind.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use super::model::Song;
use crate::scheduler::{EASE_MAX, EASE_MIN};

/// Column order of the store file.
const HEADER: [&str; 5] = [
    "name",
    "reference",
    "last_practiced",
    "interval_days",
    "ease_factor",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not access song store {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read song store {}: {}", path.display(), source)]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// A row that parsed as CSV but does not describe a valid song.
    ///
    /// Loading fails outright rather than skipping the row: a partial load
    /// followed by any save would silently drop the song.
    #[error("malformed row at line {} of {}: {}", line, path.display(), reason)]
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

/// Whole-file repository over the songs CSV.
pub struct SongStore {
    path: PathBuf,
}

impl SongStore {
    /// Open the store at `path`, creating a header-only file (and any
    /// missing parent directories) when none exists yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        if !store.path.exists() {
            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: store.path.clone(),
                    source,
                })?;
            }
            store.save(&[])?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every song in store order. A missing or header-only file yields
    /// an empty list; a malformed row fails the whole load.
    pub fn load(&self) -> Result<Vec<Song>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path).map_err(|source| StoreError::Csv {
            path: self.path.clone(),
            source,
        })?;

        let mut songs = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|source| StoreError::Csv {
                path: self.path.clone(),
                source,
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            songs.push(self.parse_record(&record, line)?);
        }
        Ok(songs)
    }

    /// Rewrite the whole store with `songs`, in order.
    pub fn save(&self, songs: &[Song]) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("tmp");

        let mut writer = csv::Writer::from_path(&tmp).map_err(|source| StoreError::Csv {
            path: tmp.clone(),
            source,
        })?;

        let csv_err = |source| StoreError::Csv {
            path: tmp.clone(),
            source,
        };

        writer.write_record(HEADER).map_err(csv_err)?;
        for song in songs {
            let last_practiced = song.last_practiced.format(DATE_FORMAT).to_string();
            let interval_days = song.interval_days.to_string();
            let ease_factor = format!("{:.2}", song.ease_factor);
            writer
                .write_record([
                    song.name.as_str(),
                    song.reference.as_str(),
                    last_practiced.as_str(),
                    interval_days.as_str(),
                    ease_factor.as_str(),
                ])
                .map_err(csv_err)?;
        }
        writer.flush().map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        drop(writer);

        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn parse_record(&self, record: &csv::StringRecord, line: u64) -> Result<Song, StoreError> {
        let malformed = |reason: String| StoreError::MalformedRow {
            path: self.path.clone(),
            line,
            reason,
        };

        if record.len() != HEADER.len() {
            return Err(malformed(format!(
                "expected {} fields, found {}",
                HEADER.len(),
                record.len()
            )));
        }

        let last_practiced = NaiveDate::parse_from_str(&record[2], DATE_FORMAT)
            .map_err(|e| malformed(format!("bad last_practiced {:?}: {e}", &record[2])))?;

        let interval_days: u32 = record[3]
            .trim()
            .parse()
            .map_err(|e| malformed(format!("bad interval_days {:?}: {e}", &record[3])))?;
        if interval_days == 0 {
            return Err(malformed("interval_days must be >= 1".to_string()));
        }

        let ease_factor: f64 = record[4]
            .trim()
            .parse()
            .map_err(|e| malformed(format!("bad ease_factor {:?}: {e}", &record[4])))?;
        // The range check also rejects NaN.
        if !(EASE_MIN..=EASE_MAX).contains(&ease_factor) {
            return Err(malformed(format!(
                "ease_factor must be in [{EASE_MIN}, {EASE_MAX}], found {:?}",
                &record[4]
            )));
        }

        Ok(Song {
            name: record[0].to_string(),
            reference: record[1].to_string(),
            last_practiced,
            interval_days,
            ease_factor,
        })
    }
}
