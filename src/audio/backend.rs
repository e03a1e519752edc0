//! The audio capability seam: trait, errors and startup detection.

use std::path::{Path, PathBuf};

use cpal::traits::HostTrait;
use thiserror::Error;

use super::device::DeviceAudio;

#[derive(Debug, Error)]
pub enum AudioError {
    /// No usable audio devices were detected at startup.
    #[error("audio is unavailable on this system (no audio devices detected)")]
    Unavailable,
    #[error("no default input device for recording")]
    NoInputDevice,
    #[error("could not open {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("audio backend error: {0}")]
    Backend(String),
}

/// Capture and playback operations the rest of the program depends on.
///
/// Both operations block the calling thread: `record` for the requested
/// duration, `play` until the recording ends.
pub trait AudioBackend {
    /// Whether this backend can do anything at all. Handlers report the
    /// feature as disabled instead of attempting an operation.
    fn is_available(&self) -> bool {
        true
    }

    /// Capture `seconds` of mono audio from the default input device into a
    /// WAV file at `path`.
    fn record(&self, path: &Path, seconds: u32) -> Result<(), AudioError>;

    /// Play a recording on the default output device, blocking until it
    /// finishes.
    fn play(&self, path: &Path) -> Result<(), AudioError>;
}

/// Stub used when the host exposes no audio devices. Every operation
/// reports unavailability; nothing else in the program is affected.
pub struct UnavailableAudio;

impl AudioBackend for UnavailableAudio {
    fn is_available(&self) -> bool {
        false
    }

    fn record(&self, _path: &Path, _seconds: u32) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }

    fn play(&self, _path: &Path) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }
}

/// Pick the audio implementation for this run.
///
/// Any default input or output device is enough to hand out `DeviceAudio`;
/// the missing direction still fails per-operation with a clear message.
pub fn detect(sample_rate: u32) -> Box<dyn AudioBackend> {
    let host = cpal::default_host();
    if host.default_input_device().is_some() || host.default_output_device().is_some() {
        Box::new(DeviceAudio::new(sample_rate))
    } else {
        Box::new(UnavailableAudio)
    }
}
