//! Optional audio capability: practice capture and playback.
//!
//! The capability is a trait with two implementations picked at startup:
//! `DeviceAudio` talks to real devices (cpal capture, rodio playback) and
//! `UnavailableAudio` reports the feature as missing without crashing.
//! Recording files live under a per-song folder; see `audio::recordings`.

mod backend;
mod device;
mod recordings;

pub use backend::*;
pub use device::*;
pub use recordings::*;
