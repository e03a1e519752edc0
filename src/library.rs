//! Song records and the CSV-backed store.
//!
//! The `Song` model lives in `library::model`; `library::store` holds the
//! whole-file load/save repository that every mutation goes through.

mod model;
mod store;

pub use model::*;
pub use store::*;
