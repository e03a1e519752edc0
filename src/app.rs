//! Application module: the menu loop and its command handlers.
//!
//! `App` owns the store, the audio capability and the loaded settings; the
//! handlers live in `app::model` and the shared song picker in
//! `app::picker`.

mod model;
mod picker;

pub use model::*;
