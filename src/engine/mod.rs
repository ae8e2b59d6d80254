//! Game driver around the board and search.
//!
//! The controller owns the game position and its hash history, and runs
//! searches on a dedicated worker thread that reports back over a channel.

mod config;
mod controller;

pub use config::EngineConfig;
pub use controller::{EngineController, SearchEvent, SearchJob};
