//! The engine facade: lifecycle, locking and result-buffer ownership.

pub mod config;
pub mod engine;
pub mod handle;

pub use config::EngineConfig;
pub use engine::{Engine, EngineStats};
pub use handle::{HandleRegistry, ResultHandle};
