//! Library exports for the stagedraw drawing engine.
//!
//! Exposes the engine, its surfaces and configuration so hosts other than
//! the bundled headless replayer can drive it.

pub mod app;
pub mod config;
pub mod draw;
pub mod input;
pub mod replay;
pub mod resize;
pub mod util;

pub use config::Config;
pub use input::{DrawEngine, EngineEvent};
