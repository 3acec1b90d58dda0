//! Library exports for reusing drawover subsystems.
//!
//! Exposes the configuration types, drawing canvas, input state machine,
//! UI renderer and export pipeline so integration tests and tools such as
//! `dump_config_schema` can share them with the main binary.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod transparency;
pub mod ui;
pub mod util;

pub use config::Config;
