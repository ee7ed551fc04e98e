//! # Core Engine Module
//!
//! Shared configuration that the frame loop, the orbit camera and logging
//! setup read at startup.
//!
//! ## Organization
//!
//! - **Config**: `EngineConfig` and its sections, loadable from TOML or RON

pub mod config;

pub use config::{Config, ConfigError, EngineConfig, FrameConfig, LoggingConfig, OrbitCameraConfig};
