//! Shared types, error model, and configuration for arcindex.
//!
//! This crate is the foundation depended on by all other arcindex crates.
//! It provides:
//! - [`ArcIndexError`] — the unified error type
//! - Domain types ([`ContentFile`], [`PhaseGroup`])
//! - Configuration ([`ArchiveConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ArchiveConfig, ContentConfig, IndexConfig, PhasesConfig, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{ArcIndexError, Result};
pub use types::{ContentFile, PhaseGroup};
