//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML
//! data files:
//! - World graph: locations and their stations (RON)
//! - Step configuration: monster and puzzle per station step (RON)
//! - Monster templates (RON)
//! - Hero templates (RON)
//! - Balance configuration (TOML)
//!
//! Content is consumed by runtime oracles and never appears in session state
//! beyond the identifiers that reference it.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, ContentPack, HeroLoader, MonsterLoader, StepEntry, StepLoader,
    WorldLoader, WorldGraph,
};

/// Directory of the sample content pack shipped with this crate.
pub fn bundled_data_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}
