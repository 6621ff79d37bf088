// Core modules
pub mod config;
pub mod consts;
pub mod util;

// On-disk formats
pub mod codec;
pub mod manifest;

// Capability interfaces (persistence backend / bot registry seams)
pub mod backend;

// Store layer (per-world units + coordinator)
pub mod store; // src/store/{mod,world,coordinator}.rs

// Offline inspection (list/doctor over a data root)
pub mod inspect;

// Convenience re-exports
pub use backend::{BotPersistence, BotRegistry, BotSaveRequest, WorldInfo};
pub use codec::BotSnapshot;
pub use config::BotConfig;
pub use manifest::{read_manifest, write_manifest, Manifest, ManifestEntry};
pub use store::{BotStore, WorldStore};
