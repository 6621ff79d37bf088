//! store — per-world storage units and the coordinator above them.
//!
//! - world.rs       — WorldStore: one world's snapshot directory + manifest
//! - coordinator.rs — BotStore: world uid -> WorldStore routing, lifecycle
//!                    reaction, merged manifest view

pub mod coordinator;
pub mod world;

pub use coordinator::BotStore;
pub use world::WorldStore;
