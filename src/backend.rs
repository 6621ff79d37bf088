//! backend — capability interfaces between the bot lifecycle and persistence.
//!
//! The bot lifecycle talks to storage only through [`BotPersistence`], so a
//! different backend (say, database-backed) can replace the file-backed one
//! without touching lifecycle code. [`BotRegistry`] is the outbound seam:
//! the authority that actually instantiates a bot in memory when resumption
//! asks for it.

use uuid::Uuid;

use crate::codec::BotSnapshot;
use crate::manifest::Manifest;

/// World reference as delivered by host lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldInfo {
    pub uid: Uuid,
    pub name: String,
}

impl WorldInfo {
    pub fn new(uid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
        }
    }
}

/// View of a live bot handed to persistence on save.
#[derive(Debug, Clone, Copy)]
pub struct BotSaveRequest<'a> {
    /// Stable real name; the manifest key.
    pub real_name: &'a str,
    pub uuid: Uuid,
    /// World the bot currently lives in.
    pub world_uid: Uuid,
    /// Recreate automatically when that world next loads.
    pub resume: bool,
    /// Serialized entity state, opaque to storage.
    pub state: &'a [u8],
}

/// Storage backend for bot state. [`crate::BotStore`] is the file-backed
/// implementation; others are free to store elsewhere.
pub trait BotPersistence {
    /// Persist the bot's current state. Failures are logged and swallowed;
    /// a failed save leaves prior on-disk state untouched.
    fn save(&mut self, bot: &BotSaveRequest<'_>);

    /// Fetch and consume the saved snapshot for `(name, uuid)`, if any.
    /// A successful load removes the snapshot; a second call returns `None`.
    fn load(&mut self, real_name: &str, uuid: Uuid) -> Option<BotSnapshot>;

    /// Read-only union of every world's manifest.
    fn saved_bots(&self) -> Manifest;
}

/// The authority that instantiates bots in memory on resumption.
pub trait BotRegistry {
    /// Recreate the bot `real_name`, wired to `storage` as its persistence
    /// backend. Called once per resumable manifest entry on world load.
    fn load_new_bot(&mut self, real_name: &str, storage: &mut dyn BotPersistence);
}
