//! store/coordinator — routes bot persistence by world and reacts to world
//! lifecycle.
//!
//! One BotStore per save session. World stores are created when a world is
//! first observed (startup enumeration or a world-load event) and kept for
//! the lifetime of the process; a world removed from the server leaves its
//! directory orphaned on disk. The world->store map is mutated only by
//! `on_world_observed`, expected on the same thread as lifecycle dispatch —
//! there is no internal locking.

use log::warn;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::backend::{BotPersistence, BotRegistry, BotSaveRequest, WorldInfo};
use crate::codec::BotSnapshot;
use crate::config::BotConfig;
use crate::consts::BOT_DATA_DIR;
use crate::manifest::{Manifest, ManifestEntry};
use crate::store::world::WorldStore;

/// File-backed storage coordinator: one [`WorldStore`] per observed world.
pub struct BotStore {
    data_root: PathBuf,
    config: BotConfig,
    worlds: HashMap<Uuid, WorldStore>,
}

impl BotStore {
    /// Open the coordinator for one save session rooted at `storage_root`.
    ///
    /// The host is expected to call [`Self::on_world_observed`] once for
    /// every world already loaded, then feed world-load events as they
    /// arrive.
    pub fn new(storage_root: &Path, config: BotConfig) -> Self {
        let data_root = storage_root.join(BOT_DATA_DIR);
        if let Err(e) = fs::create_dir_all(&data_root) {
            warn!("create bot data root {} failed: {e}", data_root.display());
        }
        Self {
            data_root,
            config,
            worlds: HashMap::new(),
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Register (or re-register) a world. Idempotent with respect to the
    /// on-disk layout; the in-memory store entry is rebuilt from disk.
    pub fn on_world_observed(&mut self, world: &WorldInfo) {
        let store = WorldStore::new(world, &self.data_root);
        self.worlds.insert(world.uid, store);
    }

    /// Convenience for startup enumeration of already-loaded worlds.
    pub fn observe_worlds<'a>(&mut self, worlds: impl IntoIterator<Item = &'a WorldInfo>) {
        for world in worlds {
            self.on_world_observed(world);
        }
    }

    /// World-load event: (re)initialize the world's store, then ask the
    /// registry to recreate every manifest entry flagged `resume`.
    ///
    /// Manifest membership, not snapshot file presence, drives resumption.
    /// Entries are attempted in the manifest's natural (unspecified) order;
    /// the only promise is that all flagged entries are attempted.
    pub fn on_world_load(&mut self, world: &WorldInfo, registry: &mut dyn BotRegistry) {
        self.on_world_observed(world);

        if !self.config.resume_on_load() {
            return;
        }
        let names = match self.worlds.get(&world.uid) {
            Some(store) => store.manifest().resumable_names(),
            None => return,
        };
        for name in names {
            registry.load_new_bot(&name, self);
        }
    }

    /// Store for a world uid, if observed.
    pub fn world_store(&self, uid: Uuid) -> Option<&WorldStore> {
        self.worlds.get(&uid)
    }
}

impl BotPersistence for BotStore {
    /// Resolve the bot's current world and delegate to its store. A bot in
    /// an unobserved world is dropped (logged); nothing is written.
    fn save(&mut self, bot: &BotSaveRequest<'_>) {
        let Some(store) = self.worlds.get_mut(&bot.world_uid) else {
            warn!(
                "save for {} dropped: no storage for world {}",
                bot.real_name, bot.world_uid
            );
            return;
        };
        let entry = ManifestEntry {
            name: bot.real_name.to_string(),
            uuid: bot.uuid,
            resume: bot.resume,
        };
        if let Err(e) = store.save(entry, bot.state) {
            warn!("save for {} failed: {e:#}", bot.real_name);
        }
    }

    /// Search every known world store; first hit wins, in unspecified
    /// order. A hit means "found somewhere", not "found in the world the
    /// bot is being loaded into" — callers wanting the latter must check
    /// the snapshot's `world_uid` themselves.
    fn load(&mut self, real_name: &str, uuid: Uuid) -> Option<BotSnapshot> {
        for store in self.worlds.values_mut() {
            if let Some(snap) = store.load(real_name, uuid) {
                return Some(snap);
            }
        }
        None
    }

    /// Union of every world's manifest. A real name present in more than
    /// one world resolves last-write-wins in unspecified world order.
    fn saved_bots(&self) -> Manifest {
        let mut merged = Manifest::new();
        for store in self.worlds.values() {
            merged.merge(store.manifest());
        }
        merged
    }
}
