//! store/world — one world's durable bot storage: snapshot files + manifest.
//!
//! A WorldStore is the only writer of its directory and manifest file. The
//! snapshot file is the authoritative artifact; the manifest is a secondary
//! index written after it. The two are not committed together: a manifest
//! rewrite failure after a successful snapshot write leaves them diverged,
//! with the in-memory manifest authoritative until restart.

use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::backend::WorldInfo;
use crate::codec::{decode_snapshot, encode_snapshot, BotSnapshot};
use crate::consts::{MANIFEST_SUFFIX, SNAPSHOT_EXT};
use crate::manifest::{read_manifest, write_manifest, Manifest, ManifestEntry};
use crate::util::write_file_atomic;

/// Per-world storage unit.
pub struct WorldStore {
    world_uid: Uuid,
    world_name: String,
    bot_dir: PathBuf,
    manifest_path: PathBuf,
    manifest: Manifest,
}

impl WorldStore {
    /// Open (or lay out) storage for one world under `data_root`.
    ///
    /// Construction never fails. Directory creation and manifest decoding
    /// are both best-effort: a failed mkdir leaves a store whose saves will
    /// fail and log, and an unreadable manifest file starts the store with
    /// an empty manifest — snapshot files on disk stay put but become
    /// unreferenced until manually reconciled.
    pub fn new(world: &WorldInfo, data_root: &Path) -> Self {
        let bot_dir = data_root.join(&world.name);
        let manifest_path = data_root.join(format!("{}{}", world.name, MANIFEST_SUFFIX));

        if let Err(e) = fs::create_dir_all(&bot_dir) {
            warn!(
                "world {}: create bot dir {} failed: {e}",
                world.name,
                bot_dir.display()
            );
        }

        let mut manifest = Manifest::new();
        if manifest_path.is_file() {
            match read_manifest(&manifest_path) {
                Ok(m) => manifest = m,
                Err(e) => warn!(
                    "world {}: manifest {} unreadable, starting empty: {e:#}",
                    world.name,
                    manifest_path.display()
                ),
            }
        }

        Self {
            world_uid: world.uid,
            world_name: world.name.clone(),
            bot_dir,
            manifest_path,
            manifest,
        }
    }

    pub fn world_uid(&self) -> Uuid {
        self.world_uid
    }

    pub fn world_name(&self) -> &str {
        &self.world_name
    }

    /// Read-only view of the in-memory manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Path of the snapshot file for `uuid`.
    pub fn snapshot_path(&self, uuid: Uuid) -> PathBuf {
        self.bot_dir.join(format!("{}.{}", uuid, SNAPSHOT_EXT))
    }

    /// Persist one bot: snapshot file first, manifest second.
    ///
    /// The snapshot write is the failure boundary: if it errors, the
    /// manifest is untouched and the error is returned to the caller. A
    /// manifest rewrite failure after a successful snapshot write is logged
    /// only.
    pub fn save(&mut self, entry: ManifestEntry, state: &[u8]) -> Result<()> {
        let snap = BotSnapshot {
            world_uid: self.world_uid,
            state: state.to_vec(),
        };
        let bytes = encode_snapshot(&snap).with_context(|| {
            format!(
                "encode snapshot for {} in world {}",
                entry.name, self.world_name
            )
        })?;
        let path = self.snapshot_path(entry.uuid);
        write_file_atomic(&path, &bytes).with_context(|| {
            format!(
                "write snapshot for {} in world {}",
                entry.name, self.world_name
            )
        })?;

        self.manifest.insert(entry);
        self.persist_manifest();
        Ok(())
    }

    /// Fetch and consume the snapshot for `(name, uuid)`.
    ///
    /// Lookup keys on the snapshot file path alone, independent of manifest
    /// membership. Missing file and undecodable file both return `None`; an
    /// undecodable file is left in place for manual recovery. On success
    /// the file is deleted and the manifest entry for `name` removed; if
    /// the delete fails the load fails closed and returns `None` — handing
    /// out a snapshot whose file survived could produce two live bots from
    /// one save.
    pub fn load(&mut self, name: &str, uuid: Uuid) -> Option<BotSnapshot> {
        let path = self.snapshot_path(uuid);
        if !path.is_file() {
            return None;
        }

        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                warn!(
                    "world {}: read snapshot for {} failed: {e}",
                    self.world_name, name
                );
                return None;
            }
        };
        let snap = match decode_snapshot(&bytes) {
            Ok(s) => s,
            Err(e) => {
                warn!(
                    "world {}: snapshot for {} undecodable, leaving file in place: {e:#}",
                    self.world_name, name
                );
                return None;
            }
        };

        if let Err(e) = fs::remove_file(&path) {
            warn!(
                "world {}: delete snapshot for {} failed, load aborted: {e}",
                self.world_name, name
            );
            return None;
        }
        self.manifest.remove(name);
        self.persist_manifest();
        Some(snap)
    }

    fn persist_manifest(&self) {
        if let Err(e) = write_manifest(&self.manifest_path, &self.manifest) {
            warn!("world {}: manifest rewrite failed: {e:#}", self.world_name);
        }
    }
}
