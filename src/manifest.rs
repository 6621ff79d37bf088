//! manifest — per-world index of known bots and their resume intent.
//!
//! One manifest file per world: a gzip-compressed JSON mapping from real
//! name to `{name, uuid, resume}`. The manifest is a secondary index next
//! to the snapshot files; membership does not imply the snapshot file still
//! exists (a consumed load removes both, but the two are written
//! independently and can diverge under partial failure).
//!
//! Known limitation: entries are keyed by the bot's real name while
//! snapshot files are keyed by uuid. A renamed bot (same uuid, new name)
//! leaves the old entry in place; nothing reconciles the two.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use uuid::Uuid;

use crate::util::write_file_atomic;

/// One bot known to a world, independent of snapshot file presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub uuid: Uuid,
    pub resume: bool,
}

/// Mapping real name -> entry. Iteration order is unspecified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: HashMap<String, ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set/overwrite the entry keyed by its real name.
    pub fn insert(&mut self, entry: ManifestEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    pub fn remove(&mut self, name: &str) -> Option<ManifestEntry> {
        self.entries.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ManifestEntry)> {
        self.entries.iter()
    }

    /// Union with `other`; on a name collision the entry from `other` wins.
    pub fn merge(&mut self, other: &Manifest) {
        for entry in other.entries.values() {
            self.insert(entry.clone());
        }
    }

    /// Names of entries flagged for automatic resumption.
    pub fn resumable_names(&self) -> Vec<String> {
        self.entries
            .values()
            .filter(|e| e.resume)
            .map(|e| e.name.clone())
            .collect()
    }
}

/// Read and decode a manifest file (gzip JSON).
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let bytes = fs::read(path).with_context(|| format!("read manifest {}", path.display()))?;
    let mut json = Vec::new();
    GzDecoder::new(bytes.as_slice())
        .read_to_end(&mut json)
        .with_context(|| format!("gunzip manifest {}", path.display()))?;
    serde_json::from_slice(&json).with_context(|| format!("parse manifest {}", path.display()))
}

/// Encode and rewrite a manifest file in full (gzip JSON, tmp+rename).
pub fn write_manifest(path: &Path, m: &Manifest) -> Result<()> {
    let json = serde_json::to_vec(m).context("serialize manifest")?;
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(&json)?;
    let bytes = enc.finish().context("gzip manifest")?;
    write_file_atomic(path, &bytes)
}
