//! inspect — offline reports over a bot data root. Never mutates.
//!
//! Cross-checks the two artifacts each world keeps: manifest entries vs
//! snapshot files. Load consumes snapshot files while manifest rewrites can
//! fail independently, so the two legitimately drift; the report makes the
//! drift visible for manual reconciliation instead of "fixing" it (deleting
//! an orphan here would race a live server whose in-memory manifest still
//! references it).

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::{MANIFEST_SUFFIX, SNAPSHOT_EXT};
use crate::manifest::{read_manifest, Manifest};

/// Health report for one world's storage.
#[derive(Debug, Clone, Serialize)]
pub struct WorldReport {
    pub world: String,
    /// False when a manifest file exists but does not decode.
    pub manifest_readable: bool,
    pub entries: usize,
    pub snapshot_files: usize,
    /// Snapshot file names no manifest entry references.
    pub orphan_snapshots: Vec<String>,
    /// Manifest entry names whose snapshot file is gone (consumed or lost).
    pub missing_snapshots: Vec<String>,
}

/// Scan every world found under `data_root` — by manifest file and/or
/// snapshot directory — and produce one report per world, sorted by name.
pub fn scan_worlds(data_root: &Path) -> Result<Vec<WorldReport>> {
    let mut reports = Vec::new();
    for (world, manifest_path) in discover_worlds(data_root)? {
        reports.push(report_world(data_root, &world, manifest_path.as_deref()));
    }
    Ok(reports)
}

/// Union of every world's on-disk manifest (the offline counterpart of the
/// live coordinator's merged view; same last-write-wins on name collision).
pub fn merged_saved_bots(data_root: &Path) -> Result<Manifest> {
    let mut merged = Manifest::new();
    for (world, manifest_path) in discover_worlds(data_root)? {
        let Some(path) = manifest_path else { continue };
        match read_manifest(&path) {
            Ok(m) => merged.merge(&m),
            Err(e) => log::warn!("world {world}: manifest skipped: {e:#}"),
        }
    }
    Ok(merged)
}

/// World name -> manifest path (None when only the snapshot dir exists).
/// BTreeMap keeps report order deterministic.
fn discover_worlds(data_root: &Path) -> Result<BTreeMap<String, Option<PathBuf>>> {
    let mut worlds: BTreeMap<String, Option<PathBuf>> = BTreeMap::new();
    if !data_root.is_dir() {
        return Ok(worlds);
    }
    for e in
        fs::read_dir(data_root).with_context(|| format!("read_dir {}", data_root.display()))?
    {
        let e = e?;
        let path = e.path();
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if path.is_dir() {
            worlds.entry(file_name.to_string()).or_insert(None);
        } else if let Some(world) = file_name.strip_suffix(MANIFEST_SUFFIX) {
            worlds.insert(world.to_string(), Some(path.clone()));
        }
    }
    Ok(worlds)
}

fn report_world(data_root: &Path, world: &str, manifest_path: Option<&Path>) -> WorldReport {
    let mut manifest_readable = true;
    let manifest = match manifest_path {
        Some(path) => match read_manifest(path) {
            Ok(m) => m,
            Err(_) => {
                manifest_readable = false;
                Manifest::new()
            }
        },
        None => Manifest::new(),
    };

    // Snapshot file stems (bot uuids) present on disk.
    let mut files = BTreeSet::new();
    let bot_dir = data_root.join(world);
    if let Ok(rd) = fs::read_dir(&bot_dir) {
        for e in rd.flatten() {
            let path = e.path();
            if path.extension().map(|x| x == SNAPSHOT_EXT).unwrap_or(false) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    files.insert(stem.to_string());
                }
            }
        }
    }

    let referenced: BTreeSet<String> = manifest.iter().map(|(_, e)| e.uuid.to_string()).collect();

    let orphan_snapshots: Vec<String> = files
        .iter()
        .filter(|f| !referenced.contains(*f))
        .map(|f| format!("{f}.{SNAPSHOT_EXT}"))
        .collect();
    let mut missing_snapshots: Vec<String> = manifest
        .iter()
        .filter(|(_, e)| !files.contains(&e.uuid.to_string()))
        .map(|(name, _)| name.clone())
        .collect();
    missing_snapshots.sort();

    WorldReport {
        world: world.to_string(),
        manifest_readable,
        entries: manifest.len(),
        snapshot_files: files.len(),
        orphan_snapshots,
        missing_snapshots,
    }
}
