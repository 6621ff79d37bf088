use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use botstore::inspect::{merged_saved_bots, scan_worlds};
use botstore::{BotConfig, BotPersistence, BotSaveRequest, BotStore, WorldInfo};

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("botstore-{}-{}-{}", prefix, pid, t))
}

#[test]
fn doctor_classifies_orphans_and_missing_files() -> Result<()> {
    let root = unique_root("doctor");
    fs::create_dir_all(&root)?;

    let world = WorldInfo::new(Uuid::new_v4(), "overworld");
    let mut store = BotStore::new(&root, BotConfig::default());
    store.on_world_observed(&world);

    // healthy pair: entry + snapshot file
    store.save(&BotSaveRequest {
        real_name: "Healthy",
        uuid: Uuid::new_v4(),
        world_uid: world.uid,
        resume: true,
        state: b"ok",
    });

    // entry without file: save then lose the snapshot
    let lost = Uuid::new_v4();
    store.save(&BotSaveRequest {
        real_name: "Lost",
        uuid: lost,
        world_uid: world.uid,
        resume: true,
        state: b"lost",
    });
    let ws = store.world_store(world.uid).expect("world store must exist");
    fs::remove_file(ws.snapshot_path(lost))?;

    // file without entry: a stray snapshot nothing references
    let stray = Uuid::new_v4();
    fs::write(ws.snapshot_path(stray), b"stray bytes")?;

    let reports = scan_worlds(store.data_root())?;
    assert_eq!(reports.len(), 1, "one world, one report");
    let r = &reports[0];
    assert_eq!(r.world, "overworld");
    assert!(r.manifest_readable);
    assert_eq!(r.entries, 2, "Healthy + Lost");
    assert_eq!(r.snapshot_files, 2, "Healthy + stray");
    assert_eq!(r.orphan_snapshots, [format!("{stray}.dat")]);
    assert_eq!(r.missing_snapshots, ["Lost"]);

    Ok(())
}

#[test]
fn offline_merged_view_matches_live_coordinator() -> Result<()> {
    let root = unique_root("offline-merge");
    fs::create_dir_all(&root)?;

    let overworld = WorldInfo::new(Uuid::new_v4(), "overworld");
    let nether = WorldInfo::new(Uuid::new_v4(), "nether");

    let mut store = BotStore::new(&root, BotConfig::default());
    store.observe_worlds([&overworld, &nether]);
    for (name, world) in [("Alpha", &overworld), ("Beta", &nether)] {
        store.save(&BotSaveRequest {
            real_name: name,
            uuid: Uuid::new_v4(),
            world_uid: world.uid,
            resume: true,
            state: name.as_bytes(),
        });
    }

    let live = store.saved_bots();
    let offline = merged_saved_bots(store.data_root())?;
    assert_eq!(offline.len(), live.len());
    for (name, entry) in live.iter() {
        assert_eq!(
            offline.get(name),
            Some(entry),
            "offline view must match the live merged manifest for {name}"
        );
    }

    Ok(())
}
