use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use botstore::{
    BotConfig, BotPersistence, BotRegistry, BotSaveRequest, BotStore, WorldInfo,
};

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("botstore-{}-{}-{}", prefix, pid, t))
}

#[derive(Default)]
struct RecordingRegistry {
    resumed: Vec<String>,
}

impl BotRegistry for RecordingRegistry {
    fn load_new_bot(&mut self, real_name: &str, _storage: &mut dyn BotPersistence) {
        self.resumed.push(real_name.to_string());
    }
}

fn seed_world(root: &PathBuf, world: &WorldInfo) -> Result<Uuid> {
    let mut store = BotStore::new(root, BotConfig::default());
    store.on_world_observed(world);

    let resumable = Uuid::new_v4();
    store.save(&BotSaveRequest {
        real_name: "Resumable",
        uuid: resumable,
        world_uid: world.uid,
        resume: true,
        state: b"resumable-state",
    });
    store.save(&BotSaveRequest {
        real_name: "Paused",
        uuid: Uuid::new_v4(),
        world_uid: world.uid,
        resume: false,
        state: b"paused-state",
    });
    // an entry whose snapshot file is gone: flagged for resumption, file lost
    let ghost = Uuid::new_v4();
    store.save(&BotSaveRequest {
        real_name: "Ghost",
        uuid: ghost,
        world_uid: world.uid,
        resume: true,
        state: b"ghost-state",
    });
    let ghost_path = store
        .world_store(world.uid)
        .expect("world store must exist")
        .snapshot_path(ghost);
    fs::remove_file(&ghost_path)?;

    Ok(resumable)
}

#[test]
fn world_load_resumes_flagged_entries_exactly_once() -> Result<()> {
    let root = unique_root("resume");
    fs::create_dir_all(&root)?;

    let world = WorldInfo::new(Uuid::new_v4(), "overworld");
    seed_world(&root, &world)?;

    // fresh coordinator, as after a server restart
    let mut store = BotStore::new(&root, BotConfig::default());
    let mut registry = RecordingRegistry::default();
    store.on_world_load(&world, &mut registry);

    let mut resumed = registry.resumed.clone();
    resumed.sort();
    // manifest membership drives resumption: Ghost has no snapshot file but
    // is still attempted; Paused is not flagged and is skipped
    assert_eq!(resumed, ["Ghost", "Resumable"]);

    Ok(())
}

#[test]
fn disabled_config_skips_resumption() -> Result<()> {
    let root = unique_root("resume-off");
    fs::create_dir_all(&root)?;

    let world = WorldInfo::new(Uuid::new_v4(), "overworld");
    seed_world(&root, &world)?;

    for cfg in [
        BotConfig::default().with_enable(false),
        BotConfig::default().with_resident(false),
    ] {
        let mut store = BotStore::new(&root, cfg);
        let mut registry = RecordingRegistry::default();
        store.on_world_load(&world, &mut registry);
        assert!(
            registry.resumed.is_empty(),
            "resumption must be gated by configuration"
        );
    }

    Ok(())
}

/// Registry that loads the bot back through the storage handed to it,
/// as the real bot lifecycle does on recreation.
struct LoadingRegistry {
    uuid: Uuid,
    loaded: Vec<(String, bool)>,
}

impl BotRegistry for LoadingRegistry {
    fn load_new_bot(&mut self, real_name: &str, storage: &mut dyn BotPersistence) {
        let hit = storage.load(real_name, self.uuid).is_some();
        self.loaded.push((real_name.to_string(), hit));
    }
}

#[test]
fn registry_can_load_through_the_storage_backend() -> Result<()> {
    let root = unique_root("resume-load");
    fs::create_dir_all(&root)?;

    let world = WorldInfo::new(Uuid::new_v4(), "overworld");
    let bot_uuid = Uuid::new_v4();
    {
        let mut store = BotStore::new(&root, BotConfig::default());
        store.on_world_observed(&world);
        store.save(&BotSaveRequest {
            real_name: "Solo",
            uuid: bot_uuid,
            world_uid: world.uid,
            resume: true,
            state: b"solo-state",
        });
    }

    let mut store = BotStore::new(&root, BotConfig::default());
    let mut registry = LoadingRegistry {
        uuid: bot_uuid,
        loaded: Vec::new(),
    };
    store.on_world_load(&world, &mut registry);

    assert_eq!(registry.loaded.len(), 1, "exactly one resume attempt");
    let (name, hit) = &registry.loaded[0];
    assert_eq!(name, "Solo");
    assert!(*hit, "the resumed bot must find its snapshot via the backend");

    Ok(())
}
