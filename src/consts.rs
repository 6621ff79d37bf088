//! Shared on-disk layout constants (directory names, file names, snapshot envelope).

// -------- Directory layout --------
// <storage_root>/fakeplayerdata/<worldName>/<botUUID>.dat   one snapshot per bot
// <storage_root>/fakeplayerdata/<worldName>-fakeplayer.dat  one manifest per world
pub const BOT_DATA_DIR: &str = "fakeplayerdata";
pub const SNAPSHOT_EXT: &str = "dat";
pub const MANIFEST_SUFFIX: &str = "-fakeplayer.dat";

// -------- Snapshot envelope --------
// Layout before gzip (LE):
// [magic8="BSSNAP01"][ver u16=1][reserved u16]
// [world_uid_most u64][world_uid_least u64]
// [state_len u32][crc32 u32]
// [state bytes]
pub const SNAP_MAGIC: &[u8; 8] = b"BSSNAP01";
pub const SNAP_VERSION: u16 = 1;
pub const SNAP_HDR_SIZE: usize = 36;
