//! codec — snapshot envelope, the compressed on-disk form of one bot's state.
//!
//! Envelope before gzip (LE):
//! [magic8="BSSNAP01"][ver u16=1][reserved u16]
//! [world_uid_most u64][world_uid_least u64]
//! [state_len u32][crc32 u32]
//! [state bytes]
//!
//! The owning world id is duplicated into the envelope (most/least u64
//! halves) so a loaded snapshot can be cross-checked against the world it is
//! applied to. CRC32 covers the state bytes. The whole envelope is
//! gzip-compressed on disk.

use anyhow::{anyhow, Context, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use uuid::Uuid;

use crate::consts::{SNAP_HDR_SIZE, SNAP_MAGIC, SNAP_VERSION};

/// Durable state of one bot: the opaque entity-state blob plus the owning
/// world id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSnapshot {
    pub world_uid: Uuid,
    pub state: Vec<u8>,
}

/// Encode a snapshot into its compressed envelope.
pub fn encode_snapshot(snap: &BotSnapshot) -> Result<Vec<u8>> {
    let mut raw = Vec::with_capacity(SNAP_HDR_SIZE + snap.state.len());
    raw.extend_from_slice(SNAP_MAGIC);
    raw.write_u16::<LittleEndian>(SNAP_VERSION)?;
    raw.write_u16::<LittleEndian>(0)?; // reserved

    let (most, least) = snap.world_uid.as_u64_pair();
    raw.write_u64::<LittleEndian>(most)?;
    raw.write_u64::<LittleEndian>(least)?;

    raw.write_u32::<LittleEndian>(snap.state.len() as u32)?;
    let mut h = crc32fast::Hasher::new();
    h.update(&snap.state);
    raw.write_u32::<LittleEndian>(h.finalize())?;
    raw.extend_from_slice(&snap.state);

    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(&raw)?;
    enc.finish().context("gzip snapshot envelope")
}

/// Decode a compressed envelope. Any mismatch (magic, version, length, CRC)
/// is an error; callers decide whether that means "absent" or "failed".
pub fn decode_snapshot(bytes: &[u8]) -> Result<BotSnapshot> {
    let mut raw = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut raw)
        .context("gunzip snapshot envelope")?;

    if raw.len() < SNAP_HDR_SIZE {
        return Err(anyhow!("snapshot envelope too short: {} bytes", raw.len()));
    }
    if &raw[0..8] != SNAP_MAGIC {
        return Err(anyhow!("bad snapshot magic"));
    }

    let mut rd = &raw[8..SNAP_HDR_SIZE];
    let ver = rd.read_u16::<LittleEndian>()?;
    if ver != SNAP_VERSION {
        return Err(anyhow!(
            "unsupported snapshot version {} (expected {})",
            ver,
            SNAP_VERSION
        ));
    }
    let _reserved = rd.read_u16::<LittleEndian>()?;
    let most = rd.read_u64::<LittleEndian>()?;
    let least = rd.read_u64::<LittleEndian>()?;
    let state_len = rd.read_u32::<LittleEndian>()? as usize;
    let crc_stored = rd.read_u32::<LittleEndian>()?;

    let state = &raw[SNAP_HDR_SIZE..];
    if state.len() != state_len {
        return Err(anyhow!(
            "snapshot length mismatch: header {} vs payload {}",
            state_len,
            state.len()
        ));
    }
    let mut h = crc32fast::Hasher::new();
    h.update(state);
    let crc_actual = h.finalize();
    if crc_actual != crc_stored {
        return Err(anyhow!(
            "snapshot crc mismatch: stored {:#010x}, actual {:#010x}",
            crc_stored,
            crc_actual
        ));
    }

    Ok(BotSnapshot {
        world_uid: Uuid::from_u64_pair(most, least),
        state: state.to_vec(),
    })
}
