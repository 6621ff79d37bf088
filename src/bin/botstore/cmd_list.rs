use anyhow::Result;
use std::path::PathBuf;

use botstore::consts::BOT_DATA_DIR;
use botstore::inspect::merged_saved_bots;
use botstore::ManifestEntry;

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let data_root = path.join(BOT_DATA_DIR);
    let merged = merged_saved_bots(&data_root)?;

    let mut rows: Vec<ManifestEntry> = merged.iter().map(|(_, e)| e.clone()).collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));

    if json {
        println!("{}", serde_json::to_string(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("no saved bots under {}", data_root.display());
        return Ok(());
    }
    println!("{} saved bot(s):", rows.len());
    for e in rows {
        println!("  {}  uuid={}  resume={}", e.name, e.uuid, e.resume);
    }
    Ok(())
}
