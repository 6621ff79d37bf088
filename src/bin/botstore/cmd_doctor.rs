use anyhow::Result;
use std::path::PathBuf;

use botstore::consts::BOT_DATA_DIR;
use botstore::inspect::scan_worlds;

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let data_root = path.join(BOT_DATA_DIR);
    let reports = scan_worlds(&data_root)?;

    if json {
        println!("{}", serde_json::to_string(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("no worlds under {}", data_root.display());
        return Ok(());
    }
    for r in reports {
        println!(
            "world {}: {} manifest entr{}, {} snapshot file(s){}",
            r.world,
            r.entries,
            if r.entries == 1 { "y" } else { "ies" },
            r.snapshot_files,
            if r.manifest_readable {
                ""
            } else {
                " [manifest unreadable]"
            }
        );
        for f in &r.orphan_snapshots {
            println!("  orphan snapshot (no manifest entry): {f}");
        }
        for name in &r.missing_snapshots {
            println!("  entry without snapshot file: {name}");
        }
    }
    Ok(())
}
