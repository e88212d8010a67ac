use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs_err::{self as fs, File};
use hubcrawl_crawler::Record;

/// `<dir>/output_<command>-<timestamp>.json`, timestamped in UTC.
pub fn output_path(dir: &Path, command: &str, now: DateTime<Utc>) -> PathBuf {
    dir.join(format!(
        "output_{command}-{}.json",
        now.format("%m-%d-%YT%H:%M:%S")
    ))
}

pub fn write_records(path: &Path, records: &[Record]) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut file = io::BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, records)?;
    file.flush()?;
    Ok(())
}
