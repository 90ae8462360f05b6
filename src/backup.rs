// src/backup.rs
//
// Backup copy of a source file before it is overwritten.
//
// - Without a backup directory the copy sits next to the file as `<file>.bak`.
// - With a directory (created on demand) the copy is named
//   `<stem>.<yyyy-MM-dd--HH.mm.ss.fff>.<ext>` after the current local time.

use chrono::{Local, NaiveDateTime};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d--%H.%M.%S%.3f";

/// Where the backup of `input` goes, for a copy taken at `now`.
pub fn backup_path(input: &Path, backup_dir: Option<&Path>, now: NaiveDateTime) -> PathBuf {
    let Some(dir) = backup_dir else {
        let mut path = input.as_os_str().to_owned();
        path.push(".bak");
        return PathBuf::from(path);
    };

    let stamp = now.format(TIMESTAMP_FORMAT);
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}.{stamp}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{stamp}"),
    };
    dir.join(name)
}

/// Copy `input` bit-for-bit to its backup location and return that path.
pub fn create_backup(input: &Path, backup_dir: Option<&Path>) -> io::Result<PathBuf> {
    if let Some(dir) = backup_dir {
        fs::create_dir_all(dir)?;
    }
    let path = backup_path(input, backup_dir, Local::now().naive_local());
    fs::copy(input, &path)?;
    Ok(path)
}
