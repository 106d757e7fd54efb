use crate::remote::RemoteFile;
use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// What the selector kept and why the rest was dropped.
#[derive(Debug)]
pub struct Selection {
    pub wanted: Vec<RemoteFile>,
    pub skipped_existing: usize,
    pub skipped_extension: usize,
}

/// Names of regular files directly inside the destination directory.
/// Taken once per run, before any transfer starts.
pub fn existing_names(destination: &Path) -> Result<HashSet<String>> {
    let mut names = HashSet::new();
    for entry in fs::read_dir(destination)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Decide which discovered files to download.
///
/// Extension filtering runs first (an empty filter keeps everything); then,
/// unless `overwrite` is set, files whose base name is already present in
/// the destination snapshot are dropped. Comparison is by name only, no
/// size or timestamp check.
pub fn select(
    discovered: Vec<RemoteFile>,
    existing: &HashSet<String>,
    extensions: &[String],
    overwrite: bool,
) -> Selection {
    let mut selection = Selection {
        wanted: Vec::new(),
        skipped_existing: 0,
        skipped_extension: 0,
    };

    for file in discovered {
        if !matches_extension(&file, extensions) {
            selection.skipped_extension += 1;
            continue;
        }
        if !overwrite && existing.contains(file.base_name()) {
            selection.skipped_existing += 1;
            continue;
        }
        selection.wanted.push(file);
    }

    selection
}

fn matches_extension(file: &RemoteFile, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    match file.extension() {
        Some(ext) => extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)),
        None => false,
    }
}
