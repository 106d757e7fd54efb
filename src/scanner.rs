use crate::listing::{self, EntryKind};
use crate::remote::{RemoteError, RemoteFile, RemoteSource};

/// Directories nested deeper than this below a root abort the scan.
/// A real album tree is 3-4 levels deep; anything past this is a broken
/// or hostile listing.
const MAX_DEPTH: usize = 32;

/// Enumerate every file under `root` and its subdirectories.
///
/// `root` must carry a trailing slash. The walk uses an explicit worklist
/// of pending directories rather than recursion, so a pathological listing
/// cannot blow the call stack. Any listing failure aborts this root's scan;
/// the caller decides whether that is fatal.
pub fn scan_remote(
    source: &mut dyn RemoteSource,
    root: &str,
) -> Result<Vec<RemoteFile>, RemoteError> {
    let mut files = Vec::new();
    let mut pending = vec![(root.to_string(), 0usize)];

    while let Some((dir, depth)) = pending.pop() {
        if depth > MAX_DEPTH {
            return Err(RemoteError::ListingUnavailable {
                path: dir,
                reason: format!("directory nested deeper than {} levels", MAX_DEPTH),
            });
        }
        let raw = source.list(&dir)?;
        for entry in listing::parse_listing(&raw) {
            // Most ftpd builds omit dot entries, but skip them if present
            if entry.name == "." || entry.name == ".." {
                continue;
            }
            match entry.kind {
                EntryKind::Directory => {
                    pending.push((format!("{}{}/", dir, entry.name), depth + 1));
                }
                EntryKind::File => files.push(RemoteFile::new(format!("{}{}", dir, entry.name))),
            }
        }
    }

    Ok(files)
}
