use thiserror::Error;

/// A listing line with no whitespace-delimited tokens.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed listing line: {0:?}")]
pub struct MalformedLine(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub kind: EntryKind,
    pub name: String,
}

/// Parse one line of a LIST reply.
///
/// The device's ftpd emits unix-style listings: a leading `d` marks a
/// directory, and the entry name is the last whitespace-delimited token.
/// Known limitation of the format: names containing spaces come out
/// truncated to their last word (album captures never contain spaces).
pub fn parse_line(line: &str) -> Result<ListingEntry, MalformedLine> {
    let name = line
        .split_whitespace()
        .last()
        .ok_or_else(|| MalformedLine(line.to_string()))?;
    let kind = if line.starts_with('d') {
        EntryKind::Directory
    } else {
        EntryKind::File
    };
    Ok(ListingEntry {
        kind,
        name: name.to_string(),
    })
}

/// Parse a whole listing blob. Malformed lines are skipped with a warning
/// rather than failing the listing.
pub fn parse_listing(raw: &str) -> Vec<ListingEntry> {
    raw.lines()
        .filter_map(|line| match parse_line(line) {
            Ok(entry) => Some(entry),
            Err(e) => {
                if !line.trim().is_empty() {
                    eprintln!("Warning: {}", e);
                }
                None
            }
        })
        .collect()
}
