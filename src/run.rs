use crate::cli::ScanConfig;
use crate::remote::{RemoteFile, RemoteSource};
use crate::transfer::TransferStatus;
use crate::{scanner, select, transfer};
use anyhow::Result;
use std::fmt;

/// Aggregate counts for one run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,
    pub skipped_existing: usize,
    pub skipped_extension: usize,
    pub copied: usize,
    pub failed: usize,
    pub delete_failures: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} discovered, {} already present, {} filtered by extension, {} copied, {} failed",
            self.discovered,
            self.skipped_existing,
            self.skipped_extension,
            self.copied,
            self.failed
        )?;
        if self.delete_failures > 0 {
            write!(
                f,
                " ({} copied but not deleted from the device)",
                self.delete_failures
            )?;
        }
        Ok(())
    }
}

/// One end-to-end pass: scan every configured album root, pick the files
/// worth downloading, transfer them, and tally the results.
///
/// An unreachable root contributes zero files and never aborts the run;
/// secondary storage partitions are routinely absent.
pub fn run(config: &ScanConfig, source: &mut dyn RemoteSource) -> Result<RunSummary> {
    let mut discovered: Vec<RemoteFile> = Vec::new();
    for root in &config.roots {
        match scanner::scan_remote(source, root) {
            Ok(files) => {
                println!("Scanning {}... found {} remote files", root, files.len());
                discovered.extend(files);
            }
            Err(e) => {
                println!("Scanning {}... no files or server inaccessible ({})", root, e);
            }
        }
    }

    let mut summary = RunSummary {
        discovered: discovered.len(),
        ..Default::default()
    };

    let existing = select::existing_names(&config.destination)?;
    let selection = select::select(discovered, &existing, &config.extensions, config.overwrite);
    summary.skipped_existing = selection.skipped_existing;
    summary.skipped_extension = selection.skipped_extension;

    if selection.wanted.is_empty() {
        println!("No files to download");
        return Ok(summary);
    }
    println!(
        "Downloading {} files to {}",
        selection.wanted.len(),
        config.destination.display()
    );

    let outcomes = transfer::transfer_all(
        source,
        &selection.wanted,
        &config.destination,
        config.delete_source,
    )?;
    for outcome in &outcomes {
        match outcome.status {
            TransferStatus::Copied { delete_failed } => {
                summary.copied += 1;
                if delete_failed {
                    summary.delete_failures += 1;
                }
            }
            TransferStatus::Failed => summary.failed += 1,
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::RemoteError;
    use std::collections::HashMap;
    use std::path::Path;

    /// Full fake endpoint: listings, contents, recorded deletions.
    struct FakeSource {
        listings: HashMap<String, String>,
        contents: HashMap<String, Vec<u8>>,
        deleted: Vec<String>,
    }

    impl FakeSource {
        fn album_with_sub() -> Self {
            let mut listings = HashMap::new();
            listings.insert(
                "/Album/".to_string(),
                [
                    "-rw-r--r-- 1 ftp ftp 10 Jan 01 00:00 a.jpg",
                    "-rw-r--r-- 1 ftp ftp 10 Jan 01 00:00 b.jpg",
                    "drwxr-xr-x 2 ftp ftp 0 Jan 01 00:00 sub",
                ]
                .join("\n"),
            );
            listings.insert(
                "/Album/sub/".to_string(),
                "-rw-r--r-- 1 ftp ftp 10 Jan 01 00:00 c.mp4".to_string(),
            );
            let mut contents = HashMap::new();
            contents.insert("/Album/a.jpg".to_string(), b"aaa".to_vec());
            contents.insert("/Album/b.jpg".to_string(), b"bbb".to_vec());
            contents.insert("/Album/sub/c.mp4".to_string(), b"ccc".to_vec());
            Self {
                listings,
                contents,
                deleted: Vec::new(),
            }
        }
    }

    impl RemoteSource for FakeSource {
        fn list(&mut self, dir: &str) -> Result<String, RemoteError> {
            self.listings
                .get(dir)
                .cloned()
                .ok_or_else(|| RemoteError::ListingUnavailable {
                    path: dir.to_string(),
                    reason: "no such directory".to_string(),
                })
        }

        fn fetch(&mut self, path: &str) -> Result<Vec<u8>, RemoteError> {
            self.contents
                .get(path)
                .cloned()
                .ok_or_else(|| RemoteError::FetchFailed {
                    path: path.to_string(),
                    reason: "connection reset".to_string(),
                })
        }

        fn delete(&mut self, path: &str) -> Result<(), RemoteError> {
            self.deleted.push(path.to_string());
            Ok(())
        }
    }

    fn config(destination: &Path, roots: &[&str]) -> ScanConfig {
        ScanConfig {
            source: "192.168.0.2:5000".to_string(),
            destination: destination.to_path_buf(),
            extensions: vec!["jpg".to_string(), "mp4".to_string()],
            roots: roots.iter().map(|r| r.to_string()).collect(),
            overwrite: false,
            delete_source: false,
        }
    }

    #[test]
    fn test_duplicate_is_skipped_and_rest_copied() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"already here").unwrap();
        let mut source = FakeSource::album_with_sub();

        let summary = run(&config(dir.path(), &["/Album/"]), &mut source).unwrap();

        assert_eq!(
            summary,
            RunSummary {
                discovered: 3,
                skipped_existing: 1,
                skipped_extension: 0,
                copied: 2,
                failed: 0,
                delete_failures: 0,
            }
        );
        assert!(dir.path().join("b.jpg").exists());
        assert!(dir.path().join("c.mp4").exists());
        // The existing copy was not replaced
        assert_eq!(std::fs::read(dir.path().join("a.jpg")).unwrap(), b"already here");
    }

    #[test]
    fn test_failed_fetch_is_counted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FakeSource::album_with_sub();
        source.contents.remove("/Album/b.jpg");

        let summary = run(&config(dir.path(), &["/Album/"]), &mut source).unwrap();

        assert_eq!(summary.copied, 2);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_unreachable_root_contributes_zero_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FakeSource::album_with_sub();

        let summary = run(
            &config(dir.path(), &["/Missing/", "/Album/"]),
            &mut source,
        )
        .unwrap();

        assert_eq!(summary.discovered, 3);
        assert_eq!(summary.copied, 3);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_nothing_to_do() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.jpg", "b.jpg", "c.mp4"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let mut source = FakeSource::album_with_sub();

        let summary = run(&config(dir.path(), &["/Album/"]), &mut source).unwrap();

        assert_eq!(summary.discovered, 3);
        assert_eq!(summary.skipped_existing, 3);
        assert_eq!(summary.copied, 0);
    }

    #[test]
    fn test_delete_source_removes_copied_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FakeSource::album_with_sub();
        let mut config = config(dir.path(), &["/Album/"]);
        config.delete_source = true;

        let summary = run(&config, &mut source).unwrap();

        assert_eq!(summary.copied, 3);
        assert_eq!(source.deleted.len(), 3);
        assert!(source.deleted.contains(&"/Album/sub/c.mp4".to_string()));
    }

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            discovered: 3,
            skipped_existing: 1,
            skipped_extension: 0,
            copied: 2,
            failed: 0,
            delete_failures: 0,
        };
        assert_eq!(
            summary.to_string(),
            "3 discovered, 1 already present, 0 filtered by extension, 2 copied, 0 failed"
        );
    }
}
