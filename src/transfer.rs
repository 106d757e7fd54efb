use crate::remote::{RemoteFile, RemoteSource};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    /// File landed in the destination. `delete_failed` is set when the
    /// follow-up remote delete did not go through; the copy still counts.
    Copied { delete_failed: bool },
    /// Fetch or local write failed; nothing usable was left behind.
    Failed,
}

#[derive(Debug)]
pub struct TransferOutcome {
    pub file: RemoteFile,
    pub status: TransferStatus,
    pub error: Option<anyhow::Error>,
}

/// Copy every selected file into `destination`, one at a time. A single
/// file's failure is recorded and the batch moves on. Each file is
/// attempted exactly once; rerunning the program is the retry mechanism.
pub fn transfer_all(
    source: &mut dyn RemoteSource,
    files: &[RemoteFile],
    destination: &Path,
    delete_source: bool,
) -> Result<Vec<TransferOutcome>> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Downloading {pos}/{len} {wide_bar} {msg}")?
            .progress_chars("=> "),
    );

    let mut outcomes = Vec::with_capacity(files.len());
    for file in files {
        pb.set_message(file.base_name().to_string());
        let outcome = transfer_one(source, file, destination, delete_source);
        if let Some(e) = &outcome.error {
            pb.suspend(|| eprintln!("Warning: {:#}", e));
        }
        outcomes.push(outcome);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(outcomes)
}

fn transfer_one(
    source: &mut dyn RemoteSource,
    file: &RemoteFile,
    destination: &Path,
    delete_source: bool,
) -> TransferOutcome {
    let bytes = match source.fetch(&file.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return TransferOutcome {
                file: file.clone(),
                status: TransferStatus::Failed,
                error: Some(e.into()),
            }
        }
    };

    if let Err(e) = write_local(destination, file.base_name(), &bytes) {
        return TransferOutcome {
            file: file.clone(),
            status: TransferStatus::Failed,
            error: Some(e),
        };
    }

    if delete_source {
        if let Err(e) = source.delete(&file.path) {
            return TransferOutcome {
                file: file.clone(),
                status: TransferStatus::Copied { delete_failed: true },
                error: Some(e.into()),
            };
        }
    }

    TransferOutcome {
        file: file.clone(),
        status: TransferStatus::Copied {
            delete_failed: false,
        },
        error: None,
    }
}

/// Write to a temporary name and rename into place, so an interrupted run
/// never leaves a truncated file under the final name (which later runs
/// would then skip as already present).
fn write_local(destination: &Path, name: &str, bytes: &[u8]) -> Result<()> {
    let target = destination.join(name);
    let tmp = destination.join(format!("{}.part", name));

    fs::write(&tmp, bytes).with_context(|| format!("writing {}", tmp.display()))?;
    if let Err(e) = fs::rename(&tmp, &target) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("renaming to {}", target.display()));
    }
    Ok(())
}
