use anyhow::{Context, Result};
use suppaftp::types::FileType;
use suppaftp::FtpStream;
use thiserror::Error;

/// Errors from the device's file-transfer endpoint. Listing failures abort
/// one root's scan; fetch and delete failures stay scoped to one file.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("cannot list {path}: {reason}")]
    ListingUnavailable { path: String, reason: String },
    #[error("cannot fetch {path}: {reason}")]
    FetchFailed { path: String, reason: String },
    #[error("cannot delete {path}: {reason}")]
    DeleteFailed { path: String, reason: String },
}

/// A file discovered on the device, identified by its absolute remote path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub path: String,
}

impl RemoteFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Last path segment; the name the file gets in the destination.
    pub fn base_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Extension after the final dot of the base name, if any.
    pub fn extension(&self) -> Option<&str> {
        self.base_name()
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

/// The operations the transfer protocol provides. Everything above this
/// seam is transport-agnostic and testable with a fake.
pub trait RemoteSource {
    /// Raw directory listing for `dir`, one entry per line.
    fn list(&mut self, dir: &str) -> Result<String, RemoteError>;

    /// Full contents of the file at `path`.
    fn fetch(&mut self, path: &str) -> Result<Vec<u8>, RemoteError>;

    /// Remove the file at `path` on the device.
    fn delete(&mut self, path: &str) -> Result<(), RemoteError>;
}

/// FTP-backed source. Device FTP servers (ftpd homebrew) accept any
/// credentials, so login is anonymous.
pub struct FtpSource {
    stream: FtpStream,
}

impl FtpSource {
    pub fn connect(addr: &str) -> Result<Self> {
        let mut stream =
            FtpStream::connect(addr).with_context(|| format!("connecting to {}", addr))?;
        stream
            .login("anonymous", "anonymous")
            .with_context(|| format!("logging in to {}", addr))?;
        stream
            .transfer_type(FileType::Binary)
            .context("switching to binary transfer mode")?;
        Ok(Self { stream })
    }
}

impl RemoteSource for FtpSource {
    fn list(&mut self, dir: &str) -> Result<String, RemoteError> {
        self.stream
            .list(Some(dir))
            .map(|lines| lines.join("\n"))
            .map_err(|e| RemoteError::ListingUnavailable {
                path: dir.to_string(),
                reason: e.to_string(),
            })
    }

    fn fetch(&mut self, path: &str) -> Result<Vec<u8>, RemoteError> {
        self.stream
            .retr_as_buffer(path)
            .map(|buf| buf.into_inner())
            .map_err(|e| RemoteError::FetchFailed {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    fn delete(&mut self, path: &str) -> Result<(), RemoteError> {
        self.stream.rm(path).map_err(|e| RemoteError::DeleteFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Drop for FtpSource {
    fn drop(&mut self) {
        let _ = self.stream.quit();
    }
}
