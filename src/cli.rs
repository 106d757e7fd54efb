use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "album-fetch")]
#[command(about = "Download album screenshots and captures from a device's FTP server")]
pub struct Args {
    /// Device FTP address, host:port (e.g. 192.168.0.2:5000)
    #[arg(short, long)]
    pub source: String,

    /// Local directory to download into (created if missing)
    #[arg(short, long)]
    pub destination: PathBuf,

    /// File extensions to download; pass the flag with no values to
    /// disable the filter
    #[arg(short, long, num_args = 0.., default_values_t = ["jpg".to_string(), "mp4".to_string()])]
    pub extensions: Vec<String>,

    /// Album directories to scan on the device
    #[arg(
        short,
        long,
        num_args = 1..,
        default_values_t = [
            "/Nintendo/Album/".to_string(),
            "/emuMMC/RAW1/Nintendo/Album/".to_string(),
            "/emuMMC/RAW2/Nintendo/Album/".to_string(),
        ]
    )]
    pub paths: Vec<String>,

    /// Overwrite local files that share a remote file's name
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Delete files from the device after a successful download
    #[arg(long, default_value_t = false)]
    pub delete_source: bool,
}

/// Immutable parameters for one run. Built once from the CLI and passed by
/// reference everywhere; nothing reads configuration from globals.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub source: String,
    pub destination: PathBuf,
    pub extensions: Vec<String>,
    pub roots: Vec<String>,
    pub overwrite: bool,
    pub delete_source: bool,
}

impl Args {
    pub fn into_config(self) -> ScanConfig {
        ScanConfig {
            source: self.source,
            destination: self.destination,
            extensions: self.extensions,
            roots: self.paths.into_iter().map(normalize_root).collect(),
            overwrite: self.overwrite,
            delete_source: self.delete_source,
        }
    }
}

/// Directory paths always carry a trailing slash.
fn normalize_root(mut path: String) -> String {
    if !path.ends_with('/') {
        path.push('/');
    }
    path
}
