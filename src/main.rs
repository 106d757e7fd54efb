mod cli;
mod listing;
mod remote;
mod run;
mod scanner;
mod select;
mod transfer;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.into_config();

    if config.destination.exists() && !config.destination.is_dir() {
        anyhow::bail!(
            "Destination is not a directory: {}",
            config.destination.display()
        );
    }
    std::fs::create_dir_all(&config.destination)?;

    println!("Connecting to {}...", config.source);
    let mut source = remote::FtpSource::connect(&config.source)?;

    let summary = run::run(&config, &mut source)?;
    println!("{}", summary);
    println!("Done.");
    Ok(())
}
