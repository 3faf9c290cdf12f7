//! CLI entry point for the photomosaic builder

use clap::Parser;
use mosaictile::io::cli::{Cli, MosaicJob};

fn main() -> mosaictile::Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut job = MosaicJob::new(cli);
    job.run()
}
