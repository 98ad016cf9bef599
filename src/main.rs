//! # `seqfetch`
//!
//! Fetches the `seq` directory of the OEIS data repository into `./output`
//! with a shallow sparse clone, unless `./output` already exists.
//!
//! ## Usage
//!
//! ```sh
//! seqfetch              # clone if ./output is missing
//! seqfetch --dry-run    # print the git commands instead
//! seqfetch --graph      # also build ./output.bin from ./output/seq
//! ```
//!
//! `git` 2.25 or later and `git-lfs` must be installed.

use anyhow::Result;
use clap::Parser as _;
use seqfetch::cli::Args;
use seqfetch::error::FetchError;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber based on verbose flag
    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_target(false).with_env_filter(filter).init();

    match seqfetch::run(&args) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<FetchError>()
                    .map_or(1, FetchError::exit_code),
            );
        }
    }
}
