use clap::Parser;

/// Command-line arguments for seqfetch
///
/// The dataset location is fixed; no flag changes the repository, branch,
/// target directory or sparse path.
#[derive(Parser, Debug, Clone)]
#[command(name = "seqfetch")]
#[command(about = "Sparse-fetch the OEIS sequence dataset into ./output")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Print the git commands that would run instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for --dry-run: shell or json
    #[arg(
        long = "output-format",
        value_name = "FORMAT",
        default_value = "shell",
        requires = "dry_run"
    )]
    pub output_format: String,

    /// After fetching, build the sequence cross-reference graph into ./output.bin
    #[arg(long, conflicts_with = "dry_run")]
    pub graph: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}
