use clap::Parser;
use miette::{miette, Result};
use std::path::PathBuf;

use var_randomizer::cli;
use var_randomizer::namegen::DEFAULT_MIN_LENGTH;
use var_randomizer::DEFAULT_PREFIX;

#[derive(Parser)]
#[command(name = "var-randomizer")]
#[command(about = "Randomize variable names in a PowerShell script")]
#[command(version)]
struct Cli {
    /// Path to the PowerShell script
    script_path: PathBuf,

    /// Prefix for the variable names
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Output path for the modified script (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Length of every generated name, sigil excluded
    #[arg(long, default_value_t = DEFAULT_MIN_LENGTH)]
    min_length: usize,

    /// Character that marks a variable
    #[arg(long, default_value_t = '$')]
    sigil: char,

    /// Only replace whole identifiers, in a single pass
    #[arg(long)]
    token_aware: bool,

    /// Also write the rename mapping as JSON to this path
    #[arg(long)]
    mapping: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    let args = cli::randomize::RandomizeArgs {
        script_path: cli.script_path,
        prefix: cli.prefix,
        output_path: cli.output,
        min_length: cli.min_length,
        sigil: cli.sigil,
        token_aware: cli.token_aware,
        mapping_path: cli.mapping,
    };
    cli::randomize::randomize(&args).map_err(|e| miette!("{}", e))
}
