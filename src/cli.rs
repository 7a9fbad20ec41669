//! Command-line definition for csguard

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "csguard", version, about = "Calculate and validate file checksums")]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate checksums for a file or a folder
    Calculate(CalculateArgs),
    /// Validate files against expected checksums
    Validate(ValidateArgs),
    /// List supported hash algorithms
    Algorithms,
}

#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Path to the input file for which to calculate the checksum
    #[arg(long)]
    pub input_file: Option<String>,

    /// Path to the input folder containing files for which to calculate the checksum
    #[arg(long)]
    pub input_folder: Option<String>,

    /// Output file ('.txt', '.json', '.yaml') or 'table' for standard output
    #[arg(long)]
    pub output: Option<String>,

    /// Hash algorithm: md5, sha256 or sha512 (default md5)
    #[arg(long)]
    pub algorithm: Option<String>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the input file to validate against --checksum
    #[arg(long)]
    pub input_file: Option<String>,

    /// Expected checksum of --input-file
    #[arg(long)]
    pub checksum: Option<String>,

    /// File with expected checksums ('.txt', '.json', '.yaml')
    #[arg(long)]
    pub checksum_file: Option<String>,

    /// Output file ('.txt', '.json', '.yaml') or 'table' for standard output
    #[arg(long)]
    pub output: Option<String>,

    /// Hash algorithm: md5, sha256 or sha512 (default md5)
    #[arg(long)]
    pub algorithm: Option<String>,
}
