mod cli;

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{CalculateArgs, Cli, Commands, ValidateArgs};
use csguard::hash::{ChecksumEngine, EngineConfig, HashRegistry};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Calculate(args) => cmd_calculate(args),
        Commands::Validate(args) => cmd_validate(args),
        Commands::Algorithms => cmd_algorithms(),
    }
}

fn cmd_calculate(args: CalculateArgs) -> Result<()> {
    let config = EngineConfig::calculate(
        args.input_file.as_deref(),
        args.input_folder.as_deref(),
        args.output.as_deref(),
        args.algorithm.as_deref(),
    )?;
    let engine = ChecksumEngine::new(config);

    let checksums = engine.compute()?;
    let mut stdout = io::stdout().lock();
    engine.persist(&checksums, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let config = EngineConfig::validate(
        args.input_file.as_deref(),
        args.checksum.as_deref(),
        args.checksum_file.as_deref(),
        args.output.as_deref(),
        args.algorithm.as_deref(),
    )?;
    let engine = ChecksumEngine::new(config);

    let verdicts = engine.validate()?;
    let mut stdout = io::stdout().lock();
    engine.persist(&verdicts, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn cmd_algorithms() -> Result<()> {
    let mut stdout = io::stdout().lock();
    for info in HashRegistry::list_algorithms() {
        writeln!(stdout, "{:<8} {:>4} bits  {:>3} hex chars", info.name, info.output_bits, info.hex_len)?;
    }
    Ok(())
}
