// src/main.rs
//
// reformadoc: rewrite the documentation comments of one source file in place
//
// - Reads the input file, reformats every `///` / `'''` comment run.
// - Copies the original bit-for-bit to a backup before overwriting it:
//     • `<input>.bak` by default,
//     • `<dir>/<stem>.<timestamp>.<ext>` when a backup directory is given.
// - Invalid comments are left as they are, with a diagnostic line above them.
//
// CLI flags:
//   --width N    : wrap width including indentation and marker (default 126)
//   --verbose    : log every comment run (otherwise RUST_LOG, default warn)

use clap::{ArgAction, Parser};
use reformadoc::{backup, reformat_comments_with, FormatOptions, DEFAULT_WRAP_WIDTH};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Source file to reformat in place
    input: PathBuf,

    /// Directory for a timestamped backup copy (default: `<input>.bak`)
    backup_dir: Option<PathBuf>,

    /// Wrap width, indentation and comment marker included
    #[arg(long, default_value_t = DEFAULT_WRAP_WIDTH)]
    width: usize,

    /// Log every comment run
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let src = fs::read_to_string(&cli.input)?;
    let options = FormatOptions {
        wrap_width: cli.width,
    };
    let out = reformat_comments_with(&src, &options);

    let backup_path = backup::create_backup(&cli.input, cli.backup_dir.as_deref())?;
    tracing::info!(input = %cli.input.display(), backup = %backup_path.display(), "backup written");

    fs::write(&cli.input, out)?;
    Ok(())
}
