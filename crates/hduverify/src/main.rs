use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "hduverify",
    about = "Structural verifier for FITS-like HDU documents",
    version,
    long_about = "Checks the header/data units of YAML-described FITS-like documents and reports, fixes or rejects structural problems.\n\nExamples:\n  hduverify verify image.yml                          # Warn about every problem\n  hduverify verify docs/                              # Verify every document below docs/\n  hduverify verify image.yml --option fix             # Fix what can be fixed, warn about it\n  hduverify verify image.yml -o silentfix --output fixed.yml  # Write the repaired document\n  hduverify verify image.yml -o exception             # Fail on any problem"
)]
struct Hduverify {
    #[command(subcommand)]
    command: Commands,

    /// Run in verbose mode with detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run in debug mode with extensive verification details
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Verify HDU documents
    Verify {
        /// Path to a document or a directory of documents
        path: PathBuf,

        /// One of fix, silentfix, ignore, warn or exception (case-insensitive)
        #[arg(short, long, default_value = "warn")]
        option: String,

        /// Write the verified document here (single document only)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Hduverify::parse();
    let verbose = cli.verbose;

    if cli.debug {
        logging::set_log_level(logging::LogLevel::Debug);
        logging::debug("Debug mode enabled - showing detailed logs");
    } else if verbose {
        logging::set_log_level(logging::LogLevel::Info);
        logging::info("Verbose mode enabled");
    } else {
        logging::set_log_level(logging::LogLevel::Warning);
    }

    match &cli.command {
        Commands::Verify {
            path,
            option,
            output,
        } => match hduverify_lib::verify_path(path, option, output.as_deref(), verbose) {
            Ok(summary) => {
                if summary.invalid > 0 {
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}
