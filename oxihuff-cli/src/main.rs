//! OxiHuff CLI - Huffman file compression
//!
//! Compresses files into a checksummed `.oxh` container and restores them.

mod commands;
mod container;
mod utils;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{cmd_compress, cmd_decompress, cmd_info, cmd_test};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Pure Rust Huffman file compressor")]
#[command(long_about = "
OxiHuff compresses files with a static Huffman code and stores them in a
checksummed .oxh container.

Examples:
  oxihuff compress notes.txt
  oxihuff compress -o out.oxh data.bin
  oxihuff decompress notes.txt.oxh
  oxihuff test *.oxh
  oxihuff info --table notes.txt.oxh
  oxihuff completions bash
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files into .oxh containers
    #[command(alias = "c")]
    Compress {
        /// Files to compress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Decompress .oxh containers
    #[command(alias = "d")]
    Decompress {
        /// Files to decompress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,

        /// Reject payloads with trailing data and enforce size limits
        #[arg(long)]
        strict: bool,
    },

    /// Verify .oxh containers without writing output
    #[command(alias = "t")]
    Test {
        /// Files to verify
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Reject payloads with trailing data and enforce size limits
        #[arg(long)]
        strict: bool,
    },

    /// Show information about a .oxh container
    #[command(alias = "i")]
    Info {
        /// File to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Include the code table
        #[arg(short, long)]
        table: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    utils::init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            files,
            output,
            force,
            progress,
        } => cmd_compress(&files, output.as_deref(), force, progress),
        Commands::Decompress {
            files,
            output,
            force,
            strict,
        } => cmd_decompress(&files, output.as_deref(), force, strict),
        Commands::Test { files, strict } => cmd_test(&files, strict),
        Commands::Info { file, json, table } => cmd_info(&file, json, table),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "oxihuff", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
