use clap::{Parser, Subcommand};
use sdfpack::archive::{list, pack, unpack, Options};
use sdfpack::SdfError;
use std::path::PathBuf;

const DEFAULT_DIR: &str = "sfd";
const DEFAULT_ARCHIVE: &str = "datafile.sdf";

#[derive(Parser)]
#[command(name = "sdf", about = "SoulFu SDF data file packer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a directory into an SDF archive
    Pack {
        /// Source directory
        #[arg(short, long, default_value = DEFAULT_DIR)]
        input: PathBuf,
        /// Archive to create
        #[arg(short, long, default_value = DEFAULT_ARCHIVE)]
        output: PathBuf,
        /// Convert LF to NUL in TXT/SRC payloads (and back on unpack)
        #[arg(short = 'n', long)]
        eol: bool,
    },
    /// Unpack an SDF archive into a new directory
    Unpack {
        /// Archive to read
        #[arg(short, long, default_value = DEFAULT_ARCHIVE)]
        input: PathBuf,
        /// Directory to create
        #[arg(short, long, default_value = DEFAULT_DIR)]
        output: PathBuf,
        /// Convert NUL back to LF in TXT/SRC payloads
        #[arg(short = 'n', long)]
        eol: bool,
    },
    /// List archive contents without extracting
    List {
        input: PathBuf,
    },
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {e}.");
            std::process::exit(e.exit_code());
        }
    }
}

fn run() -> Result<(), SdfError> {
    match Cli::parse().command {
        Commands::Pack { input, output, eol } => {
            println!("Input path: {}", input.display());
            println!("Output path: {}", output.display());
            let count = pack(&input, &output, Options { eol_fold: eol })?;
            println!("{count} files packed.");
        }

        Commands::Unpack { input, output, eol } => {
            println!("Input path: {}", input.display());
            println!("Output path: {}", output.display());
            let count = unpack(&input, &output, Options { eol_fold: eol })?;
            println!("{count} files unpacked.");
        }

        Commands::List { input } => {
            let entries = list(&input)?;
            println!("Archive: {}", input.display());
            println!("{:<12} {:>4} {:>10} {:>10}", "Name", "Type", "Size", "Offset");
            for e in &entries {
                println!(
                    "{:<12} {:>4} {:>10} {:>10}",
                    e.file_name(),
                    e.file_type.tag(),
                    e.size,
                    e.offset
                );
            }
            println!("{} file(s).", entries.len());
        }
    }

    Ok(())
}
