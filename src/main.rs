//! mirrorcheck - library/sector indexing for cross-copy consistency.
//!
//! Usage:
//!   mirc create-lib NAME             Create a new library
//!   mirc delete-lib NAME             Delete a library
//!   mirc list-libs                   List registered libraries
//!   mirc reg-sector LIB NAME PATH    Register a sector under a library
//!   mirc index LIB SECTOR PATH       Index a registered sector
//!   mirc --help                      Show help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, bail, eyre};
use tracing_subscriber::EnvFilter;

use mirrorcheck_core::CatalogStore;
use mirrorcheck_index::{IndexerConfig, NaiveChecker, Outcome, dispatch};

#[derive(Parser)]
#[command(
    name = "mirrorcheck",
    version,
    about = "Track libraries of directory trees and index their sectors",
    long_about = "mirrorcheck tracks \"libraries\" of named \"sectors\" (directory \
                  trees kept in several copies) and writes a durable index of each \
                  sector's contents, so copies can later be compared for consistency."
)]
struct Cli {
    /// Configuration root (defaults to ~/.mirrorcheck)
    #[arg(long, global = true, value_name = "DIR")]
    config_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new library
    CreateLib {
        /// Library name
        name: String,

        /// Comparison strategy identifier recorded on the library
        #[arg(short, long, default_value = "filename")]
        comparator: String,

        /// Recreate the config file if it is corrupt
        #[arg(long)]
        force: bool,
    },

    /// Delete a library
    DeleteLib {
        /// Library name
        name: String,
    },

    /// List registered libraries
    ListLibs,

    /// Register a sector under a library
    RegSector {
        /// Library name
        library: String,

        /// Sector name
        name: String,

        /// Absolute path of the sector's directory tree
        path: PathBuf,
    },

    /// Index a registered sector
    Index {
        /// Library name
        library: String,

        /// Sector name
        sector: String,

        /// Registered path of the sector
        path: PathBuf,

        /// Print every indexed entry
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = match cli.config_root {
        Some(root) => CatalogStore::new(root),
        None => CatalogStore::default_root()
            .ok_or_else(|| eyre!("cannot determine the home directory"))?,
    };

    match cli.command {
        Command::CreateLib {
            name,
            comparator,
            force,
        } => {
            store.create_library(&name, &comparator, force)?;
            println!("Created library {name}");
        }
        Command::DeleteLib { name } => {
            store.delete_library(&name)?;
            println!("Deleted library {name}");
        }
        Command::ListLibs => {
            for name in store.library_names()? {
                println!("{name}");
            }
        }
        Command::RegSector {
            library,
            name,
            path,
        } => {
            store.register_sector(&library, &name, &path)?;
            println!("Registered sector {name} for library {library}");
        }
        Command::Index {
            library,
            sector,
            path,
            verbose,
        } => {
            run_index(&store, &library, &sector, &path, verbose)?;
        }
    }

    Ok(())
}

/// Index one sector, routing through the command dispatcher.
fn run_index(
    store: &CatalogStore,
    library: &str,
    sector: &str,
    path: &Path,
    verbose: bool,
) -> Result<()> {
    // Pre-emptive state check: an unregistered triple signals a state
    // discrepancy, so fail before the expensive traversal.
    let catalog = store.load()?;
    let entry = catalog
        .library(library)
        .ok_or_else(|| eyre!("no such library: {library}"))?;
    match entry.sector(sector) {
        Some(s) if s.path == path => {}
        Some(_) => bail!(
            "{} is not the registered path of sector {sector}",
            path.display()
        ),
        None => bail!("no such sector in library {library}: {sector}"),
    }

    eprintln!("Indexing {library}.{sector} at {}...", path.display());

    let checker = NaiveChecker::new(IndexerConfig::new(store.root()));
    let args = vec![
        library.to_string(),
        sector.to_string(),
        path.display().to_string(),
    ];
    let Outcome::Indexed(report) =
        dispatch("indexSector", &args, &checker).context("Indexing failed")?;

    println!("Wrote {}", report.index_path.display());
    println!(
        " {} entries ({} files, {} directories) in {:.2}s",
        report.entries(),
        report.files,
        report.dirs,
        report.duration.as_secs_f64()
    );
    if report.has_warnings() {
        println!(" {} warning(s) during traversal", report.warnings.len());
        for warning in &report.warnings {
            eprintln!("   {}: {}", warning.path.display(), warning.message);
        }
    }

    if verbose {
        let content = std::fs::read_to_string(&report.index_path)?;
        print!("{content}");
    }

    Ok(())
}
