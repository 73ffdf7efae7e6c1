mod cli {
    pub(crate) mod candidates;
    pub(crate) mod contacts;
}

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Detect non-covalent interactions between a ligand and its protein pocket
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect ligand-protein interactions and save them to a file
    Contacts(cli::contacts::Args),
    /// List the residues that could be analyzed as ligands
    Candidates(cli::candidates::Args),
}

fn setup_logging(verbosity: u8, quiet: bool) {
    let level_filter = if quiet {
        LevelFilter::OFF
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);
    info!("plinteract v{}", env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Commands::Contacts(args) => cli::contacts::run(args),
        Commands::Candidates(args) => cli::candidates::run(args),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}
