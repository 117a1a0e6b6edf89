mod categorizer;
mod cli;
mod dates;
mod error;
mod fmt;
mod fuzzy;
mod iif;
mod importer;
mod matcher;
mod models;
mod normalize;
mod settings;
mod vendors;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigCommands, VendorsCommands};

fn init_logging() {
    let filter = EnvFilter::try_from_env("PETTY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            file,
            output,
            threshold,
            vendors,
        } => cli::convert::run(&file, output.as_deref(), threshold, vendors.as_deref()),
        Commands::Review {
            file,
            threshold,
            vendors,
            limit,
        } => cli::review::run(&file, threshold, vendors.as_deref(), limit),
        Commands::Match {
            detail,
            threshold,
            vendors,
        } => cli::lookup::run(&detail, threshold, vendors.as_deref()),
        Commands::Vendors { command } => match command {
            VendorsCommands::List { vendors } => cli::vendors::list(vendors.as_deref()),
            VendorsCommands::Aliases { vendors } => cli::vendors::aliases(vendors.as_deref()),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Threshold { value } => cli::config::threshold(value),
            ConfigCommands::Vendors { path } => cli::config::vendors(path.as_deref()),
            ConfigCommands::Alias { token, vendor } => cli::config::alias(&token, &vendor),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
