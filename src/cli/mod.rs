pub mod config;
pub mod convert;
pub mod lookup;
pub mod review;
pub mod vendors;

use clap::{Parser, Subcommand};

/// Most unmatched payees listed in command output.
pub(crate) const UNMATCHED_PREVIEW: usize = 10;

pub(crate) fn unmatched_preview(unmatched: &[String]) -> String {
    unmatched
        .iter()
        .take(UNMATCHED_PREVIEW)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Parser)]
#[command(name = "petty", about = "Turn a petty-cash till log into QuickBooks IIF entries.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a CSV/XLSX petty-cash log into an IIF file.
    Convert {
        /// Path to CSV or XLSX file
        file: String,
        /// Output path, or `-` for stdout (default: input path with .iif extension)
        #[arg(long, short)]
        output: Option<String>,
        /// Fuzzy vendor match threshold, 0-100 (higher = stricter)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,
        /// Vendor list file, one name per line
        #[arg(long)]
        vendors: Option<String>,
    },
    /// Preview how each row would be classified, without writing anything.
    Review {
        /// Path to CSV or XLSX file
        file: String,
        /// Fuzzy vendor match threshold, 0-100 (higher = stricter)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,
        /// Vendor list file, one name per line
        #[arg(long)]
        vendors: Option<String>,
        /// Show at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Resolve a single detail string against the vendor list.
    Match {
        /// Free-text detail, e.g. "Brookside milk 2L"
        detail: String,
        /// Fuzzy vendor match threshold, 0-100 (higher = stricter)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,
        /// Vendor list file, one name per line
        #[arg(long)]
        vendors: Option<String>,
    },
    /// Inspect the vendor list and its aliases.
    Vendors {
        #[command(subcommand)]
        command: VendorsCommands,
    },
    /// Show or change saved defaults.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum VendorsCommands {
    /// List vendors with the normalized form used for fuzzy matching.
    List {
        /// Vendor list file, one name per line
        #[arg(long)]
        vendors: Option<String>,
    },
    /// List alias tokens and the vendor each one resolves to.
    Aliases {
        /// Vendor list file, one name per line
        #[arg(long)]
        vendors: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings.
    Show,
    /// Save the default fuzzy match threshold.
    Threshold {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        value: u8,
    },
    /// Save a default vendor list file (omit the path to use the built-in list).
    Vendors {
        path: Option<String>,
    },
    /// Add a saved alias: a detail token that always resolves to a vendor.
    Alias {
        token: String,
        vendor: String,
    },
}
