use std::io::{BufWriter, Write};
use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::unmatched_preview;
use crate::error::Result;
use crate::iif::{write_iif, EmitSummary};
use crate::importer::read_rows;
use crate::models::Category;
use crate::settings::load_settings;

fn summary_text(summary: &EmitSummary, threshold: u8) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Entries"]);
    for category in Category::ALL {
        let count = summary.by_category.get(&category).copied().unwrap_or(0);
        table.add_row(vec![Cell::new(category.label()), Cell::new(count)]);
    }

    let mut out = format!(
        "{} entries written (match threshold {threshold})\n{table}",
        summary.entries
    );
    if summary.raw_dates > 0 {
        out.push_str(&format!(
            "\n{}",
            format!("{} rows had unparsable dates (docnum prefix 00000000)", summary.raw_dates).yellow()
        ));
    }
    if !summary.unmatched.is_empty() {
        out.push_str(&format!(
            "\n{} {}",
            format!("{} new/unmatched vendors:", summary.unmatched.len()).yellow(),
            unmatched_preview(&summary.unmatched)
        ));
    }
    out
}

pub fn run(file: &str, output: Option<&str>, threshold: Option<u8>, vendors: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let threshold = settings.threshold_or(threshold);
    let directory = settings.vendor_directory(vendors)?;

    let input = PathBuf::from(file);
    let rows = read_rows(&input)?;

    if output == Some("-") {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let summary = write_iif(&mut out, rows, &directory, threshold)?;
        out.flush()?;
        eprintln!("{}", summary_text(&summary, threshold));
        return Ok(());
    }

    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("iif"));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(std::fs::File::create(&path)?);
    let summary = write_iif(&mut out, rows, &directory, threshold)?;

    println!("Wrote {}", path.display());
    println!("{}", summary_text(&summary, threshold));
    Ok(())
}
