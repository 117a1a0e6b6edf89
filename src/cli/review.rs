use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::categorizer::classify;
use crate::cli::unmatched_preview;
use crate::error::Result;
use crate::fmt::{amount, truncate};
use crate::importer::read_rows;
use crate::settings::load_settings;

pub fn run(file: &str, threshold: Option<u8>, vendors: Option<&str>, limit: Option<usize>) -> Result<()> {
    let settings = load_settings();
    let threshold = settings.threshold_or(threshold);
    let directory = settings.vendor_directory(vendors)?;
    let rows = read_rows(&PathBuf::from(file))?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Date", "Till", "Detail", "Amount", "Category", "Payee", "Resolved"]);

    let mut unmatched: Vec<String> = Vec::new();
    let shown = limit.unwrap_or(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let entry = classify(row, idx + 1, threshold, &directory);
        let class = &entry.classification;
        if class.payee_source.is_unmatched() && !unmatched.contains(&class.payee) {
            unmatched.push(class.payee.clone());
        }
        if idx >= shown {
            continue;
        }
        let resolved = if class.payee_source.is_unmatched() {
            class.payee_source.label().yellow().to_string()
        } else {
            class.payee_source.label()
        };
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&entry.trns.date),
            Cell::new(&row.till_no),
            Cell::new(truncate(&row.detail, 40)),
            Cell::new(amount(entry.spl.amount)),
            Cell::new(class.category.label()),
            Cell::new(truncate(&class.payee, 32)),
            Cell::new(resolved),
        ]);
    }

    println!("Classification preview (match threshold {threshold})\n{table}");
    if shown < rows.len() {
        println!("... {} more rows not shown", rows.len() - shown);
    }
    if unmatched.is_empty() {
        println!("{}", "Every vendor purchase matched a known vendor.".green());
    } else {
        println!(
            "{} {}",
            format!("{} new/unmatched vendors:", unmatched.len()).yellow(),
            unmatched_preview(&unmatched)
        );
    }
    Ok(())
}
