use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::categorizer::PLACEHOLDER_PAYEE;
use crate::error::Result;
use crate::matcher::{fuzzy_candidates, match_vendor};
use crate::normalize::{clean_text, title_case, tokenize};
use crate::settings::load_settings;

const CANDIDATES: usize = 5;

pub fn run(detail: &str, threshold: Option<u8>, vendors: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let threshold = settings.threshold_or(threshold);
    let directory = settings.vendor_directory(vendors)?;
    let detail = clean_text(detail);

    println!("Detail:     {detail}");
    println!("Tokens:     {}", tokenize(&detail).join(" "));
    println!("Threshold:  {threshold}");

    match match_vendor(&detail, &directory, threshold) {
        Some(m) => println!("Vendor:     {} ({})", m.vendor.green().bold(), m.stage.label()),
        None => {
            let payee = if detail.is_empty() {
                PLACEHOLDER_PAYEE.to_string()
            } else {
                title_case(&detail)
            };
            println!("Vendor:     {} (new payee: {payee})", "no match".yellow());
        }
    }

    let mut table = Table::new();
    table.set_header(vec!["Candidate", "Score", ""]);
    for (name, score) in fuzzy_candidates(&detail, &directory, CANDIDATES) {
        let mark = if score >= threshold { "\u{2713}" } else { "" };
        table.add_row(vec![Cell::new(name), Cell::new(score), Cell::new(mark)]);
    }
    println!("Fuzzy candidates\n{table}");
    Ok(())
}
