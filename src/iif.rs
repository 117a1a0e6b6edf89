use std::collections::BTreeMap;
use std::io::Write;

use tracing::{info, warn};

use crate::categorizer::classify;
use crate::error::Result;
use crate::models::{Category, LedgerEntry, LedgerLine, TransactionRow};
use crate::vendors::VendorDirectory;

pub const HEADER_TRNS: &str = "!TRNS\tTRNSTYPE\tDATE\tACCNT\tNAME\tAMOUNT\tMEMO\tDOCNUM\tCLEAR";
pub const HEADER_SPL: &str = "!SPL\tTRNSTYPE\tDATE\tACCNT\tNAME\tAMOUNT\tMEMO\tDOCNUM\tCLEAR";
pub const HEADER_END: &str = "!ENDTRNS";
pub const END_TRNS: &str = "ENDTRNS";

#[derive(Debug, Default)]
pub struct EmitSummary {
    pub entries: usize,
    pub by_category: BTreeMap<Category, usize>,
    /// Payees that matched no known vendor, in row order, without repeats.
    /// QuickBooks creates these as new names on import.
    pub unmatched: Vec<String>,
    pub raw_dates: usize,
}

impl EmitSummary {
    fn record(&mut self, row: &TransactionRow, entry: &LedgerEntry) {
        self.entries += 1;
        *self.by_category.entry(entry.classification.category).or_default() += 1;
        if entry.classification.payee_source.is_unmatched() {
            let payee = &entry.classification.payee;
            if !self.unmatched.contains(payee) {
                self.unmatched.push(payee.clone());
            }
        }
        if row.date.as_date().is_none() {
            self.raw_dates += 1;
        }
    }
}

fn write_line<W: Write>(out: &mut W, line: &LedgerLine) -> Result<()> {
    writeln!(out, "{}", line.fields().join("\t"))?;
    Ok(())
}

pub fn write_header<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{HEADER_TRNS}")?;
    writeln!(out, "{HEADER_SPL}")?;
    writeln!(out, "{HEADER_END}")?;
    Ok(())
}

pub fn write_entry<W: Write>(out: &mut W, entry: &LedgerEntry) -> Result<()> {
    write_line(out, &entry.trns)?;
    write_line(out, &entry.spl)?;
    writeln!(out, "{END_TRNS}")?;
    Ok(())
}

/// Classify and write rows one at a time, in input order.
pub fn write_iif<W, I>(
    out: &mut W,
    rows: I,
    directory: &VendorDirectory,
    threshold: u8,
) -> Result<EmitSummary>
where
    W: Write,
    I: IntoIterator<Item = TransactionRow>,
{
    let mut summary = EmitSummary::default();
    write_header(out)?;
    for (idx, row) in rows.into_iter().enumerate() {
        let seq = idx + 1;
        let entry = classify(&row, seq, threshold, directory);
        if row.date.as_date().is_none() {
            warn!(seq, date = entry.trns.date.as_str(), "unparsable date, written as-is");
        }
        debug_assert!(entry.is_balanced());
        write_entry(out, &entry)?;
        summary.record(&row, &entry);
    }
    out.flush()?;
    info!(entries = summary.entries, unmatched = summary.unmatched.len(), "IIF written");
    Ok(summary)
}

/// Whole document in memory.
#[cfg(test)]
pub fn build_iif(rows: &[TransactionRow], directory: &VendorDirectory, threshold: u8) -> Result<String> {
    let mut buf = Vec::new();
    write_iif(&mut buf, rows.iter().cloned(), directory, threshold)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
