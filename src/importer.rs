use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::dates::TxnDate;
use crate::error::{PettyError, Result};
use crate::models::TransactionRow;
use crate::normalize::{clean_text, normalize};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a till amount. Unparsable values become zero rather than failing the file.
pub fn parse_amount(raw: &str) -> Decimal {
    let s = raw
        .replace([',', '"', '$'], "")
        .replace("KES", "")
        .replace("Ksh", "")
        .replace("KSh", "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return -parse_decimal(inner.trim());
    }
    parse_decimal(s)
}

fn parse_decimal(s: &str) -> Decimal {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .unwrap_or(Decimal::ZERO)
}

// ---------------------------------------------------------------------------
// Column reconciliation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PayType,
    TillNo,
    TransactionDate,
    Detail,
    Amount,
    UserName,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Self::PayType,
        Self::TillNo,
        Self::TransactionDate,
        Self::Detail,
        Self::Amount,
        Self::UserName,
    ];

    pub fn key(self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted header spellings, most specific first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::PayType => &["pay type", "paytype", "type", "pay_type"],
            Self::TillNo => &["till no", "till", "till number", "till_no", "tillno"],
            Self::TransactionDate => &["transaction date", "date", "txn date", "trans date", "txndate"],
            Self::Detail => &["detail", "details", "description", "memo", "narration"],
            Self::Amount => &["transacted amount", "amount", "amt", "value", "transaction amount"],
            Self::UserName => &["user name", "username", "user", "cashier", "handled by", "handledby"],
        }
    }
}

/// Column index of each canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub pay_type: usize,
    pub till_no: usize,
    pub transaction_date: usize,
    pub detail: usize,
    pub amount: usize,
    pub user_name: usize,
}

fn locate(field: Field, normalized: &[String]) -> Option<usize> {
    for alias in field.aliases() {
        if let Some(idx) = normalized.iter().position(|h| h == alias) {
            return Some(idx);
        }
    }
    let words: Vec<String> = normalize(field.key())
        .split_whitespace()
        .map(str::to_string)
        .collect();
    normalized
        .iter()
        .position(|h| words.iter().all(|w| h.contains(w.as_str())))
}

/// Match arbitrary source headers to the six canonical fields.
///
/// An exact alias hit wins; otherwise the first header containing every word
/// of the field's primary name is taken.
pub fn find_columns<S: AsRef<str>>(headers: &[S]) -> Result<ColumnMap> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize(h.as_ref())).collect();
    let mut found = [None; 6];
    for (slot, field) in found.iter_mut().zip(Field::ALL) {
        *slot = locate(field, &normalized);
        debug!(field = field.key(), column = ?*slot, "column lookup");
    }

    let missing: Vec<String> = Field::ALL
        .iter()
        .zip(found)
        .filter(|(_, idx)| idx.is_none())
        .map(|(f, _)| f.key().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PettyError::MissingColumns {
            missing,
            found: headers.iter().map(|h| h.as_ref().to_string()).collect(),
        });
    }

    let [Some(pay_type), Some(till_no), Some(transaction_date), Some(detail), Some(amount), Some(user_name)] =
        found
    else {
        unreachable!("missing columns reported above");
    };
    Ok(ColumnMap {
        pay_type,
        till_no,
        transaction_date,
        detail,
        amount,
        user_name,
    })
}

/// Build a row from raw cells; `None` when every mapped cell is blank.
fn row_from_cells(cells: &[String], cols: &ColumnMap) -> Option<TransactionRow> {
    let cell = |idx: usize| cells.get(idx).map(|c| clean_text(c)).unwrap_or_default();
    let pay_type = cell(cols.pay_type);
    let till_no = cell(cols.till_no);
    let date = cell(cols.transaction_date);
    let detail = cell(cols.detail);
    let amount = cell(cols.amount);
    let user_name = cell(cols.user_name);

    if [&pay_type, &till_no, &date, &detail, &amount, &user_name]
        .iter()
        .all(|v| v.is_empty())
    {
        return None;
    }

    Some(TransactionRow {
        pay_type,
        till_no,
        date: TxnDate::parse(&date),
        detail,
        amount: parse_amount(&amount),
        user_name,
    })
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<TransactionRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let cols = find_columns(&headers)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if let Some(row) = row_from_cells(&cells, &cols) {
            rows.push(row);
        }
    }
    Ok(rows)
}

#[cfg(feature = "xlsx")]
fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(dt) => crate::dates::excel_serial_to_date(dt.as_f64())
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        other => other.to_string(),
    }
}

/// First worksheet of a workbook; the first row holds the headers.
#[cfg(feature = "xlsx")]
pub fn read_xlsx(file_path: &Path) -> Result<Vec<TransactionRow>> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(file_path)
        .map_err(|e| PettyError::Spreadsheet(format!("Failed to open workbook: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PettyError::Spreadsheet("Workbook has no sheets".to_string()))?
        .map_err(|e| PettyError::Spreadsheet(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Err(PettyError::MissingColumns {
            missing: Field::ALL.iter().map(|f| f.key().to_string()).collect(),
            found: Vec::new(),
        });
    };
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();
    let cols = find_columns(&headers)?;

    let rows = sheet_rows
        .filter_map(|r| {
            let cells: Vec<String> = r.iter().map(cell_text).collect();
            row_from_cells(&cells, &cols)
        })
        .collect();
    Ok(rows)
}

/// Read a petty-cash log, choosing the reader by file extension.
pub fn read_rows(file_path: &Path) -> Result<Vec<TransactionRow>> {
    let ext = file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let rows = match ext.as_str() {
        "csv" => read_csv(std::io::BufReader::new(std::fs::File::open(file_path)?))?,
        #[cfg(feature = "xlsx")]
        "xlsx" | "xlsm" | "xls" => read_xlsx(file_path)?,
        _ => return Err(PettyError::UnsupportedFile(file_path.display().to_string())),
    };
    info!(file = %file_path.display(), rows = rows.len(), "read petty cash log");
    Ok(rows)
}
