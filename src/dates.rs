use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

/// A transaction date as read from the till log. Values that don't parse are
/// carried through verbatim instead of failing the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxnDate {
    Parsed(NaiveDate),
    Raw(String),
}

impl TxnDate {
    /// Month-first parse: `03/01/2024` is March 1st.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        let year_first = s.len() >= 5 && s.as_bytes()[..4].iter().all(u8::is_ascii_digit);
        // chrono's %Y also takes one or two digits, which would misread 03/01/24.
        let candidates = |formats: &'static [&'static str]| {
            formats
                .iter()
                .filter(move |f| year_first || !f.starts_with("%Y"))
        };
        for fmt in candidates(DATE_FORMATS) {
            if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
                return Self::Parsed(d);
            }
        }
        for fmt in candidates(DATETIME_FORMATS) {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Self::Parsed(dt.date());
            }
        }
        Self::Raw(raw.to_string())
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Parsed(d) => Some(*d),
            Self::Raw(_) => None,
        }
    }

    /// `MM/DD/YYYY`, or the raw text if the date never parsed.
    pub fn qb_format(&self) -> String {
        match self {
            Self::Parsed(d) => d.format("%m/%d/%Y").to_string(),
            Self::Raw(s) => s.clone(),
        }
    }
}

/// Document number: `YYYYMMDD` (or `00000000`) followed by the 3-digit row sequence.
pub fn make_docnum(date: &TxnDate, seq: usize) -> String {
    match date {
        TxnDate::Parsed(d) => format!("{}{seq:03}", d.format("%Y%m%d")),
        TxnDate::Raw(_) => format!("00000000{seq:03}"),
    }
}

pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(chrono::Duration::days(serial.floor() as i64))
}
