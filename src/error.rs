use thiserror::Error;

#[derive(Error, Debug)]
pub enum PettyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Unsupported file type: {0} (expected .csv or .xlsx)")]
    UnsupportedFile(String),

    #[error("Missing required columns: {}. Found columns: {}", missing.join(", "), found.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("Vendor list is empty: {0}")]
    EmptyVendorList(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PettyError>;
