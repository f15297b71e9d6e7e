use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlignError {
    #[error("Missing required column: {0}")]
    Schema(String),

    #[error("Could not identify input files: {0}")]
    Identification(String),

    #[error("Unsupported file format: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Spreadsheet(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<calamine::Error> for AlignError {
    fn from(e: calamine::Error) -> Self {
        AlignError::Spreadsheet(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AlignError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        AlignError::Spreadsheet(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AlignError>;
