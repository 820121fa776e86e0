//! Error types for the cell-outline renderer.

use thiserror::Error;

/// Result type alias using CellError.
pub type CellResult<T> = Result<T, CellError>;

/// Primary error type for parsing and rendering operations.
#[derive(Debug, Error)]
pub enum CellError {
    // === Input Errors ===
    #[error("Malformed record for cell {cell}: {message}")]
    DataFormat { cell: usize, message: String },

    #[error("No scalar value for cell {0}")]
    MissingValue(usize),

    #[error("Value {value} is outside [0, 1]")]
    Range { value: f64 },

    // === Environment Errors ===
    #[error("Resource unavailable: {0}")]
    Resource(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // === Output Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl CellError {
    /// Shorthand for a `DataFormat` error on a given cell or row.
    pub fn data_format(cell: usize, message: impl Into<String>) -> Self {
        CellError::DataFormat {
            cell,
            message: message.into(),
        }
    }

    /// Name of the error class this error belongs to.
    pub fn kind(&self) -> &'static str {
        match self {
            CellError::DataFormat { .. } => "DataFormatError",
            CellError::MissingValue(_) => "MissingValueError",
            CellError::Range { .. } => "RangeError",
            CellError::Resource(_) => "ResourceError",
            CellError::Config(_) => "ConfigError",
            CellError::Render(_) => "RenderError",
            CellError::Io(_) => "IoError",
        }
    }

    /// Whether this error aborts a run.
    ///
    /// A missing value only excludes the affected cell.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CellError::MissingValue(_))
    }
}

// Conversion from common error types
impl From<std::io::Error> for CellError {
    fn from(err: std::io::Error) -> Self {
        CellError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CellError {
    fn from(err: serde_json::Error) -> Self {
        CellError::Config(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(CellError::data_format(3, "odd").kind(), "DataFormatError");
        assert_eq!(CellError::MissingValue(1).kind(), "MissingValueError");
        assert_eq!(CellError::Range { value: 1.5 }.kind(), "RangeError");
        assert_eq!(CellError::Resource("font".into()).kind(), "ResourceError");
    }

    #[test]
    fn test_only_missing_value_is_recoverable() {
        assert!(!CellError::MissingValue(7).is_fatal());
        assert!(CellError::data_format(7, "x").is_fatal());
        assert!(CellError::Range { value: -0.1 }.is_fatal());
        assert!(CellError::Resource("colormap".into()).is_fatal());
    }

    #[test]
    fn test_display_names_offending_cell() {
        let err = CellError::data_format(12, "odd coordinate count (5)");
        assert_eq!(
            err.to_string(),
            "Malformed record for cell 12: odd coordinate count (5)"
        );
    }
}
