use thiserror::Error;

/// Errors that can occur while turning a raw table into a chart description
#[derive(Debug, Error)]
pub enum PlotError {
    /// Configuration error (column roles, invalid option values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Raw table error (CSV boundary, unknown columns)
    #[error("Table error: {0}")]
    Table(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Type alias for Results using PlotError
pub type Result<T> = std::result::Result<T, PlotError>;
