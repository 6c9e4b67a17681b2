//! Common error types for TuneTag

use thiserror::Error;

/// Common result type for TuneTag operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across TuneTag crates
///
/// Unknown stickers and malformed candidate filenames are not errors; they are
/// skipped during aggregation and selection.
#[derive(Error, Debug)]
pub enum Error {
    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or resolution error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog failed validation (category arity, tag sets, weights)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
