//! Error types for StanceLens
//!
//! Bad input is never an error: the robustness gate turns it into a
//! degraded result. These variants cover construction faults, polarity
//! scorer faults and cache plumbing.

/// Result type alias using StanceLens's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for StanceLens operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classifier construction or execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Faults raised by the polarity scoring primitive
    #[error("polarity scorer error: {0}")]
    Polarity(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Result cache errors
    #[error("cache error: {0}")]
    Cache(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new polarity scorer error
    pub fn polarity(msg: impl Into<String>) -> Self {
        Self::Polarity(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new cache error
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }
}
