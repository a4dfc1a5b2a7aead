//! Error taxonomy for claimcheck.
//!
//! Only configuration and I/O can fail. Collaborator failures and thin
//! evidence degrade verdicts inside the pipeline and never appear here.

/// Errors produced while validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be greater than zero")]
    ZeroLimit { field: &'static str },

    #[error("false_threshold ({false_threshold}) exceeds true_threshold ({true_threshold})")]
    InvertedThresholds {
        true_threshold: f64,
        false_threshold: f64,
    },

    #[error("{list} must not be empty")]
    EmptyList { list: &'static str },

    #[error("contradiction rule {name:?} has no {side} terms")]
    EmptyRule { name: String, side: &'static str },
}

/// claimcheck errors.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("could not parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("could not render configuration: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for claimcheck operations.
pub type Result<T> = std::result::Result<T, CheckError>;
