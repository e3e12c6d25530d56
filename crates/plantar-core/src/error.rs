use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SignalError {
    #[error("non-finite value in {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },
}

impl SignalError {
    pub fn check_finite(field: &'static str, value: f64) -> Result<f64, SignalError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(SignalError::NonFinite { field, value })
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
