use std::io;
use thiserror::Error;

/// Custom error type for hwinfo
///
/// Most of the crate never surfaces these to callers: a missing file, an
/// unsupported query or an unparsable number degrades to an unknown field.
/// The enum exists so internal helpers can use `?` and log the reason at the
/// point where the failure is recovered.
#[derive(Error, Debug)]
pub enum HwInfoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WMI error: {0}")]
    Wmi(String),

    #[error("Cannot parse {field} from {value:?}")]
    Parse { field: &'static str, value: String },
}

/// Result type alias for hwinfo
pub type Result<T> = std::result::Result<T, HwInfoError>;

impl HwInfoError {
    /// Create a WMI error
    pub fn wmi<S: Into<String>>(msg: S) -> Self {
        HwInfoError::Wmi(msg.into())
    }

    /// Create a parse error for the named field
    pub fn parse<S: Into<String>>(field: &'static str, value: S) -> Self {
        HwInfoError::Parse {
            field,
            value: value.into(),
        }
    }
}
