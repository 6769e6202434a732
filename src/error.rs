//! Error types.
//!
//! - `ResolveError` is what the library hands back when a lookup cannot be
//!   answered (misconfiguration or a failed remote query). "No match" is never
//!   an error; it is an empty feature list.
//! - `AppError` is the binary-facing error carrying a process exit code.

use thiserror::Error;

/// Failure signal for parcel lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A required GIS layer was never registered (or registered with an empty URL).
    #[error("missing {layer} layer")]
    MissingLayer { layer: String },

    /// The request could not be sent or no response arrived.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The service answered with a non-success HTTP status.
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// The response body was not the JSON we expected.
    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    /// ArcGIS reported a query error inside an otherwise successful response.
    #[error("feature service error {code}: {message}")]
    Service { code: i64, message: String },
}

impl ResolveError {
    pub fn missing_layer(layer: impl Into<String>) -> Self {
        Self::MissingLayer {
            layer: layer.into(),
        }
    }

    /// True for configuration problems, as opposed to remote-query failures.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingLayer { .. })
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        let code = if err.is_configuration() { 2 } else { 4 };
        AppError::new(code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
