use std::time::Duration;

use thiserror::Error;
use tonic::{Code, Status};

/// Error types for module operations.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// Resource configuration was missing or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The remote platform could not be reached or answered with a non-success status.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote platform did not answer within the allotted time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The capability is not offered by this module.
    #[error("{0} is not available for this module")]
    Unsupported(&'static str),

    /// The remote platform answered successfully but sent no image data.
    #[error("Empty snapshot returned for {0}")]
    EmptySnapshot(String),

    /// The resource has not received a configuration yet.
    #[error("Resource {0} is not configured")]
    NotConfigured(String),

    /// No resource is registered under the requested name.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The session client was used after being closed.
    #[error("Client for {0} has been closed")]
    ClientClosed(String),

    /// Server initialization or runtime error.
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// gRPC transport error.
    #[error("gRPC transport error: {0}")]
    Grpc(#[from] tonic::transport::Error),
}

impl From<ModuleError> for Status {
    fn from(err: ModuleError) -> Self {
        let code = match &err {
            ModuleError::Configuration(_) => Code::InvalidArgument,
            ModuleError::Transport(_) => Code::Unavailable,
            ModuleError::Timeout(_) => Code::DeadlineExceeded,
            ModuleError::Unsupported(_) => Code::Unimplemented,
            ModuleError::EmptySnapshot(_) => Code::Unavailable,
            ModuleError::NotConfigured(_) => Code::FailedPrecondition,
            ModuleError::NotFound(_) => Code::NotFound,
            ModuleError::ClientClosed(_) => Code::FailedPrecondition,
            ModuleError::Server(_) => Code::Internal,
            ModuleError::Io(_) => Code::Internal,
            ModuleError::Grpc(_) => Code::Unavailable,
        };
        Status::new(code, err.to_string())
    }
}

/// Result type for module operations.
pub type Result<T> = std::result::Result<T, ModuleError>;
