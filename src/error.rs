// pdf-convert/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Engine failure, passed through untouched.
    #[error("{0}")]
    Render(#[from] RenderError),
}

/// Failures raised by a rendering engine.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Renderer exited with {}: {stderr}", exit_status(.status))]
    Process { status: Option<i32>, stderr: String },

    #[error("Renderer produced no output")]
    EmptyOutput,
}

impl ConvertError {
    pub(crate) fn empty_argument(name: &str) -> Self {
        ConvertError::Argument(format!("'{}' must not be empty", name))
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            error_type: match self {
                ConvertError::Argument(_) => "invalid_argument",
                ConvertError::Render(RenderError::Io(_)) => "io_error",
                ConvertError::Render(RenderError::Spawn { .. }) => "spawn_error",
                ConvertError::Render(RenderError::Process { .. }) => "render_error",
                ConvertError::Render(RenderError::EmptyOutput) => "empty_output",
            }
            .to_string(),
        }
    }
}

fn exit_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "signal".to_string(),
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}
