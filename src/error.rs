//! Application error type.
//!
//! Every fallible function in the crate returns `Result<T, AppError>`. The error
//! carries the process exit code the `eco` binary should use, so the binary can
//! stay a thin wrapper:
//!
//! - `2` input/configuration (files, flags, credentials, request bodies)
//! - `3` calculation (unsupported transport type, bad passenger count)
//! - `4` external model (network, HTTP status, empty response)
//! - `5` strict label check failed

#[derive(Clone, PartialEq, Eq)]
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

    pub fn message(&self) -> &str {
        &self.message
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
