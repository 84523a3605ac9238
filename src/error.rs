use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinearError {
    #[error("Linear API not configured. Run 'linear-embed auth --api-key <KEY>' or set LINEAR_API_KEY.")]
    NotConfigured,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("GraphQL error: {0}")]
    GraphQLError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl LinearError {
    /// Errors that abort issue resolution instead of falling through to the
    /// next lookup strategy.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LinearError::NotConfigured)
    }
}

pub type LinearResult<T> = Result<T, LinearError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> LinearResult<T>;
    fn with_context<F>(self, f: F) -> LinearResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> LinearResult<T> {
        self.map_err(|e| LinearError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> LinearResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| LinearError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> LinearResult<T> {
        self.ok_or_else(|| LinearError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> LinearResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| LinearError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! linear_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::LinearError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::LinearError::$error_type(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context_on_result() {
        let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        match result.context("Failed to read embed file") {
            Err(LinearError::Unknown(msg)) => {
                assert!(msg.contains("Failed to read embed file"));
                assert!(msg.contains("file not found"));
            }
            _ => panic!("Expected LinearError::Unknown"),
        }
    }

    #[test]
    fn test_error_context_on_option() {
        let option: Option<String> = None;
        match option.with_context(|| format!("Missing {}", "state")) {
            Err(LinearError::Unknown(msg)) => assert_eq!(msg, "Missing state"),
            _ => panic!("Expected LinearError::Unknown"),
        }
    }

    #[test]
    fn test_linear_error_macro() {
        let error = linear_error!(ApiError, "Request failed");
        assert!(matches!(error, LinearError::ApiError(ref msg) if msg == "Request failed"));

        let error = linear_error!(InvalidInput, "Invalid identifier: {}", "eng-1");
        assert!(matches!(error, LinearError::InvalidInput(ref msg) if msg == "Invalid identifier: eng-1"));
    }

    #[test]
    fn test_only_missing_configuration_is_fatal() {
        assert!(LinearError::NotConfigured.is_fatal());
        assert!(!LinearError::ApiError("boom".to_string()).is_fatal());
        assert!(!LinearError::GraphQLError("Entity not found".to_string()).is_fatal());
    }
}
