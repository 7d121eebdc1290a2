use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out file contents that serde may echo back
    pub fn log_safe(&self) -> String {
        match self {
            Error::Io(_) => "File system operation failed".to_string(),
            Error::Json(e) => format!("Malformed JSON at line {}", e.line()),

            Error::Corpus(msg) => format!("Corpus error: {msg}"),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::Validation(msg) => format!("Validation error: {msg}"),
        }
    }

    /// Whether the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_safe_hides_io_details() {
        let err = Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "/home/alice/recipes.jsonl",
        ));
        assert_eq!(err.log_safe(), "File system operation failed");

        let err = Error::Corpus("empty".to_string());
        assert_eq!(err.log_safe(), "Corpus error: empty");
    }

    #[test]
    fn test_validation_is_client_error() {
        assert!(Error::Validation("alpha".to_string()).is_client_error());
        assert!(!Error::Corpus("missing".to_string()).is_client_error());
    }
}
