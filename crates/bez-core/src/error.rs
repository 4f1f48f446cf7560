use thiserror::Error;

#[derive(Debug, Error)]
pub enum BezError {
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BezError {
    /// Build a parse error tagged with a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BezError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = BezError::parse(7, "expected 12 numbers, found 9");
        assert_eq!(
            err.to_string(),
            "Parse error at line 7: expected 12 numbers, found 9"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.bez");
        let err: BezError = io.into();
        assert!(matches!(err, BezError::Io(_)));
    }
}
