use std::path::PathBuf;

/// Errors raised while configuring, loading or rendering a read-count matrix
#[derive(thiserror::Error, Debug)]
pub enum SmrError {
    #[error("{0}")]
    Config(String),

    #[error("range {start}-{end} is invalid, start must be smaller than end")]
    InvalidRange { start: u64, end: u64 },

    #[error("invalid molecule ID format '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("expected 1 or more input files")]
    NoInputFiles,

    #[error("unable to open input file '{}': {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to open output file '{}': {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed reading '{source_name}': {source}")]
    Read {
        source_name: String,
        source: std::io::Error,
    },

    #[error("failed writing output: {0}")]
    Write(#[from] std::io::Error),

    #[error("{source_name}: line {line}: {reason}: '{content}'")]
    Parse {
        source_name: String,
        line: usize,
        reason: &'static str,
        content: String,
    },

    #[error("failed writing load summary '{}': {source}", .path.display())]
    Summary {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl SmrError {
    /// True for errors caused by the command line rather than the data
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            SmrError::Config(_)
                | SmrError::InvalidRange { .. }
                | SmrError::InvalidTemplate { .. }
                | SmrError::NoInputFiles
        )
    }
}

pub type Result<T> = std::result::Result<T, SmrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_names_source_and_line() {
        let err = SmrError::Parse {
            source_name: "sample1.sam".to_string(),
            line: 7,
            reason: "expected at least 3 tab-separated fields",
            content: "r1\t0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("sample1.sam: line 7:"));
        assert!(msg.contains("r1\t0"));
        assert!(!err.is_config());
    }

    #[test]
    fn test_config_errors_are_classified() {
        assert!(SmrError::InvalidRange { start: 5, end: 2 }.is_config());
        assert!(SmrError::NoInputFiles.is_config());
        assert_eq!(
            SmrError::InvalidRange { start: 5, end: 2 }.to_string(),
            "range 5-2 is invalid, start must be smaller than end"
        );
    }
}
