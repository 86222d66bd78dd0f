use crate::parser::SourcePosition;
use std::io;
use thiserror::Error;

/// Failure while reconstructing logical lines.
///
/// `Display` gives `filename:line_nr: message`, ready to print.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The source breaks an assumption the reader cannot work around.
    #[error("{position}: {message}")]
    Parse {
        position: SourcePosition,
        message: String,
    },

    /// A construct the reader does not handle; not the source's fault.
    #[error("{position}: internal error: {message}")]
    Internal {
        position: SourcePosition,
        message: String,
    },

    #[error("{position}: {source}")]
    Io {
        position: SourcePosition,
        #[source]
        source: io::Error,
    },
}

impl ReaderError {
    /// Where the problem was detected.
    pub fn position(&self) -> &SourcePosition {
        match self {
            ReaderError::Parse { position, .. }
            | ReaderError::Internal { position, .. }
            | ReaderError::Io { position, .. } => position,
        }
    }

    /// True when fixing the source is the remedy.
    pub fn is_user_error(&self) -> bool {
        matches!(self, ReaderError::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line_nr: usize) -> SourcePosition {
        SourcePosition {
            filename: "f".to_string(),
            line_nr,
        }
    }

    #[test]
    fn internal_error_names_position_and_blames_the_reader() {
        let err = ReaderError::Internal {
            position: at(3),
            message: "comment marker out of place".to_string(),
        };
        assert_eq!(err.to_string(), "f:3: internal error: comment marker out of place");
        assert!(!err.is_user_error());
        assert_eq!(err.position().line_nr, 3);
    }

    #[test]
    fn parse_error_is_the_users_to_fix() {
        let err = ReaderError::Parse {
            position: at(7),
            message: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "f:7: bad");
        assert!(err.is_user_error());
    }
}
