use std::path::PathBuf;
use thiserror::Error;

/// Failures callers may want to tell apart. Everything else travels as a plain
/// `anyhow::Error` with context.
#[derive(Debug, Error)]
pub enum StowmanError {
    #[error("{what} {path:?} does not exist")]
    NotFound { what: &'static str, path: PathBuf },

    #[error("{message}")]
    Validation { message: String },

    #[error("{path:?} already exists")]
    Conflict { path: PathBuf },

    #[error("Operation cancelled.")]
    Interrupted,

    #[error("Could not find home directory")]
    HomeDirUnavailable,
}

impl StowmanError {
    pub fn not_found(what: &'static str, path: impl Into<PathBuf>) -> Self {
        StowmanError::NotFound {
            what,
            path: path.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        StowmanError::Validation {
            message: message.into(),
        }
    }
}

/// True when `err` is a cancellation at a confirmation prompt.
pub fn is_interrupted(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<StowmanError>(),
        Some(StowmanError::Interrupted)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = StowmanError::not_found("Directory", "/home/user/packages");
        assert_eq!(
            err.to_string(),
            "Directory \"/home/user/packages\" does not exist"
        );
    }

    #[test]
    fn test_is_interrupted_downcasts_through_anyhow() {
        let err: anyhow::Error = StowmanError::Interrupted.into();
        assert!(is_interrupted(&err));

        let err: anyhow::Error = StowmanError::validation("bad").into();
        assert!(!is_interrupted(&err));
        assert!(!is_interrupted(&anyhow::anyhow!("other")));
    }
}
