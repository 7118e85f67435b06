//! CLI error types.

use std::fmt;

use orch_catalog::CatalogError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Invalid configuration.
    Config(String),
    /// A catalog call failed.
    Catalog(CatalogError),
    /// The command subtree is disabled by the backend's capabilities.
    Disabled(String),
    /// The operator declined the confirmation prompt.
    Aborted,
    /// Output formatting error.
    Format(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::Catalog(err) => write!(f, "catalog error: {err}"),
            Self::Disabled(subtree) => {
                write!(f, "'{subtree}' commands are disabled for this deployment")
            }
            Self::Aborted => write!(f, "aborted"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_error_display_disabled() {
        let err = CliError::Disabled("registry".into());
        assert_eq!(
            err.to_string(),
            "'registry' commands are disabled for this deployment"
        );
    }

    #[test]
    fn cli_error_from_catalog_error() {
        let err = CliError::from(CatalogError::Transport("refused".into()));
        assert!(matches!(err, CliError::Catalog(_)));
        assert_eq!(err.to_string(), "catalog error: transport error: refused");
    }

    #[test]
    fn cli_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let cli_err = CliError::from(io_err);
        assert!(matches!(cli_err, CliError::Io(_)));
    }
}
