use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures of the document arena. Node handles are reported by their raw
/// arena index so this crate does not depend on the DOM crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node #{0} does not exist")]
    UnknownNode(usize),

    #[error("node #{0} is not an element")]
    NotAnElement(usize),

    #[error("node #{0} is not a text node")]
    NotText(usize),

    #[error("node #{0} is not connected to the document")]
    Detached(usize),

    #[error("node #{child} is not a child of node #{parent}")]
    NotAChild { parent: usize, child: usize },

    #[error("hierarchy request error: {0}")]
    HierarchyRequest(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("stale match: {0}")]
    StaleMatch(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("debounce_ms out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: debounce_ms out of range"
        );
    }

    #[test]
    fn dom_error_display() {
        assert_eq!(DomError::UnknownNode(7).to_string(), "node #7 does not exist");
        assert_eq!(DomError::NotText(3).to_string(), "node #3 is not a text node");
        assert_eq!(
            DomError::NotAChild { parent: 1, child: 9 }.to_string(),
            "node #9 is not a child of node #1"
        );
        assert_eq!(
            DomError::HierarchyRequest("cycle".into()).to_string(),
            "hierarchy request error: cycle"
        );
    }

    #[test]
    fn finder_error_from_dom() {
        let err: FinderError = DomError::Detached(4).into();
        assert!(matches!(err, FinderError::Dom(DomError::Detached(4))));
        assert!(err.to_string().contains("not connected"));
    }

    #[test]
    fn finder_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: FinderError = config_err.into();
        assert!(matches!(err, FinderError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn finder_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: FinderError = io_err.into();
        assert!(matches!(err, FinderError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn finder_error_other_variants() {
        let err = FinderError::StaleMatch("text changed".into());
        assert_eq!(err.to_string(), "stale match: text changed");

        let err = FinderError::Protocol("unknown action".into());
        assert_eq!(err.to_string(), "protocol error: unknown action");

        let err = FinderError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
