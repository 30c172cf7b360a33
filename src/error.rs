//! Error types for the mash-research crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. No API keys or sensitive data appear in
//! error messages.

/// Errors that can occur during research operations.
///
/// Source adapters return these from `scrape`; the orchestrator recovers
/// them all, so the only variant `research_topic` surfaces to callers is
/// [`ResearchError::Config`].
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// An HTTP request to a content source failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a source response (HTML, JSON or RSS).
    #[error("parse error: {0}")]
    Parse(String),

    /// A source fetch timed out before responding.
    #[error("fetch timed out: {0}")]
    Timeout(String),

    /// Invalid research configuration or empty topic.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for mash-research results.
pub type Result<T> = std::result::Result<T, ResearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = ResearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = ResearchError::Parse("unexpected HTML structure".into());
        assert_eq!(err.to_string(), "parse error: unexpected HTML structure");
    }

    #[test]
    fn display_timeout() {
        let err = ResearchError::Timeout("exceeded 8s limit".into());
        assert_eq!(err.to_string(), "fetch timed out: exceeded 8s limit");
    }

    #[test]
    fn display_config() {
        let err = ResearchError::Config("max_results must be > 0".into());
        assert_eq!(err.to_string(), "config error: max_results must be > 0");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResearchError>();
    }
}
