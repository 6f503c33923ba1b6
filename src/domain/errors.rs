use thiserror::Error;

/// A failed call to the location lookup service.
///
/// The cascade treats every variant the same way: the level's result becomes
/// `error` and the description is kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupFailure {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service responded with HTTP {0}")]
    Status(u16),
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// A selection change that would break the country > state > city ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("a country must be selected before a state")]
    CountryRequired,
    #[error("a state must be selected before a city")]
    StateRequired,
}

pub type LookupResult<T> = Result<T, LookupFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failure_messages() {
        assert_eq!(
            LookupFailure::Transport("connection refused".to_string()).to_string(),
            "request failed: connection refused"
        );
        assert_eq!(LookupFailure::Status(503).to_string(), "service responded with HTTP 503");
        assert_eq!(
            LookupFailure::Decode("expected an array".to_string()).to_string(),
            "unexpected response: expected an array"
        );
    }

    #[test]
    fn test_selection_error_messages() {
        assert!(SelectionError::CountryRequired.to_string().contains("country"));
        assert!(SelectionError::StateRequired.to_string().contains("state"));
    }
}
