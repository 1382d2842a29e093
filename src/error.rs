use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch page: {0}")]
    PageFetch(#[from] reqwest::Error),

    #[error("Failed to parse embedded JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // HTTP-level failures. Non-success statuses are never retried; the
    // status code travels with the error so callers can report it.
    #[error("Page request failed ({status}): {message} (URL: {url})")]
    Retrieval {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Network timeout while fetching: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // The embedded-state contract was not met: the expected element is
    // missing, duplicated, or its attribute does not hold JSON. This means
    // the source page's markup changed, so it is surfaced as-is.
    #[error("Page structure mismatch: {message} (URL: {url})")]
    Structure { message: String, url: String },

    #[error("Event lookup for '{event_name}' matched {matches} events, expected exactly one")]
    Lookup { event_name: String, matches: usize },

    #[error("Stream record integrity error: {message}")]
    DataIntegrity { message: String },

    #[error("Invalid element selector: {0}")]
    Selector(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a retrieval error for a non-success HTTP status
    pub fn retrieval(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Retrieval {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a page structure error
    pub fn structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Structure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an event lookup error
    pub fn lookup(event_name: impl Into<String>, matches: usize) -> Self {
        Self::Lookup {
            event_name: event_name.into(),
            matches,
        }
    }

    /// Create a data integrity error
    pub fn data_integrity(message: impl Into<String>) -> Self {
        Self::DataIntegrity {
            message: message.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Check if the error means the source site changed shape underneath us
    /// (as opposed to a transient network problem). These failures persist
    /// until the selectors are updated, so callers should not re-request.
    pub fn is_site_change(&self) -> bool {
        matches!(
            self,
            AppError::Structure { .. } | AppError::Lookup { .. } | AppError::DataIntegrity { .. }
        )
    }

    /// Check if the error came from the transport layer rather than the
    /// page contents.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            AppError::PageFetch(_)
                | AppError::Retrieval { .. }
                | AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_helper() {
        let error = AppError::retrieval(502, "Bad Gateway", "https://example.com/teams/x");
        assert!(matches!(error, AppError::Retrieval { status: 502, .. }));
        assert_eq!(
            error.to_string(),
            "Page request failed (502): Bad Gateway (URL: https://example.com/teams/x)"
        );
    }

    #[test]
    fn test_structure_helper() {
        let error = AppError::structure("no element matches selector", "https://example.com");
        assert!(matches!(error, AppError::Structure { .. }));
        assert_eq!(
            error.to_string(),
            "Page structure mismatch: no element matches selector (URL: https://example.com)"
        );
    }

    #[test]
    fn test_lookup_helper() {
        let error = AppError::lookup("Finals", 0);
        assert!(matches!(error, AppError::Lookup { matches: 0, .. }));
        assert_eq!(
            error.to_string(),
            "Event lookup for 'Finals' matched 0 events, expected exactly one"
        );

        let ambiguous = AppError::lookup("Finals", 2);
        assert!(matches!(ambiguous, AppError::Lookup { matches: 2, .. }));
    }

    #[test]
    fn test_data_integrity_helper() {
        let error = AppError::data_integrity("neither team matches 'Drive Richmond'");
        assert!(matches!(error, AppError::DataIntegrity { .. }));
        assert_eq!(
            error.to_string(),
            "Stream record integrity error: neither team matches 'Drive Richmond'"
        );
    }

    #[test]
    fn test_network_helpers() {
        let timeout = AppError::network_timeout("https://example.com");
        assert_eq!(
            timeout.to_string(),
            "Network timeout while fetching: https://example.com"
        );

        let connection = AppError::network_connection("https://example.com", "refused");
        assert_eq!(
            connection.to_string(),
            "Connection failed to: https://example.com - refused"
        );
    }

    #[test]
    fn test_is_site_change() {
        assert!(AppError::structure("msg", "url").is_site_change());
        assert!(AppError::lookup("name", 3).is_site_change());
        assert!(AppError::data_integrity("msg").is_site_change());

        assert!(!AppError::retrieval(500, "msg", "url").is_site_change());
        assert!(!AppError::network_timeout("url").is_site_change());
        assert!(!AppError::config_error("msg").is_site_change());
    }

    #[test]
    fn test_is_network() {
        assert!(AppError::retrieval(404, "Not Found", "url").is_network());
        assert!(AppError::network_timeout("url").is_network());
        assert!(AppError::network_connection("url", "msg").is_network());

        assert!(!AppError::structure("msg", "url").is_network());
        assert!(!AppError::lookup("name", 0).is_network());
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert!(matches!(app_error, AppError::JsonParse(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
    }

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("team page URL is empty");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: team page URL is empty"
        );
    }
}
