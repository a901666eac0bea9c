//! Station source error types.

/// Errors that can occur when fetching from a station source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested province, locality or station does not exist
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Offline data could not be loaded
    #[error("mock data error: {message}")]
    Mock { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SourceError::NotFound {
            resource: "/estaciones/detalles/7".into(),
        };
        assert_eq!(err.to_string(), "not found: /estaciones/detalles/7");

        let err = SourceError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = SourceError::Json {
            message: "expected array".into(),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected array");
    }
}
