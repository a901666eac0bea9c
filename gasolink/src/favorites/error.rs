//! Favorites persistence error types.

/// Errors from reading or writing the favorites list.
#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    /// Nothing has been saved yet
    #[error("no saved favorites")]
    NotFound,

    /// The backing file could not be read or written
    #[error("favorites I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored list could not be parsed or serialized
    #[error("favorites JSON error: {message}")]
    Json { message: String },
}

impl From<serde_json::Error> for FavoritesError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_convert() {
        let err: FavoritesError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, FavoritesError::Json { .. }));
        assert!(err.to_string().starts_with("favorites JSON error: "));
    }
}
