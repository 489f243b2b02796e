//! Error type for catalog requests.

/// A catalog request that did not produce a page.
///
/// There is a single failure kind: whatever went wrong (transport, HTTP status,
/// GraphQL errors, undecodable body) is reduced to a human-readable message that
/// the view shows verbatim.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchFailed {
    /// Message shown to the user.
    message: String,
}

impl FetchFailed {
    /// What: Build a failure from any message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// What: Borrow the user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for FetchFailed {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("Catalog request timed out: {err}")
        } else if err.is_connect() {
            format!("Could not connect to the catalog: {err}")
        } else if err.is_decode() {
            format!("Catalog response could not be decoded: {err}")
        } else {
            format!("Catalog request failed: {err}")
        };
        Self { message }
    }
}

impl From<serde_json::Error> for FetchFailed {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: format!("Catalog response could not be decoded: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FetchFailed;

    #[test]
    /// What: The display form of a failure is exactly its message.
    fn display_is_verbatim_message() {
        let err = FetchFailed::new("Too Many Requests.");
        assert_eq!(err.to_string(), "Too Many Requests.");
        assert_eq!(err.message(), "Too Many Requests.");
    }
}
