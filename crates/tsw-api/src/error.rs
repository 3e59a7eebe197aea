use thiserror::Error;

/// Top-level error type for the `tsw-api` crate.
///
/// Covers every failure mode of a single exchange with the panel:
/// credentials, login rejection, transport, HTTP status, and payload shape.
/// `tsw-core` maps these into adapter-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login or password is blank. Raised before any network I/O.
    #[error("Failed to login, please check the credentials")]
    MissingCredentials,

    /// The panel rejected the session or the credentials (HTTP 401/403).
    /// Carries the response body the panel sent back.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup error while building the HTTP client.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Device API ──────────────────────────────────────────────────
    /// Non-success HTTP status other than 401/403.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the panel refused the session or the credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::MissingCredentials | Self::Authentication { .. })
    }

    /// Returns `true` if the panel could not be reached at all.
    ///
    /// Every transport-level failure counts: the request never produced an
    /// HTTP response that could be judged per endpoint.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn auth_errors_are_classified() {
        assert!(Error::MissingCredentials.is_auth());
        let denied = Error::Authentication {
            message: "denied".into(),
        };
        assert!(denied.is_auth());
        assert!(!denied.is_unreachable());
    }

    #[test]
    fn http_and_payload_errors_are_not_auth_or_transport() {
        let http = Error::Http {
            status: 500,
            body: "boom".into(),
        };
        assert!(!http.is_auth() && !http.is_unreachable());
        assert_eq!(http.status(), Some(500));

        let payload = Error::Deserialization {
            message: "expected array".into(),
            body: "{}".into(),
        };
        assert!(!payload.is_auth() && !payload.is_unreachable());
        assert_eq!(payload.status(), None);
    }
}
