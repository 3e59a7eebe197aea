// ── Core error types ──
//
// User-facing errors from tsw-core. The `From<tsw_api::Error>` impl
// translates transport-layer errors into adapter-level variants, so hosts
// never match on HTTP details directly.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Credential / session errors ──────────────────────────────────
    #[error("Failed to login, please check the credentials")]
    MissingCredentials,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Cannot connect to panel at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    // ── Poll errors ──────────────────────────────────────────────────
    /// Every endpoint attempted in the cycle failed.
    #[error(
        "Unable to process requested API sections: [{}], error reported: [{message}]",
        .sections.join(",")
    )]
    AggregateFetch {
        sections: Vec<String>,
        message: String,
    },

    // ── Command errors ───────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tsw_api::Error> for CoreError {
    fn from(err: tsw_api::Error) -> Self {
        match err {
            tsw_api::Error::MissingCredentials => CoreError::MissingCredentials,
            tsw_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            tsw_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map(|u| u.origin().ascii_serialization())
                    .unwrap_or_else(|| "<unknown>".into()),
                reason: e.to_string(),
            },
            tsw_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            tsw_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            tsw_api::Error::Http { status, body } => CoreError::Api {
                message: body,
                status: Some(status),
            },
            tsw_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Deserialization error: {message}"),
                status: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CoreError;

    #[test]
    fn aggregate_message_lists_sections() {
        let err = CoreError::AggregateFetch {
            sections: vec!["/Device/Display".into(), "/Device/DeviceInfo".into()],
            message: "HTTP 500: boom".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to process requested API sections: [/Device/Display,/Device/DeviceInfo], \
             error reported: [HTTP 500: boom]"
        );
    }

    #[test]
    fn api_errors_map_to_core_variants() {
        assert!(matches!(
            CoreError::from(tsw_api::Error::MissingCredentials),
            CoreError::MissingCredentials
        ));
        assert!(matches!(
            CoreError::from(tsw_api::Error::Authentication {
                message: "nope".into()
            }),
            CoreError::AuthenticationFailed { .. }
        ));
        assert!(matches!(
            CoreError::from(tsw_api::Error::Http {
                status: 404,
                body: String::new()
            }),
            CoreError::Api {
                status: Some(404),
                ..
            }
        ));
    }
}
