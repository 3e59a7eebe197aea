// ── Runtime adapter configuration ──
//
// Describes *which* panel to talk to and *what* to collect. Carries the
// credential, but never touches disk: hosts build an `AdapterConfig` and
// hand it in.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CoreError;
use crate::groups::{GroupSelection, PropertyGroup};

/// Retrieval interval used for groups without an explicit one.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// URL scheme for reaching the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    #[default]
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(CoreError::Config {
                message: format!("unsupported scheme: {other}"),
            }),
        }
    }
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification. Panels ship self-signed certificates.
    #[default]
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for tsw_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Configuration for one panel.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Panel host name or address.
    pub host: String,
    /// Explicit port; the scheme default otherwise.
    pub port: Option<u16>,
    pub scheme: Scheme,
    pub login: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Enabled property groups.
    pub groups: GroupSelection,
    /// Per-group retrieval intervals. Stored and surfaced, not enforced.
    pub intervals: BTreeMap<PropertyGroup, Duration>,
    /// Request timeout.
    pub timeout: Duration,
}

impl AdapterConfig {
    pub fn new(host: impl Into<String>, login: impl Into<String>, password: SecretString) -> Self {
        Self {
            host: host.into(),
            port: None,
            scheme: Scheme::default(),
            login: login.into(),
            password,
            tls: TlsVerification::default(),
            groups: GroupSelection::default(),
            intervals: BTreeMap::new(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Apply a comma-separated group list; see [`GroupSelection::update`].
    #[must_use]
    pub fn with_groups(mut self, groups: &str) -> Self {
        self.groups.update(groups);
        self
    }

    /// `scheme://host[:port]`.
    pub fn base_url(&self) -> Result<Url, CoreError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(CoreError::Config {
                message: "panel host is empty".into(),
            });
        }

        let raw = match self.port {
            Some(port) => format!("{}://{host}:{port}", self.scheme),
            None => format!("{}://{host}", self.scheme),
        };
        Url::parse(&raw).map_err(|e| CoreError::Config {
            message: format!("invalid panel address {raw}: {e}"),
        })
    }

    /// Retrieval interval for `group`.
    pub fn interval_for(&self, group: PropertyGroup) -> Duration {
        self.intervals
            .get(&group)
            .copied()
            .unwrap_or(DEFAULT_INTERVAL)
    }

    /// Shortest interval among the enabled groups.
    pub fn shortest_interval(&self) -> Duration {
        self.groups
            .iter()
            .map(|g| self.interval_for(g))
            .min()
            .unwrap_or(DEFAULT_INTERVAL)
    }

    pub fn credentials(&self) -> tsw_api::Credentials {
        tsw_api::Credentials::new(self.login.clone(), self.password.clone())
    }

    pub fn transport(&self) -> tsw_api::TransportConfig {
        tsw_api::TransportConfig {
            tls: (&self.tls).into(),
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Duration;

    use secrecy::SecretString;

    use super::{AdapterConfig, DEFAULT_INTERVAL, Scheme};
    use crate::error::CoreError;
    use crate::groups::PropertyGroup;

    fn config(host: &str) -> AdapterConfig {
        AdapterConfig::new(host, "admin", SecretString::from("secret".to_owned()))
    }

    #[test]
    fn base_url_includes_optional_port() {
        assert_eq!(config("10.0.0.5").base_url().unwrap().as_str(), "https://10.0.0.5/");

        let mut cfg = config("panel.local");
        cfg.scheme = Scheme::Http;
        cfg.port = Some(8080);
        assert_eq!(cfg.base_url().unwrap().as_str(), "http://panel.local:8080/");
    }

    #[test]
    fn empty_host_is_rejected() {
        assert!(matches!(
            config("  ").base_url(),
            Err(CoreError::Config { .. })
        ));
    }

    #[test]
    fn intervals_default_to_thirty_seconds() {
        let mut cfg = config("panel").with_groups("General,Display");
        assert_eq!(cfg.interval_for(PropertyGroup::Network), DEFAULT_INTERVAL);

        cfg.intervals
            .insert(PropertyGroup::Display, Duration::from_secs(5));
        cfg.intervals
            .insert(PropertyGroup::Network, Duration::from_secs(1));
        // Network is not enabled, so it does not drive the tick.
        assert_eq!(cfg.shortest_interval(), Duration::from_secs(5));
    }

    #[test]
    fn scheme_parses_case_insensitively() {
        assert_eq!("HTTP".parse::<Scheme>().unwrap(), Scheme::Http);
        assert!("ftp".parse::<Scheme>().is_err());
    }
}
