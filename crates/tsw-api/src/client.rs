// Panel HTTP client
//
// Wraps `reqwest::Client` with panel URL construction, session header
// replay, status mapping, and JSON sub-tree extraction. The login handshake
// lives in `auth.rs` as inherent methods on the same type.

use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::endpoint::{CSRF_REQUEST_HEADER, ResponseShape};
use crate::error::Error;
use crate::session::Session;
use crate::transport::TransportConfig;

/// Longest body excerpt carried in error messages.
const BODY_PREVIEW: usize = 200;

/// Raw HTTP client for a single panel's device API.
///
/// Stateless with respect to authentication: every call takes the
/// [`Session`] whose cookie and token it replays. No cookie jar is used.
#[derive(Debug, Clone)]
pub struct PanelClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PanelClient {
    /// Create a client for the panel at `base_url` (e.g. `https://10.0.0.5`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The panel base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an absolute API path against the base URL.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// `GET path` with the session cookie, returning the parsed JSON body.
    pub async fn get_json(
        &self,
        session: &Session,
        path: &str,
    ) -> Result<serde_json::Value, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let mut builder = self.http.get(url);
        if let Some(cookie) = session.session_cookie() {
            builder = builder.header(COOKIE, cookie);
        }
        let resp = builder.send().await.map_err(Error::Transport)?;
        let resp = check_status(resp).await?;

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })
    }

    /// Fetch the payload described by `shape`.
    ///
    /// A missing or `null` node yields `Ok(None)`: the panel simply has no
    /// data for that section. A node of the wrong shape is a
    /// [`Error::Deserialization`].
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        session: &Session,
        shape: ResponseShape,
    ) -> Result<Option<T>, Error> {
        let root = self.get_json(session, shape.endpoint()).await?;
        extract(&root, shape)
    }

    /// `POST path` with a JSON body, the session cookie and the CSRF token.
    ///
    /// The response body is discarded on success.
    pub async fn post_json(
        &self,
        session: &Session,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let mut builder = self.http.post(url).json(body);
        if let Some(cookie) = session.session_cookie() {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(token) = session.csrf_token() {
            builder = builder.header(CSRF_REQUEST_HEADER, token);
        }
        let resp = builder.send().await.map_err(Error::Transport)?;
        check_status(resp).await?;
        Ok(())
    }
}

/// Navigate to `shape`'s pointer and deserialize the node found there.
pub(crate) fn extract<T: DeserializeOwned>(
    root: &serde_json::Value,
    shape: ResponseShape,
) -> Result<Option<T>, Error> {
    let node = match root.pointer(shape.pointer()) {
        None | Some(serde_json::Value::Null) => {
            warn!(
                endpoint = shape.endpoint(),
                "no {} payload in response",
                shape.type_name()
            );
            return Ok(None);
        }
        Some(node) => node,
    };

    if shape.is_collection() && !node.is_array() {
        return Err(Error::Deserialization {
            message: format!("expected an array of {}", shape.type_name()),
            body: node.to_string(),
        });
    }

    trace!(endpoint = shape.endpoint(), "decoding {}", shape.type_name());
    serde_json::from_value(node.clone())
        .map(Some)
        .map_err(|e| Error::Deserialization {
            message: format!("{}: {e}", shape.type_name()),
            body: node.to_string(),
        })
}

/// Map 401/403 to [`Error::Authentication`] and any other non-success status
/// to [`Error::Http`].
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::Authentication { message: body });
    }
    Err(Error::Http {
        status: status.as_u16(),
        body: preview(&body).to_owned(),
    })
}

/// All `Set-Cookie` values of a response, in header order.
pub(crate) fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(String::from)
        .collect()
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(BODY_PREVIEW) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::{extract, preview};
    use crate::endpoint::ResponseShape;
    use crate::error::Error;
    use crate::models::{DeviceInfo, SystemVersion};

    #[test]
    fn extract_reads_the_pointed_sub_tree() {
        let root = json!({ "Device": { "DeviceInfo": { "Name": "Lobby", "ModelId": "0x7A90" } } });
        let info: DeviceInfo = extract(&root, ResponseShape::DeviceInfo).unwrap().unwrap();
        assert_eq!(info.name.as_deref(), Some("Lobby"));
    }

    #[test]
    fn extract_treats_missing_and_null_as_absent() {
        let missing = json!({ "Device": {} });
        let null = json!({ "Device": { "DeviceInfo": null } });
        assert!(
            extract::<DeviceInfo>(&missing, ResponseShape::DeviceInfo)
                .unwrap()
                .is_none()
        );
        assert!(
            extract::<DeviceInfo>(&null, ResponseShape::DeviceInfo)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn extract_rejects_object_where_array_expected() {
        let root = json!({ "Device": { "SystemVersions": { "Components": { "Name": "x" } } } });
        let result = extract::<Vec<SystemVersion>>(&root, ResponseShape::SystemVersions);
        assert!(matches!(result, Err(Error::Deserialization { .. })));
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "é".repeat(300);
        assert_eq!(preview(&long).chars().count(), 200);
        assert_eq!(preview("short"), "short");
    }
}
