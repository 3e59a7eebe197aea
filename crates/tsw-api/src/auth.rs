// Panel authentication
//
// Two-step cookie handshake. `GET /userlogin.html` issues a tracking cookie;
// after clearing any stale server session via `GET /logout`, the credential
// form is POSTed with that cookie and yields the session cookie plus the
// anti-forgery token. Each step is skipped once its artifact is held.

use reqwest::header::{COOKIE, ORIGIN, REFERER};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::client::{PanelClient, check_status, set_cookies};
use crate::endpoint::{CSRF_RESPONSE_HEADER, LOGIN, LOGOUT};
use crate::error::Error;
use crate::session::Session;

/// Login credentials for the panel's web interface.
#[derive(Debug, Clone)]
pub struct Credentials {
    login: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: SecretString) -> Self {
        Self {
            login: login.into(),
            password,
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// `true` if either the login or the password is blank.
    pub fn is_blank(&self) -> bool {
        self.login.trim().is_empty() || self.password.expose_secret().trim().is_empty()
    }
}

impl PanelClient {
    /// Make sure `session` holds a tracking id and a session cookie.
    ///
    /// Performs only the steps whose artifacts are missing, so calling this
    /// on an established session does no I/O. Blank credentials fail with
    /// [`Error::MissingCredentials`] before any request is made.
    pub async fn authenticate(
        &self,
        session: &mut Session,
        credentials: &Credentials,
    ) -> Result<(), Error> {
        if credentials.is_blank() {
            return Err(Error::MissingCredentials);
        }

        if session.tracking_id().is_none() {
            self.fetch_tracking_id(session).await?;
        }

        if !session.is_authenticated() {
            self.logout().await;
            self.login(session, credentials).await?;
        }

        Ok(())
    }

    /// Step 1: the unauthenticated login page hands out a tracking cookie.
    async fn fetch_tracking_id(&self, session: &mut Session) -> Result<(), Error> {
        let url = self.url(LOGIN)?;
        debug!("fetching tracking cookie at {url}");

        let resp = self.http().get(url).send().await.map_err(Error::Transport)?;
        let resp = check_status(resp).await?;

        match set_cookies(resp.headers()).into_iter().next() {
            Some(tracking_id) => session.set_tracking_id(tracking_id),
            None => warn!("login page did not set a tracking cookie"),
        }
        Ok(())
    }

    /// Best-effort: drop any session the panel still holds for us.
    async fn logout(&self) {
        let url = match self.url(LOGOUT) {
            Ok(url) => url,
            Err(e) => {
                debug!(error = %e, "skipping logout");
                return;
            }
        };
        debug!("logging out at {url}");

        if let Err(e) = self.http().get(url).send().await {
            debug!(error = %e, "logout request failed, continuing with login");
        }
    }

    /// Step 2: submit the credential form.
    async fn login(&self, session: &mut Session, credentials: &Credentials) -> Result<(), Error> {
        let url = self.url(LOGIN)?;
        debug!("logging in at {url}");

        let form = [
            ("login", credentials.login()),
            ("passwd", credentials.password().expose_secret()),
        ];
        let mut builder = self
            .http()
            .post(url)
            .form(&form)
            .header(ORIGIN, session.origin())
            .header(REFERER, session.login_referer());
        if let Some(tracking_id) = session.tracking_id() {
            builder = builder.header(COOKIE, tracking_id);
        }

        let resp = builder.send().await.map_err(Error::Transport)?;
        let resp = check_status(resp).await?;

        let cookies = set_cookies(resp.headers());
        if cookies.is_empty() {
            return Err(Error::Authentication {
                message: "login response carried no session cookie".into(),
            });
        }

        let csrf_token = resp
            .headers()
            .get(CSRF_RESPONSE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| {
                warn!("login response carried no {CSRF_RESPONSE_HEADER} header");
                String::new()
            });

        session.establish(cookies.join(","), csrf_token);
        debug!("login successful");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::Credentials;

    #[test]
    fn blank_login_or_password_is_detected() {
        assert!(Credentials::new("", SecretString::from("pw".to_owned())).is_blank());
        assert!(Credentials::new("admin", SecretString::from("  ".to_owned())).is_blank());
        assert!(!Credentials::new("admin", SecretString::from("pw".to_owned())).is_blank());
    }
}
