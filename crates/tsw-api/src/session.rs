// Session store
//
// Holds the authentication artifacts for one panel connection. No I/O lives
// here; the authenticator in `auth.rs` is the only writer.

use tracing::debug;
use url::Url;

use crate::endpoint::LOGIN;

/// Authentication artifacts for a single panel connection.
///
/// `session_cookie` and `csrf_token` are always set and cleared together.
/// The tracking id is obtained independently by the first login step.
#[derive(Debug, Clone)]
pub struct Session {
    tracking_id: Option<String>,
    session_cookie: Option<String>,
    csrf_token: Option<String>,
    origin: String,
    login_referer: String,
}

impl Session {
    /// Create an empty session for the panel at `base_url`.
    pub fn new(base_url: &Url) -> Self {
        let origin = base_url.origin().ascii_serialization();
        let login_referer = format!("{origin}{LOGIN}");
        Self {
            tracking_id: None,
            session_cookie: None,
            csrf_token: None,
            origin,
            login_referer,
        }
    }

    /// Tracking cookie issued by the unauthenticated login page.
    pub fn tracking_id(&self) -> Option<&str> {
        self.tracking_id.as_deref()
    }

    /// Session cookie replayed on every authenticated request.
    pub fn session_cookie(&self) -> Option<&str> {
        self.session_cookie.as_deref()
    }

    /// Anti-forgery token echoed back on POST requests.
    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// Value of the `Origin` header sent with the credential POST.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Value of the `Referer` header sent with the credential POST.
    pub fn login_referer(&self) -> &str {
        &self.login_referer
    }

    /// `true` once the credential POST has yielded a session cookie.
    pub fn is_authenticated(&self) -> bool {
        self.session_cookie.is_some()
    }

    pub(crate) fn set_tracking_id(&mut self, tracking_id: String) {
        self.tracking_id = Some(tracking_id);
    }

    pub(crate) fn establish(&mut self, cookie: String, csrf_token: String) {
        self.session_cookie = Some(cookie);
        self.csrf_token = Some(csrf_token);
    }

    /// Drop the session cookie and token after the panel rejected them.
    /// The tracking id is kept, so re-authentication only repeats the
    /// credential POST.
    pub fn invalidate(&mut self) {
        debug!("invalidating panel session cookie");
        self.session_cookie = None;
        self.csrf_token = None;
    }

    /// Forget every artifact so the next authentication performs the full
    /// two-step handshake again.
    pub fn clear(&mut self) {
        debug!("clearing panel session");
        self.tracking_id = None;
        self.session_cookie = None;
        self.csrf_token = None;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::Session;
    use url::Url;

    #[test]
    fn origin_and_referer_come_from_the_base_url() {
        let session = Session::new(&Url::parse("https://10.0.0.5:443").unwrap());
        assert_eq!(session.origin(), "https://10.0.0.5");
        assert_eq!(session.login_referer(), "https://10.0.0.5/userlogin.html");

        let session = Session::new(&Url::parse("http://panel.local:8080/").unwrap());
        assert_eq!(session.origin(), "http://panel.local:8080");
    }

    #[test]
    fn cookie_and_token_are_cleared_together() {
        let mut session = Session::new(&Url::parse("https://panel").unwrap());
        session.set_tracking_id("TRACKID=1".into());
        session.establish("AuthByPasswd=x".into(), "tok".into());
        assert!(session.is_authenticated());
        assert_eq!(session.csrf_token(), Some("tok"));

        session.invalidate();
        assert!(!session.is_authenticated());
        assert!(session.csrf_token().is_none());
        assert_eq!(session.tracking_id(), Some("TRACKID=1"));

        session.establish("AuthByPasswd=y".into(), "tok2".into());
        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.tracking_id().is_none());
        assert!(session.csrf_token().is_none());
    }
}
