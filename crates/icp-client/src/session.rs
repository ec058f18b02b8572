//! Session data structure

use std::fmt;

/// Authentication state of one client: the base endpoint plus at most
/// one bearer token.
pub struct Session {
    /// Base endpoint, without trailing slash
    base_url: String,
    /// Bearer token issued by `login`
    token: Option<String>,
}

impl Session {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            base_url,
            token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Store the token returned by a successful login
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Forget the token; returns whether one was held
    pub fn clear_token(&mut self) -> bool {
        self.token.take().is_some()
    }

    /// Absolute URL for an API path such as `/auth/login`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
