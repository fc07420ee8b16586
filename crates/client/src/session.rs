//! Authentication session and request signing.
//!
//! The session is an explicit handle passed to the client constructor. Clones
//! share the same token, so clearing it after a 401 is visible to every
//! holder.

use std::sync::{Arc, RwLock};

use reqwest::RequestBuilder;

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// An unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Store a token; blank input clears the session instead.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        let token = token.trim();
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        };
    }

    pub fn clear(&self) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Attach the session's bearer token, if any, to an outgoing request.
pub fn sign_request(request: RequestBuilder, session: &Session) -> RequestBuilder {
    match session.token() {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}
