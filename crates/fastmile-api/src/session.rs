// Session store
//
// The token/session-id/authenticated triple owned by one client instance.
// Only two writers exist by construction: a successful login handshake
// (which sets all three) and logout (which clears all three). Everything
// else gets read-only access.

/// An authenticated gateway session.
///
/// Invariant: `authenticated == true` implies `token` and `session_id` hold
/// the values from the most recent successful handshake; `false` implies
/// both are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: String,
    session_id: String,
    authenticated: bool,
}

impl Session {
    /// The gateway-issued session token, or `""` when not authenticated.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The gateway-issued session id (SID), or `""` when not authenticated.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Whether a login handshake has succeeded and not been torn down.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Populate the session from a successful login outcome.
    pub(crate) fn establish(&mut self, token: String, session_id: String) {
        self.token = token;
        self.session_id = session_id;
        self.authenticated = true;
    }

    /// Reset to the unauthenticated state. Idempotent.
    pub(crate) fn clear(&mut self) {
        self.token.clear();
        self.session_id.clear();
        self.authenticated = false;
    }
}
