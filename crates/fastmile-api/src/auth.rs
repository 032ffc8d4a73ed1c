use secrecy::SecretString;

/// The physical FastMile unit type being addressed.
///
/// The two units expose the same endpoints but different login protocols:
/// the outdoor unit (ODU) speaks the nonce/salt challenge-response flow,
/// the indoor unit (IDU) only accepts a browser-captured encrypted payload.
/// The kind is fixed at client construction and never re-evaluated
/// mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayKind {
    /// Outdoor unit (ODU) -- challenge-response login.
    Outdoor,
    /// Indoor unit (IDU) -- captured-payload login.
    Indoor,
}

impl GatewayKind {
    /// Infer the unit type from a gateway host address.
    ///
    /// The outdoor unit ships on `192.168.0.1`; anything else is treated as
    /// an indoor unit. Callers that know better can pass the kind explicitly.
    pub fn infer(host: &str) -> Self {
        if host == "192.168.0.1" {
            Self::Outdoor
        } else {
            Self::Indoor
        }
    }
}

/// Credential material for one login protocol variant.
///
/// A closed set: the client dispatches on this once per handshake rather
/// than branching on address strings mid-flow. Each variant carries exactly
/// the material its protocol needs.
#[derive(Debug, Clone)]
pub enum LoginMethod {
    /// Nonce/salt challenge-response (outdoor units). The plaintext password
    /// never leaves the process; only derived hashes go on the wire.
    ChallengeResponse {
        username: String,
        password: SecretString,
    },

    /// Replay of a browser-captured encrypted form body (indoor units).
    ///
    /// The payload is opaque to this client -- it is not derived, merely
    /// replayed -- and plausibly encodes a time-bounded server-side secret.
    /// An expired payload surfaces as a protocol or decode error; renewal
    /// means capturing a fresh login from a real browser session.
    CapturedPayload { form_body: String },
}

impl LoginMethod {
    /// Challenge-response credentials from a username/password pair.
    pub fn challenge_response(username: impl Into<String>, password: SecretString) -> Self {
        Self::ChallengeResponse {
            username: username.into(),
            password,
        }
    }

    /// Captured-payload credentials from a raw urlencoded form body.
    pub fn captured_payload(form_body: impl Into<String>) -> Self {
        Self::CapturedPayload {
            form_body: form_body.into(),
        }
    }
}
