// Credential derivation for the challenge-response login
//
// Pure functions only: no I/O, no state. The gateway's web UI implements
// this chain in CryptoJS; interoperating means reproducing it exactly,
// including two easy-to-miss details called out inline -- the lowercasing
// before the login hash and the *single* conditional hash round gated on
// `iterations`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::models::NonceChallenge;

/// Re-map standard base64 output to the gateway's URL-safe alphabet.
///
/// Not base64url: padding is re-mapped (`=` -> `.`) instead of stripped,
/// and `/` -> `_`, `+` -> `-`. The three character sets are disjoint, so
/// replacement order does not matter.
pub fn escape_base64url(b64: &str) -> String {
    b64.replace('=', ".").replace('/', "_").replace('+', "-")
}

/// SHA-256 of `a + ":" + b`, encoded as standard base64.
pub fn hash_pair(a: &str, b: &str) -> String {
    let digest = Sha256::digest(format!("{a}:{b}").as_bytes());
    BASE64.encode(digest)
}

/// [`hash_pair`] with the result escaped for URL transport.
pub fn hash_pair_url(a: &str, b: &str) -> String {
    escape_base64url(&hash_pair(a, b))
}

/// SHA-256 of `s`, rendered as lowercase hex.
pub fn hash_hex(s: &str) -> String {
    hex::encode(Sha256::digest(s.as_bytes()))
}

/// `4 * num_words` cryptographically random bytes, base64-encoded.
///
/// Mirrors CryptoJS word-array sizing: one "word" is 32 bits.
pub fn random_token(num_words: usize) -> String {
    let mut bytes = vec![0u8; num_words * 4];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    BASE64.encode(bytes)
}

/// Everything the login form needs, derived from one challenge.
///
/// `enc_key` and `enc_iv` are fresh per attempt; the protocol requires them
/// on the wire but this client never uses them afterwards.
#[derive(Debug, Clone)]
pub struct LoginDerivation {
    pub userhash: String,
    pub response: String,
    pub random_key_hash: String,
    pub enc_key: String,
    pub enc_iv: String,
}

impl LoginDerivation {
    /// Run the full derivation chain for one handshake attempt.
    ///
    /// The plaintext password feeds only into local hashing; nothing
    /// recoverable goes on the wire.
    pub fn derive(
        username: &str,
        password: &str,
        challenge: &NonceChallenge,
        salt: &str,
    ) -> Self {
        let userhash = hash_pair_url(username, &challenge.nonce);

        // The firmware supports exactly zero or one extra round despite the
        // field being named `iterations`.
        let mut salted_password = format!("{salt}{password}");
        if challenge.iterations >= 1 {
            salted_password = hash_hex(&salted_password);
        }

        // The web UI lowercases the salted password, not the username.
        let login_hash = hash_pair(username, &salted_password.to_lowercase());
        let response = hash_pair_url(&login_hash, &challenge.nonce);
        let random_key_hash = hash_pair_url(&challenge.random_key, &challenge.nonce);

        Self {
            userhash,
            response,
            random_key_hash,
            enc_key: random_token(4),
            enc_iv: random_token(4),
        }
    }
}
