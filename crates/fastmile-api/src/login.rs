// Login handshakes
//
// Both protocol variants, as inherent methods on `GatewayClient`. The
// challenge-response flow is strictly ordered -- each step consumes the
// decoded output of the previous one -- and nothing here retries: a failed
// step aborts the handshake and the caller moves on to the next candidate
// gateway address.
//
// Progress is reported as numbered `info!` events. That side channel is for
// observers (log renderers, spinners); it carries no correctness weight.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::auth::LoginMethod;
use crate::client::{GatewayClient, LOGIN_PATH};
use crate::crypto::{LoginDerivation, escape_base64url, hash_pair_url};
use crate::error::Error;
use crate::models::{AuthOutcome, NonceChallenge, SaltChallenge};

impl GatewayClient {
    /// Run the variant-appropriate login handshake.
    ///
    /// On success the session store holds the gateway-issued token and SID.
    /// On any failure -- transport, non-2xx status, undecodable body, or a
    /// non-zero result code -- the session stays unauthenticated and the
    /// classified error is returned without retrying.
    pub async fn login(&mut self) -> Result<(), Error> {
        // A fresh handshake always starts from a clean local session.
        self.session_mut().clear();

        match self.method().clone() {
            LoginMethod::ChallengeResponse { username, password } => {
                self.login_challenge_response(&username, &password).await
            }
            LoginMethod::CapturedPayload { form_body } => {
                self.login_captured_payload(&form_body).await
            }
        }
    }

    // ── Variant A: challenge-response ────────────────────────────────

    async fn login_challenge_response(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<(), Error> {
        info!(step = 1, "initializing session");
        self.init_session().await?;

        info!(step = 2, "clearing existing sessions");
        self.clear_remote_session().await;

        info!(step = 3, "fetching nonce");
        let resp = self
            .http()
            .get(self.url(LOGIN_PATH, Some("nonce")))
            .send()
            .await
            .map_err(Error::Transport)?;
        let challenge: NonceChallenge = decode_step(resp, "nonce").await?;
        debug!(iterations = challenge.iterations, "nonce received");

        info!(step = 4, "fetching salt");
        let userhash = hash_pair_url(username, &challenge.nonce);
        let resp = self
            .http()
            .post(self.url(LOGIN_PATH, Some("salt")))
            .form(&[
                ("userhash", userhash.as_str()),
                ("nonce", &escape_base64url(&challenge.nonce)),
            ])
            .send()
            .await
            .map_err(Error::Transport)?;
        let salt: SaltChallenge = decode_step(resp, "salt").await?;

        info!(step = 5, "deriving credentials");
        let derived =
            LoginDerivation::derive(username, password.expose_secret(), &challenge, &salt.salt);

        info!(step = 6, "submitting authentication");
        let resp = self
            .http()
            .post(self.url(LOGIN_PATH, None))
            .form(&[
                ("userhash", derived.userhash.as_str()),
                ("RandomKeyhash", &derived.random_key_hash),
                ("response", &derived.response),
                ("nonce", &escape_base64url(&challenge.nonce)),
                ("enckey", &escape_base64url(&derived.enc_key)),
                ("enciv", &escape_base64url(&derived.enc_iv)),
            ])
            .send()
            .await
            .map_err(Error::Transport)?;
        let outcome: AuthOutcome = decode_step(resp, "login").await?;

        self.finish_login(outcome)
    }

    // ── Variant B: captured-payload replay ───────────────────────────

    async fn login_captured_payload(&mut self, form_body: &str) -> Result<(), Error> {
        info!(step = 1, "initializing session");
        self.init_session().await?;

        info!(step = 2, "clearing existing sessions");
        self.clear_remote_session().await;

        info!(step = 3, "replaying captured payload");
        let resp = self
            .http()
            .post(self.url(LOGIN_PATH, None))
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(form_body.to_owned())
            .send()
            .await
            .map_err(Error::Transport)?;
        let outcome: AuthOutcome = decode_step(resp, "login").await?;

        self.finish_login(outcome)
    }

    // ── Terminal state ───────────────────────────────────────────────

    /// Interpret the login outcome. Identical for both variants.
    fn finish_login(&mut self, outcome: AuthOutcome) -> Result<(), Error> {
        if outcome.result != 0 {
            return Err(Error::Protocol {
                message: format!("gateway rejected login (result code {})", outcome.result),
                code: Some(outcome.result),
            });
        }

        self.session_mut().establish(outcome.token, outcome.sid);
        debug!("login successful");
        Ok(())
    }
}

/// Check the step's HTTP status, then decode its JSON body.
///
/// Non-2xx aborts with a transport-class error; an undecodable body is a
/// protocol error with a bounded preview of what came back.
async fn decode_step<T: DeserializeOwned>(
    resp: reqwest::Response,
    phase: &'static str,
) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Http { status, phase });
    }

    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Protocol {
            message: format!("invalid {phase} response: {e} (body: {preview})"),
            code: None,
        }
    })
}
