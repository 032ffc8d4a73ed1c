// Gateway HTTP client
//
// Wraps `reqwest::Client` with FastMile-specific URL construction, session
// state, and the telemetry fetch. The login handshakes live in `login.rs`
// as inherent methods to keep this module focused on transport mechanics.

use tracing::{debug, warn};
use url::Url;

use crate::auth::{GatewayKind, LoginMethod};
use crate::error::Error;
use crate::models::DeviceStatus;
use crate::repair;
use crate::session::Session;
use crate::transport::TransportConfig;

/// Login-control endpoint. Query selects the mode: `?out` clears the
/// server-side session, `?nonce` and `?salt` fetch challenges, and no query
/// submits credentials.
pub(crate) const LOGIN_PATH: &str = "/login_web_app.cgi";
const STATUS_PATH: &str = "/device_status_web_app.cgi";

/// Client for one FastMile gateway.
///
/// Owns the cookie jar and the [`Session`] exclusively; `login` and `logout`
/// take `&mut self`, so two handshakes can never race on the same instance.
/// Independent clients (e.g. one per candidate address) share nothing and
/// may run concurrently.
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
    kind: GatewayKind,
    method: LoginMethod,
    session: Session,
}

impl GatewayClient {
    /// Create a client bound to one gateway origin.
    ///
    /// `base_url` should be the gateway root (e.g. `https://192.168.0.1:443`).
    /// The kind/method pair selects the login protocol variant once; it is
    /// never re-evaluated mid-session.
    pub fn new(
        base_url: Url,
        kind: GatewayKind,
        method: LoginMethod,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(&base_url)?;
        Ok(Self {
            http,
            base_url,
            kind,
            method,
            session: Session::default(),
        })
    }

    /// Convenience constructor: HTTPS on port 443 with the unit type
    /// inferred from the host address.
    pub fn for_host(
        host: &str,
        method: LoginMethod,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("https://{host}:443"))?;
        Self::new(base_url, GatewayKind::infer(host), method, transport)
    }

    /// The gateway base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The unit type this client was constructed for.
    pub fn kind(&self) -> GatewayKind {
        self.kind
    }

    /// Read-only view of the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn method(&self) -> &LoginMethod {
        &self.method
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}{path}?{query}`.
    pub(crate) fn url(&self, path: &str, query: Option<&str>) -> Url {
        let mut url = self.base_url.join(path).expect("invalid endpoint URL");
        url.set_query(query);
        url
    }

    // ── Session plumbing ─────────────────────────────────────────────

    /// GET the root path to establish a cookie-bearing session.
    pub(crate) async fn init_session(&self) -> Result<(), Error> {
        let url = self.url("/", None);
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status,
                phase: "session init",
            });
        }
        Ok(())
    }

    /// Ask the gateway to drop any server-side session.
    ///
    /// Best-effort: a failure here is logged and never aborts the caller.
    pub(crate) async fn clear_remote_session(&self) {
        let url = self.url(LOGIN_PATH, Some("out"));
        debug!("GET {}", url);

        match self.http.get(url).send().await {
            Ok(resp) if !resp.status().is_success() => {
                warn!(status = %resp.status(), "session clear rejected, continuing");
            }
            Err(e) => warn!(error = %e, "session clear failed, continuing"),
            Ok(_) => {}
        }
    }

    // ── Telemetry ────────────────────────────────────────────────────

    /// Fetch the device telemetry snapshot.
    ///
    /// Requires an authenticated session; without one this fails immediately
    /// with [`Error::NotAuthenticated`] and issues no network request. The
    /// body gets the strict-then-repair treatment from [`crate::repair`]
    /// because some firmware versions emit stray commas.
    pub async fn device_status(&self) -> Result<DeviceStatus, Error> {
        if !self.session.is_authenticated() {
            return Err(Error::NotAuthenticated);
        }

        let url = self.url(STATUS_PATH, Some("getroot"));
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status,
                phase: "device status",
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        repair::decode_tolerant(&body)
    }

    // ── Teardown ─────────────────────────────────────────────────────

    /// End the session. Idempotent: a never-authenticated client returns
    /// success without touching the network.
    ///
    /// Local session state is cleared unconditionally -- even when the
    /// logout call itself fails -- because the client-side session is being
    /// abandoned regardless. The network failure is demoted to a `warn!`.
    pub async fn logout(&mut self) -> Result<(), Error> {
        if !self.session.is_authenticated() {
            return Ok(());
        }

        let url = self.url(LOGIN_PATH, Some("out"));
        debug!("GET {}", url);

        if let Err(e) = self.http.get(url).send().await {
            warn!(error = %e, "logout call failed, clearing local session anyway");
        }

        self.session.clear();
        Ok(())
    }
}
