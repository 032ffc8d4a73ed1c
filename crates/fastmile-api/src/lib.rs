// fastmile-api: Async Rust client for the Nokia FastMile 5G gateway
//
// Covers the login handshakes (challenge-response for outdoor units,
// captured-payload replay for indoor units), session lifecycle, and the
// tolerant device-status decoder. Presentation, address discovery, and
// retry policy belong to callers.

pub mod auth;
pub mod client;
pub mod crypto;
pub mod error;
pub mod models;
pub mod repair;
pub mod session;
pub mod transport;

mod login;

pub use auth::{GatewayKind, LoginMethod};
pub use client::GatewayClient;
pub use error::Error;
pub use models::{AuthOutcome, DeviceStatus, NonceChallenge, SaltChallenge};
pub use session::Session;
pub use transport::TransportConfig;
