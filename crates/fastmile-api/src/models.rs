// Gateway wire types
//
// JSON shapes emitted by the login-control and device-status endpoints.
// Fields use `#[serde(default)]` liberally because the firmware is
// inconsistent about field presence across versions, and `DeviceStatus`
// keeps a flattened catch-all for everything we do not model.

use serde::{Deserialize, Serialize};

// ── Login challenges ─────────────────────────────────────────────────

/// Server-issued challenge from `login_web_app.cgi?nonce`.
///
/// Transient: produced on request, consumed once per handshake attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct NonceChallenge {
    pub nonce: String,
    #[serde(rename = "randomKey", default)]
    pub random_key: String,
    /// Gate for the extra password-hash round. The firmware honors only
    /// zero-vs-nonzero, never a literal count.
    #[serde(default)]
    pub iterations: u32,
    #[serde(rename = "pubkey", default)]
    pub public_key: String,
}

/// Per-account salt from `login_web_app.cgi?salt`.
///
/// `alati` is the firmware's field name for the salt.
#[derive(Debug, Clone, Deserialize)]
pub struct SaltChallenge {
    #[serde(rename = "alati")]
    pub salt: String,
}

/// Terminal login outcome. `result == 0` is success; any other value is an
/// opaque gateway-defined failure code surfaced verbatim to the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthOutcome {
    pub result: i64,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub sid: String,
}

// ── Device status ────────────────────────────────────────────────────

/// Telemetry snapshot from `device_status_web_app.cgi?getroot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceStatus {
    #[serde(rename = "ModelName", default)]
    pub model_name: String,
    #[serde(rename = "SerialNumber", default)]
    pub serial_number: String,
    #[serde(rename = "SoftwareVersion", default)]
    pub software_version: String,
    /// Seconds since boot.
    #[serde(rename = "UpTime", default)]
    pub uptime: u64,
    #[serde(rename = "cpu_usageinfo", default)]
    pub cpu: CpuUsageInfo,
    #[serde(rename = "mem_info", default)]
    pub memory: MemInfo,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CpuUsageInfo {
    #[serde(rename = "CPUUsage", default)]
    pub cpu_usage: u32,
}

/// Memory figures in kilobytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemInfo {
    #[serde(rename = "Total", default)]
    pub total: u64,
    #[serde(rename = "Free", default)]
    pub free: u64,
}

impl MemInfo {
    /// Kilobytes in use.
    pub fn used_kb(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }

    /// Used memory as a percentage of total, or 0 when total is unknown.
    #[allow(clippy::cast_precision_loss)]
    pub fn used_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used_kb() as f64 / self.total as f64 * 100.0
    }
}
