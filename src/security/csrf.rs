//! Stateless CSRF token signing and verification.
//!
//! Token wire format: `payload.signature` where `payload` is a 64-character
//! hex nonce immediately followed by the issuance time in epoch milliseconds
//! (decimal, no delimiter), and `signature` is the hex HMAC-SHA256 of the
//! payload. The consumer treats the whole string as opaque.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Random bytes per token nonce.
pub const NONCE_LEN: usize = 32;

/// Hex-encoded nonce length; the timestamp starts at this payload offset.
pub const NONCE_HEX_LEN: usize = NONCE_LEN * 2;

/// Token validity window in milliseconds (1 hour).
pub const TOKEN_TTL_MS: i64 = 3_600_000;

/// Shortest payload we accept: full nonce plus at least one timestamp digit.
const MIN_PAYLOAD_LEN: usize = NONCE_HEX_LEN + 1;

/// Issues and verifies anti-forgery tokens for state-changing requests.
///
/// Verification is stateless and independent per call; there is no
/// persistence and no revocation, tokens simply age out.
pub struct CsrfSigner {
    secret: Vec<u8>,
    ttl_ms: i64,
}

impl CsrfSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl_ms: TOKEN_TTL_MS,
        }
    }

    /// Override the validity window (primarily for short-lived test tokens).
    pub fn with_ttl(secret: &str, ttl_ms: i64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl_ms,
        }
    }

    /// Issue a fresh token bound to the current time.
    pub fn issue(&self) -> String {
        self.issue_at(chrono::Utc::now().timestamp_millis())
    }

    /// Validity window in milliseconds, as advertised to API clients.
    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Verify a token of unknown origin.
    ///
    /// Fails closed: every malformed input path returns `false`. Callers get
    /// no indication of *why* a token was rejected, so a forger cannot use
    /// the verifier as an oracle.
    pub fn verify(&self, token: &str) -> bool {
        self.verify_at(token, chrono::Utc::now().timestamp_millis())
    }

    fn issue_at(&self, now_ms: i64) -> String {
        use rand::Rng;
        let nonce: [u8; NONCE_LEN] = rand::thread_rng().gen();

        let payload = format!("{}{}", hex::encode(nonce), now_ms);
        let signature = hex::encode(self.mac_bytes(payload.as_bytes()));
        format!("{payload}.{signature}")
    }

    fn verify_at(&self, token: &str, now_ms: i64) -> bool {
        // The wire format is ASCII; this also makes the fixed-offset slice
        // below safe for arbitrary input.
        if !token.is_ascii() {
            return false;
        }

        // Signature follows the last '.' so a '.' can never hide in the
        // payload unnoticed.
        let Some((payload, signature_hex)) = token.rsplit_once('.') else {
            return false;
        };
        if payload.len() < MIN_PAYLOAD_LEN || signature_hex.is_empty() {
            return false;
        }

        let Ok(timestamp_ms) = payload[NONCE_HEX_LEN..].parse::<i64>() else {
            return false;
        };
        // A token aged exactly ttl_ms is still valid. Saturating: an extreme
        // negative timestamp must read as ancient, not wrap around.
        if now_ms.saturating_sub(timestamp_ms) > self.ttl_ms {
            return false;
        }

        let Ok(signature) = hex::decode(signature_hex) else {
            return false;
        };

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        // Constant-time comparison
        mac.verify_slice(&signature).is_ok()
    }

    fn mac_bytes(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}
