use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use serde_json::Value;
use sha2::Sha256;
use subtle::ConstantTimeEq;

pub const ADMIN_COOKIE_NAME: &str = "tcat_admin";
pub const SESSION_MAX_AGE_SECONDS: i64 = 60 * 60 * 8;

type HmacSha256 = Hmac<Sha256>;

#[derive(Serialize)]
struct SessionClaims {
    u: String,
    exp: i64,
}

/// Issues and validates the signed admin session cookie. The token is
/// `base64url(JSON{u, exp}) + "." + base64url(HMAC-SHA256(payload))`,
/// with `exp` in epoch milliseconds.
#[derive(Clone)]
pub struct SessionSigner {
    secret: String,
    production: bool,
}

impl SessionSigner {
    pub fn new(secret: String, production: bool) -> Self {
        Self { secret, production }
    }

    fn sign(&self, payload: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    pub fn create_token(&self, username: &str) -> String {
        let claims = SessionClaims {
            u: username.to_string(),
            exp: Utc::now().timestamp_millis() + SESSION_MAX_AGE_SECONDS * 1000,
        };
        let payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).expect("claims serialize"));
        let signature = URL_SAFE_NO_PAD.encode(self.sign(&payload));
        format!("{payload}.{signature}")
    }

    /// Cookie-assignment string carrying a fresh 8h session token.
    pub fn issue(&self, username: &str) -> String {
        let secure = if self.production { "; Secure" } else { "" };
        format!(
            "{ADMIN_COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={SESSION_MAX_AGE_SECONDS}{secure}",
            self.create_token(username)
        )
    }

    /// Cookie-assignment string that clears the session.
    pub fn revoke(&self) -> String {
        let secure = if self.production { "; Secure" } else { "" };
        format!("{ADMIN_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0{secure}")
    }

    /// Fails closed: missing parts, a signature mismatch, an undecodable
    /// payload, a non-numeric `exp`, or an `exp` at or before now all
    /// return false. The signature comparison is constant-time.
    pub fn validate(&self, token: &str) -> bool {
        let Some((payload, signature)) = token.split_once('.') else {
            return false;
        };
        if payload.is_empty() || signature.is_empty() {
            return false;
        }

        let Ok(given) = URL_SAFE_NO_PAD.decode(signature) else {
            return false;
        };
        let expected = self.sign(payload);
        if !bool::from(expected.as_slice().ct_eq(given.as_slice())) {
            return false;
        }

        let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload) else {
            return false;
        };
        let Ok(decoded) = serde_json::from_slice::<Value>(&bytes) else {
            return false;
        };
        let Some(exp) = decoded.get("exp").and_then(Value::as_i64) else {
            return false;
        };
        exp > Utc::now().timestamp_millis()
    }
}
