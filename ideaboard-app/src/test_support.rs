use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

pub(crate) const FUTURE: i64 = 4_000_000_000;
pub(crate) const PAST: i64 = 1_000_000_000;

/// Unsigned compact token carrying the given claims.
pub(crate) fn token_for(sub: &str, username: &str, role: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = serde_json::json!({
        "sub": sub,
        "username": username,
        "role": role,
        "iat": 1_700_000_000_i64,
        "exp": exp,
    });
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, payload)
}
