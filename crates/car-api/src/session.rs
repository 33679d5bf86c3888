//! # Session Tokens
//!
//! HS256 tokens carried in the `token` cookie. Nothing is stored
//! server-side: a token is valid while its signature checks out and `exp`
//! has not passed. Logout only clears the client's cookie.

use axum::http::{header, HeaderMap};
use car_core::{BookingError, BookingResult};
use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cookie holding the session token
pub const SESSION_COOKIE: &str = "token";

/// Token lifetime
pub const SESSION_TTL_SECS: i64 = 60 * 60;

/// Registered claims the server sets or validates; never taken from the client
const RESERVED_CLAIMS: [&str; 6] = ["iat", "exp", "nbf", "aud", "iss", "sub"];

/// Claims embedded in a session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier checked against checkout ownership.
    /// Empty when the login payload carried none; such a session owns nothing.
    #[serde(default)]
    pub uid: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Anything else the client sent at login (email, display name)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Build claims from any login payload.
    ///
    /// A string or numeric `uid` becomes the identity. Object fields other
    /// than the registered claims ride along; non-object payloads carry none.
    pub fn from_login(payload: Value, ttl: Duration) -> Self {
        let mut extra = match payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let uid = match extra.remove("uid") {
            Some(Value::String(uid)) => uid,
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        for claim in RESERVED_CLAIMS {
            extra.remove(claim);
        }

        let now = Utc::now();
        Self {
            uid,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            extra,
        }
    }
}

/// Signing and verification keys derived from the configured secret
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl: Duration::seconds(SESSION_TTL_SECS),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Turn a login payload into a signed token
    pub fn issue(&self, payload: Value) -> BookingResult<(String, Claims)> {
        let claims = Claims::from_login(payload, self.ttl);
        let token = self.sign(&claims)?;
        Ok((token, claims))
    }

    pub fn sign(&self, claims: &Claims) -> BookingResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| BookingError::Token(e.to_string()))
    }

    /// Check signature and expiry
    pub fn verify(&self, token: &str) -> BookingResult<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| BookingError::Unauthorized(format!("invalid session token: {e}")))
    }
}

/// Session cookie carrying a fresh token
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_owned()))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age_secs))
        .secure(secure)
        .build()
}

/// Cookie that makes the client drop the token
pub fn cleared_cookie(secure: bool) -> Cookie<'static> {
    session_cookie("", 0, secure)
}

/// Value of the named cookie, if present and non-empty
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value_trimmed().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn keys() -> SessionKeys {
        SessionKeys::new(b"test-secret")
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = keys();
        let (token, issued) = keys
            .issue(json!({"uid": "u1", "email": "driver@example.com"}))
            .unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims, issued);
        assert_eq!(claims.uid, "u1");
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);
        assert_eq!(claims.extra.get("email"), Some(&json!("driver@example.com")));
    }

    #[test]
    fn test_any_payload_is_signed() {
        let keys = keys();
        for payload in [json!({"email": "a@b.c"}), json!({"uid": ""}), json!("u1"), json!(null)] {
            let (token, _) = keys.issue(payload).unwrap();
            assert_eq!(keys.verify(&token).unwrap().uid, "");
        }

        let (token, _) = keys.issue(json!({"uid": 42})).unwrap();
        assert_eq!(keys.verify(&token).unwrap().uid, "42");
    }

    #[test]
    fn test_registered_claims_from_client_are_dropped() {
        let keys = keys();
        let (token, issued) = keys
            .issue(json!({
                "uid": "u1",
                "aud": "car-doctor",
                "iss": "someone-else",
                "sub": "u2",
                "nbf": 9_999_999_999_i64,
                "email": "driver@example.com"
            }))
            .unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.uid, "u1");
        assert_eq!(claims.extra.len(), 1);
        assert_eq!(claims, issued);
    }

    #[test]
    fn test_client_cannot_pick_expiry() {
        let (token, _) = keys()
            .issue(json!({"uid": "u1", "exp": 9_999_999_999_i64}))
            .unwrap();
        let claims = keys().verify(&token).unwrap();
        assert!(claims.exp <= Utc::now().timestamp() + SESSION_TTL_SECS);
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = keys();
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            uid: "u1".into(),
            iat: past.timestamp(),
            exp: (past + Duration::hours(1)).timestamp(),
            extra: Map::new(),
        };
        let token = keys.sign(&claims).unwrap();

        let err = keys.verify(&token).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (token, _) = keys().issue(json!({"uid": "u1"})).unwrap();
        let other = SessionKeys::new(b"another-secret");
        assert!(matches!(
            other.verify(&token),
            Err(BookingError::Unauthorized(_))
        ));
        assert!(keys().verify("not.a.token").is_err());
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("abc", 3600, false);
        assert_eq!(
            cookie.to_string(),
            "token=abc; HttpOnly; SameSite=Strict; Path=/; Max-Age=3600"
        );

        let secure = session_cookie("abc", 3600, true);
        assert_eq!(secure.secure(), Some(true));

        let cleared = cleared_cookie(false);
        assert_eq!(cleared.value(), "");
        assert_eq!(cleared.max_age(), Some(cookie::time::Duration::ZERO));
    }

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        assert_eq!(cookie_value(&headers, SESSION_COOKIE), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; token=abc.def.ghi; lang=en"),
        );
        assert_eq!(
            cookie_value(&headers, SESSION_COOKIE).as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(cookie_value(&headers, "tok"), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("token=\"abc.def.ghi\""));
        assert_eq!(
            cookie_value(&headers, SESSION_COOKIE).as_deref(),
            Some("abc.def.ghi")
        );

        headers.insert(header::COOKIE, HeaderValue::from_static("token="));
        assert_eq!(cookie_value(&headers, SESSION_COOKIE), None);
    }
}
