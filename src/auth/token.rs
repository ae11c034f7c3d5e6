use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::header;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::csrf::{csrf_matches, CSRF_HEADER};
use crate::error::AppError;

/// Cookie carrying the session token. Its value is `Bearer <jwt>`.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Represents the claims encoded within a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's email.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
    /// CSRF secret bound to this session. Mutating requests must echo it in
    /// the `x-csrf-token` header.
    pub csrf: String,
}

/// Issues and verifies session tokens.
///
/// Holds the signing keys and token lifetime, and nothing else; verification
/// operates only on the inputs given, so a single instance is shared across
/// requests as app data without locking.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_minutes: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    /// Signs a fresh token for `subject`, embedding `csrf_secret` and expiring
    /// one TTL from now.
    ///
    /// # Errors
    /// Returns `AppError::InternalServerError` if signing fails; there is no
    /// client-caused failure mode here.
    pub fn encode_token(&self, subject: &str, csrf_secret: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::minutes(self.ttl_minutes))
            .ok_or_else(|| AppError::InternalServerError("Token expiry overflow".into()))?;

        let claims = Claims {
            sub: subject.to_owned(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
            csrf: csrf_secret.to_owned(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token's signature and expiry and decodes its claims.
    ///
    /// Malformed, tampered and expired tokens all fail with the same
    /// `Unauthorized` message, so a caller probing the endpoint cannot tell
    /// them apart.
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid token".into()))
    }

    /// Verifies the bearer token carried by `req` and re-signs a fresh token
    /// with a new expiry for the same subject and CSRF secret (sliding
    /// expiration).
    ///
    /// # Errors
    /// Returns `AppError::Unauthorized` if extraction or decoding fails.
    pub fn verify_token_and_renew(&self, req: &HttpRequest) -> Result<(String, Claims), AppError> {
        let token = bearer_token(req)?;
        let claims = self.decode_token(&token)?;
        let renewed = self.encode_token(&claims.sub, &claims.csrf)?;
        Ok((renewed, claims))
    }

    /// The gate for mutating requests: the `x-csrf-token` header must match
    /// the secret embedded in the signed token, and only then is the session
    /// renewed.
    ///
    /// # Errors
    /// Returns `AppError::Unauthorized` for token failures and
    /// `AppError::Forbidden` for a missing or mismatched CSRF header; the two
    /// stay distinguishable so the boundary can answer 401 vs 403.
    pub fn verify_csrf_and_renew(&self, req: &HttpRequest) -> Result<(String, Claims), AppError> {
        let token = bearer_token(req)?;
        let claims = self.decode_token(&token)?;

        let supplied = req
            .headers()
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok());
        if !csrf_matches(&claims.csrf, supplied) {
            return Err(AppError::Forbidden("CSRF token mismatch".into()));
        }

        let renewed = self.encode_token(&claims.sub, &claims.csrf)?;
        Ok((renewed, claims))
    }
}

/// Pulls the raw JWT out of the request. The access-token cookie is the
/// primary carrier; the `Authorization` header is accepted as a fallback.
/// Both use the `Bearer <jwt>` format.
fn bearer_token(req: &HttpRequest) -> Result<String, AppError> {
    let raw = req
        .cookie(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        })
        .ok_or_else(|| AppError::Unauthorized("Missing token".into()))?;

    raw.strip_prefix("Bearer ")
        .map(str::to_owned)
        .ok_or_else(|| AppError::Unauthorized("Invalid token".into()))
}

/// Builds the session cookie attached to every successful authenticated
/// response. http-only keeps it away from scripts; same-site=none + secure
/// let it travel from a frontend on another origin.
pub fn access_token_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN_COOKIE, format!("Bearer {}", token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .finish()
}

/// An immediately-expiring empty cookie; clears the session on logout.
pub fn clear_access_token_cookie() -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(CookieDuration::ZERO)
        .finish()
}
