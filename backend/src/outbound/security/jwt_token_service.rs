//! HS256 JSON Web Tokens implementing `TokenIssuer` and `TokenVerifier`.
//!
//! Claims are `{sub, iat, exp, jti}`. Expiry is checked against the injected
//! clock instead of the library's system-time check, so tests can move time
//! past the seven-day window deterministically.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{TokenIssueError, TokenIssuer, TokenVerifier};
use crate::domain::{IssuedToken, SessionToken, TokenRejection, UserId, session_token_ttl};

use super::token_config::TokenSettings;

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    iat: i64,
    exp: i64,
    jti: String,
}

/// Signs and verifies session tokens with a shared symmetric secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service from the loaded signing secret.
    pub fn new(settings: &TokenSettings, clock: Arc<dyn Clock>) -> Self {
        let secret = settings.secret();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }
}

fn timestamp_to_utc(seconds: i64, fallback: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or(fallback)
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, subject: &UserId) -> Result<IssuedToken, TokenIssueError> {
        let now = self.clock.utc();
        let expires = now + session_token_ttl();
        let claims = SessionClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| TokenIssueError::signing(err.to_string()))?;

        Ok(IssuedToken {
            token: SessionToken::new(token),
            issued_at: timestamp_to_utc(claims.iat, now),
            expires_at: timestamp_to_utc(claims.exp, expires),
        })
    }
}

impl TokenVerifier for JwtTokenService {
    fn verify(&self, token: &SessionToken) -> Result<UserId, TokenRejection> {
        let data = decode::<SessionClaims>(token.as_str(), &self.decoding_key, &self.validation)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => TokenRejection::BadSignature,
                other => {
                    debug!(kind = ?other, "session token failed to decode");
                    TokenRejection::Malformed
                }
            })?;

        let claims = data.claims;
        if self.clock.utc().timestamp() > claims.exp {
            return Err(TokenRejection::Expired);
        }

        UserId::new(&claims.sub).map_err(|_| TokenRejection::Malformed)
    }
}
