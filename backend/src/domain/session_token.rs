//! Bearer session tokens and the ways they can be rejected.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

/// Whole days a session token stays valid after issuance.
pub const SESSION_TOKEN_TTL_DAYS: i64 = 7;

/// Lifetime of a session token.
pub fn session_token_ttl() -> TimeDelta {
    TimeDelta::days(SESSION_TOKEN_TTL_DAYS)
}

/// Opaque signed bearer credential.
///
/// `Debug` is redacted; the raw value is only reachable through
/// [`SessionToken::as_str`].
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// A freshly signed token and the instants embedded in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: SessionToken,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Reasons the request gate refuses a credential.
///
/// The variants are kept apart for logging only. Every one of them maps to the
/// same external 401 response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenRejection {
    /// No bearer credential was presented.
    #[error("no bearer token presented")]
    Missing,
    /// The credential could not be decoded as a token.
    #[error("bearer token is malformed")]
    Malformed,
    /// The signature does not match the payload.
    #[error("bearer token signature is invalid")]
    BadSignature,
    /// The signature is valid but the embedded expiry has passed.
    #[error("bearer token has expired")]
    Expired,
}

impl TokenRejection {
    /// Short label used in structured logs.
    pub fn kind(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::BadSignature => "bad_signature",
            Self::Expired => "expired",
        }
    }
}

const BEARER_SCHEME: &str = "bearer";

/// Parser for `Authorization: Bearer <token>` header values.
pub struct BearerCredential;

impl BearerCredential {
    /// Extract the token from an `Authorization` header value.
    ///
    /// The scheme is matched case-insensitively. An absent or blank header,
    /// or a bare scheme with no token, counts as no credential. Anything else
    /// that does not look like `Bearer <token>` is malformed.
    ///
    /// # Examples
    /// ```
    /// use workasana::domain::{BearerCredential, TokenRejection};
    ///
    /// let token = BearerCredential::parse(Some("Bearer abc.def.ghi")).unwrap();
    /// assert_eq!(token.as_str(), "abc.def.ghi");
    /// assert_eq!(BearerCredential::parse(None), Err(TokenRejection::Missing));
    /// assert_eq!(
    ///     BearerCredential::parse(Some("Basic dXNlcjpwdw==")),
    ///     Err(TokenRejection::Malformed)
    /// );
    /// ```
    pub fn parse(header: Option<&str>) -> Result<SessionToken, TokenRejection> {
        let value = header.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Err(TokenRejection::Missing);
        }

        let (scheme, rest) = value.split_once(' ').unwrap_or((value, ""));
        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            return Err(TokenRejection::Malformed);
        }

        let token = rest.trim();
        if token.is_empty() {
            return Err(TokenRejection::Missing);
        }
        if token.chars().any(char::is_whitespace) {
            return Err(TokenRejection::Malformed);
        }
        Ok(SessionToken::new(token))
    }
}
