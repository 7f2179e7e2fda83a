//! Framework-independent request gate for protected routes.
//!
//! The gate is a pure function of the presented `Authorization` header: parse
//! the bearer credential, verify it, return the subject. It never consults the
//! credential store, so a token stays valid until its embedded expiry even if
//! the account disappears in the meantime. Handlers that need the live record
//! look it up themselves.

use std::sync::Arc;

use tracing::debug;

use super::ports::TokenVerifier;
use super::{BearerCredential, TokenRejection, UserId};

/// Composes bearer parsing with a [`TokenVerifier`].
#[derive(Clone)]
pub struct SessionGate {
    verifier: Arc<dyn TokenVerifier>,
}

impl SessionGate {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Admit or reject a request given its raw `Authorization` header.
    pub fn admit(&self, authorization: Option<&str>) -> Result<UserId, TokenRejection> {
        let outcome = BearerCredential::parse(authorization)
            .and_then(|token| self.verifier.verify(&token));
        if let Err(rejection) = &outcome {
            debug!(reason = rejection.kind(), "session gate rejected request");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockTokenVerifier;
    use rstest::rstest;

    const SUBJECT: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn gate_with(verdict: Result<UserId, TokenRejection>) -> SessionGate {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .withf(|token| token.as_str() == "signed.token.value")
            .returning(move |_| verdict.clone());
        SessionGate::new(Arc::new(verifier))
    }

    #[rstest]
    fn admits_verified_subject() {
        let subject = UserId::new(SUBJECT).expect("valid id");
        let gate = gate_with(Ok(subject.clone()));
        let admitted = gate
            .admit(Some("Bearer signed.token.value"))
            .expect("token admitted");
        assert_eq!(admitted, subject);
    }

    #[rstest]
    #[case(TokenRejection::Expired)]
    #[case(TokenRejection::BadSignature)]
    #[case(TokenRejection::Malformed)]
    fn surfaces_verifier_rejections(#[case] rejection: TokenRejection) {
        let gate = gate_with(Err(rejection));
        assert_eq!(gate.admit(Some("Bearer signed.token.value")), Err(rejection));
    }

    #[rstest]
    #[case(None, TokenRejection::Missing)]
    #[case(Some("Token signed.token.value"), TokenRejection::Malformed)]
    fn rejects_before_verifying_when_header_is_unusable(
        #[case] header: Option<&str>,
        #[case] expected: TokenRejection,
    ) {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().never();
        let gate = SessionGate::new(Arc::new(verifier));
        assert_eq!(gate.admit(header), Err(expected));
    }
}
