//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for `cfg(test)` and the `test-support` feature only.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::{AccountService, SessionGate};
use crate::inbound::http::state::{AccountPorts, HttpState, WorkspacePorts};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenService, TokenSettings};

/// Signing secret long enough to satisfy release-mode checks.
pub const TEST_SIGNING_SECRET: &[u8] = b"workasana-test-signing-secret-0123456789";

/// Clock whose reading only moves when a test says so.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Argon2id hasher with minimal costs.
pub fn fast_password_hasher() -> Argon2PasswordHasher {
    match Argon2PasswordHasher::with_params(8, 1, 1) {
        Ok(hasher) => hasher,
        Err(error) => panic!("argon2 test parameters rejected: {error}"),
    }
}

/// Fully wired in-memory backend: handler state, request gate and the clock
/// both the store and the token service read.
#[derive(Clone)]
pub struct TestBackend {
    pub state: HttpState,
    pub gate: SessionGate,
    pub clock: Arc<MutableClock>,
    pub store: InMemoryStore,
}

impl TestBackend {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(now: DateTime<Utc>) -> Self {
        let clock = Arc::new(MutableClock::new(now));
        let store = InMemoryStore::new(clock.clone());
        let tokens = Arc::new(JwtTokenService::new(
            &TokenSettings::from_secret(TEST_SIGNING_SECRET.to_vec()),
            clock.clone(),
        ));
        let accounts = AccountService::new(
            Arc::new(store.clone()),
            Arc::new(fast_password_hasher()),
            tokens.clone(),
        );
        Self {
            state: HttpState::new(
                AccountPorts::from(accounts),
                WorkspacePorts::shared(store.clone()),
            ),
            gate: SessionGate::new(tokens),
            clock,
            store,
        }
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}
