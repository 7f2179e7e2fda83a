//! Signing-secret configuration for session tokens.
//!
//! The secret comes from `JWT_SECRET` or from a file named by
//! `JWT_SECRET_FILE`. A process without a secret refuses to start in every
//! build mode; release builds additionally reject short secrets.

use std::path::PathBuf;

use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

use super::fingerprint::secret_fingerprint;

const SECRET_ENV: &str = "JWT_SECRET";
const SECRET_FILE_ENV: &str = "JWT_SECRET_FILE";
/// Minimum secret length accepted by release builds (256 bits for HS256).
pub const SECRET_MIN_LEN: usize = 32;

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds warn about weak settings.
    Debug,
    /// Release builds reject weak settings.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Whether this is a debug build.
    pub fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Loaded signing secret. Zeroed on drop.
pub struct TokenSettings {
    secret: Zeroizing<Vec<u8>>,
}

impl TokenSettings {
    /// Wrap raw secret bytes without validation.
    pub fn from_secret(secret: Vec<u8>) -> Self {
        Self {
            secret: Zeroizing::new(secret),
        }
    }

    pub(crate) fn secret(&self) -> &[u8] {
        self.secret.as_slice()
    }

    /// Truncated SHA-256 fingerprint for startup logs.
    pub fn fingerprint(&self) -> String {
        secret_fingerprint(self.secret())
    }
}

/// Errors raised while loading the signing secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// Neither source variable is set, or the secret is empty.
    #[error("session token signing secret missing: set {SECRET_ENV} or {SECRET_FILE_ENV}")]
    MissingSecret,
    /// Reading the secret file failed.
    #[error("failed to read signing secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret is too short for release builds.
    #[error("signing secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
}

/// Load the signing secret from the environment.
///
/// `JWT_SECRET` wins over `JWT_SECRET_FILE`. File contents have trailing
/// line breaks removed.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use workasana::outbound::security::{BuildMode, token_settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_SECRET" => Some("0123456789abcdef0123456789abcdef".to_string()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release).expect("secret loads");
/// assert_eq!(settings.fingerprint().len(), 16);
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let secret = match env.string(SECRET_ENV).filter(|value| !value.is_empty()) {
        Some(value) => Zeroizing::new(value.into_bytes()),
        None => secret_from_file(env)?,
    };

    if secret.is_empty() {
        return Err(TokenConfigError::MissingSecret);
    }

    let length = secret.len();
    if length < SECRET_MIN_LEN {
        if mode.is_debug() {
            warn!(
                length,
                min_len = SECRET_MIN_LEN,
                "signing secret shorter than recommended (dev only)"
            );
        } else {
            return Err(TokenConfigError::SecretTooShort {
                length,
                min_len: SECRET_MIN_LEN,
            });
        }
    }

    Ok(TokenSettings { secret })
}

fn secret_from_file<E: Env>(env: &E) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    let Some(path) = env.string(SECRET_FILE_ENV).filter(|value| !value.is_empty()) else {
        return Err(TokenConfigError::MissingSecret);
    };
    let path = PathBuf::from(path);
    let mut bytes = Zeroizing::new(
        std::fs::read(&path).map_err(|source| TokenConfigError::SecretRead { path, source })?,
    );
    while matches!(bytes.last(), Some(b'\n' | b'\r')) {
        bytes.pop();
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    //! Unit tests for signing-secret loading.
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::io::Write;

    const STRONG: &str = "0123456789abcdef0123456789abcdef";

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    fn secret_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write secret");
        file
    }

    #[rstest]
    #[case(BuildMode::Debug)]
    #[case(BuildMode::Release)]
    fn missing_secret_is_rejected_in_every_mode(#[case] mode: BuildMode) {
        let env = mock_env(&[]);
        let result = token_settings_from_env(&env, mode);
        assert!(matches!(result, Err(TokenConfigError::MissingSecret)));
    }

    #[rstest]
    fn empty_secret_counts_as_missing() {
        let env = mock_env(&[(SECRET_ENV, "")]);
        let result = token_settings_from_env(&env, BuildMode::Debug);
        assert!(matches!(result, Err(TokenConfigError::MissingSecret)));
    }

    #[rstest]
    fn env_secret_is_used_verbatim() {
        let env = mock_env(&[(SECRET_ENV, STRONG)]);
        let settings = token_settings_from_env(&env, BuildMode::Release).expect("loads");
        assert_eq!(settings.secret(), STRONG.as_bytes());
    }

    #[rstest]
    fn env_secret_wins_over_file() {
        let file = secret_file("file-secret-file-secret-file-secret");
        let path = file.path().to_str().expect("utf8 path").to_owned();
        let env = mock_env(&[(SECRET_ENV, STRONG), (SECRET_FILE_ENV, path.as_str())]);
        let settings = token_settings_from_env(&env, BuildMode::Release).expect("loads");
        assert_eq!(settings.secret(), STRONG.as_bytes());
    }

    #[rstest]
    fn file_secret_drops_trailing_newline() {
        let file = secret_file(&format!("{STRONG}\n"));
        let path = file.path().to_str().expect("utf8 path").to_owned();
        let env = mock_env(&[(SECRET_FILE_ENV, path.as_str())]);
        let settings = token_settings_from_env(&env, BuildMode::Release).expect("loads");
        assert_eq!(settings.secret(), STRONG.as_bytes());
    }

    #[rstest]
    fn unreadable_file_is_reported() {
        let env = mock_env(&[(SECRET_FILE_ENV, "/nonexistent/workasana/jwt_secret")]);
        let result = token_settings_from_env(&env, BuildMode::Debug);
        assert!(matches!(result, Err(TokenConfigError::SecretRead { .. })));
    }

    #[rstest]
    fn short_secret_is_rejected_in_release() {
        let env = mock_env(&[(SECRET_ENV, "short")]);
        let result = token_settings_from_env(&env, BuildMode::Release);
        assert!(matches!(
            result,
            Err(TokenConfigError::SecretTooShort {
                length: 5,
                min_len: SECRET_MIN_LEN
            })
        ));
    }

    #[rstest]
    fn short_secret_is_tolerated_in_debug() {
        let env = mock_env(&[(SECRET_ENV, "short")]);
        let settings = token_settings_from_env(&env, BuildMode::Debug).expect("loads");
        assert_eq!(settings.secret(), b"short");
    }

    #[rstest]
    fn build_mode_tracks_debug_assertions() {
        let mode = BuildMode::from_debug_assertions();
        assert_eq!(mode.is_debug(), cfg!(debug_assertions));
    }
}
