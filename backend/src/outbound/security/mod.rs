//! Credential hashing and session-token signing adapters.

mod argon2_password_hasher;
mod fingerprint;
mod jwt_token_service;
mod token_config;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use fingerprint::secret_fingerprint;
pub use jwt_token_service::JwtTokenService;
pub use token_config::{
    BuildMode, SECRET_MIN_LEN, TokenConfigError, TokenSettings, token_settings_from_env,
};
