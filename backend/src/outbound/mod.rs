//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process repositories for development and tests.
//! - **security**: Argon2 password hashing and HS256 session tokens.
//!
//! Adapters translate between domain types and infrastructure
//! representations; they hold no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
