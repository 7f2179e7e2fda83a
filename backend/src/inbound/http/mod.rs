//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod projects;
pub mod routes;
pub mod state;
pub mod tags;
pub mod tasks;
pub mod teams;
pub mod users;

pub use error::ApiResult;
