//! Domain types, use-cases and ports.
//!
//! Purpose: hold everything that does not depend on a transport or a storage
//! engine. Types validate themselves at construction; services receive their
//! collaborators explicitly and talk to infrastructure only through
//! [`ports`].
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `User`, `UserAccount` and their value types: identity records.
//! - `SignupDetails`, `LoginCredentials`: validated auth inputs.
//! - `SessionToken`, `TokenRejection`, `SessionGate`: bearer session handling.
//! - `AccountService`: signup, login and user lookups.
//! - `Project`, `Team`, `Tag`, `Task`: workspace records.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod password;
pub mod ports;
pub mod session_gate;
pub mod session_token;
pub mod trace_id;
pub mod user;
pub mod workspace;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, SignupDetails, SignupValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::password::PasswordDigest;
pub use self::session_gate::SessionGate;
pub use self::session_token::{
    BearerCredential, IssuedToken, SESSION_TOKEN_TTL_DAYS, SessionToken, TokenRejection,
    session_token_ttl,
};
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, User, UserAccount, UserId, UserName, UserValidationError};
pub use self::workspace::{
    NewProject, NewTag, NewTask, NewTeam, Project, ProjectId, ProjectStatus, Tag, TagId, Task,
    TaskDraft, TaskId, TaskStatus, Team, TeamId, WorkspaceValidationError,
};
