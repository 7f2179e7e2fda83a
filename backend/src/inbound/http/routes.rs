//! Route table shared by the server binary and HTTP-level tests.
//!
//! ```text
//! GET  /              banner
//! GET  /health/ready  readiness probe
//! GET  /health/live   liveness probe
//! POST /signup        public
//! POST /login         public
//! *    everything else behind the session gate
//! ```

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web;

use crate::domain::SessionGate;
use crate::inbound::http::auth::RequireSession;
use crate::inbound::http::error::json_payload_error;
use crate::inbound::http::health::{live, ready, root};
use crate::inbound::http::projects::{create_project, list_projects};
use crate::inbound::http::tags::{create_tag, list_tags};
use crate::inbound::http::tasks::{create_task, list_tasks};
use crate::inbound::http::teams::{create_team, list_teams};
use crate::inbound::http::users::{current_user, list_users, login, signup};

/// Cross-origin policy: any origin, the four verbs the API speaks, and the
/// two headers clients send.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(["GET", "POST", "PUT", "DELETE"])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Register every route on `cfg`.
///
/// The gated scope matches all remaining paths, so anything registered on the
/// app after this call is unreachable.
pub fn configure(cfg: &mut web::ServiceConfig, gate: SessionGate) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_payload_error))
        .service(root)
        .service(ready)
        .service(live)
        .service(signup)
        .service(login)
        .service(
            web::scope("")
                .wrap(RequireSession::new(gate))
                .service(current_user)
                .service(list_users)
                .service(list_projects)
                .service(create_project)
                .service(list_teams)
                .service(create_team)
                .service(list_tags)
                .service(create_tag)
                .service(list_tasks)
                .service(create_task),
        );
}
