//! Builders selecting storage adapters and assembling handler state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use workasana::domain::ports::UserRepository;
use workasana::domain::{AccountService, SessionGate};
use workasana::inbound::http::state::{AccountPorts, HttpState, WorkspacePorts};
use workasana::outbound::memory::InMemoryStore;
use workasana::outbound::persistence::{
    DbPool, DieselProjectRepository, DieselTagRepository, DieselTaskRepository,
    DieselTeamRepository, DieselUserRepository,
};
use workasana::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::ServerConfig;

/// Storage-backed collaborators chosen for this process.
struct StoragePorts {
    users: Arc<dyn UserRepository>,
    workspace: WorkspacePorts,
}

fn diesel_storage_ports(pool: &DbPool) -> StoragePorts {
    StoragePorts {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        workspace: WorkspacePorts {
            projects: Arc::new(DieselProjectRepository::new(pool.clone())),
            teams: Arc::new(DieselTeamRepository::new(pool.clone())),
            tags: Arc::new(DieselTagRepository::new(pool.clone())),
            tasks: Arc::new(DieselTaskRepository::new(pool.clone())),
        },
    }
}

fn memory_storage_ports(clock: Arc<dyn Clock>) -> StoragePorts {
    let store = InMemoryStore::new(clock);
    StoragePorts {
        users: Arc::new(store.clone()),
        workspace: WorkspacePorts::shared(store),
    }
}

/// Use `make_db` when a pool is configured, otherwise one in-memory store
/// behind every port.
fn build_storage_ports_with_pool<Pool>(
    pool: &Option<Pool>,
    make_db: impl FnOnce(&Pool) -> StoragePorts,
    clock: Arc<dyn Clock>,
) -> StoragePorts {
    match pool {
        Some(pool) => make_db(pool),
        None => memory_storage_ports(clock),
    }
}

/// Handler state plus the gate protecting non-public routes.
pub(super) struct AppPorts {
    pub(super) http_state: web::Data<HttpState>,
    pub(super) gate: SessionGate,
}

fn assemble(storage: StoragePorts, tokens: Arc<JwtTokenService>) -> AppPorts {
    let accounts = AccountService::new(
        storage.users,
        Arc::new(Argon2PasswordHasher::new()),
        tokens.clone(),
    );
    AppPorts {
        http_state: web::Data::new(HttpState::new(
            AccountPorts::from(accounts),
            storage.workspace,
        )),
        gate: SessionGate::new(tokens),
    }
}

/// Build handler state and the session gate from `config`.
pub(super) fn build_app_ports(config: &ServerConfig) -> AppPorts {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let storage =
        build_storage_ports_with_pool(&config.db_pool, diesel_storage_ports, clock.clone());
    let tokens = Arc::new(JwtTokenService::new(&config.token_settings, clock));
    assemble(storage, tokens)
}
