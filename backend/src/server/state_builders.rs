//! Builders wiring repository adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use circulation::inbound::http::state::HttpState;
use circulation::outbound::memory::InMemoryCirculationStore;
use circulation::outbound::persistence::{
    DbPool, DieselLoanRepository, DieselMemberRepository, DieselTitleRepository,
};

use super::ServerConfig;

fn build_database_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    HttpState::from_repositories(
        Arc::new(DieselMemberRepository::new(pool.clone())),
        Arc::new(DieselTitleRepository::new(pool.clone())),
        Arc::new(DieselLoanRepository::new(pool.clone())),
        clock,
    )
}

fn build_in_memory_state(clock: Arc<dyn Clock>) -> HttpState {
    let store = Arc::new(InMemoryCirculationStore::new());
    HttpState::from_repositories(Arc::clone(&store), Arc::clone(&store), store, clock)
}

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over a fresh in-process store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!(storage = "postgres", "wiring repositories");
            build_database_state(pool, clock)
        }
        None => {
            info!(storage = "memory", "wiring repositories; state is lost on exit");
            build_in_memory_state(clock)
        }
    };
    web::Data::new(state)
}
