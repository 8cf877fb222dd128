use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::store::{BookingStore, MovieStore, UserStore};

/// Shared application state handed to every handler through axum. Store
/// handles and configuration are constructed once in `main` and injected;
/// nothing in the workflow reads process globals.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub movies: MovieStore,
    pub users: UserStore,
    pub bookings: BookingStore,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self {
            config: Arc::new(config),
            movies: MovieStore::new(pool.clone()),
            users: UserStore::new(pool.clone()),
            bookings: BookingStore::new(pool),
        }
    }
}
