use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{config::Config, database::DatabaseManager};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DatabaseManager,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseManager) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }
}

/// Default configuration around an open connection, used by tests.
impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(Config::default(), DatabaseManager::from_connection(db))
    }
}
