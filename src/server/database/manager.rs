use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, PoisonError, RwLock},
};

use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait,
};

use crate::server::{
    database::connect::{is_in_memory, redact_uri},
    error::{database::DatabaseError, Error},
};

/// Owns the connection pool shared by the application.
///
/// Cloning the manager shares the same pool. The pool is created by
/// [`DatabaseManager::init_database`] at start up and released by
/// [`DatabaseManager::stop_database`] on shutdown.
#[derive(Clone, Default)]
pub struct DatabaseManager {
    connection: Arc<RwLock<Option<DatabaseConnection>>>,
}

impl DatabaseManager {
    /// Creates a manager without a connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager around an already established connection.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            connection: Arc::new(RwLock::new(Some(db))),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Connects to `uri` and applies pending migrations.
    ///
    /// Does nothing when a connection already exists.
    ///
    /// # Arguments
    /// - `uri` - Connection URI, see [`get_connection_uri`](crate::server::database::connect::get_connection_uri)
    /// - `echo` - Log every executed SQL statement
    ///
    /// # Returns
    /// - `Ok(())` - Connection ready, or was already initialized
    /// - `Err(DatabaseError::Connection)` - Could not connect
    /// - `Err(DatabaseError::Migration)` - Connected but migrations failed
    pub async fn init_database(&self, uri: &str, echo: bool) -> Result<(), DatabaseError> {
        if self.is_initialized() {
            tracing::info!("Database connection is already initialized");

            return Ok(());
        }

        tracing::info!("Initializing database connection: {}", redact_uri(uri));

        let mut opt = ConnectOptions::new(uri);
        opt.sqlx_logging(echo);

        // Every connection to an in-memory SQLite database opens a fresh, empty database
        if is_in_memory(uri) {
            opt.max_connections(1);
        }

        let db = Database::connect(opt).await.map_err(|e| {
            tracing::error!("Failed to initialize database: {}", e);

            DatabaseError::Connection(e)
        })?;

        Migrator::up(&db, None).await.map_err(|e| {
            tracing::error!("Failed to run database migrations: {}", e);

            DatabaseError::Migration(e)
        })?;

        let mut connection = self
            .connection
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if connection.is_none() {
            *connection = Some(db);
            tracing::info!("Database connection initialized");
        }

        Ok(())
    }

    /// Closes the connection pool.
    ///
    /// Logs an error and returns `Ok` when there is no active connection.
    pub async fn stop_database(&self) -> Result<(), DbErr> {
        let connection = self
            .connection
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let Some(db) = connection else {
            tracing::error!("There is no active database connection to close");

            return Ok(());
        };

        tracing::info!("Closing database connection...");
        db.close().await?;
        tracing::info!("Database connection closed");

        Ok(())
    }

    /// Returns a handle to the pool.
    ///
    /// # Returns
    /// - `Ok(DatabaseConnection)` - Handle sharing the managed pool
    /// - `Err(DatabaseError::NotInitialized)` - [`DatabaseManager::init_database`] was not called
    pub fn connection(&self) -> Result<DatabaseConnection, DatabaseError> {
        let connection = self
            .connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        connection.ok_or_else(|| {
            tracing::error!("{}", DatabaseError::NotInitialized);

            DatabaseError::NotInitialized
        })
    }

    /// Runs `callback` inside a transaction.
    ///
    /// Commits when the callback returns `Ok` and rolls back when it returns `Err`, passing
    /// the callback's error through. A failed rollback is logged, the callback's error is
    /// still the one returned.
    ///
    /// # Example
    /// ```ignore
    /// let user = state.db.transaction(|txn| Box::pin(async move {
    ///     let user = CrudRepository::<_, entity::user::Entity>::new(txn).save(model).await?;
    ///     Ok(user)
    /// })).await?;
    /// ```
    pub async fn transaction<F, T>(&self, callback: F) -> Result<T, Error>
    where
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
            ) -> Pin<Box<dyn Future<Output = Result<T, Error>> + Send + 'c>>
            + Send,
        T: Send,
    {
        let db = self.connection()?;
        let txn = db.begin().await?;

        match callback(&txn).await {
            Ok(value) => {
                txn.commit().await?;

                Ok(value)
            }
            Err(err) => {
                tracing::error!("Error in database session, rolling back changes: {}", err);
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Failed to roll back database session: {}", rollback_err);
                }

                Err(err)
            }
        }
    }
}
