use crate::server::config::{ConnectionParams, DatabaseProvider, DatabaseSettings};

static SQLITE_MEMORY: &str = ":memory:";
static SQLITE_MEMORY_URI: &str = "sqlite::memory:";

/// Builds the connection URI for `provider` from the configured settings.
///
/// Missing database name or credentials render as empty strings.
pub fn get_connection_uri(provider: DatabaseProvider, settings: &DatabaseSettings) -> String {
    match provider {
        DatabaseProvider::Postgresql => network_uri("postgres", &settings.postgresql),
        DatabaseProvider::Mysql => network_uri("mysql", &settings.mysql),
        DatabaseProvider::Sqlite => sqlite_uri(&settings.sqlite_path),
    }
}

fn network_uri(scheme: &str, params: &ConnectionParams) -> String {
    format!(
        "{}://{}:{}@{}:{}/{}",
        scheme,
        params.username.as_deref().unwrap_or_default(),
        params.password.as_deref().unwrap_or_default(),
        params.host,
        params.port,
        params.db.as_deref().unwrap_or_default(),
    )
}

fn sqlite_uri(path: &str) -> String {
    if path == SQLITE_MEMORY {
        return SQLITE_MEMORY_URI.to_string();
    }

    format!("sqlite://{}?mode=rwc", path)
}

/// Returns a version of `uri` safe to log, hiding everything up to the credentials.
pub fn redact_uri(uri: &str) -> String {
    match uri.rfind('@') {
        Some(index) => format!("...{}", &uri[index + 1..]),
        None => uri.to_string(),
    }
}

/// True when `uri` points at an in-memory SQLite database.
pub fn is_in_memory(uri: &str) -> bool {
    uri.starts_with("sqlite:") && uri.contains(SQLITE_MEMORY)
}
