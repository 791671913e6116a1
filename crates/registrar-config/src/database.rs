//! PostgreSQL connection settings.
//!
//! `DATABASE_URL` wins when present. Otherwise the URL is composed from
//! `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` and
//! `DB_SSLMODE`. `DB_MAX_CONNECTIONS` sizes the pool.

use crate::{env_lookup, read, read_parsed};

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = read(lookup, "DATABASE_URL").unwrap_or_else(|| {
            let host = read(lookup, "DB_HOST").unwrap_or_else(|| "localhost".to_string());
            let port = read(lookup, "DB_PORT").unwrap_or_else(|| "5432".to_string());
            let user = read(lookup, "DB_USER").unwrap_or_else(|| "postgres".to_string());
            let password = read(lookup, "DB_PASSWORD").unwrap_or_default();
            let name = read(lookup, "DB_NAME").unwrap_or_else(|| "registrar".to_string());
            let sslmode = read(lookup, "DB_SSLMODE").unwrap_or_else(|| "disable".to_string());

            format!("postgres://{user}:{password}@{host}:{port}/{name}?sslmode={sslmode}")
        });

        let max_connections = read_parsed(lookup, "DB_MAX_CONNECTIONS").unwrap_or(10);

        Self {
            url,
            max_connections,
        }
    }
}
