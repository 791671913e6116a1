//! # Registrar Config
//!
//! Configuration types for the Registrar API, loaded from environment
//! variables (a `.env` file is read by the binaries through `dotenvy`).
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`password`]: bcrypt cost
//! - [`cors`]: allowed origins
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: listen address
//! - [`policy`]: switches for the authorization policy
//!
//! Every type exposes `from_env()` plus `from_lookup()`, which takes any
//! key-to-value function so tests can build configurations without touching
//! the process environment.
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::AppConfig;
//!
//! let config = AppConfig::from_env();
//! println!("listening on {}", config.server.address());
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod password;
pub mod policy;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use policy::PolicyConfig;
pub use server::ServerConfig;

/// Reads a value, treating blank strings as unset.
pub(crate) fn read<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn read_parsed<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    read(lookup, key).and_then(|v| v.parse().ok())
}

pub(crate) fn read_flag<F>(lookup: &F, key: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    matches!(
        read(lookup, key).map(|v| v.to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Every configuration section the server needs.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub policy: PolicyConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            jwt: JwtConfig::from_lookup(&lookup),
            password: PasswordConfig::from_lookup(&lookup),
            cors: CorsConfig::from_lookup(&lookup),
            database: DatabaseConfig::from_lookup(&lookup),
            server: ServerConfig::from_lookup(&lookup),
            policy: PolicyConfig::from_lookup(&lookup),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    pub fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }
}
