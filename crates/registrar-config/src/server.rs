use crate::{env_lookup, read, read_parsed};

/// Listen address from `SERVER_HOST` (default `0.0.0.0`) and `SERVER_PORT`
/// (default 8080).
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: read(lookup, "SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: read_parsed(lookup, "SERVER_PORT").unwrap_or(8080),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
