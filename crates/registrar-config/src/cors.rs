use crate::{env_lookup, read};

/// Allowed CORS origins from the comma-separated `ALLOWED_ORIGINS`.
///
/// `*` (the default) allows any origin; credentials are then not allowed.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = read(lookup, "ALLOWED_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lookup;

    #[test]
    fn test_default_allows_any_origin() {
        assert!(CorsConfig::from_lookup(&lookup(&[])).allows_any_origin());
    }

    #[test]
    fn test_origin_list() {
        let config = CorsConfig::from_lookup(&lookup(&[(
            "ALLOWED_ORIGINS",
            "http://localhost:3000, http://localhost:5173,",
        )]));
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
        assert!(!config.allows_any_origin());
    }
}
