use crate::{env_lookup, read, read_parsed};

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";
pub const DEFAULT_EXPIRY_HOURS: i64 = 24;
/// One year.
pub const MAX_EXPIRY_HOURS: i64 = 24 * 366;

/// Token signing settings.
///
/// - `JWT_SECRET`: HMAC secret
/// - `JWT_EXPIRY_HOURS`: token lifetime in hours (default: 24, at most a year)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = read(lookup, "JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET is not set, using the insecure default secret");
            DEFAULT_JWT_SECRET.to_string()
        });

        let expiry_hours = read_parsed::<_, i64>(lookup, "JWT_EXPIRY_HOURS")
            .filter(|hours| *hours > 0)
            .map(|hours| {
                if hours > MAX_EXPIRY_HOURS {
                    tracing::warn!(hours, max = MAX_EXPIRY_HOURS, "JWT_EXPIRY_HOURS capped");
                }
                hours.min(MAX_EXPIRY_HOURS)
            })
            .unwrap_or(DEFAULT_EXPIRY_HOURS);

        Self {
            secret,
            expiry_hours,
        }
    }

    pub fn expiry_seconds(&self) -> i64 {
        self.expiry_hours.saturating_mul(3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lookup;

    #[test]
    fn test_jwt_config_from_values() {
        let config = JwtConfig::from_lookup(&lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRY_HOURS", "2"),
        ]));
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.expiry_seconds(), 7200);
    }

    #[test]
    fn test_jwt_config_caps_expiry() {
        let config = JwtConfig::from_lookup(&lookup(&[(
            "JWT_EXPIRY_HOURS",
            "9223372036854775807",
        )]));
        assert_eq!(config.expiry_hours, MAX_EXPIRY_HOURS);

        let unbounded = JwtConfig {
            secret: "s".into(),
            expiry_hours: i64::MAX,
        };
        assert_eq!(unbounded.expiry_seconds(), i64::MAX);
    }

    #[test]
    fn test_jwt_config_rejects_non_positive_expiry() {
        let config = JwtConfig::from_lookup(&lookup(&[("JWT_EXPIRY_HOURS", "0")]));
        assert_eq!(config.expiry_hours, DEFAULT_EXPIRY_HOURS);
        assert_eq!(config.secret, DEFAULT_JWT_SECRET);
    }
}
