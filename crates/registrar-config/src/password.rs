use crate::{env_lookup, read_parsed};

/// bcrypt's own default cost.
pub const DEFAULT_HASH_COST: u32 = 12;

/// Password hashing settings.
///
/// `PASSWORD_HASH_COST` must be within bcrypt's accepted range (4-31).
#[derive(Clone, Debug)]
pub struct PasswordConfig {
    pub hash_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            hash_cost: DEFAULT_HASH_COST,
        }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let hash_cost = read_parsed::<_, u32>(lookup, "PASSWORD_HASH_COST")
            .filter(|cost| (4..=31).contains(cost))
            .unwrap_or(DEFAULT_HASH_COST);

        Self { hash_cost }
    }
}
