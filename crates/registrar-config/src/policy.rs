use crate::{env_lookup, read_flag};

/// Switches for the authorization policy.
///
/// - `RESTRICT_STUDENT_LISTING`: students only see their own record in
///   student listings and lookups (default: off)
/// - `ALLOW_ADMIN_REGISTRATION`: public registration may create admin
///   accounts (default: off)
#[derive(Clone, Debug, Default)]
pub struct PolicyConfig {
    pub restrict_student_listing: bool,
    pub allow_admin_registration: bool,
}

impl PolicyConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            restrict_student_listing: read_flag(lookup, "RESTRICT_STUDENT_LISTING"),
            allow_admin_registration: read_flag(lookup, "ALLOW_ADMIN_REGISTRATION"),
        }
    }
}
