//! Development seed data.
//!
//! Seeding is idempotent: existing groups and accounts are reused, so the
//! command can be run against a database that was already seeded.

mod accounts;
mod groups;
mod students;

use std::time::Instant;

use registrar_auth::CredentialService;
use registrar_core::AppError;
use registrar_db::RecordStore;

pub use accounts::{DEMO_ACCOUNTS, DemoAccount, create_admin};
pub use groups::DEMO_GROUPS;

/// How much data [`seed_all`] creates beyond the fixed demo records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    /// Extra students with generated names.
    pub students: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { students: 20 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub groups: Vec<i64>,
    pub accounts: usize,
    pub students: usize,
}

/// Seeds demo groups, one account per role and `config.students` generated
/// students spread over the groups.
pub async fn seed_all(
    store: &dyn RecordStore,
    credentials: &CredentialService,
    config: SeedConfig,
) -> Result<SeedSummary, AppError> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...");

    let groups = groups::seed_groups(store).await?;
    let accounts = accounts::seed_accounts(store, credentials, groups.first().copied()).await?;
    let students = students::seed_students(store, &groups, config.students).await?;

    println!("✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(SeedSummary {
        groups,
        accounts,
        students,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_auth::Role;
    use registrar_config::{JwtConfig, PasswordConfig};
    use registrar_db::MemoryStore;
    use registrar_models::query::ListQuery;

    fn credentials() -> CredentialService {
        CredentialService::new(
            JwtConfig {
                secret: "seed-test-secret".to_string(),
                expiry_hours: 1,
            },
            PasswordConfig { hash_cost: 4 },
        )
    }

    fn everything() -> ListQuery {
        ListQuery {
            limit: 1000,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_seed_all_creates_demo_data() {
        let store = MemoryStore::new();
        let credentials = credentials();

        let summary = seed_all(&store, &credentials, SeedConfig { students: 5 })
            .await
            .unwrap();
        assert_eq!(summary.groups.len(), DEMO_GROUPS.len());
        assert_eq!(summary.accounts, DEMO_ACCOUNTS.len());
        assert_eq!(summary.students, 5);

        let student_user = store
            .find_user_by_email("student@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student_user.role, Role::Student);
        assert!(credentials.verify_password("student123", &student_user.password_hash));

        let student = store
            .find_student(student_user.student_id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student.group_id, summary.groups.first().copied());
        assert_ne!(student.name, "New");

        // 5 generated students plus the demo student account's record.
        assert_eq!(store.list_students(&everything()).await.unwrap().total, 6);
        assert_eq!(store.list_teachers(&everything()).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_seed_all_is_rerunnable() {
        let store = MemoryStore::new();
        let credentials = credentials();

        let first = seed_all(&store, &credentials, SeedConfig { students: 0 })
            .await
            .unwrap();
        let second = seed_all(&store, &credentials, SeedConfig { students: 0 })
            .await
            .unwrap();

        assert_eq!(first.groups, second.groups);
        assert_eq!(second.accounts, 0);
        assert_eq!(store.list_groups(&everything()).await.unwrap().total, 3);
    }

    #[tokio::test]
    async fn test_create_admin_rejects_duplicates() {
        let store = MemoryStore::new();
        let credentials = credentials();

        let admin = create_admin(&store, &credentials, "root@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(admin.student_id.is_none());

        let err = create_admin(&store, &credentials, "root@example.com", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 409);
    }
}
