use registrar_auth::{CredentialService, Role};
use registrar_core::AppError;
use registrar_db::RecordStore;
use registrar_models::auth::NewAccount;
use registrar_models::students::UpdateStudentDto;
use registrar_models::users::User;

#[derive(Debug, Clone, Copy)]
pub struct DemoAccount {
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
    /// Real name given to the linked record instead of the placeholder.
    pub name: (&'static str, &'static str),
}

pub const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        email: "admin@example.com",
        password: "admin123",
        role: Role::Admin,
        name: ("Ada", "Admin"),
    },
    DemoAccount {
        email: "teacher@example.com",
        password: "teacher123",
        role: Role::Teacher,
        name: ("Tom", "Teacher"),
    },
    DemoAccount {
        email: "student@example.com",
        password: "student123",
        role: Role::Student,
        name: ("Sam", "Student"),
    },
];

/// Creates an admin account without a linked record.
pub async fn create_admin(
    store: &dyn RecordStore,
    credentials: &CredentialService,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let password_hash = credentials.hash_password(password)?;
    let user = store
        .create_user(NewAccount {
            email: email.trim().to_string(),
            password_hash,
            role: Role::Admin,
        })
        .await?;
    Ok(user)
}

/// Creates the missing demo accounts and returns how many were created.
///
/// The demo student is placed in `group_id` when one is given.
pub(crate) async fn seed_accounts(
    store: &dyn RecordStore,
    credentials: &CredentialService,
    group_id: Option<i64>,
) -> Result<usize, AppError> {
    println!("🔐 Seeding demo accounts...");

    let mut created = 0;
    for account in DEMO_ACCOUNTS {
        if store.find_user_by_email(account.email).await?.is_some() {
            println!("   - {} already exists", account.email);
            continue;
        }

        let user = match account.role {
            Role::Admin => create_admin(store, credentials, account.email, account.password).await?,
            role => {
                let password_hash = credentials.hash_password(account.password)?;
                store
                    .register_user(NewAccount {
                        email: account.email.to_string(),
                        password_hash,
                        role,
                    })
                    .await?
            }
        };

        if let Some(student_id) = user.student_id {
            let (name, surname) = account.name;
            store
                .update_student(
                    student_id,
                    &UpdateStudentDto {
                        name: name.to_string(),
                        surname: surname.to_string(),
                        email: None,
                        group_id,
                    },
                )
                .await?;
        }

        println!("   ✓ {} ({})", account.email, account.role);
        created += 1;
    }

    Ok(created)
}
