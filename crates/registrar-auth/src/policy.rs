//! Authorization policy.
//!
//! Every resource handler asks the policy before touching storage. The
//! decision depends on the caller's role and, for students editing student
//! records, on whether the target is the caller's own record.
//!
//! | Resource | List | Read | Create | Update | Delete |
//! |----------|------|------|--------|--------|--------|
//! | Students | any | any | admin | admin, teacher, own record for students | admin |
//! | Teachers | admin | admin | admin | admin | admin |
//! | Groups | admin | admin | admin | admin | admin |
//! | Current user | - | any | - | - | - |
//!
//! With `restrict_student_listing` enabled, students only see their own
//! record when listing or reading students.

use std::future::Future;

use registrar_config::PolicyConfig;
use registrar_core::AppError;

use crate::claims::Claims;
use crate::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Students,
    Teachers,
    Groups,
    CurrentUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Read,
    Create,
    Update,
    Delete,
}

/// What a role may do with a resource before any lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    OwnRecordOnly,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    InsufficientPermissions,
    OwnRecordMissing,
    NotOwner,
    NotOwnerRead,
}

impl Denial {
    pub fn message(&self) -> &'static str {
        match self {
            Denial::InsufficientPermissions => "Insufficient permissions",
            Denial::OwnRecordMissing => "Student record not found",
            Denial::NotOwner => "Can only edit your own data",
            Denial::NotOwnerRead => "Can only view your own data",
        }
    }
}

impl From<Denial> for AppError {
    fn from(denial: Denial) -> Self {
        AppError::forbidden(denial.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(denial) => Err(denial.into()),
        }
    }
}

/// Which rows a student listing may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    OwnRecordOnly,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Policy {
    restrict_student_listing: bool,
}

impl From<&PolicyConfig> for Policy {
    fn from(config: &PolicyConfig) -> Self {
        Self {
            restrict_student_listing: config.restrict_student_listing,
        }
    }
}

impl Policy {
    pub fn new(restrict_student_listing: bool) -> Self {
        Self {
            restrict_student_listing,
        }
    }

    pub fn access(&self, role: Role, resource: Resource, operation: Operation) -> Access {
        use Operation::*;

        match (resource, operation, role) {
            (Resource::CurrentUser, Read, _) => Access::Granted,
            (Resource::CurrentUser, _, _) => Access::Denied,

            (Resource::Students, List, _) => Access::Granted,
            (Resource::Students, Read, Role::Student) if self.restrict_student_listing => {
                Access::OwnRecordOnly
            }
            (Resource::Students, Read, _) => Access::Granted,
            (Resource::Students, Update, Role::Admin | Role::Teacher) => Access::Granted,
            (Resource::Students, Update, Role::Student) => Access::OwnRecordOnly,
            (Resource::Students, Create | Delete, Role::Admin) => Access::Granted,
            (Resource::Students, Create | Delete, _) => Access::Denied,

            (Resource::Teachers | Resource::Groups, _, Role::Admin) => Access::Granted,
            (Resource::Teachers | Resource::Groups, _, _) => Access::Denied,
        }
    }

    pub fn student_list_scope(&self, claims: &Claims) -> ListScope {
        if self.restrict_student_listing && claims.role == Role::Student {
            ListScope::OwnRecordOnly
        } else {
            ListScope::All
        }
    }

    /// Decides whether `claims` may perform `operation` on `resource`.
    ///
    /// `target` is the record id from the path, if it parsed. `own_student`
    /// resolves a user id to the id of the student record linked to it and is
    /// only called for own-record checks.
    pub async fn authorize<F, Fut, E>(
        &self,
        claims: &Claims,
        resource: Resource,
        operation: Operation,
        target: Option<i64>,
        own_student: F,
    ) -> Result<Decision, E>
    where
        F: FnOnce(i64) -> Fut,
        Fut: Future<Output = Result<Option<i64>, E>>,
    {
        let decision = match self.access(claims.role, resource, operation) {
            Access::Granted => Decision::Allow,
            Access::Denied => Decision::Deny(Denial::InsufficientPermissions),
            Access::OwnRecordOnly => match own_student(claims.user_id).await? {
                None => Decision::Deny(Denial::OwnRecordMissing),
                Some(id) if Some(id) == target => Decision::Allow,
                Some(_) if operation == Operation::Read => Decision::Deny(Denial::NotOwnerRead),
                Some(_) => Decision::Deny(Denial::NotOwner),
            },
        };

        if let Decision::Deny(denial) = decision {
            tracing::info!(
                user_id = claims.user_id,
                role = %claims.role,
                ?resource,
                ?operation,
                reason = denial.message(),
                "Access denied"
            );
        }

        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn claims(user_id: i64, role: Role) -> Claims {
        Claims::new(user_id, "user@example.com", role, 1_700_000_000, 3600)
    }

    async fn owns(student_id: Option<i64>) -> Result<Option<i64>, Infallible> {
        Ok(student_id)
    }

    #[test]
    fn test_admin_only_resources() {
        let policy = Policy::default();
        for resource in [Resource::Teachers, Resource::Groups] {
            for operation in [
                Operation::List,
                Operation::Read,
                Operation::Create,
                Operation::Update,
                Operation::Delete,
            ] {
                assert_eq!(policy.access(Role::Admin, resource, operation), Access::Granted);
                assert_eq!(policy.access(Role::Teacher, resource, operation), Access::Denied);
                assert_eq!(policy.access(Role::Student, resource, operation), Access::Denied);
            }
        }
    }

    #[test]
    fn test_student_resource_matrix() {
        let policy = Policy::default();
        use Operation::*;

        assert_eq!(policy.access(Role::Student, Resource::Students, List), Access::Granted);
        assert_eq!(policy.access(Role::Student, Resource::Students, Read), Access::Granted);
        assert_eq!(policy.access(Role::Teacher, Resource::Students, Update), Access::Granted);
        assert_eq!(
            policy.access(Role::Student, Resource::Students, Update),
            Access::OwnRecordOnly
        );
        assert_eq!(policy.access(Role::Teacher, Resource::Students, Create), Access::Denied);
        assert_eq!(policy.access(Role::Teacher, Resource::Students, Delete), Access::Denied);
        assert_eq!(policy.access(Role::Admin, Resource::Students, Delete), Access::Granted);
    }

    #[test]
    fn test_current_user_readable_by_everyone() {
        let policy = Policy::default();
        for role in [Role::Admin, Role::Teacher, Role::Student] {
            assert_eq!(
                policy.access(role, Resource::CurrentUser, Operation::Read),
                Access::Granted
            );
        }
    }

    #[tokio::test]
    async fn test_student_may_update_own_record() {
        let decision = Policy::default()
            .authorize(
                &claims(10, Role::Student),
                Resource::Students,
                Operation::Update,
                Some(3),
                |_| owns(Some(3)),
            )
            .await
            .unwrap();
        assert_eq!(decision, Decision::Allow);
    }

    #[tokio::test]
    async fn test_student_may_not_update_other_record() {
        let decision = Policy::default()
            .authorize(
                &claims(10, Role::Student),
                Resource::Students,
                Operation::Update,
                Some(4),
                |_| owns(Some(3)),
            )
            .await
            .unwrap();
        assert_eq!(decision, Decision::Deny(Denial::NotOwner));
    }

    #[tokio::test]
    async fn test_student_without_record_is_denied() {
        let decision = Policy::default()
            .authorize(
                &claims(10, Role::Student),
                Resource::Students,
                Operation::Update,
                Some(3),
                |_| owns(None),
            )
            .await
            .unwrap();
        assert_eq!(decision, Decision::Deny(Denial::OwnRecordMissing));
    }

    #[tokio::test]
    async fn test_lookup_receives_caller_id_and_skipped_when_not_needed() {
        let policy = Policy::default();
        let decision = policy
            .authorize(
                &claims(77, Role::Student),
                Resource::Students,
                Operation::Update,
                Some(1),
                |user_id| {
                    assert_eq!(user_id, 77);
                    owns(Some(1))
                },
            )
            .await
            .unwrap();
        assert_eq!(decision, Decision::Allow);

        let mut looked_up = false;
        let decision = policy
            .authorize(
                &claims(1, Role::Admin),
                Resource::Students,
                Operation::Update,
                Some(1),
                |_| {
                    looked_up = true;
                    owns(None)
                },
            )
            .await
            .unwrap();
        assert_eq!(decision, Decision::Allow);
        assert!(!looked_up);
    }

    #[tokio::test]
    async fn test_unparsed_target_is_not_owned() {
        let decision = Policy::default()
            .authorize(
                &claims(10, Role::Student),
                Resource::Students,
                Operation::Update,
                None,
                |_| owns(Some(3)),
            )
            .await
            .unwrap();
        assert_eq!(decision, Decision::Deny(Denial::NotOwner));
    }

    #[test]
    fn test_restricted_listing_scope() {
        let open = Policy::default();
        let restricted = Policy::new(true);

        assert_eq!(open.student_list_scope(&claims(1, Role::Student)), ListScope::All);
        assert_eq!(
            restricted.student_list_scope(&claims(1, Role::Student)),
            ListScope::OwnRecordOnly
        );
        assert_eq!(restricted.student_list_scope(&claims(1, Role::Teacher)), ListScope::All);
        assert_eq!(
            restricted.access(Role::Student, Resource::Students, Operation::Read),
            Access::OwnRecordOnly
        );
    }

    #[tokio::test]
    async fn test_restricted_read_of_other_student() {
        let decision = Policy::new(true)
            .authorize(
                &claims(10, Role::Student),
                Resource::Students,
                Operation::Read,
                Some(4),
                |_| owns(Some(3)),
            )
            .await
            .unwrap();
        assert_eq!(decision, Decision::Deny(Denial::NotOwnerRead));
        assert_eq!(Denial::NotOwnerRead.message(), "Can only view your own data");
    }

    #[test]
    fn test_denial_maps_to_forbidden() {
        let err = Decision::Deny(Denial::NotOwner).into_result().unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
        assert_eq!(err.error.to_string(), "Can only edit your own data");
    }
}
