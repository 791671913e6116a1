//! Record store abstraction.
//!
//! Handlers only see `Arc<dyn RecordStore>`, so the PostgreSQL store and the
//! in-memory store are interchangeable.

use async_trait::async_trait;

use registrar_models::auth::NewAccount;
use registrar_models::groups::{Group, GroupDto};
use registrar_models::query::ListQuery;
use registrar_models::students::{CreateStudentDto, Student, UpdateStudentDto};
use registrar_models::teachers::{Teacher, TeacherDto};
use registrar_models::users::{User, UserProfile};

use crate::error::StoreError;

pub(crate) const USER_EXISTS: &str = "User with this email already exists";
pub(crate) const TEACHER_EXISTS: &str = "Teacher with this email already exists";
pub(crate) const TEACHER_EMAIL_TAKEN: &str = "Email already in use by another teacher";
pub(crate) const GROUP_EXISTS: &str = "Group with this code already exists";
pub(crate) const GROUP_CODE_TAKEN: &str = "Code already in use by another group";

/// One page of a filtered list plus the number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Creates an account without a linked record.
    async fn create_user(&self, account: NewAccount) -> Result<User, StoreError>;

    /// Creates an account together with its placeholder student or teacher
    /// record, atomically. Admin accounts get no linked record.
    async fn register_user(&self, account: NewAccount) -> Result<User, StoreError>;

    async fn list_students(&self, query: &ListQuery) -> Result<Page<Student>, StoreError>;

    async fn find_student(&self, id: i64) -> Result<Option<Student>, StoreError>;

    async fn find_student_by_user(&self, user_id: i64) -> Result<Option<Student>, StoreError>;

    async fn create_student(&self, dto: &CreateStudentDto) -> Result<Student, StoreError>;

    async fn update_student(&self, id: i64, dto: &UpdateStudentDto)
    -> Result<Student, StoreError>;

    async fn delete_student(&self, id: i64) -> Result<(), StoreError>;

    async fn list_teachers(&self, query: &ListQuery) -> Result<Page<Teacher>, StoreError>;

    async fn find_teacher(&self, id: i64) -> Result<Option<Teacher>, StoreError>;

    async fn create_teacher(&self, dto: &TeacherDto) -> Result<Teacher, StoreError>;

    async fn update_teacher(&self, id: i64, dto: &TeacherDto) -> Result<Teacher, StoreError>;

    async fn delete_teacher(&self, id: i64) -> Result<(), StoreError>;

    async fn list_groups(&self, query: &ListQuery) -> Result<Page<Group>, StoreError>;

    async fn find_group(&self, id: i64) -> Result<Option<Group>, StoreError>;

    async fn create_group(&self, dto: &GroupDto) -> Result<Group, StoreError>;

    async fn update_group(&self, id: i64, dto: &GroupDto) -> Result<Group, StoreError>;

    async fn delete_group(&self, id: i64) -> Result<(), StoreError>;

    /// Loads an account with its linked student or teacher record.
    async fn find_user_profile(&self, id: i64) -> Result<Option<UserProfile>, StoreError> {
        let Some(user) = self.find_user(id).await? else {
            return Ok(None);
        };

        let student = match user.student_id {
            Some(student_id) => self.find_student(student_id).await?,
            None => None,
        };
        let teacher = match user.teacher_id {
            Some(teacher_id) => self.find_teacher(teacher_id).await?,
            None => None,
        };

        Ok(Some(UserProfile::new(user, student, teacher)))
    }
}
