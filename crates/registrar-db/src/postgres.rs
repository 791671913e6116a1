//! PostgreSQL record store.
//!
//! List queries are assembled with [`QueryBuilder`]. Column names come from
//! the whitelists in `registrar_models`, values are always bound.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use registrar_auth::Role;
use registrar_config::DatabaseConfig;
use registrar_models::auth::NewAccount;
use registrar_models::groups::{Group, GroupDto};
use registrar_models::query::{ListQuery, SortSpec};
use registrar_models::students::{CreateStudentDto, Student, UpdateStudentDto};
use registrar_models::teachers::{Teacher, TeacherDto};
use registrar_models::users::User;

use crate::error::StoreError;
use crate::store::{
    GROUP_CODE_TAKEN, GROUP_EXISTS, Page, RecordStore, TEACHER_EMAIL_TAKEN, TEACHER_EXISTS,
    USER_EXISTS,
};

const USER_COLUMNS: &str =
    "id, email, password_hash, role, student_id, teacher_id, created_at, updated_at";
const STUDENT_COLUMNS: &str = "id, name, surname, email, group_id, user_id, created_at, updated_at";
const TEACHER_COLUMNS: &str = "id, name, surname, email, phone, user_id, created_at, updated_at";
const GROUP_COLUMNS: &str = "id, name, code, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&config.url)
            .await?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    async fn list<T>(
        &self,
        table: &str,
        columns: &str,
        query: &ListQuery,
    ) -> Result<Page<T>, StoreError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut count = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {table}"));
        push_conditions(&mut count, query);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {columns} FROM {table}"));
        push_conditions(&mut select, query);
        select.push(order_clause(&query.sort));
        select
            .push(" LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        let items = select.build_query_as::<T>().fetch_all(&self.pool).await?;

        Ok(Page { items, total })
    }

    async fn delete_from(
        &self,
        table: &str,
        entity: &'static str,
        id: i64,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(entity));
        }
        Ok(())
    }
}

/// NULLs sort as the smallest value in both directions, ties by id.
fn order_clause(sort: &SortSpec) -> String {
    let direction = if sort.descending {
        "DESC NULLS LAST"
    } else {
        "ASC NULLS FIRST"
    };
    format!(" ORDER BY {} {direction}, id ASC", sort.field)
}

fn push_conditions(builder: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    let mut separator = " WHERE ";
    for filter in &query.filters {
        builder
            .push(separator)
            .push(filter.column)
            .push(" ILIKE ")
            .push_bind(format!("%{}%", escape_like(&filter.value)));
        separator = " AND ";
    }
    if let Some(id) = query.only_id {
        builder.push(separator).push("id = ").push_bind(id);
    }
}

/// Escapes LIKE wildcards so filters match literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl RecordStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self, account), fields(email = %account.email, role = %account.role))]
    async fn create_user(&self, account: NewAccount) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        ))
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::unique(e, USER_EXISTS))
    }

    #[instrument(skip(self, account), fields(email = %account.email, role = %account.role))]
    async fn register_user(&self, account: NewAccount) -> Result<User, StoreError> {
        let mut tx = self.pool.begin().await?;

        let (student_id, teacher_id) = match (account.role, account.placeholder_surname()) {
            (Role::Student, Some(surname)) => {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO students (name, surname, email) VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(NewAccount::PLACEHOLDER_NAME)
                .bind(surname)
                .bind(&account.email)
                .fetch_one(&mut *tx)
                .await?;
                (Some(id), None)
            }
            (Role::Teacher, Some(surname)) => {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO teachers (name, surname, email) VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(NewAccount::PLACEHOLDER_NAME)
                .bind(surname)
                .bind(&account.email)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| StoreError::unique(e, TEACHER_EXISTS))?;
                (None, Some(id))
            }
            _ => (None, None),
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, role, student_id, teacher_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        ))
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(student_id)
        .bind(teacher_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StoreError::unique(e, USER_EXISTS))?;

        if let Some(student_id) = student_id {
            sqlx::query("UPDATE students SET user_id = $1 WHERE id = $2")
                .bind(user.id)
                .bind(student_id)
                .execute(&mut *tx)
                .await?;
        }
        if let Some(teacher_id) = teacher_id {
            sqlx::query("UPDATE teachers SET user_id = $1 WHERE id = $2")
                .bind(user.id)
                .bind(teacher_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list_students(&self, query: &ListQuery) -> Result<Page<Student>, StoreError> {
        self.list("students", STUDENT_COLUMNS, query).await
    }

    #[instrument(skip(self))]
    async fn find_student(&self, id: i64) -> Result<Option<Student>, StoreError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(student)
    }

    #[instrument(skip(self))]
    async fn find_student_by_user(&self, user_id: i64) -> Result<Option<Student>, StoreError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(student)
    }

    #[instrument(skip(self, dto))]
    async fn create_student(&self, dto: &CreateStudentDto) -> Result<Student, StoreError> {
        sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (name, surname, email, group_id) VALUES ($1, $2, $3, $4) \
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(dto.surname.trim())
        .bind(&dto.email)
        .bind(dto.group_id)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::group_reference)
    }

    #[instrument(skip(self, dto))]
    async fn update_student(
        &self,
        id: i64,
        dto: &UpdateStudentDto,
    ) -> Result<Student, StoreError> {
        sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET name = $1, surname = $2, \
             email = COALESCE($3, email), group_id = COALESCE($4, group_id), updated_at = NOW() \
             WHERE id = $5 RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(dto.surname.trim())
        .bind(&dto.email)
        .bind(dto.group_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::group_reference)?
        .ok_or(StoreError::NotFound("Student"))
    }

    #[instrument(skip(self))]
    async fn delete_student(&self, id: i64) -> Result<(), StoreError> {
        self.delete_from("students", "Student", id).await
    }

    #[instrument(skip(self))]
    async fn list_teachers(&self, query: &ListQuery) -> Result<Page<Teacher>, StoreError> {
        self.list("teachers", TEACHER_COLUMNS, query).await
    }

    #[instrument(skip(self))]
    async fn find_teacher(&self, id: i64) -> Result<Option<Teacher>, StoreError> {
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(teacher)
    }

    #[instrument(skip(self, dto))]
    async fn create_teacher(&self, dto: &TeacherDto) -> Result<Teacher, StoreError> {
        sqlx::query_as::<_, Teacher>(&format!(
            "INSERT INTO teachers (name, surname, email, phone) VALUES ($1, $2, $3, $4) \
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(dto.surname.trim())
        .bind(dto.email.trim())
        .bind(&dto.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::unique(e, TEACHER_EXISTS))
    }

    #[instrument(skip(self, dto))]
    async fn update_teacher(&self, id: i64, dto: &TeacherDto) -> Result<Teacher, StoreError> {
        sqlx::query_as::<_, Teacher>(&format!(
            "UPDATE teachers SET name = $1, surname = $2, email = $3, phone = $4, \
             updated_at = NOW() WHERE id = $5 RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(dto.surname.trim())
        .bind(dto.email.trim())
        .bind(&dto.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::unique(e, TEACHER_EMAIL_TAKEN))?
        .ok_or(StoreError::NotFound("Teacher"))
    }

    #[instrument(skip(self))]
    async fn delete_teacher(&self, id: i64) -> Result<(), StoreError> {
        self.delete_from("teachers", "Teacher", id).await
    }

    #[instrument(skip(self))]
    async fn list_groups(&self, query: &ListQuery) -> Result<Page<Group>, StoreError> {
        self.list("groups", GROUP_COLUMNS, query).await
    }

    #[instrument(skip(self))]
    async fn find_group(&self, id: i64) -> Result<Option<Group>, StoreError> {
        let group = sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(group)
    }

    #[instrument(skip(self, dto))]
    async fn create_group(&self, dto: &GroupDto) -> Result<Group, StoreError> {
        sqlx::query_as::<_, Group>(&format!(
            "INSERT INTO groups (name, code) VALUES ($1, $2) RETURNING {GROUP_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(dto.code.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::unique(e, GROUP_EXISTS))
    }

    #[instrument(skip(self, dto))]
    async fn update_group(&self, id: i64, dto: &GroupDto) -> Result<Group, StoreError> {
        sqlx::query_as::<_, Group>(&format!(
            "UPDATE groups SET name = $1, code = $2, updated_at = NOW() WHERE id = $3 \
             RETURNING {GROUP_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(dto.code.trim())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::unique(e, GROUP_CODE_TAKEN))?
        .ok_or(StoreError::NotFound("Group"))
    }

    #[instrument(skip(self))]
    async fn delete_group(&self, id: i64) -> Result<(), StoreError> {
        self.delete_from("groups", "Group", id).await
    }
}
