//! In-memory record store.
//!
//! Mirrors the PostgreSQL store's rules: unique emails and codes, links
//! cleared on delete, and id ordering as the tie-break for sorting.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use registrar_auth::Role;
use registrar_models::auth::NewAccount;
use registrar_models::groups::{Group, GroupDto};
use registrar_models::query::{Filter, ListQuery};
use registrar_models::students::{CreateStudentDto, Student, UpdateStudentDto};
use registrar_models::teachers::{Teacher, TeacherDto};
use registrar_models::users::User;

use crate::error::{GROUP_DOES_NOT_EXIST, StoreError};
use crate::store::{
    GROUP_CODE_TAKEN, GROUP_EXISTS, Page, RecordStore, TEACHER_EMAIL_TAKEN, TEACHER_EXISTS,
    USER_EXISTS,
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    students: BTreeMap<i64, Student>,
    teachers: BTreeMap<i64, Teacher>,
    groups: BTreeMap<i64, Group>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_group(&self, group_id: Option<i64>) -> Result<(), StoreError> {
        match group_id {
            Some(id) if !self.groups.contains_key(&id) => Err(StoreError::InvalidReference(
                GROUP_DOES_NOT_EXIST.to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn teacher_email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.teachers
            .values()
            .any(|t| t.email == email && Some(t.id) != except)
    }

    fn group_code_taken(&self, code: &str, except: Option<i64>) -> bool {
        self.groups
            .values()
            .any(|g| g.code == code && Some(g.id) != except)
    }
}

/// Value a record is sorted by. `None` orders before any value, as the
/// PostgreSQL store's `NULLS FIRST` / `NULLS LAST` ordering does.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Int(Option<i64>),
    Text(Option<&'a str>),
    Time(DateTime<Utc>),
}

fn paginate<'a, T, M, K>(
    rows: impl Iterator<Item = &'a T>,
    query: &ListQuery,
    field: M,
    key: K,
) -> Page<T>
where
    T: Clone + 'a,
    M: Fn(&'a T, &str) -> Option<&'a str>,
    K: Fn(&'a T, &str) -> SortValue<'a>,
{
    let mut matching: Vec<&'a T> = rows
        .filter(|row: &&'a T| {
            query
                .filters
                .iter()
                .all(|f: &Filter| f.matches(field(*row, f.column)))
        })
        .filter(|row: &&'a T| {
            query
                .only_id
                .is_none_or(|id| key(*row, "id") == SortValue::Int(Some(id)))
        })
        .collect();

    // Stable sort over id-ordered rows keeps ties in id order.
    matching.sort_by(|a: &&'a T, b: &&'a T| {
        let ordering: Ordering = key(*a, query.sort.field).cmp(&key(*b, query.sort.field));
        if query.sort.descending {
            ordering.reverse()
        } else {
            ordering
        }
    });

    let total = matching.len() as i64;
    let items = matching
        .into_iter()
        .skip(query.offset.max(0) as usize)
        .take(query.limit.max(0) as usize)
        .cloned()
        .collect();

    Page { items, total }
}

fn student_text<'a>(s: &'a Student, column: &str) -> Option<&'a str> {
    match column {
        "name" => Some(&s.name),
        "surname" => Some(&s.surname),
        "email" => s.email.as_deref(),
        _ => None,
    }
}

fn student_key<'a>(s: &'a Student, field: &str) -> SortValue<'a> {
    match field {
        "name" => SortValue::Text(Some(&s.name)),
        "surname" => SortValue::Text(Some(&s.surname)),
        "email" => SortValue::Text(s.email.as_deref()),
        "group_id" => SortValue::Int(s.group_id),
        "user_id" => SortValue::Int(s.user_id),
        "created_at" => SortValue::Time(s.created_at),
        "updated_at" => SortValue::Time(s.updated_at),
        _ => SortValue::Int(Some(s.id)),
    }
}

fn teacher_text<'a>(t: &'a Teacher, column: &str) -> Option<&'a str> {
    match column {
        "name" => Some(&t.name),
        "surname" => Some(&t.surname),
        "email" => Some(&t.email),
        _ => None,
    }
}

fn teacher_key<'a>(t: &'a Teacher, field: &str) -> SortValue<'a> {
    match field {
        "name" => SortValue::Text(Some(&t.name)),
        "surname" => SortValue::Text(Some(&t.surname)),
        "email" => SortValue::Text(Some(&t.email)),
        "phone" => SortValue::Text(t.phone.as_deref()),
        "user_id" => SortValue::Int(t.user_id),
        "created_at" => SortValue::Time(t.created_at),
        "updated_at" => SortValue::Time(t.updated_at),
        _ => SortValue::Int(Some(t.id)),
    }
}

fn group_text<'a>(g: &'a Group, column: &str) -> Option<&'a str> {
    match column {
        "name" => Some(&g.name),
        "code" => Some(&g.code),
        _ => None,
    }
}

fn group_key<'a>(g: &'a Group, field: &str) -> SortValue<'a> {
    match field {
        "name" => SortValue::Text(Some(&g.name)),
        "code" => SortValue::Text(Some(&g.code)),
        "created_at" => SortValue::Time(g.created_at),
        "updated_at" => SortValue::Time(g.updated_at),
        _ => SortValue::Int(Some(g.id)),
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, account: NewAccount) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == account.email) {
            return Err(StoreError::Conflict(USER_EXISTS.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            student_id: None,
            teacher_id: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn register_user(&self, account: NewAccount) -> Result<User, StoreError> {
        // The write guard is held for the whole registration.
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == account.email) {
            return Err(StoreError::Conflict(USER_EXISTS.to_string()));
        }
        if account.role == Role::Teacher && tables.teacher_email_taken(&account.email, None) {
            return Err(StoreError::Conflict(TEACHER_EXISTS.to_string()));
        }

        let now = Utc::now();
        let user_id = tables.next_id();
        let mut user = User {
            id: user_id,
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            role: account.role,
            student_id: None,
            teacher_id: None,
            created_at: now,
            updated_at: now,
        };

        if let Some(surname) = account.placeholder_surname() {
            let id = tables.next_id();
            match account.role {
                Role::Student => {
                    tables.students.insert(
                        id,
                        Student {
                            id,
                            name: NewAccount::PLACEHOLDER_NAME.to_string(),
                            surname: surname.to_string(),
                            email: Some(account.email.clone()),
                            group_id: None,
                            user_id: Some(user_id),
                            created_at: now,
                            updated_at: now,
                        },
                    );
                    user.student_id = Some(id);
                }
                Role::Teacher => {
                    tables.teachers.insert(
                        id,
                        Teacher {
                            id,
                            name: NewAccount::PLACEHOLDER_NAME.to_string(),
                            surname: surname.to_string(),
                            email: account.email.clone(),
                            phone: None,
                            user_id: Some(user_id),
                            created_at: now,
                            updated_at: now,
                        },
                    );
                    user.teacher_id = Some(id);
                }
                Role::Admin => {}
            }
        }

        tables.users.insert(user_id, user.clone());
        Ok(user)
    }

    async fn list_students(&self, query: &ListQuery) -> Result<Page<Student>, StoreError> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.students.values(), query, student_text, student_key))
    }

    async fn find_student(&self, id: i64) -> Result<Option<Student>, StoreError> {
        Ok(self.tables.read().await.students.get(&id).cloned())
    }

    async fn find_student_by_user(&self, user_id: i64) -> Result<Option<Student>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .students
            .values()
            .find(|s| s.user_id == Some(user_id))
            .cloned())
    }

    async fn create_student(&self, dto: &CreateStudentDto) -> Result<Student, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_group(dto.group_id)?;

        let now = Utc::now();
        let student = Student {
            id: tables.next_id(),
            name: dto.name.trim().to_string(),
            surname: dto.surname.trim().to_string(),
            email: dto.email.clone(),
            group_id: dto.group_id,
            user_id: None,
            created_at: now,
            updated_at: now,
        };
        tables.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update_student(
        &self,
        id: i64,
        dto: &UpdateStudentDto,
    ) -> Result<Student, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_group(dto.group_id)?;

        let student = tables
            .students
            .get_mut(&id)
            .ok_or(StoreError::NotFound("Student"))?;
        student.name = dto.name.trim().to_string();
        student.surname = dto.surname.trim().to_string();
        if let Some(email) = &dto.email {
            student.email = Some(email.clone());
        }
        if let Some(group_id) = dto.group_id {
            student.group_id = Some(group_id);
        }
        student.updated_at = Utc::now();
        Ok(student.clone())
    }

    async fn delete_student(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .students
            .remove(&id)
            .ok_or(StoreError::NotFound("Student"))?;
        for user in tables.users.values_mut() {
            if user.student_id == Some(id) {
                user.student_id = None;
            }
        }
        Ok(())
    }

    async fn list_teachers(&self, query: &ListQuery) -> Result<Page<Teacher>, StoreError> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.teachers.values(), query, teacher_text, teacher_key))
    }

    async fn find_teacher(&self, id: i64) -> Result<Option<Teacher>, StoreError> {
        Ok(self.tables.read().await.teachers.get(&id).cloned())
    }

    async fn create_teacher(&self, dto: &TeacherDto) -> Result<Teacher, StoreError> {
        let mut tables = self.tables.write().await;
        let email = dto.email.trim();
        if tables.teacher_email_taken(email, None) {
            return Err(StoreError::Conflict(TEACHER_EXISTS.to_string()));
        }

        let now = Utc::now();
        let teacher = Teacher {
            id: tables.next_id(),
            name: dto.name.trim().to_string(),
            surname: dto.surname.trim().to_string(),
            email: email.to_string(),
            phone: dto.phone.clone(),
            user_id: None,
            created_at: now,
            updated_at: now,
        };
        tables.teachers.insert(teacher.id, teacher.clone());
        Ok(teacher)
    }

    async fn update_teacher(&self, id: i64, dto: &TeacherDto) -> Result<Teacher, StoreError> {
        let mut tables = self.tables.write().await;
        let email = dto.email.trim();
        if !tables.teachers.contains_key(&id) {
            return Err(StoreError::NotFound("Teacher"));
        }
        if tables.teacher_email_taken(email, Some(id)) {
            return Err(StoreError::Conflict(TEACHER_EMAIL_TAKEN.to_string()));
        }

        let teacher = tables
            .teachers
            .get_mut(&id)
            .ok_or(StoreError::NotFound("Teacher"))?;
        teacher.name = dto.name.trim().to_string();
        teacher.surname = dto.surname.trim().to_string();
        teacher.email = email.to_string();
        teacher.phone = dto.phone.clone();
        teacher.updated_at = Utc::now();
        Ok(teacher.clone())
    }

    async fn delete_teacher(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .teachers
            .remove(&id)
            .ok_or(StoreError::NotFound("Teacher"))?;
        for user in tables.users.values_mut() {
            if user.teacher_id == Some(id) {
                user.teacher_id = None;
            }
        }
        Ok(())
    }

    async fn list_groups(&self, query: &ListQuery) -> Result<Page<Group>, StoreError> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.groups.values(), query, group_text, group_key))
    }

    async fn find_group(&self, id: i64) -> Result<Option<Group>, StoreError> {
        Ok(self.tables.read().await.groups.get(&id).cloned())
    }

    async fn create_group(&self, dto: &GroupDto) -> Result<Group, StoreError> {
        let mut tables = self.tables.write().await;
        let code = dto.code.trim();
        if tables.group_code_taken(code, None) {
            return Err(StoreError::Conflict(GROUP_EXISTS.to_string()));
        }

        let now = Utc::now();
        let group = Group {
            id: tables.next_id(),
            name: dto.name.trim().to_string(),
            code: code.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn update_group(&self, id: i64, dto: &GroupDto) -> Result<Group, StoreError> {
        let mut tables = self.tables.write().await;
        let code = dto.code.trim();
        if !tables.groups.contains_key(&id) {
            return Err(StoreError::NotFound("Group"));
        }
        if tables.group_code_taken(code, Some(id)) {
            return Err(StoreError::Conflict(GROUP_CODE_TAKEN.to_string()));
        }

        let group = tables
            .groups
            .get_mut(&id)
            .ok_or(StoreError::NotFound("Group"))?;
        group.name = dto.name.trim().to_string();
        group.code = code.to_string();
        group.updated_at = Utc::now();
        Ok(group.clone())
    }

    async fn delete_group(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .groups
            .remove(&id)
            .ok_or(StoreError::NotFound("Group"))?;
        for student in tables.students.values_mut() {
            if student.group_id == Some(id) {
                student.group_id = None;
            }
        }
        Ok(())
    }
}
