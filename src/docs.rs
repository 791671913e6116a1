use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use registrar_auth::Role;
use registrar_core::{ErrorResponse, PaginationMeta};
use registrar_models::auth::{AuthResponse, LoginRequest, RegisterRequest};
use registrar_models::groups::{Group, GroupDto, PaginatedGroups};
use registrar_models::students::{
    CreateStudentDto, PaginatedStudents, Student, UpdateStudentDto,
};
use registrar_models::teachers::{PaginatedTeachers, Teacher, TeacherDto};
use registrar_models::users::UserProfile;

use crate::modules::system::controller::{HealthResponse, ServiceInfo};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::system::controller::root,
        crate::modules::system::controller::health,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_current_user,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::groups::controller::get_groups,
        crate::modules::groups::controller::get_group,
        crate::modules::groups::controller::create_group,
        crate::modules::groups::controller::update_group,
        crate::modules::groups::controller::delete_group,
    ),
    components(
        schemas(
            Role,
            UserProfile,
            LoginRequest,
            RegisterRequest,
            AuthResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            PaginatedStudents,
            Teacher,
            TeacherDto,
            PaginatedTeachers,
            Group,
            GroupDto,
            PaginatedGroups,
            PaginationMeta,
            ErrorResponse,
            ServiceInfo,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "System", description = "Service information and health"),
        (name = "Authentication", description = "Login, registration and the current user"),
        (name = "Students", description = "Student records"),
        (name = "Teachers", description = "Teacher records (admin only)"),
        (name = "Groups", description = "Study groups (admin only)")
    ),
    info(
        title = "Registrar API",
        version = "0.1.0",
        description = "REST API for students, teachers and groups with JWT authentication and role-based access control.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
