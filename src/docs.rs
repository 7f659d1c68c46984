use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use cetis_core::{PaginationMeta, PaginationParams};

use crate::modules::attendance::model::{
    Attendance, AttendanceCounts, AttendanceKind, AttendanceRecord, AttendanceSheet,
    AttendanceSheetRow, CreateAttendanceDto, GroupAttendanceStats, GroupOption,
    PaginatedAttendanceResponse,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, LoginUser};
use crate::modules::enrollments::model::{
    CreateEnrollmentDto, Enrollment, PaginatedEnrollmentsResponse,
};
use crate::modules::groups::model::{CreateGroupDto, Group, PaginatedGroupsResponse};
use crate::modules::periods::model::{
    ActivePeriodResponse, CreatePeriodDto, PaginatedPeriodsResponse, Period,
};
use crate::modules::reports::model::{
    CreateReportDto, DetailedReport, PaginatedReportsResponse, Report, ReportKind,
    ReportSeverity, ReportStatus, ReviewReportDto,
};
use crate::modules::specialties::model::{
    CreateSpecialtyDto, PaginatedSpecialtiesResponse, Specialty,
};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentCredential, StudentProfile,
};
use crate::modules::subjects::model::{CreateSubjectDto, PaginatedSubjectsResponse, Subject};
use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherWithUser,
};
use crate::modules::users::model::{CreateUserDto, PaginatedUsersResponse, User};
use cetis_auth::UserType;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::specialties::controller::create_specialty,
        crate::modules::specialties::controller::get_specialties,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::periods::controller::create_period,
        crate::modules::periods::controller::get_periods,
        crate::modules::periods::controller::get_active_period,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::groups::controller::create_group,
        crate::modules::groups::controller::get_groups,
        crate::modules::enrollments::controller::create_enrollment,
        crate::modules::enrollments::controller::get_enrollments,
        crate::modules::attendance::controller::create_attendance,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::reports::controller::create_report,
        crate::modules::reports::controller::get_reports,
        crate::modules::reports::controller::review_report,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::get_student_credential,
        crate::modules::students::controller::get_attendance_stats,
        crate::modules::students::controller::get_attendance_groups,
        crate::modules::students::controller::get_attendance_sheet,
        crate::modules::students::controller::get_student_reports,
    ),
    components(
        schemas(
            ErrorResponse,
            LoginRequest,
            LoginResponse,
            LoginUser,
            UserType,
            User,
            CreateUserDto,
            PaginatedUsersResponse,
            Specialty,
            CreateSpecialtyDto,
            PaginatedSpecialtiesResponse,
            Subject,
            CreateSubjectDto,
            PaginatedSubjectsResponse,
            Period,
            CreatePeriodDto,
            ActivePeriodResponse,
            PaginatedPeriodsResponse,
            Teacher,
            TeacherWithUser,
            CreateTeacherDto,
            PaginatedTeachersResponse,
            Group,
            CreateGroupDto,
            PaginatedGroupsResponse,
            Enrollment,
            CreateEnrollmentDto,
            PaginatedEnrollmentsResponse,
            Attendance,
            AttendanceKind,
            CreateAttendanceDto,
            PaginatedAttendanceResponse,
            AttendanceRecord,
            AttendanceCounts,
            GroupAttendanceStats,
            GroupOption,
            AttendanceSheet,
            AttendanceSheetRow,
            Report,
            ReportKind,
            ReportSeverity,
            ReportStatus,
            CreateReportDto,
            ReviewReportDto,
            DetailedReport,
            PaginatedReportsResponse,
            Student,
            CreateStudentDto,
            StudentProfile,
            StudentCredential,
            PaginatedStudentsResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login"),
        (name = "Users", description = "User accounts (admin only)"),
        (name = "Specialties", description = "Technical specialties (especialidades)"),
        (name = "Subjects", description = "Subjects (materias)"),
        (name = "Periods", description = "School periods and the active period"),
        (name = "Teachers", description = "Teachers (docentes)"),
        (name = "Groups", description = "Class groups of a subject in a period"),
        (name = "Enrollments", description = "Student enrollments in groups"),
        (name = "Attendance", description = "Attendance records"),
        (name = "Reports", description = "Disciplinary reports"),
        (name = "Students", description = "Student profiles, credential, attendance views and reports")
    ),
    info(
        title = "CETIS Portal API",
        version = "0.1.0",
        description = "Backend of the CETIS student portal: credential, attendance and disciplinary reports.",
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
