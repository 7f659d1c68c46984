//! # CETIS Models
//!
//! Domain models and DTOs for the CETIS portal API.
//!
//! Entities mirror the tables in `migrations/`, DTOs carry request bodies
//! with their validation rules, and filter params describe list queries.
//!
//! # Modules
//!
//! - [`ids`]: typed ID newtypes
//! - [`attendance`]: attendance records, statistics and the spreadsheet view
//! - [`students`]: students, the flattened profile and the credential
//! - [`reports`]: disciplinary reports
//! - [`auth`]: login request and response

pub mod attendance;
pub mod auth;
pub mod enrollments;
pub mod groups;
pub mod ids;
pub mod periods;
pub mod reports;
pub mod specialties;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

pub use cetis_auth::UserType;

pub use auth::{LoginRequest, LoginResponse, LoginUser};

pub use attendance::{
    Attendance, AttendanceCounts, AttendanceKind, AttendanceRecord, AttendanceSheet,
    AttendanceSheetRow, EnrolledGroup, GroupAttendanceStats, GroupOption, attendance_percentage,
};

pub use reports::{DetailedReport, Report, ReportKind, ReportSeverity, ReportStatus};

pub use students::{Student, StudentCredential, StudentProfile, StudentProfileRow};

pub use users::{User, join_name_parts};
