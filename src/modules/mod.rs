pub mod attendance;
pub mod auth;
pub mod enrollments;
pub mod groups;
pub mod periods;
pub mod reports;
pub mod specialties;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;
