//! # CETIS Portal API
//!
//! REST backend of the CETIS student portal, built with Axum and PostgreSQL.
//! Students read their digital credential, their attendance per group and
//! the disciplinary reports filed about them; teachers and administrators
//! record attendance, file and review reports and manage the school
//! catalogue.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Bearer token extractor and user-type guards
//! ├── modules/          # Feature modules
//! │   ├── auth/         # Login
//! │   ├── users/        # User accounts
//! │   ├── specialties/  # Especialidades
//! │   ├── subjects/     # Materias
//! │   ├── periods/      # Periodos and the active period
//! │   ├── teachers/     # Docentes
//! │   ├── groups/       # Grupos
//! │   ├── enrollments/  # Inscripciones
//! │   ├── attendance/   # Asistencias, per-group statistics and sheet
//! │   ├── reports/      # Reportes
//! │   └── students/     # Estudiantes, profile and credential
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Tracing subscriber and request logging
//! ├── metrics.rs        # Prometheus metrics
//! └── router.rs         # Application router
//! ```
//!
//! Each feature module has the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: SQL and business logic
//! - `model.rs`: re-exports of the entities and DTOs from `cetis-models`
//! - `router.rs`: Axum router
//!
//! ## Access rules
//!
//! | User type | Access |
//! |-----------|--------|
//! | `admon` | Everything |
//! | `docente` | Reads, plus recording attendance and filing/reviewing reports |
//! | `estudiante` | Only their own student record and the data hanging off it |
//!
//! ## Workspace crates
//!
//! - [`cetis_core`]: `AppError`, pagination, password hashing, Spanish dates
//! - [`cetis_config`]: environment configuration
//! - [`cetis_db`]: pool and migrations
//! - [`cetis_auth`]: JWT claims and tokens
//! - [`cetis_models`]: entities and DTOs

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use cetis_auth;
pub use cetis_config;
pub use cetis_core;
pub use cetis_db;
pub use cetis_models;
