//! # CETIS Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed origins for the mobile/web clients
//! - [`rate_limit`]: per-IP request budgets
//! - [`institution`]: school identity printed on credentials and QR codes
//! - [`database`]: PostgreSQL pool settings
//!
//! Every `from_env` falls back to a default when a variable is missing or
//! fails to parse, except `DATABASE_URL`.

pub mod cors;
pub mod database;
pub mod institution;
pub mod jwt;
pub mod rate_limit;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use institution::InstitutionConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
