use cetis_config::{CorsConfig, InstitutionConfig, JwtConfig, RateLimitConfig};
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub institution: InstitutionConfig,
}

impl AppState {
    /// Builds the state around `db`, reading everything else from the
    /// environment.
    pub fn from_env(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            rate_limit_config: RateLimitConfig::from_env(),
            institution: InstitutionConfig::from_env(),
        }
    }
}
