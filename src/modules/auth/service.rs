use anyhow::anyhow;
use cetis_auth::{TokenSubject, UserType, create_access_token};
use cetis_config::JwtConfig;
use cetis_core::{AppError, verify_password};
use cetis_models::ids::{StudentId, TeacherId, UserId};
use cetis_models::users::join_name_parts;
use sqlx::PgPool;
use tracing::{instrument, warn};

use crate::metrics::{track_jwt_issued, track_login_failure, track_login_success};

use super::model::{LoginRequest, LoginResponse, LoginUser};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(sqlx::FromRow)]
struct UserWithPassword {
    id: UserId,
    email: String,
    password: String,
    user_type: UserType,
    active: bool,
    first_name: String,
    paternal_surname: String,
    maternal_surname: Option<String>,
}

/// Returns the normalized email and the password, or 400 when either is
/// missing or blank.
pub fn require_credentials(dto: &LoginRequest) -> Result<(String, &str), AppError> {
    let email = dto
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());
    let password = dto.password.as_deref().filter(|p| !p.is_empty());

    match (email, password) {
        (Some(email), Some(password)) => Ok((email.to_lowercase(), password)),
        _ => Err(AppError::bad_request(anyhow!(
            "Email and password are required"
        ))),
    }
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let (email, password) = require_credentials(&dto)?;

        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, email, password, user_type, active, first_name, paternal_surname, maternal_surname
             FROM users WHERE lower(email) = $1",
        )
        .bind(&email)
        .fetch_optional(db)
        .await?;

        let Some(user) = user else {
            track_login_failure("unknown_user");
            return Err(AppError::unauthorized(anyhow!(INVALID_CREDENTIALS)));
        };

        if !user.active {
            warn!(user_id = %user.id, "Login attempt on inactive account");
            track_login_failure("inactive");
            return Err(AppError::unauthorized(anyhow!(INVALID_CREDENTIALS)));
        }

        if !verify_password(password, &user.password)? {
            track_login_failure("invalid_password");
            return Err(AppError::unauthorized(anyhow!(INVALID_CREDENTIALS)));
        }

        let student_id = sqlx::query_scalar::<_, StudentId>(
            "SELECT id FROM students WHERE user_id = $1",
        )
        .bind(user.id)
        .fetch_optional(db)
        .await?;

        let teacher_id = sqlx::query_scalar::<_, TeacherId>(
            "SELECT id FROM teachers WHERE user_id = $1",
        )
        .bind(user.id)
        .fetch_optional(db)
        .await?;

        let token = create_access_token(
            TokenSubject {
                user_id: user.id.into_inner(),
                email: &user.email,
                user_type: user.user_type,
                student_id: student_id.map(StudentId::into_inner),
                teacher_id: teacher_id.map(TeacherId::into_inner),
            },
            jwt_config,
        )?;
        track_jwt_issued();
        track_login_success(user.user_type.as_str());

        Ok(LoginResponse {
            token,
            user: LoginUser {
                user_id: user.id,
                full_name: join_name_parts(&[
                    Some(user.first_name.as_str()),
                    Some(user.paternal_surname.as_str()),
                    user.maternal_surname.as_deref(),
                ]),
                email: user.email,
                user_type: user.user_type,
                student_id,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: Option<&str>, password: Option<&str>) -> LoginRequest {
        LoginRequest {
            email: email.map(String::from),
            password: password.map(String::from),
        }
    }

    #[test]
    fn test_credentials_are_normalized() {
        let dto = request(Some("  Ana.Lopez@CETIS27.edu.mx "), Some("secret123"));
        let (email, password) = require_credentials(&dto).unwrap();
        assert_eq!(email, "ana.lopez@cetis27.edu.mx");
        assert_eq!(password, "secret123");
    }

    #[test]
    fn test_missing_or_blank_credentials_are_bad_request() {
        for dto in [
            request(None, Some("secret123")),
            request(Some("ana@cetis27.edu.mx"), None),
            request(Some("   "), Some("secret123")),
            request(Some("ana@cetis27.edu.mx"), Some("")),
        ] {
            let err = require_credentials(&dto).unwrap_err();
            assert_eq!(err.status.as_u16(), 400);
            assert_eq!(err.error.to_string(), "Email and password are required");
        }
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use cetis_core::hash_password;

    async fn insert_user(pool: &PgPool, active: bool) {
        sqlx::query(
            r#"INSERT INTO users (first_name, paternal_surname, email, password, user_type, active)
               VALUES ('Ana', 'López', 'ana@cetis27.edu.mx', $1, 'estudiante', $2)"#,
        )
        .bind(hash_password("secret123").unwrap())
        .bind(active)
        .execute(pool)
        .await
        .unwrap();
    }

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            token_expiry: 3600,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_login_is_case_insensitive_on_email(pool: PgPool) {
        insert_user(&pool, true).await;
        let dto = LoginRequest {
            email: Some("ANA@cetis27.edu.mx".to_string()),
            password: Some("secret123".to_string()),
        };

        let response = AuthService::login_user(&pool, dto, &config()).await.unwrap();
        assert_eq!(response.user.full_name, "Ana López");
        assert_eq!(response.user.user_type, UserType::Student);
        assert!(response.user.student_id.is_none());
        assert!(!response.token.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_inactive_and_wrong_password_are_unauthorized(pool: PgPool) {
        insert_user(&pool, false).await;
        let dto = LoginRequest {
            email: Some("ana@cetis27.edu.mx".to_string()),
            password: Some("secret123".to_string()),
        };
        let err = AuthService::login_user(&pool, dto, &config()).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 401);

        let dto = LoginRequest {
            email: Some("nadie@cetis27.edu.mx".to_string()),
            password: Some("secret123".to_string()),
        };
        let err = AuthService::login_user(&pool, dto, &config()).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }
}
