use cetis_core::{AppError, PaginationMeta, hash_password};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::users::model::{CreateUserDto, PaginatedUsersResponse, User, UserFilterParams};

const USER_COLUMNS: &str = "id, first_name, paternal_surname, maternal_surname, email, phone, \
                            birth_date, address, user_type, active, created_at";

pub struct UserService;

impl UserService {
    /// Creates a user with a bcrypt-hashed password. Emails are stored
    /// lowercased.
    #[instrument(skip(db, dto), fields(email = %dto.email, user_type = %dto.user_type))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let password_hash = hash_password(&dto.password)?;

        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users
                (first_name, paternal_surname, maternal_surname, email, password,
                 phone, birth_date, address, user_type, active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(dto.first_name.trim())
        .bind(dto.paternal_surname.trim())
        .bind(dto.maternal_surname.as_deref().map(str::trim))
        .bind(dto.email.trim().to_lowercase())
        .bind(password_hash)
        .bind(dto.phone)
        .bind(dto.birth_date)
        .bind(dto.address)
        .bind(dto.user_type)
        .bind(dto.active.unwrap_or(true))
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_insert(e, "User"))
    }

    #[instrument(skip(db))]
    pub async fn get_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE ($1::user_type IS NULL OR user_type = $1)",
        )
        .bind(filters.user_type)
        .fetch_one(db)
        .await?;

        let data = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE ($1::user_type IS NULL OR user_type = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(filters.user_type)
        .bind(filters.pagination.limit())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedUsersResponse {
            data,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use cetis_auth::UserType;
    use cetis_core::{PaginationParams, verify_password};

    fn dto(email: &str, user_type: UserType) -> CreateUserDto {
        CreateUserDto {
            first_name: "Ana".to_string(),
            paternal_surname: "López".to_string(),
            maternal_surname: None,
            email: email.to_string(),
            password: "secret123".to_string(),
            phone: None,
            birth_date: None,
            address: None,
            user_type,
            active: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_user_hashes_password(pool: PgPool) {
        let user = UserService::create_user(&pool, dto("Ana@CETIS27.edu.mx", UserType::Student))
            .await
            .unwrap();
        assert_eq!(user.email, "ana@cetis27.edu.mx");
        assert!(user.active);

        let hash: String = sqlx::query_scalar("SELECT password FROM users WHERE id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_ne!(hash, "secret123");
        assert!(verify_password("secret123", &hash).unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_email_and_type_filter(pool: PgPool) {
        UserService::create_user(&pool, dto("a@cetis27.edu.mx", UserType::Student))
            .await
            .unwrap();
        UserService::create_user(&pool, dto("b@cetis27.edu.mx", UserType::Teacher))
            .await
            .unwrap();

        let err = UserService::create_user(&pool, dto("a@cetis27.edu.mx", UserType::Admin))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);

        let teachers = UserService::get_users(
            &pool,
            UserFilterParams {
                user_type: Some(UserType::Teacher),
                pagination: PaginationParams::default(),
            },
        )
        .await
        .unwrap();
        assert_eq!(teachers.meta.total, 1);
        assert_eq!(teachers.data[0].email, "b@cetis27.edu.mx");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_email_unique_regardless_of_case(pool: PgPool) {
        UserService::create_user(&pool, dto("ana@cetis27.edu.mx", UserType::Student))
            .await
            .unwrap();

        let err = sqlx::query(
            "INSERT INTO users (first_name, paternal_surname, email, password, user_type)
             VALUES ('Ana', 'López', 'ANA@cetis27.edu.mx', 'x', 'estudiante')",
        )
        .execute(&pool)
        .await
        .unwrap_err();
        let db_err = err.as_database_error().unwrap();
        assert!(db_err.is_unique_violation());
        assert_eq!(db_err.constraint(), Some("users_email_lower_key"));
    }
}
