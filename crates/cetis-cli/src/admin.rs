//! Administrator accounts.

use cetis_auth::UserType;
use cetis_core::hash_password;
use cetis_models::ids::UserId;
use sqlx::PgPool;

pub struct NewAdmin<'a> {
    pub first_name: &'a str,
    pub paternal_surname: &'a str,
    pub maternal_surname: Option<&'a str>,
    pub email: &'a str,
    pub password: &'a str,
}

/// Inserts an `admon` user. Fails if the email is already taken.
pub async fn create_admin(
    db: &PgPool,
    admin: NewAdmin<'_>,
) -> Result<UserId, Box<dyn std::error::Error>> {
    if admin.password.len() < 8 {
        return Err("Password must be at least 8 characters".into());
    }

    let hashed_password = hash_password(admin.password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let user_id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (first_name, paternal_surname, maternal_surname, email, password, user_type)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(admin.first_name)
    .bind(admin.paternal_surname)
    .bind(admin.maternal_surname)
    .bind(admin.email.trim().to_lowercase())
    .bind(&hashed_password)
    .bind(UserType::Admin)
    .fetch_optional(db)
    .await?;

    user_id.ok_or_else(|| "User with this email already exists".into())
}
