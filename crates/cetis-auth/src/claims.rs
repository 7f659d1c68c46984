//! JWT claim structures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of account. Stored in the `user_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "user_type")]
pub enum UserType {
    #[serde(rename = "estudiante")]
    #[sqlx(rename = "estudiante")]
    Student,
    #[serde(rename = "admon")]
    #[sqlx(rename = "admon")]
    Admin,
    #[serde(rename = "docente")]
    #[sqlx(rename = "docente")]
    Teacher,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Student => "estudiante",
            UserType::Admin => "admon",
            UserType::Teacher => "docente",
        }
    }

    /// Administrators and teachers.
    pub fn is_staff(&self) -> bool {
        matches!(self, UserType::Admin | UserType::Teacher)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "estudiante" => Ok(UserType::Student),
            "admon" => Ok(UserType::Admin),
            "docente" => Ok(UserType::Teacher),
            other => Err(format!("unknown user type: {}", other)),
        }
    }
}

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    pub user_type: UserType,
    /// Student record of the user, when `user_type` is `estudiante`
    pub student_id: Option<i32>,
    /// Teacher record of the user, when `user_type` is `docente`
    pub teacher_id: Option<i32>,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
}
