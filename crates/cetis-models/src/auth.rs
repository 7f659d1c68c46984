//! Login request and response bodies.

use cetis_auth::UserType;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{StudentId, UserId};

/// Both fields are optional at the type level so that a missing field is
/// reported as a 400 by the login handler rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ana.lopez@cetis27.edu.mx")]
    pub email: Option<String>,
    #[schema(example = "secret123")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub user_id: UserId,
    pub email: String,
    pub user_type: UserType,
    pub student_id: Option<StudentId>,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}
