use anyhow::anyhow;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use cetis_auth::{Claims, UserType, verify_token};
use cetis_core::AppError;
use cetis_models::ids::{StudentId, TeacherId, UserId};

use crate::state::AppState;

/// Extractor that validates the bearer token and exposes its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .sub
            .parse::<UserId>()
            .map_err(|_| AppError::unauthorized(anyhow!("Invalid user ID in token")))
    }

    pub fn user_type(&self) -> UserType {
        self.0.user_type
    }

    pub fn is_admin(&self) -> bool {
        self.0.user_type == UserType::Admin
    }

    pub fn is_staff(&self) -> bool {
        self.0.user_type.is_staff()
    }

    pub fn student_id(&self) -> Option<StudentId> {
        self.0.student_id.map(StudentId::from)
    }

    pub fn teacher_id(&self) -> Option<TeacherId> {
        self.0.teacher_id.map(TeacherId::from)
    }

    /// Students may only read their own record; staff may read any.
    pub fn ensure_can_read_student(&self, student_id: StudentId) -> Result<(), AppError> {
        if self.is_staff() || self.student_id() == Some(student_id) {
            return Ok(());
        }
        Err(AppError::forbidden(anyhow!(
            "Access denied. Students may only access their own records"
        )))
    }

    /// Narrows a list filter for students to their own id.
    ///
    /// Staff filters pass through unchanged. A student asking for someone
    /// else's records is rejected.
    pub fn scope_student_filter(
        &self,
        requested: Option<StudentId>,
    ) -> Result<Option<StudentId>, AppError> {
        if self.is_staff() {
            return Ok(requested);
        }

        let own = self.student_id().ok_or_else(|| {
            AppError::forbidden(anyhow!("No student record is linked to this account"))
        })?;

        match requested {
            Some(id) if id != own => Err(AppError::forbidden(anyhow!(
                "Access denied. Students may only access their own records"
            ))),
            _ => Ok(Some(own)),
        }
    }

    /// Teacher on whose behalf a staff member writes a record.
    ///
    /// A teacher always acts as themselves; an administrator may name one.
    pub fn acting_teacher_id(
        &self,
        requested: Option<TeacherId>,
    ) -> Result<Option<TeacherId>, AppError> {
        if self.is_admin() {
            return Ok(requested);
        }
        self.teacher_id().map(Some).ok_or_else(|| {
            AppError::forbidden(anyhow!("No teacher record is linked to this account"))
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::unauthorized(anyhow!("Missing or invalid authorization header"))
                })?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
