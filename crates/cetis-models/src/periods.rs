//! School periods (semesters).
//!
//! At most one period is active at a time; the active one dates the student
//! credential.

use std::borrow::Cow;

use cetis_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::ids::PeriodId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub id: PeriodId,
    /// e.g. `"2025-1"`
    pub code: String,
    /// e.g. `"Febrero - Julio 2025"`
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_period_dates"))]
pub struct CreatePeriodDto {
    #[validate(length(min = 1, max = 20, message = "code must be 1-20 characters"))]
    pub code: String,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Activating a period deactivates the current one
    pub active: Option<bool>,
}

fn validate_period_dates(dto: &CreatePeriodDto) -> Result<(), ValidationError> {
    if dto.end_date <= dto.start_date {
        return Err(ValidationError::new("period_dates")
            .with_message(Cow::Borrowed("endDate must be after startDate")));
    }
    Ok(())
}

/// The active period together with the dates printed on credentials.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivePeriodResponse {
    #[serde(flatten)]
    pub period: Period,
    /// Start month, e.g. `"Febrero 2025"`
    pub issued_on: String,
    /// End month, e.g. `"Julio 2025"`
    pub valid_until: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct PeriodFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedPeriodsResponse {
    pub data: Vec<Period>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(start: (i32, u32, u32), end: (i32, u32, u32)) -> CreatePeriodDto {
        CreatePeriodDto {
            code: "2025-1".to_string(),
            name: "Febrero - Julio 2025".to_string(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            active: Some(true),
        }
    }

    #[test]
    fn test_period_dates_must_be_ordered() {
        assert!(dto((2025, 2, 1), (2025, 7, 15)).validate().is_ok());
        assert!(dto((2025, 7, 15), (2025, 2, 1)).validate().is_err());
        assert!(dto((2025, 2, 1), (2025, 2, 1)).validate().is_err());
    }
}
