//! Pagination for list endpoints.
//!
//! List endpoints accept `limit` with either `offset` or `page`:
//!
//! - `limit`: items per page, clamped to 1..=100, default 10
//! - `offset`: items to skip, default 0
//! - `page`: 1-indexed page number; takes precedence over `offset`
//!
//! Responses wrap the rows as `{ "data": [...], "meta": PaginationMeta }`.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Position of a page within the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of rows across all pages
    pub total: i64,
    /// Limit that was applied
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Present when page-based pagination was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    pub has_more: bool,
}

impl PaginationMeta {
    /// Builds the metadata for a page fetched with `params` out of `total` rows.
    #[must_use]
    pub fn new(total: i64, params: &PaginationParams) -> Self {
        let limit = params.limit();
        let offset = params.offset();
        Self {
            total,
            limit,
            offset: Some(offset),
            page: params.page(),
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

/// Query parameters for pagination.
#[derive(Debug, Clone, Hash, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0, ignored if `page` is set)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// Page number (1-indexed)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(10),
            offset: Some(0),
            page: None,
        }
    }
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Effective offset; derived from `page` when one was given. Saturates
    /// at `i64::MAX` for out-of-range pages.
    #[must_use]
    pub fn offset(&self) -> i64 {
        if let Some(page) = self.page {
            (page.max(1) - 1).saturating_mul(self.limit())
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page(), None);
    }

    #[test]
    fn test_limit_is_clamped() {
        let cases = vec![(Some(0), 1), (Some(-3), 1), (Some(50), 50), (Some(101), 100), (None, 10)];

        for (input, expected) in cases {
            let params = PaginationParams {
                limit: input,
                offset: None,
                page: None,
            };
            assert_eq!(params.limit(), expected);
        }
    }

    #[test]
    fn test_huge_page_and_offset_saturate() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"page":"9223372036854775807","limit":"50"}"#).unwrap();
        assert_eq!(params.offset(), i64::MAX);
        assert_eq!(params.page(), Some(i64::MAX));

        let params = PaginationParams {
            limit: Some(10),
            offset: Some(i64::MAX),
            page: None,
        };
        assert_eq!(params.offset(), i64::MAX);

        let meta = PaginationMeta::new(5, &params);
        assert_eq!(meta.offset, Some(i64::MAX));
        assert!(!meta.has_more);
    }

    #[test]
    fn test_negative_offset_is_zero() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(-5),
            page: None,
        };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_page_takes_precedence_over_offset() {
        let params = PaginationParams {
            limit: Some(20),
            offset: Some(5),
            page: Some(3),
        };
        assert_eq!(params.offset(), 40);
        assert_eq!(params.page(), Some(3));
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let params = PaginationParams {
            limit: Some(10),
            offset: None,
            page: Some(0),
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page(), Some(1));
    }

    #[test]
    fn test_deserialize_from_query_strings() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit":"25","offset":""}"#).unwrap();
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_meta_has_more() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(20),
            page: None,
        };
        let meta = PaginationMeta::new(31, &params);
        assert!(meta.has_more);
        assert_eq!(meta.offset, Some(20));

        let meta = PaginationMeta::new(30, &params);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = PaginationMeta::new(5, &PaginationParams::default());
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains(r#""hasMore":false"#));
        assert!(json.contains(r#""total":5"#));
        assert!(!json.contains("page"));
    }
}
