//! Pagination extractor.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use erudio_config::PaginationConfig;
use erudio_core::{Direction, ErudioError, ErudioResult, PageRequest, Sort};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for pagination.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Zero-based page number (default 0).
    #[serde(default)]
    pub page: Option<usize>,
    /// Page size (default from configuration).
    #[serde(default)]
    pub size: Option<usize>,
    /// `asc` or `desc` (default `asc`).
    #[serde(default)]
    pub direction: Option<String>,
}

impl PaginationQuery {
    /// Builds a page request sorted on `sort_property`.
    ///
    /// A zero size is rejected; sizes above the configured maximum are clamped.
    pub fn to_page_request(&self, sort_property: &str, config: &PaginationConfig) -> ErudioResult<PageRequest> {
        let direction = match self.direction.as_deref() {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => Direction::Asc,
        };
        let size = self.size.unwrap_or(config.default_page_size);
        let request = PageRequest::new(self.page.unwrap_or(0), size, Sort::by(sort_property, direction))?;
        Ok(request.clamped(config.max_page_size))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PaginationQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<Self>::try_from_uri(&parts.uri)
            .map_err(|rejection| ErudioError::validation(format!("Invalid pagination parameters: {rejection}")))?;
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<usize>, size: Option<usize>, direction: Option<&str>) -> PaginationQuery {
        PaginationQuery {
            page,
            size,
            direction: direction.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults_from_config() {
        let request = PaginationQuery::default()
            .to_page_request("firstName", &PaginationConfig::default())
            .unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 12);
        assert_eq!(request.sort, Sort::by("firstName", Direction::Asc));
    }

    #[test]
    fn test_direction_is_case_insensitive() {
        let request = query(Some(2), Some(5), Some("DESC"))
            .to_page_request("title", &PaginationConfig::default())
            .unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.direction(), Direction::Desc);
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = query(None, Some(0), None)
            .to_page_request("firstName", &PaginationConfig::default())
            .unwrap_err();
        assert!(matches!(err, ErudioError::InvalidPageSize(0)));
    }

    #[test]
    fn test_size_clamped_to_max() {
        let request = query(None, Some(5000), None)
            .to_page_request("firstName", &PaginationConfig::default())
            .unwrap();
        assert_eq!(request.size, 100);
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let err = query(None, None, Some("sideways"))
            .to_page_request("firstName", &PaginationConfig::default())
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
