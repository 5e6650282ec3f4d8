//! Pagination utilities for service layer
//!
//! Parses the raw `page`/`limit` query values: absent or blank values take the
//! defaults, values below 1 are rejected, and `limit` is capped at [`MAX_LIMIT`].
//! The row offset is computed up front and must fit a signed 64-bit SQL bind.

use crate::errors::ServiceError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub limit: u64,
    offset: u64,
}

impl Pagination {
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, ServiceError> {
        let page = parse_positive("page", page)?.unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive("limit", limit)?.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = (page - 1)
            .checked_mul(limit)
            .filter(|o| *o <= i64::MAX as u64)
            .ok_or_else(|| ServiceError::Validation("page is out of range".to_string()))?;
        Ok(Self { page, limit, offset })
    }

    /// Rows to skip; always representable as `i64`.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT, offset: 0 } }
}

fn parse_positive(name: &str, raw: Option<&str>) -> Result<Option<u64>, ServiceError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else { return Ok(None) };
    match raw.parse::<i64>() {
        Ok(n) if n >= 1 => Ok(Some(n as u64)),
        Ok(_) => Err(ServiceError::Validation(format!("{name} must be a positive integer"))),
        Err(_) => Err(ServiceError::Validation(format!("{name} must be an integer"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_use_defaults() {
        let p = Pagination::parse(None, Some("  ")).unwrap();
        assert_eq!(p, Pagination::default());
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let p = Pagination::parse(Some("3"), Some("25")).unwrap();
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn clamps_upper_bound() {
        let p = Pagination::parse(Some("5"), Some("1000")).unwrap();
        assert_eq!(p.limit, MAX_LIMIT);
        assert_eq!(p.offset(), 400);
    }

    #[test]
    fn rejects_zero_negative_and_garbage() {
        for (page, limit) in [("0", "10"), ("1", "0"), ("-2", "10"), ("1", "-5"), ("one", "10"), ("1", "1.5")] {
            let err = Pagination::parse(Some(page), Some(limit)).unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "page={page} limit={limit}");
        }
    }

    #[test]
    fn rejects_page_whose_offset_overflows() {
        let err = Pagination::parse(Some("9223372036854775807"), Some("100")).unwrap_err();
        assert_eq!(err.to_string(), "page is out of range");

        // largest page whose offset still fits
        let last = (i64::MAX as u64 / 100 + 1).to_string();
        let p = Pagination::parse(Some(&last), Some("100")).unwrap();
        assert!(p.offset() <= i64::MAX as u64);
        let next = (i64::MAX as u64 / 100 + 2).to_string();
        assert!(Pagination::parse(Some(&next), Some("100")).is_err());
    }
}
