//! Pagination utilities for service layer
//!
//! `limit`/`offset` query parameters with validation and defaults.

use serde::Deserialize;
use validator::Validate;

pub const DEFAULT_LIMIT: u64 = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Pagination {
    /// items per page, must be positive; both fields are bound as `i64`
    #[validate(range(min = 1, max = 9_223_372_036_854_775_807u64, message = "limit must be a positive number within range"))]
    pub limit: Option<u64>,
    /// items to skip
    #[validate(range(max = 9_223_372_036_854_775_807u64, message = "offset is out of range"))]
    pub offset: Option<u64>,
}

impl Pagination {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit: Some(limit), offset: Some(offset) }
    }

    /// Apply defaults: limit 10, offset 0.
    pub fn normalize(self) -> (u64, u64) {
        (self.limit.unwrap_or(DEFAULT_LIMIT), self.offset.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;
    use validator::Validate;

    const MAX_BOUND: u64 = i64::MAX as u64;

    #[test]
    fn defaults_apply_when_missing() {
        let (limit, offset) = Pagination::default().normalize();
        assert_eq!(limit, 10);
        assert_eq!(offset, 0);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let p = Pagination { limit: Some(0), offset: None };
        assert!(p.validate().is_err());
    }

    #[test]
    fn values_beyond_signed_range_are_rejected() {
        assert!(Pagination { limit: Some(u64::MAX), offset: None }.validate().is_err());
        assert!(Pagination { limit: None, offset: Some(MAX_BOUND + 1) }.validate().is_err());
        assert!(Pagination::new(MAX_BOUND, MAX_BOUND).validate().is_ok());
    }

    #[test]
    fn explicit_values_pass_through() {
        let p = Pagination::new(5, 20);
        assert!(p.validate().is_ok());
        assert_eq!(p.normalize(), (5, 20));
    }
}
