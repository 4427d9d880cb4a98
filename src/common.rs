//! Pagination types shared across handlers and services.

use crate::errors::ServiceError;

/// Validated pagination input.
///
/// Construction is the one place where `limit` is checked, so every consumer
/// of a `PageRequest` can rely on `limit >= 1` and the page arithmetic below
/// can never divide by zero.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

impl PageRequest {
    pub fn new(limit: u64, offset: u64) -> Result<Self, ServiceError> {
        if limit == 0 {
            return Err(ServiceError::ValidationError(
                "limit must be at least 1".to_string(),
            ));
        }
        Ok(Self { limit, offset })
    }

    /// Computes page metadata for a given total row count.
    pub fn meta(&self, total_count: u64) -> PageMeta {
        PageMeta {
            current_page: self.offset / self.limit + 1,
            total_pages: if total_count == 0 {
                0
            } else {
                (total_count + self.limit - 1) / self.limit
            },
        }
    }
}

/// Derived pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: u64,
    pub total_pages: u64,
}
