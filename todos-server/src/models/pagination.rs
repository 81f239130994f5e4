//! Pagination types for GET /todos

use serde::{Deserialize, Serialize};

use super::{parse_int_prefix, Todo};

/// Maximum items per page
pub const MAX_LIMIT: i64 = 100;

/// Default items per page
pub const DEFAULT_LIMIT: i64 = 30;

/// Pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page size (1..=100)
    pub limit: i64,
    /// Rows skipped before the page (>= 0)
    pub skip: i64,
}

impl Pagination {
    /// Create pagination with clamping.
    ///
    /// - Limit is clamped to 1..=100
    /// - Skip is clamped to a minimum of 0
    pub fn new(limit: i64, skip: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            skip: skip.max(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: 0,
        }
    }
}

/// Raw query parameters; kept as text so bad numbers fall back to defaults
/// instead of rejecting the request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<String>,
    pub skip: Option<String>,
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        // A zero limit counts as "not given"
        let limit = params
            .limit
            .as_deref()
            .and_then(parse_int_prefix)
            .filter(|limit| *limit != 0)
            .unwrap_or(DEFAULT_LIMIT);
        let skip = params
            .skip
            .as_deref()
            .and_then(parse_int_prefix)
            .unwrap_or(0);

        Self::new(limit, skip)
    }
}

/// GET /todos response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    /// Row count of the whole table, not just this page
    pub total: i64,
    pub limit: i64,
    pub skip: i64,
}
