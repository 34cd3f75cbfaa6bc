//! Page/limit parsing for the product listing.

use thiserror::Error;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid {name} parameter: expected a positive integer, got {value:?}")]
    NotPositive { name: &'static str, value: String },
    #[error("Invalid pagination: page {page} with limit {limit} is out of range")]
    OutOfRange { page: u64, limit: u64 },
}

/// A validated page window. `page` and `limit` are both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn parse_param(name: &'static str, raw: Option<&str>, default: u64) -> Result<u64, PaginationError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(v) => v,
    };
    match raw.parse::<u64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(PaginationError::NotPositive {
            name,
            value: raw.to_string(),
        }),
    }
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::NotPositive {
                name: "page",
                value: page.to_string(),
            });
        }
        if limit == 0 {
            return Err(PaginationError::NotPositive {
                name: "limit",
                value: limit.to_string(),
            });
        }
        // The driver takes both values as signed 64-bit integers.
        let fits = (page - 1)
            .checked_mul(limit)
            .is_some_and(|skip| i64::try_from(skip).is_ok())
            && i64::try_from(limit).is_ok();
        if !fits {
            return Err(PaginationError::OutOfRange { page, limit });
        }
        Ok(Self { page, limit })
    }

    /// Parses raw query values; absent or blank values take the defaults.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Result<Self, PaginationError> {
        let page = parse_param("page", page, DEFAULT_PAGE)?;
        let limit = parse_param("limit", limit, DEFAULT_LIMIT)?;
        Self::new(page, limit)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of documents to skip: `(page - 1) * limit`.
    pub fn skip(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}
