use crate::error::HandlerError;
use moneytracker_repo::transaction_repo::PageOptions;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 50;

/// Validates raw page/limit query values. Missing values take the defaults;
/// non-positive values are rejected rather than clamped.
pub fn validate_page_params(
    page: Option<i64>,
    limit: Option<i64>,
) -> Result<(i64, i64), HandlerError> {
    let page = page.unwrap_or(DEFAULT_PAGE);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if page < 1 {
        return Err(HandlerError::Validation(
            "page must be a positive integer".to_owned(),
        ));
    }
    if limit < 1 {
        return Err(HandlerError::Validation(
            "limit must be a positive integer".to_owned(),
        ));
    }
    Ok((page, limit))
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    /// `limit` must already be validated to be at least 1.
    pub fn new(page: i64, limit: i64, total: i64) -> Pagination {
        let pages = if total == 0 { 0 } else { (total - 1) / limit + 1 };
        Pagination {
            page,
            limit,
            total,
            pages,
        }
    }

    /// The offset/limit window for this page. Pages are 1-based; a page
    /// beyond the last yields an empty row set, not an error. The offset
    /// saturates so absurdly large pages read as an empty window instead
    /// of overflowing.
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            offset: (self.page - 1).saturating_mul(self.limit),
            limit: self.limit,
        }
    }
}
