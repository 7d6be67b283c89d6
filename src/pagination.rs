use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ApiResult};

/// Default page number when the query string omits `page`.
pub const DEFAULT_PAGE_NUMBER: i32 = 0;
/// Default page size when the query string omits `size`.
pub const DEFAULT_PAGE_SIZE: i32 = 30;
/// Hard ceiling on the page size accepted by any listing endpoint.
pub const MAX_PAGE_SIZE: i32 = 30;

/// PageParams
///
/// Query parameters accepted by every paginated listing endpoint
/// (`?page=0&size=30`). Values are signed so that out-of-range input reaches
/// the validation step instead of failing deserialization.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i32,
    #[serde(default = "default_size")]
    pub size: i32,
}

fn default_page() -> i32 {
    DEFAULT_PAGE_NUMBER
}

fn default_size() -> i32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Rejects out-of-bounds pagination before any query is issued.
    pub fn validate(&self) -> ApiResult<()> {
        if self.page < 0 {
            return Err(ApiError::BadRequest(
                "Page number cannot be less than zero.".to_string(),
            ));
        }
        if self.size < 0 {
            return Err(ApiError::BadRequest(
                "Size number cannot be less than zero.".to_string(),
            ));
        }
        if self.size > MAX_PAGE_SIZE {
            return Err(ApiError::BadRequest(format!(
                "Page size must not be greater than {}.",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    /// SQL LIMIT for this page.
    pub fn limit(&self) -> i64 {
        self.size as i64
    }

    /// SQL OFFSET for this page.
    pub fn offset(&self) -> i64 {
        self.page as i64 * self.size as i64
    }
}

/// PagedResponse
///
/// The envelope returned by every listing endpoint: one page of content plus
/// the bookkeeping the client needs to drive further requests.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    pub page: i32,
    pub size: i32,
    pub total_elements: i64,
    pub total_pages: i64,
    pub last: bool,
}

impl<T> PagedResponse<T> {
    /// Assembles a page from the fetched rows and the total row count.
    pub fn new(content: Vec<T>, params: PageParams, total_elements: i64) -> Self {
        let total_pages = if params.size == 0 {
            0
        } else {
            (total_elements + params.size as i64 - 1) / params.size as i64
        };
        let last = (params.page as i64 + 1) >= total_pages;
        Self {
            content,
            page: params.page,
            size: params.size,
            total_elements,
            total_pages,
            last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: i32, size: i32) -> PageParams {
        PageParams { page, size }
    }

    #[test]
    fn rejects_negative_page() {
        assert!(params(-1, 10).validate().is_err());
    }

    #[test]
    fn rejects_negative_size() {
        assert!(params(0, -1).validate().is_err());
    }

    #[test]
    fn rejects_oversized_page() {
        assert!(params(0, MAX_PAGE_SIZE + 1).validate().is_err());
        assert!(params(0, MAX_PAGE_SIZE).validate().is_ok());
    }

    #[test]
    fn accepts_defaults() {
        assert!(PageParams::default().validate().is_ok());
    }

    #[test]
    fn offset_skips_previous_pages() {
        let p = params(2, 10);
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn paging_math() {
        let page: PagedResponse<i32> = PagedResponse::new(vec![1, 2, 3], params(0, 3), 7);
        assert_eq!(page.total_pages, 3);
        assert!(!page.last);

        let tail: PagedResponse<i32> = PagedResponse::new(vec![7], params(2, 3), 7);
        assert!(tail.last);
    }

    #[test]
    fn empty_result_is_last() {
        let page: PagedResponse<i32> = PagedResponse::new(vec![], params(0, 10), 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.last);
    }
}
