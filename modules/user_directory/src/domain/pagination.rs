use crate::domain::error::DomainError;

/// Bounds used to normalize a requested page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub min_page_size: u64,
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            min_page_size: 5,
            default_page_size: 5,
            max_page_size: 50,
        }
    }
}

/// A normalized 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Apply defaults and clamping:
    /// - page size: default when absent or below the minimum, capped at the maximum
    /// - page: 1 when absent or non-positive
    pub fn normalize(page: Option<i64>, page_size: Option<i64>, limits: &PageLimits) -> Self {
        let page_size = match page_size {
            Some(size) if size >= limits.min_page_size as i64 => {
                (size as u64).min(limits.max_page_size)
            }
            _ => limits.default_page_size,
        };

        let page = match page {
            Some(p) if p > 0 => p as u64,
            _ => 1,
        };

        Self { page, page_size }
    }

    /// Row offset of the first item on this page. Saturates instead of
    /// overflowing; the bounds check rejects such pages afterwards anyway.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }
}

/// Number of pages needed for `total` rows.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Enforce the listing contract: an empty first page means nothing matched,
/// and a page past the last one is a client error rather than an empty page.
pub fn check_page_bounds(req: PageRequest, total: u64) -> Result<u64, DomainError> {
    let pages = total_pages(total, req.page_size);
    if req.page == 1 && total == 0 {
        return Err(DomainError::NoUsersFound);
    }
    if req.page > pages {
        return Err(DomainError::page_out_of_range(req.page, pages));
    }
    Ok(pages)
}
