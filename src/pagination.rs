use serde::{Deserialize, Serialize};

/// Upper bound for a single page, whatever the client asks for.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Pagination metadata returned alongside list results.
///
/// Recomputed on every request from the live count; nothing here is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub page: u32,
    pub per_page: u32,
    pub page_count: u32,
    pub total_count: u64,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

impl Meta {
    /// Builds metadata for a request.
    ///
    /// `limit` and `page` of `None` or `0` fall back to `default_limit` and the
    /// first page. A page past the end is clamped to the last page.
    pub fn new(page: Option<u32>, limit: Option<u32>, total: u64, default_limit: u32) -> Self {
        let per_page = limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .clamp(1, MAX_PAGE_LIMIT);

        let page_count = u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX);

        let mut page = page.unwrap_or(1);
        if page > page_count {
            page = page_count;
        }
        let page = page.max(1);

        Self {
            page,
            per_page,
            page_count,
            total_count: total,
            prev_page: (page > 1).then(|| page - 1),
            next_page: (page < page_count).then(|| page + 1),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u32 {
        self.per_page
    }
}
