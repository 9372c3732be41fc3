use serde::Serialize;

/// Pagination query parameters
#[derive(Debug, Clone, Copy)]
pub struct PaginationParams {
    pub page: u32,
    pub limit: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            ((total as f64) / (limit as f64)).ceil() as u32
        };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Cut one page out of an already filtered, already ordered list.
    pub fn from_filtered(all: Vec<T>, params: PaginationParams) -> Self {
        let total = all.len() as u64;
        let skip = (params.page.saturating_sub(1) as usize).saturating_mul(params.limit as usize);
        let items = all
            .into_iter()
            .skip(skip)
            .take(params.limit as usize)
            .collect();
        Self::new(items, total, params.page, params.limit)
    }
}
