//! Pagination utilities for service layer
//!
//! Page numbers arrive 1-based from query strings; repositories want a
//! 0-based page index (SeaORM `fetch_page`) or an offset (in-memory slicing).

use serde::Deserialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub const MAX_PER_PAGE: u32 = 100;

    /// Clamp to sane bounds and return `(page_index, per_page)` as `u64`
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, Self::MAX_PER_PAGE);
        ((page - 1) as u64, per_page as u64)
    }

    /// `(offset, limit)` after normalization.
    pub fn offset_limit(self) -> (usize, usize) {
        let (idx, per) = self.normalize();
        ((idx * per) as usize, per as usize)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}
