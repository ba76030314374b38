use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u64 = 20;
pub const DEFAULT_PAGE: u64 = 1;

/// Normalised page window of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Pagination {
    /// Missing or non-positive values fall back to page 1 and 20 per page
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page
            .and_then(|p| u64::try_from(p).ok())
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .and_then(|l| u64::try_from(l).ok())
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_LIMIT);
        Self { page, limit }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Documents to skip before this page. Not clamped to the result size.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Slice of an already ordered, already filtered list
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let skip = usize::try_from(self.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.iter().skip(skip).take(limit).cloned().collect()
    }

    pub fn info(&self, total: u64) -> PageInfo {
        PageInfo {
            page: self.page,
            limit: self.limit,
            total,
            pages: total.div_ceil(self.limit),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination envelope returned with every result page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_and_non_positive_values() {
        assert_eq!(Pagination::new(None, None), Pagination { page: 1, limit: 20 });
        assert_eq!(Pagination::new(Some(0), Some(0)), Pagination { page: 1, limit: 20 });
        assert_eq!(Pagination::new(Some(-4), Some(-1)), Pagination { page: 1, limit: 20 });
        assert_eq!(Pagination::new(Some(2), Some(5)), Pagination { page: 2, limit: 5 });
    }

    #[test]
    fn skip_is_zero_based_offset() {
        assert_eq!(Pagination::new(Some(1), Some(20)).skip(), 0);
        assert_eq!(Pagination::new(Some(3), Some(20)).skip(), 40);
    }

    #[test]
    fn pages_round_up() {
        let window = Pagination::new(Some(1), Some(20));
        assert_eq!(window.info(0).pages, 0);
        assert_eq!(window.info(1).pages, 1);
        assert_eq!(window.info(20).pages, 1);
        assert_eq!(window.info(21).pages, 2);
        assert_eq!(window.info(100).pages, 5);

        for limit in 1..=7 {
            for total in 0..=50 {
                let pages = Pagination::new(None, Some(limit)).info(total).pages;
                let limit = limit as u64;
                assert!(pages * limit >= total);
                assert!(pages == 0 || (pages - 1) * limit < total);
            }
        }
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items: Vec<u32> = (0..5).collect();
        assert_eq!(Pagination::new(Some(1), Some(2)).slice(&items), vec![0, 1]);
        assert_eq!(Pagination::new(Some(3), Some(2)).slice(&items), vec![4]);
        assert!(Pagination::new(Some(9), Some(2)).slice(&items).is_empty());
    }
}
