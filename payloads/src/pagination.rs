//! Offset/limit paging for wine lists.
//!
//! The same cursor drives both server-side paging (offset and limit sent as
//! query parameters) and the client-side "show all" mode, which asks for one
//! large page and disables previous/next.

pub const DEFAULT_PAGE_SIZE: u64 = 100;
/// Page size requested in "show all" mode.
pub const SHOW_ALL_PAGE_SIZE: u64 = 1000;
pub const PAGE_SIZE_OPTIONS: [u64; 4] = [25, 50, 100, 200];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    offset: u64,
    limit: u64,
    show_all: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::with_limit(DEFAULT_PAGE_SIZE)
    }
}

/// The 1-based "showing X-Y of Z" range. Both ends are 0 when there is
/// nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowingRange {
    pub from: u64,
    pub to: u64,
    pub total: u64,
}

impl ShowingRange {
    pub fn is_empty(&self) -> bool {
        self.to == 0
    }

    /// Number of rows in the window.
    pub fn rows(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.to - self.from + 1
        }
    }
}

impl std::fmt::Display for ShowingRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {}-{} of {}", self.from, self.to, self.total)
    }
}

impl Pagination {
    pub fn with_limit(limit: u64) -> Self {
        Self {
            offset: 0,
            limit: limit.max(1),
            show_all: false,
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn is_show_all(&self) -> bool {
        self.show_all
    }

    /// Back to the first page of normal paging.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.show_all = false;
    }

    pub fn enable_show_all(&mut self) {
        self.show_all = true;
        self.offset = 0;
    }

    pub fn set_limit(&mut self, limit: u64) {
        self.limit = limit.max(1);
        self.reset();
    }

    pub fn has_previous(&self) -> bool {
        !self.show_all && self.offset > 0
    }

    pub fn has_next(&self, total: u64) -> bool {
        !self.show_all && self.offset + self.limit < total
    }

    /// Advance one page. Returns false (and changes nothing) on the last
    /// page.
    pub fn next(&mut self, total: u64) -> bool {
        if !self.has_next(total) {
            return false;
        }
        self.offset += self.limit;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.offset = self.offset.saturating_sub(self.limit);
        true
    }

    pub fn request_offset(&self) -> u64 {
        if self.show_all { 0 } else { self.offset }
    }

    pub fn request_limit(&self) -> u64 {
        if self.show_all {
            SHOW_ALL_PAGE_SIZE
        } else {
            self.limit
        }
    }

    /// Pull a stale offset (past the end of a shrunken result set) back to
    /// the start of the last page. Returns true if the offset moved.
    pub fn clamp_to(&mut self, total: u64) -> bool {
        let clamped = self.effective_offset(total);
        let moved = clamped != self.offset;
        self.offset = clamped;
        moved
    }

    fn effective_offset(&self, total: u64) -> u64 {
        if self.show_all || total == 0 {
            return 0;
        }
        let last_page_start = ((total - 1) / self.limit) * self.limit;
        self.offset.min(last_page_start)
    }

    pub fn current_page(&self) -> u64 {
        self.request_offset() / self.limit + 1
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }

    pub fn window(&self, total: u64) -> ShowingRange {
        if total == 0 {
            return ShowingRange {
                from: 0,
                to: 0,
                total,
            };
        }
        let start = self.effective_offset(total);
        let to = (start + self.request_limit()).min(total);
        ShowingRange {
            from: start + 1,
            to,
            total,
        }
    }

    /// Client-side paging over an already fetched collection.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.window(items.len() as u64);
        if range.is_empty() {
            return &[];
        }
        &items[(range.from - 1) as usize..range.to as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_partial_page_window() {
        let mut pagination = Pagination::with_limit(10);
        assert!(pagination.next(25));
        assert!(pagination.next(25));
        assert!(!pagination.next(25));
        assert_eq!(pagination.offset(), 20);

        let range = pagination.window(25);
        assert_eq!((range.from, range.to), (21, 25));
        assert_eq!(range.rows(), 5);
        assert_eq!(range.to_string(), "Showing 21-25 of 25");
    }

    #[test]
    fn empty_results_show_zero_zero() {
        let pagination = Pagination::with_limit(10);
        let range = pagination.window(0);
        assert_eq!((range.from, range.to), (0, 0));
        assert!(range.is_empty());
        assert_eq!(pagination.total_pages(0), 0);
    }

    #[test]
    fn single_short_page() {
        let pagination = Pagination::default();
        let range = pagination.window(7);
        assert_eq!((range.from, range.to), (1, 7));
        assert!(!pagination.has_next(7));
        assert!(!pagination.has_previous());
        assert_eq!(pagination.total_pages(7), 1);
    }

    #[test]
    fn previous_never_goes_below_zero() {
        let mut pagination = Pagination::with_limit(10);
        assert!(!pagination.previous());
        pagination.next(100);
        pagination.next(100);
        assert!(pagination.previous());
        assert_eq!(pagination.offset(), 10);
        assert_eq!(pagination.current_page(), 2);
    }

    #[test]
    fn show_all_requests_big_page_and_disables_navigation() {
        let mut pagination = Pagination::with_limit(10);
        pagination.next(50);
        pagination.enable_show_all();

        assert_eq!(pagination.request_offset(), 0);
        assert_eq!(pagination.request_limit(), SHOW_ALL_PAGE_SIZE);
        assert!(!pagination.has_next(50));
        assert!(!pagination.has_previous());
        assert_eq!(pagination.window(50).to, 50);
        assert_eq!(pagination.window(1500).to, SHOW_ALL_PAGE_SIZE);
    }

    #[test]
    fn stale_offset_is_clamped_to_last_page() {
        let mut pagination = Pagination::with_limit(10);
        for _ in 0..5 {
            pagination.next(60);
        }
        assert_eq!(pagination.offset(), 50);

        // Result set shrank to 23 rows.
        let range = pagination.window(23);
        assert_eq!((range.from, range.to), (21, 23));
        assert!(pagination.clamp_to(23));
        assert_eq!(pagination.offset(), 20);
        assert!(!pagination.clamp_to(23));
    }

    #[test]
    fn changing_page_size_resets_offset() {
        let mut pagination = Pagination::with_limit(10);
        pagination.next(100);
        pagination.set_limit(25);
        assert_eq!(pagination.offset(), 0);
        assert_eq!(pagination.limit(), 25);

        pagination.set_limit(0);
        assert_eq!(pagination.limit(), 1);
    }

    #[test]
    fn slice_matches_window() {
        let items: Vec<u32> = (0..25).collect();
        let mut pagination = Pagination::with_limit(10);
        pagination.next(25);
        pagination.next(25);
        assert_eq!(pagination.slice(&items), &[20, 21, 22, 23, 24]);

        let empty: Vec<u32> = Vec::new();
        assert!(pagination.slice(&empty).is_empty());
    }
}
