use payloads::filters::WineFilters;
use payloads::pagination::Pagination;
use payloads::{StatusCounts, Transition, WineStatus};
use payloads::requests::WineQuery;
use yewdux::prelude::*;

/// Criteria and cursor for the public wine list.
///
/// Lives in the global store so the list keeps its place when the visitor
/// opens a winery and comes back.
#[derive(Default, Clone, PartialEq, Store)]
pub struct BrowseState {
    filters: WineFilters,
    pagination: Pagination,
}

impl BrowseState {
    pub fn filters(&self) -> &WineFilters {
        &self.filters
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Change the criteria. Always returns to the first page.
    pub fn update_filters(&mut self, update: impl FnOnce(&mut WineFilters)) {
        update(&mut self.filters);
        self.pagination.reset();
    }

    pub fn clear_filters(&mut self) {
        self.update_filters(WineFilters::clear);
    }

    /// Paging changes leave the criteria alone.
    pub fn update_pagination(&mut self, update: impl FnOnce(&mut Pagination)) {
        update(&mut self.pagination);
    }

    pub fn query(&self) -> WineQuery {
        self.filters.to_query(&self.pagination)
    }
}

/// Latest per-status counts seen by the admin pages. Feeds the pending
/// badge on the admin tabs.
#[derive(Default, Clone, PartialEq, Store)]
pub struct AdminStats {
    pub counts: Option<StatusCounts>,
}

impl AdminStats {
    /// Count a decision made outside the review page. Nothing to do until
    /// counts have been loaded.
    pub fn record(&mut self, from: WineStatus, transition: Transition) {
        if let Some(counts) = &mut self.counts {
            counts.record(from, transition);
        }
    }
}
