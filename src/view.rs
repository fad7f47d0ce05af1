//! Per-view query state and the pipeline that turns a fetched collection into
//! what a list screen renders.

use crate::config::ApiConfig;
use crate::constants::*;
use crate::criteria::{Criteria, DateMode};
use crate::pagination::{PageView, clamp_page, paginate};
use crate::query::{SortOrder, filter_records, sort_records};
use crate::records::Queryable;

/// Static configuration of one list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewProfile {
    pub page_size: u32,
    pub sort: SortOrder,
    pub date_mode: DateMode,
}

impl ViewProfile {
    pub const fn expenses() -> Self {
        Self {
            page_size: EXPENSES_PAGE_SIZE,
            sort: SortOrder::Preserve,
            date_mode: DateMode::Range,
        }
    }

    pub const fn events() -> Self {
        Self {
            page_size: EVENTS_PAGE_SIZE,
            sort: SortOrder::Preserve,
            date_mode: DateMode::Range,
        }
    }

    pub const fn presences() -> Self {
        Self {
            page_size: PRESENCES_PAGE_SIZE,
            sort: SortOrder::RecentFirst,
            date_mode: DateMode::ExactDay,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Applies the configured page size override, if any.
    pub fn configured(self, config: &ApiConfig) -> Self {
        match config.page_size {
            Some(page_size) => self.with_page_size(page_size),
            None => self,
        }
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// Criteria plus the current page. Each transition returns a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    criteria: Criteria,
    page: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            criteria: Criteria::default(),
            page: 1,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Any change of criteria returns to page 1.
    pub fn with_criteria(self, criteria: Criteria) -> Self {
        if criteria == self.criteria {
            return self;
        }
        Self { criteria, page: 1 }
    }

    pub fn with_search(self, term: &str) -> Self {
        let criteria = self.criteria.clone().with_search(term);
        self.with_criteria(criteria)
    }

    pub fn go_to_page(self, page: u32, total_pages: u32) -> Self {
        Self {
            page: clamp_page(page, total_pages),
            ..self
        }
    }

    pub fn next_page(self, total_pages: u32) -> Self {
        let page = self.page.saturating_add(1);
        self.go_to_page(page, total_pages)
    }

    pub fn previous_page(self, total_pages: u32) -> Self {
        let page = self.page.saturating_sub(1);
        self.go_to_page(page, total_pages)
    }

    /// Back to empty criteria and page 1 ("clear filters", modal reset).
    pub fn cleared(self) -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot<T> {
    /// Filtered and sorted, before pagination. Derived statistics fold over this.
    pub filtered: Vec<T>,
    pub page: PageView<T>,
}

impl<T> ViewSnapshot<T> {
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }
}

pub fn evaluate<T>(records: Option<&[T]>, profile: &ViewProfile, state: &ViewState) -> ViewSnapshot<T>
where
    T: Queryable + Clone,
{
    let filtered = filter_records(records, state.criteria());
    let sorted = sort_records(&filtered, profile.sort);
    let page = paginate(&sorted, state.page(), profile.page_size);

    tracing::debug!(
        fetched = records.map_or(0, <[T]>::len),
        filtered = sorted.len(),
        page = page.current_page,
        total_pages = page.total_pages,
        "view recomputed"
    );

    ViewSnapshot {
        filtered: sorted,
        page,
    }
}
