use serde::Serialize;

/// A window over a filtered and sorted collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub current_page: u32, // (1-based)
    pub page_size: u32,
    pub total_items: usize,
    pub total_pages: u32,
    /// 1-based rank of the first item, 0 when the page is empty.
    pub first_rank: usize,
    /// 1-based rank of the last item, 0 when the page is empty.
    pub last_rank: usize,
}

impl<T> PageView<T> {
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }
}

/// `ceil(total_items / page_size)`, never less than 1.
pub fn total_pages(total_items: usize, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as usize;
    let pages = total_items.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Slices `[(page-1)*size, page*size)` out of `items`, clamping `page` into
/// `[1, total_pages]` first.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> PageView<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let current_page = clamp_page(page, total_pages);

    let start = ((current_page - 1) as usize)
        .saturating_mul(page_size as usize)
        .min(total_items);
    let end = start.saturating_add(page_size as usize).min(total_items);
    let slice = &items[start..end];

    let (first_rank, last_rank) = if slice.is_empty() {
        (0, 0)
    } else {
        (start + 1, end)
    };

    PageView {
        items: slice.to_vec(),
        current_page,
        page_size,
        total_items,
        total_pages,
        first_rank,
        last_rank,
    }
}
