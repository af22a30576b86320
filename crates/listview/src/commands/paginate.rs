use serde::Serialize;

/// One page of a list, with the numbers a pagination control needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    pub fn of(list: &'a [T], current_page: usize, items_per_page: usize) -> Self {
        Self {
            items: page(list, current_page, items_per_page),
            current_page: current_page.max(1),
            items_per_page,
            total_items: list.len(),
            total_pages: total_pages(list.len(), items_per_page),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Slice out page `current_page` (1-indexed).
///
/// Out-of-range pages are empty. Page 0 reads as page 1.
pub fn page<T>(list: &[T], current_page: usize, items_per_page: usize) -> &[T] {
    if items_per_page == 0 {
        return &[];
    }
    let start = current_page
        .saturating_sub(1)
        .saturating_mul(items_per_page);
    if start >= list.len() {
        return &[];
    }
    let end = start.saturating_add(items_per_page).min(list.len());
    &list[start..end]
}

/// `ceil(len / items_per_page)`; zero for an empty list.
pub fn total_pages(len: usize, items_per_page: usize) -> usize {
    if items_per_page == 0 {
        return 0;
    }
    len.div_ceil(items_per_page)
}

/// The nearest page that exists: `1..=max(1, total_pages)`.
pub fn clamp_page(current_page: usize, len: usize, items_per_page: usize) -> usize {
    current_page.clamp(1, total_pages(len, items_per_page).max(1))
}
