//! Fixed-size paging over a result list.

pub const PAGE_SIZE: usize = 4;

/// Number of pages for `len` results. An empty list still has one page,
/// which renders as "no results".
pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

/// The slice visible on page `index`; empty when `index` is past the end.
pub fn page<T>(results: &[T], index: usize) -> &[T] {
    let start = index.saturating_mul(PAGE_SIZE).min(results.len());
    let end = start.saturating_add(PAGE_SIZE).min(results.len());
    &results[start..end]
}

pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(page_count(len) - 1)
}

/// Index after "next"; stays put on the last page.
pub fn next_index(index: usize, len: usize) -> usize {
    clamp_index(index.saturating_add(1), len)
}

/// Index after "previous"; stays put on the first page.
pub fn prev_index(index: usize) -> usize {
    index.saturating_sub(1)
}
