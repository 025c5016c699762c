//! Splits the ordered article list into pages.

use std::num::NonZeroUsize;

/// Partitions `items` into contiguous, order-preserving pages of
/// `page_size` items each. Only the last page may be shorter. An empty input
/// yields no pages at all.
pub fn paginate<T: Clone>(items: &[T], page_size: NonZeroUsize) -> Vec<Vec<T>> {
    items
        .chunks(page_size.get())
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// The number of pages [`paginate`] produces for `total` items.
pub fn page_count(total: usize, page_size: NonZeroUsize) -> usize {
    match total % page_size.get() {
        0 => total / page_size.get(),
        _ => total / page_size.get() + 1,
    }
}
