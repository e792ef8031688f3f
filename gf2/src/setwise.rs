use sorted_iter::{SortedIterator, assume::AssumeSortedByItemExt};

/// Indexes in `0..index_bound` that do not appear in the ascending slice `excluded`.
#[must_use]
pub fn complement(excluded: &[usize], index_bound: usize) -> Vec<usize> {
    debug_assert!(excluded.is_sorted());
    (0..index_bound)
        .difference(excluded.iter().copied().assume_sorted_by_item())
        .collect()
}

#[test]
fn complement_test() {
    assert_eq!(complement(&[1, 2, 3, 6], 7), vec![0, 4, 5]);
    assert_eq!(complement(&[0, 4, 5, 9], 10), vec![1, 2, 3, 6, 7, 8]);
    assert_eq!(complement(&[], 3), vec![0, 1, 2]);
    assert_eq!(complement(&[0, 1], 2), Vec::<usize>::new());
}
