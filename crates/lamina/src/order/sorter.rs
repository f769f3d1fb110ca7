use std::cmp::Ordering;

/// Stable insertion sort that only ever swaps neighbours.
///
/// `compare` may depend on answers it gave earlier in the same pass (see
/// [`OrderComparator`](super::OrderComparator)). Moving elements one slot at a time means every
/// pair an element passes is compared, and therefore recorded, before the element is compared
/// against anything further away. General-purpose sorts give no such guarantee and may panic on
/// a comparator that is not a total order.
pub fn insertion_sort<T, F>(items: &mut [T], mut compare: F)
where
    T: Copy,
    F: FnMut(T, T) -> Ordering,
{
    for i in 1..items.len() {
        let current = items[i];
        let mut j = i;
        while j > 0 && compare(items[j - 1], current) == Ordering::Greater {
            items[j] = items[j - 1];
            j -= 1;
        }
        items[j] = current;
    }
}
