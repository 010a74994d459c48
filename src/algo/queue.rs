//! Min-priority queue entries for `BinaryHeap`.

use std::cmp::Ordering;

/// A heap entry ordered by ascending score.
///
/// `BinaryHeap` is a max-heap, so the comparison is reversed. Ties fall
/// back to insertion sequence so equal scores pop first-in first-out.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MinScored<T> {
    pub score: f64,
    pub seq: u64,
    pub item: T,
}

impl<T> MinScored<T> {
    pub fn new(score: f64, seq: u64, item: T) -> Self {
        Self { score, seq, item }
    }
}

impl<T> PartialEq for MinScored<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for MinScored<T> {}

impl<T> PartialOrd for MinScored<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for MinScored<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn pops_lowest_score_first() {
        let mut heap = BinaryHeap::new();
        heap.push(MinScored::new(3.0, 0, 'c'));
        heap.push(MinScored::new(-1.0, 1, 'a'));
        heap.push(MinScored::new(2.0, 2, 'b'));
        let order: Vec<char> = std::iter::from_fn(|| heap.pop().map(|e| e.item)).collect();
        assert_eq!(order, vec!['a', 'b', 'c']);
    }

    #[test]
    fn equal_scores_pop_in_insertion_order() {
        let mut heap = BinaryHeap::new();
        heap.push(MinScored::new(1.0, 0, "first"));
        heap.push(MinScored::new(1.0, 1, "second"));
        assert_eq!(heap.pop().map(|e| e.item), Some("first"));
        assert_eq!(heap.pop().map(|e| e.item), Some("second"));
    }
}
