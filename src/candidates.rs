//! Bounded lists of the k best candidates seen during a query.
//!
//! Each candidate is a `(dist2, point_id)` pair packed into a single `u64`:
//! the high word holds the bits of the (non-negative) squared distance and the
//! low word the id reinterpreted as `u32`. Non-negative IEEE-754 floats order
//! the same as their bit patterns, so comparing packed values compares
//! distances first and breaks ties by id. The empty sentinel id `-1` becomes
//! `u32::MAX` and therefore loses every tie against a real point.

/// Point id stored in slots that have not been filled by a real candidate.
pub const EMPTY_ID: i32 = -1;

#[inline]
pub fn encode(dist2: f32, point_id: i32) -> u64 {
    (u64::from(dist2.to_bits()) << 32) | u64::from(point_id as u32)
}

#[inline]
pub fn decode_dist2(v: u64) -> f32 {
    f32::from_bits((v >> 32) as u32)
}

#[inline]
pub fn decode_point_id(v: u64) -> i32 {
    v as u32 as i32
}

/// A filled result slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Index into the tree's data array.
    pub id: usize,
    /// Squared distance to the query.
    pub dist2: f32,
}

/// The capability set shared by the candidate lists.
///
/// Traversals are written against this trait only, so a query can switch
/// between the sorted-array and the heap representation without touching the
/// traversal code.
pub trait CandidateList {
    /// A list with every slot holding `cutoff_radius²` and [`EMPTY_ID`].
    fn new(cutoff_radius: f32) -> Self;

    /// Offers a candidate. It is kept if it beats the worst retained entry.
    fn push(&mut self, dist2: f32, point_id: i32);

    /// Squared distance of the worst retained entry. No point at or beyond
    /// this distance can enter the list any more.
    fn max_radius2(&self) -> f32;

    /// The raw packed slots.
    fn entries(&self) -> &[u64];

    #[inline]
    fn dist2(&self, i: usize) -> f32 {
        decode_dist2(self.entries()[i])
    }

    /// Id stored in slot `i`; negative for an unfilled slot.
    #[inline]
    fn point_id(&self, i: usize) -> i32 {
        decode_point_id(self.entries()[i])
    }

    #[inline]
    fn initial_cull_dist2(&self) -> f32 {
        self.max_radius2()
    }

    /// Pushes a candidate and returns the cull radius that results.
    #[inline]
    fn process_candidate(&mut self, point_id: i32, dist2: f32) -> f32 {
        self.push(dist2, point_id);
        self.max_radius2()
    }

    #[inline]
    fn return_value(&self) -> f32 {
        self.max_radius2()
    }

    /// The filled slots, nearest first.
    fn neighbors(&self) -> Vec<Neighbor> {
        let mut filled: Vec<u64> = self
            .entries()
            .iter()
            .copied()
            .filter(|&v| decode_point_id(v) >= 0)
            .collect();
        filled.sort_unstable();
        filled
            .into_iter()
            .map(|v| Neighbor {
                id: decode_point_id(v) as usize,
                dist2: decode_dist2(v),
            })
            .collect()
    }
}

/// Candidate list kept as a sorted array.
///
/// Every push runs the same compare-exchange sweep over all `K` slots, which
/// keeps the array ascending and costs O(K) without data-dependent branches.
/// This is the better choice for small `K` (up to about 20).
#[derive(Clone, Copy, Debug)]
pub struct FixedCandidateList<const K: usize> {
    entry: [u64; K],
}

impl<const K: usize> CandidateList for FixedCandidateList<K> {
    #[inline]
    fn new(cutoff_radius: f32) -> Self {
        const { assert!(K > 0, "a candidate list needs at least one slot") };
        Self {
            entry: [encode(cutoff_radius * cutoff_radius, EMPTY_ID); K],
        }
    }

    #[inline]
    fn push(&mut self, dist2: f32, point_id: i32) {
        let mut v = encode(dist2, point_id);
        for slot in self.entry.iter_mut() {
            let vmax = (*slot).max(v);
            let vmin = (*slot).min(v);
            *slot = vmin;
            v = vmax;
        }
    }

    #[inline]
    fn max_radius2(&self) -> f32 {
        decode_dist2(self.entry[K - 1])
    }

    #[inline]
    fn entries(&self) -> &[u64] {
        &self.entry
    }
}

/// Candidate list kept as a binary max-heap, worst entry at the root.
///
/// Pushes cost O(log K). Only the root is guaranteed to be in place; the other
/// slots are in heap order, not sorted. Use [`CandidateList::neighbors`] for
/// ascending results.
#[derive(Clone, Copy, Debug)]
pub struct HeapCandidateList<const K: usize> {
    entry: [u64; K],
}

impl<const K: usize> CandidateList for HeapCandidateList<K> {
    #[inline]
    fn new(cutoff_radius: f32) -> Self {
        const { assert!(K > 0, "a candidate list needs at least one slot") };
        Self {
            entry: [encode(cutoff_radius * cutoff_radius, EMPTY_ID); K],
        }
    }

    fn push(&mut self, dist2: f32, point_id: i32) {
        let e = encode(dist2, point_id);
        if e >= self.entry[0] {
            return;
        }

        // Sift down from the root, pulling the larger child up until `e` fits.
        let mut pos = 0;
        loop {
            let mut largest_child = K;
            let mut largest_child_value = u64::MAX;

            let first_child = 2 * pos + 1;
            if first_child < K {
                largest_child = first_child;
                largest_child_value = self.entry[first_child];
            }

            let second_child = first_child + 1;
            if second_child < K && self.entry[second_child] > largest_child_value {
                largest_child = second_child;
                largest_child_value = self.entry[second_child];
            }

            if largest_child == K || largest_child_value < e {
                self.entry[pos] = e;
                break;
            }
            self.entry[pos] = largest_child_value;
            pos = largest_child;
        }
    }

    #[inline]
    fn max_radius2(&self) -> f32 {
        decode_dist2(self.entry[0])
    }

    #[inline]
    fn entries(&self) -> &[u64] {
        &self.entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing_orders_by_distance_then_id() {
        assert!(encode(1.0, 7) < encode(2.0, 0));
        assert!(encode(1.0, 3) < encode(1.0, 4));
        assert!(encode(1.0, 1_000_000) < encode(1.0, EMPTY_ID));
        assert!(encode(0.0, 5) < encode(f32::MIN_POSITIVE, 0));
        assert!(encode(1.0e30, 0) < encode(f32::INFINITY, EMPTY_ID));

        let v = encode(2.5, 42);
        assert_eq!(decode_dist2(v), 2.5);
        assert_eq!(decode_point_id(v), 42);
        assert_eq!(decode_point_id(encode(3.0, EMPTY_ID)), EMPTY_ID);
    }

    #[test]
    fn test_fixed_list_starts_with_sentinels() {
        let list = FixedCandidateList::<4>::new(3.0);
        for i in 0..4 {
            assert_eq!(list.dist2(i), 9.0);
            assert_eq!(list.point_id(i), EMPTY_ID);
        }
        assert_eq!(list.max_radius2(), 9.0);
        assert!(list.neighbors().is_empty());
    }

    #[test]
    fn test_fixed_list_stays_sorted() {
        let mut list = FixedCandidateList::<3>::new(f32::INFINITY);
        list.push(5.0, 0);
        list.push(1.0, 1);
        assert_eq!(list.max_radius2(), f32::INFINITY);
        list.push(3.0, 2);
        assert_eq!(list.max_radius2(), 5.0);
        list.push(2.0, 3);
        assert_eq!(list.max_radius2(), 3.0);

        let ids: Vec<i32> = (0..3).map(|i| list.point_id(i)).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        let d: Vec<f32> = (0..3).map(|i| list.dist2(i)).collect();
        assert_eq!(d, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_fixed_list_rejects_beyond_cutoff() {
        let mut list = FixedCandidateList::<2>::new(2.0);
        list.push(4.5, 0);
        list.push(5.0, 1);
        assert!(list.neighbors().is_empty());
        assert_eq!(list.max_radius2(), 4.0);

        list.push(3.9, 2);
        assert_eq!(list.point_id(0), 2);
        assert_eq!(list.point_id(1), EMPTY_ID);
    }

    #[test]
    fn test_heap_list_root_is_worst() {
        let mut heap = HeapCandidateList::<4>::new(f32::INFINITY);
        for (id, d) in [7.0, 3.0, 9.0, 1.0, 4.0, 8.0, 0.5].into_iter().enumerate() {
            heap.push(d, id as i32);
        }
        assert_eq!(heap.max_radius2(), 4.0);
        let got: Vec<usize> = heap.neighbors().iter().map(|n| n.id).collect();
        assert_eq!(got, vec![6, 3, 1, 4]);
    }

    #[test]
    fn test_heap_list_rejects_equal_to_root() {
        let mut heap = HeapCandidateList::<1>::new(f32::INFINITY);
        heap.push(2.0, 5);
        heap.push(2.0, 6);
        assert_eq!(heap.point_id(0), 5);
        heap.push(2.0, 4);
        assert_eq!(heap.point_id(0), 4);
    }

    #[test]
    fn test_nan_candidates_are_dropped() {
        let mut fixed = FixedCandidateList::<2>::new(f32::INFINITY);
        let mut heap = HeapCandidateList::<2>::new(f32::INFINITY);
        fixed.push(f32::NAN, 0);
        fixed.push(1.0, 1);
        heap.push(f32::NAN, 0);
        heap.push(1.0, 1);
        assert_eq!(fixed.neighbors(), vec![Neighbor { id: 1, dist2: 1.0 }]);
        assert_eq!(heap.neighbors(), vec![Neighbor { id: 1, dist2: 1.0 }]);
    }
}
