use kdknn::{DataPoint, Neighbor, Point, encode, sqr_distance};

/// The neighbors a k-slot candidate list must end up with: the `k` smallest
/// `(dist2, id)` pairs within the cutoff, ordered like the packed entries.
pub fn brute_force_knn<T: DataPoint<D>, const D: usize>(
    data: &[T],
    query: &Point<D>,
    k: usize,
    cutoff_radius: f32,
) -> Vec<Neighbor> {
    let cutoff2 = cutoff_radius * cutoff_radius;
    let mut all: Vec<(u64, Neighbor)> = data
        .iter()
        .enumerate()
        .map(|(id, d)| {
            let dist2 = sqr_distance(&d.point(), query);
            (encode(dist2, id as i32), Neighbor { id, dist2 })
        })
        .filter(|(_, n)| n.dist2 <= cutoff2)
        .collect();
    all.sort_unstable_by_key(|(key, _)| *key);
    all.into_iter().take(k).map(|(_, n)| n).collect()
}
