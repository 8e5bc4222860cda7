use kdknn::Point;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Points drawn uniformly from `[lo, hi)` on every axis.
pub fn random_points<const D: usize>(n: usize, lo: f32, hi: f32, seed: u64) -> Vec<Point<D>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_points_with_rng(n, lo, hi, &mut rng)
}

pub fn random_points_with_rng<const D: usize, R: Rng + ?Sized>(
    n: usize,
    lo: f32,
    hi: f32,
    rng: &mut R,
) -> Vec<Point<D>> {
    (0..n)
        .map(|_| {
            let mut p = [0.0; D];
            for c in p.iter_mut() {
                *c = rng.gen_range(lo..hi);
            }
            p
        })
        .collect()
}

/// Tight clusters around a few random centers, with many near-equal
/// coordinates along the split axes.
pub fn clustered_points<const D: usize>(n: usize, clusters: usize, seed: u64) -> Vec<Point<D>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let centers: Vec<Point<D>> = random_points_with_rng(clusters, -100.0, 100.0, &mut rng);
    (0..n)
        .map(|i| {
            let c = centers[i % clusters];
            let mut p = c;
            for v in p.iter_mut() {
                *v += rng.gen_range(-0.5..0.5);
            }
            p
        })
        .collect()
}
