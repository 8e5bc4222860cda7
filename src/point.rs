/// A point in D-dimensional space.
pub type Point<const D: usize> = [f32; D];

/// Binds a stored data record to the coordinate point it is indexed by.
///
/// Trees store records of any type implementing this trait, so callers can
/// keep a payload (colors, normals, ids) next to the coordinates without a
/// separate lookup table.
pub trait DataPoint<const D: usize> {
    fn point(&self) -> Point<D>;
}

impl<const D: usize> DataPoint<D> for Point<D> {
    #[inline]
    fn point(&self) -> Point<D> {
        *self
    }
}

#[inline]
pub fn sqr(v: f32) -> f32 {
    v * v
}

#[inline]
pub fn sqr_distance<const D: usize>(a: &Point<D>, b: &Point<D>) -> f32 {
    let mut d2 = 0.0;
    for i in 0..D {
        d2 += sqr(a[i] - b[i]);
    }
    d2
}
