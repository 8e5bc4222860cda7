use crate::point::{Point, sqr_distance};

/// Axis-aligned bounding box in D-dimensional space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    pub min: Point<D>,
    pub max: Point<D>,
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: Point<D>, max: Point<D>) -> Self {
        Self { min, max }
    }

    /// An inverted box that any call to [`BoundingBox::grow`] will replace.
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY; D],
            max: [f32::NEG_INFINITY; D],
        }
    }

    /// The tightest box around all given points, or an empty box for no points.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<D>>,
    {
        let mut bounds = Self::empty();
        for p in points {
            bounds.grow(p);
        }
        bounds
    }

    /// Extends the box to include `p`.
    pub fn grow(&mut self, p: &Point<D>) {
        for i in 0..D {
            if p[i] < self.min[i] {
                self.min[i] = p[i];
            }
            if p[i] > self.max[i] {
                self.max[i] = p[i];
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        (0..D).any(|i| self.min[i] > self.max[i])
    }

    pub fn contains(&self, p: &Point<D>) -> bool {
        (0..D).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    /// Size of the box along `axis`.
    pub fn extent(&self, axis: usize) -> f32 {
        self.max[axis] - self.min[axis]
    }

    /// The axis with the largest extent; the first one wins ties.
    pub fn widest_axis(&self) -> usize {
        let mut best = 0;
        for i in 1..D {
            if self.extent(i) > self.extent(best) {
                best = i;
            }
        }
        best
    }

    /// The closest point inside the box to `p`. Points inside map to themselves.
    #[inline]
    pub fn project(&self, p: &Point<D>) -> Point<D> {
        let mut out = *p;
        for i in 0..D {
            out[i] = clamp(p[i], self.min[i], self.max[i]);
        }
        out
    }

    /// Squared distance from `p` to the box, zero if `p` is inside.
    #[inline]
    pub fn sqr_distance(&self, p: &Point<D>) -> f32 {
        sqr_distance(&self.project(p), p)
    }
}

/// Like `f32::clamp`, but never panics on inverted or NaN bounds.
#[inline]
pub(crate) fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}
