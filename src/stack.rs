/// Capacity of the per-query traversal stack. A balanced tree this deep holds
/// about 2^30 points; trees are rejected at construction if they are deeper.
pub const STACK_DEPTH: usize = 30;

/// Fixed-capacity stack living on the traversing task's own frame.
///
/// Pushing beyond `N` entries is a broken precondition (the tree is deeper
/// than the builder allows) and panics.
pub(crate) struct Stack<T, const N: usize = STACK_DEPTH> {
    elements: [T; N],
    size: usize,
}

impl<T, const N: usize> Stack<T, N>
where
    T: Copy,
{
    /// `filler` only initializes the unused slots; it is never popped.
    #[inline]
    pub(crate) fn new(filler: T) -> Self {
        Self {
            elements: [filler; N],
            size: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, item: T) {
        assert!(self.size < N, "traversal stack overflow: tree deeper than {}", N);
        self.elements[self.size] = item;
        self.size += 1;
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.size > 0 {
            self.size -= 1;
            Some(self.elements[self.size])
        } else {
            None
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.size
    }
}
