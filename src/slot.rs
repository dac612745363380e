use std::num::NonZeroUsize;

/// One slot of the deque's link array. The slot at index `id` holds the
/// identifier that follows `id` toward the back of the deque.
///
/// The successor is stored offset by one so that "no successor" occupies
/// the niche of `NonZeroUsize` and the slot stays one word wide.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    // The successor plus one. `None` when the slot is the back of the
    // deque or is not linked at all.
    next: Option<NonZeroUsize>,
}

impl Link {
    /// A slot with no successor.
    pub(crate) const DETACHED: Link = Link { next: None };

    pub(crate) fn to(next: usize) -> Link {
        // `next` is always a bounds-checked index below the capacity of a
        // `Vec`, so `next + 1` cannot overflow.
        Link {
            next: NonZeroUsize::new(next + 1),
        }
    }

    pub(crate) fn next(self) -> Option<usize> {
        self.next.map(|n| n.get() - 1)
    }
}
