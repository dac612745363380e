use crate::error::{Error, Result};
use crate::slot::Link;
use std::fmt;
use tracing::{debug, trace, warn};

/// A fixed-capacity double-ended queue of identifiers in
/// `[0, capacity)`.
///
/// The identifiers themselves are used as indices into a preallocated
/// link array: the slot for `id` holds the identifier that follows it
/// toward the back. Pushing, popping and clearing are all O(1), and the
/// array is allocated once and reused across `clear()` calls.
///
/// Each identifier may be linked at most once. Pushing an identifier that
/// is the current head or tail is rejected with
/// [`Error::DuplicateInsertion`]; pushing one that sits in the interior of
/// the deque is not detected and corrupts the chain, so callers must track
/// membership themselves.
#[derive(Default, Clone)]
pub struct IndexDeque {
    // The front of the deque. `None` when the deque is empty.
    head: Option<usize>,
    // The back of the deque. `None` when the deque is empty.
    tail: Option<usize>,
    // One slot per identifier, holding that identifier's successor.
    links: Vec<Link>,
}

impl fmt::Debug for IndexDeque {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("IndexDeque")
            .field("capacity", &self.capacity())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}

impl IndexDeque {
    /// Creates an empty `IndexDeque` that accepts identifiers in
    /// `[0, capacity)`. The link array is allocated up front and never
    /// grows.
    ///
    /// Fails with [`Error::Allocation`] if the array cannot be obtained.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_deque::IndexDeque;
    ///
    /// let deque = IndexDeque::with_capacity(16).unwrap();
    /// assert_eq!(16, deque.capacity());
    /// assert!(!deque.is_non_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<IndexDeque> {
        let mut links = Vec::new();
        if let Err(e) = links.try_reserve_exact(capacity) {
            warn!(capacity, error = %e, "could not allocate index deque");
            return Err(Error::Allocation { capacity });
        }
        links.resize(capacity, Link::DETACHED);

        debug!(capacity, "allocated index deque");

        Ok(IndexDeque {
            head: None,
            tail: None,
            links,
        })
    }

    /// The number of distinct identifiers this deque accepts. This is
    /// fixed at construction and says nothing about how many identifiers
    /// are currently queued.
    pub fn capacity(&self) -> usize {
        self.links.len()
    }

    /// True when at least one identifier is queued.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_deque::IndexDeque;
    ///
    /// let mut d = IndexDeque::with_capacity(4).unwrap();
    /// assert!(!d.is_non_empty());
    ///
    /// d.push_back(3).unwrap();
    /// assert!(d.is_non_empty());
    /// ```
    pub fn is_non_empty(&self) -> bool {
        self.head.is_some()
    }

    /// True when no identifier is queued.
    pub fn is_empty(&self) -> bool {
        !self.is_non_empty()
    }

    /// Insert `id` at the back of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_deque::{Error, IndexDeque};
    ///
    /// let mut d = IndexDeque::with_capacity(2).unwrap();
    /// d.push_back(0).unwrap();
    ///
    /// assert_eq!(
    ///     Err(Error::OutOfRange { id: 5, capacity: 2 }),
    ///     d.push_back(5)
    /// );
    /// ```
    pub fn push_back(&mut self, id: usize) -> Result<()> {
        self.check_insertable(id)?;

        self.links[id] = Link::DETACHED;

        // Hang the new back off of the old one, or start the chain if
        // there was nothing to hang it from.
        match self.tail {
            Some(tail) => self.links[tail] = Link::to(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);

        Ok(())
    }

    /// Insert `id` at the front of the deque. The previous front becomes
    /// the successor of `id`; the rest of the chain is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_deque::IndexDeque;
    ///
    /// let mut d = IndexDeque::with_capacity(4).unwrap();
    /// d.push_back(1).unwrap();
    /// d.push_back(2).unwrap();
    /// d.push_front(0).unwrap();
    ///
    /// assert_eq!(Ok(0), d.pop_front());
    /// assert_eq!(Ok(1), d.pop_front());
    /// assert_eq!(Ok(2), d.pop_front());
    /// ```
    pub fn push_front(&mut self, id: usize) -> Result<()> {
        self.check_insertable(id)?;

        self.links[id] = match self.head {
            Some(head) => Link::to(head),
            None => {
                self.tail = Some(id);
                Link::DETACHED
            }
        };
        self.head = Some(id);

        Ok(())
    }

    /// Remove the front of the deque and return it. Fails with
    /// [`Error::PopFromEmpty`] if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_deque::{Error, IndexDeque};
    ///
    /// let mut d = IndexDeque::with_capacity(8).unwrap();
    /// d.push_back(5).unwrap();
    ///
    /// assert_eq!(Ok(5), d.pop_front());
    /// assert_eq!(Err(Error::PopFromEmpty), d.pop_front());
    /// ```
    pub fn pop_front(&mut self) -> Result<usize> {
        let front = self.head.ok_or(Error::PopFromEmpty)?;

        self.head = self.links[front].next();
        self.links[front] = Link::DETACHED;

        if self.head.is_none() {
            debug_assert_eq!(Some(front), self.tail);
            self.tail = None;
        }

        Ok(front)
    }

    /// Forget every queued identifier. The link array is kept as is and
    /// stale slots are overwritten by later pushes, so this is O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use index_deque::IndexDeque;
    ///
    /// let mut d = IndexDeque::with_capacity(4).unwrap();
    /// d.push_back(1).unwrap();
    /// d.push_back(2).unwrap();
    ///
    /// d.clear();
    /// assert!(d.is_empty());
    /// assert_eq!(4, d.capacity());
    /// ```
    pub fn clear(&mut self) {
        trace!(capacity = self.capacity(), "clearing index deque");
        self.head = None;
        self.tail = None;
    }

    fn check_insertable(&self, id: usize) -> Result<()> {
        if id >= self.links.len() {
            return Err(Error::OutOfRange {
                id,
                capacity: self.links.len(),
            });
        }

        // Relinking the head or tail would make it its own successor.
        // Interior members cannot be detected without extra bookkeeping.
        if self.head == Some(id) || self.tail == Some(id) {
            return Err(Error::DuplicateInsertion { id });
        }

        Ok(())
    }
}
