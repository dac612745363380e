use thiserror::Error;

/// Errors reported by the deque, the network and the path engine.
///
/// All of these are caller contract violations or resource failures. None
/// of them are transient, so nothing in the crate retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The backing array for `capacity` slots could not be allocated.
    #[error("could not allocate an index deque with capacity {capacity}")]
    Allocation { capacity: usize },

    /// An identifier outside of `[0, capacity)` was handed to the deque.
    #[error("identifier {id} is out of range for capacity {capacity}")]
    OutOfRange { id: usize, capacity: usize },

    /// `pop_front` was called on an empty deque.
    #[error("pop_front called on an empty deque")]
    PopFromEmpty,

    /// The identifier is already the head or the tail of the deque.
    #[error("identifier {id} is already linked into the deque")]
    DuplicateInsertion { id: usize },

    /// A node outside of `[0, nodes)` was named.
    #[error("node {node} does not exist in a network of {nodes} nodes")]
    UnknownNode { node: usize, nodes: usize },

    /// A link length was negative, NaN or infinite.
    #[error("link {from} -> {to} has invalid length {length}")]
    InvalidLength { from: usize, to: usize, length: f64 },

    /// A node with this user-defined id was already added.
    #[error("node {uid:?} was already added to the network")]
    DuplicateNode { uid: String },

    /// A search method name did not match any known method.
    #[error("unknown shortest path method {name:?}, expected one of: fifo, deq, dij")]
    UnknownMethod { name: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let e = Error::OutOfRange { id: 5, capacity: 2 };
        assert_eq!("identifier 5 is out of range for capacity 2", e.to_string());

        let e = Error::InvalidLength {
            from: 0,
            to: 1,
            length: -1.5,
        };
        assert_eq!("link 0 -> 1 has invalid length -1.5", e.to_string());

        let e = Error::DuplicateNode {
            uid: "A".to_string(),
        };
        assert_eq!("node \"A\" was already added to the network", e.to_string());
    }
}
