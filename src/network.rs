use crate::error::{Error, Result};
use std::collections::HashMap;

/// A directed link leaving some node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Edge {
    pub(crate) to: usize,
    pub(crate) length: f64,
}

/// A directed graph with weighted links over the nodes `[0, nodes)`.
///
/// Node identifiers are dense so that they can be used directly as
/// [`IndexDeque`](crate::IndexDeque) identifiers. Nodes read from
/// outside carry their own user-defined ids; [`add_node`] assigns them the
/// next dense identifier and [`node_id`] maps them back.
///
/// [`add_node`]: Network::add_node
/// [`node_id`]: Network::node_id
#[derive(Debug, Clone, Default)]
pub struct Network {
    // Outgoing links per node, in insertion order.
    outgoing: Vec<Vec<Edge>>,
    // User-defined id per node. `None` for nodes created by `new`.
    uids: Vec<Option<String>>,
    ids: HashMap<String, usize>,
    link_count: usize,
}

impl Network {
    /// Creates a network of `nodes` anonymous nodes and no links.
    pub fn new(nodes: usize) -> Network {
        Network {
            outgoing: vec![Vec::new(); nodes],
            uids: vec![None; nodes],
            ids: HashMap::new(),
            link_count: 0,
        }
    }

    /// Adds a node with the user-defined id `uid` and returns its dense
    /// identifier. Fails with [`Error::DuplicateNode`] if `uid` is taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_deque::{Error, Network};
    ///
    /// let mut n = Network::default();
    /// assert_eq!(Ok(0), n.add_node("A"));
    /// assert_eq!(Ok(1), n.add_node("B"));
    /// assert_eq!(Some(1), n.node_id("B"));
    /// assert_eq!(
    ///     Err(Error::DuplicateNode { uid: "A".to_string() }),
    ///     n.add_node("A")
    /// );
    /// ```
    pub fn add_node(&mut self, uid: impl Into<String>) -> Result<usize> {
        let uid = uid.into();
        if self.ids.contains_key(&uid) {
            return Err(Error::DuplicateNode { uid });
        }

        let node = self.outgoing.len();
        self.outgoing.push(Vec::new());
        self.uids.push(Some(uid.clone()));
        self.ids.insert(uid, node);
        Ok(node)
    }

    /// The dense identifier of the node added as `uid`.
    pub fn node_id(&self, uid: &str) -> Option<usize> {
        self.ids.get(uid).copied()
    }

    /// The user-defined id of `node`, if it was added with one.
    pub fn uid(&self, node: usize) -> Option<&str> {
        self.uids.get(node)?.as_deref()
    }

    /// The number of nodes, which is also the deque capacity a search
    /// over this network needs.
    pub fn node_count(&self) -> usize {
        self.outgoing.len()
    }

    /// The number of links added so far.
    pub fn link_count(&self) -> usize {
        self.link_count
    }

    /// Adds a directed link from `from` to `to` and returns its index.
    /// Lengths must be finite and non-negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_deque::{Error, Network};
    ///
    /// let mut n = Network::new(2);
    /// assert_eq!(Ok(0), n.add_link(0, 1, 2.5));
    /// assert_eq!(
    ///     Err(Error::UnknownNode { node: 2, nodes: 2 }),
    ///     n.add_link(0, 2, 1.0)
    /// );
    /// ```
    pub fn add_link(&mut self, from: usize, to: usize, length: f64) -> Result<usize> {
        self.check_node(from)?;
        self.check_node(to)?;
        if !length.is_finite() || length < 0.0 {
            return Err(Error::InvalidLength { from, to, length });
        }

        self.outgoing[from].push(Edge { to, length });
        self.link_count += 1;
        Ok(self.link_count - 1)
    }

    /// The links leaving `node` as `(to, length)` pairs, in the order they
    /// were added.
    pub fn outgoing(&self, node: usize) -> Result<impl Iterator<Item = (usize, f64)> + '_> {
        self.check_node(node)?;
        Ok(self.outgoing[node].iter().map(|e| (e.to, e.length)))
    }

    pub(crate) fn edges(&self, node: usize) -> &[Edge] {
        &self.outgoing[node]
    }

    pub(crate) fn check_node(&self, node: usize) -> Result<()> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(Error::UnknownNode {
                node,
                nodes: self.node_count(),
            })
        }
    }
}
