use crate::deque::IndexDeque;
use crate::error::{Error, Result};
use crate::network::Network;
use std::str::FromStr;
use tracing::{debug, trace};

// Where a node stands relative to the scan-eligible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    // Never queued during this run.
    Unreached,
    // Currently eligible for scanning.
    Queued,
    // Was eligible, has been scanned, is no longer eligible.
    Scanned,
}

/// Distance labels and predecessors from one source node.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    source: usize,
    dist: Vec<f64>,
    pred: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// The node the search started from.
    pub fn source(&self) -> usize {
        self.source
    }

    /// The shortest distance from the source to `node`, or `None` if
    /// `node` is unreachable or does not exist.
    pub fn distance(&self, node: usize) -> Option<f64> {
        self.dist.get(node).copied().filter(|d| d.is_finite())
    }

    /// The node preceding `node` on its shortest path. `None` for the
    /// source itself and for unreachable nodes.
    pub fn predecessor(&self, node: usize) -> Option<usize> {
        self.pred.get(node).copied().flatten()
    }

    /// The nodes on the shortest path from the source to `node`, both
    /// ends included.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_deque::{Method, Network, PathEngine};
    ///
    /// let mut n = Network::new(3);
    /// n.add_link(0, 1, 1.0).unwrap();
    /// n.add_link(1, 2, 1.0).unwrap();
    /// n.add_link(0, 2, 5.0).unwrap();
    ///
    /// let mut engine = PathEngine::new(&n).unwrap();
    /// let paths = engine.single_source(0, Method::Deque).unwrap();
    ///
    /// assert_eq!(Some(vec![0, 1, 2]), paths.path_to(2));
    /// assert_eq!(Some(2.0), paths.distance(2));
    /// ```
    pub fn path_to(&self, node: usize) -> Option<Vec<usize>> {
        self.distance(node)?;

        let mut path = vec![node];
        let mut at = node;
        while let Some(p) = self.predecessor(at) {
            path.push(p);
            at = p;
        }
        debug_assert_eq!(self.source, at);

        path.reverse();
        Some(path)
    }
}

/// How a search picks the next node to scan.
///
/// All three are label-correcting searches and agree on every distance;
/// they differ in how many times a node may be scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// First in, first out. Improved nodes always join the back.
    Fifo,
    /// Newly reached nodes join the back, nodes improved after they were
    /// scanned rejoin at the front.
    Deque,
    /// Scan the eligible node with the smallest label, found by a linear
    /// scan of the eligible list.
    MinLabel,
}

impl Default for Method {
    fn default() -> Method {
        Method::Deque
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Parses a method by prefix, ignoring case: `fifo`, `deq` or `dij`.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_deque::Method;
    ///
    /// assert_eq!(Ok(Method::Deque), "deque".parse());
    /// assert_eq!(Ok(Method::MinLabel), "Dijkstra".parse());
    /// assert!("fw".parse::<Method>().is_err());
    /// ```
    fn from_str(name: &str) -> Result<Method> {
        let lower = name.to_ascii_lowercase();
        if lower.starts_with("fifo") {
            Ok(Method::Fifo)
        } else if lower.starts_with("deq") {
            Ok(Method::Deque)
        } else if lower.starts_with("dij") {
            Ok(Method::MinLabel)
        } else {
            Err(Error::UnknownMethod {
                name: name.to_string(),
            })
        }
    }
}

/// Runs label-correcting shortest path searches over a [`Network`].
///
/// The deque, the eligible list and the status array are allocated once
/// and reused by every search.
pub struct PathEngine<'n> {
    network: &'n Network,
    deque: IndexDeque,
    // Scan-eligible nodes for `Method::MinLabel`.
    eligible: Vec<usize>,
    status: Vec<Status>,
}

impl<'n> PathEngine<'n> {
    /// Allocates the search state for `network`. Fails with
    /// [`Error::Allocation`] if the deque cannot be allocated.
    pub fn new(network: &'n Network) -> Result<PathEngine<'n>> {
        let nodes = network.node_count();
        Ok(PathEngine {
            network,
            deque: IndexDeque::with_capacity(nodes)?,
            eligible: Vec::with_capacity(nodes),
            status: vec![Status::Unreached; nodes],
        })
    }

    /// Shortest paths from `source` to every node of the network.
    pub fn single_source(&mut self, source: usize, method: Method) -> Result<ShortestPaths> {
        let network = self.network;
        network.check_node(source)?;

        let nodes = network.node_count();
        let mut dist = vec![f64::INFINITY; nodes];
        let mut pred = vec![None; nodes];

        for s in self.status.iter_mut() {
            *s = Status::Unreached;
        }
        dist[source] = 0.0;

        let scans = match method {
            Method::Fifo | Method::Deque => {
                self.label_correcting(source, method, &mut dist, &mut pred)?
            }
            Method::MinLabel => self.min_label(source, &mut dist, &mut pred),
        };

        debug!(source, nodes, scans, ?method, "shortest path search finished");

        Ok(ShortestPaths { source, dist, pred })
    }

    /// Shortest paths between every pair of nodes, indexed by source.
    pub fn all_pairs(&mut self, method: Method) -> Result<Vec<ShortestPaths>> {
        (0..self.network.node_count())
            .map(|source| self.single_source(source, method))
            .collect()
    }

    fn label_correcting(
        &mut self,
        source: usize,
        method: Method,
        dist: &mut [f64],
        pred: &mut [Option<usize>],
    ) -> Result<usize> {
        let network = self.network;

        self.deque.clear();
        self.deque.push_back(source)?;
        self.status[source] = Status::Queued;

        let mut scans = 0usize;
        while self.deque.is_non_empty() {
            let i = self.deque.pop_front()?;
            self.status[i] = Status::Scanned;
            scans += 1;

            for edge in network.edges(i) {
                let j = edge.to;
                let label = dist[i] + edge.length;
                if label >= dist[j] {
                    continue;
                }

                dist[j] = label;
                pred[j] = Some(i);

                match self.status[j] {
                    Status::Queued => continue,
                    Status::Scanned if method == Method::Deque => {
                        trace!(node = j, label, "requeueing scanned node at front");
                        self.deque.push_front(j)?;
                    }
                    _ => self.deque.push_back(j)?,
                }
                self.status[j] = Status::Queued;
            }
        }

        Ok(scans)
    }

    fn min_label(
        &mut self,
        source: usize,
        dist: &mut [f64],
        pred: &mut [Option<usize>],
    ) -> usize {
        let network = self.network;

        self.eligible.clear();
        self.eligible.push(source);
        self.status[source] = Status::Queued;

        let mut scans = 0usize;
        while !self.eligible.is_empty() {
            let mut at = 0;
            for (k, &node) in self.eligible.iter().enumerate().skip(1) {
                if dist[node] < dist[self.eligible[at]] {
                    at = k;
                }
            }
            let i = self.eligible.swap_remove(at);
            self.status[i] = Status::Scanned;
            scans += 1;

            for edge in network.edges(i) {
                let j = edge.to;
                let label = dist[i] + edge.length;
                if label >= dist[j] {
                    continue;
                }

                dist[j] = label;
                pred[j] = Some(i);

                if self.status[j] != Status::Queued {
                    self.eligible.push(j);
                    self.status[j] = Status::Queued;
                }
            }
        }

        scans
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // 0 -> 2 is long; the cheap route to 2 is only found after 2 has been
    // scanned once, which forces it back onto the front of the deque.
    fn detour() -> Network {
        let mut n = Network::new(5);
        n.add_link(0, 1, 1.0).unwrap();
        n.add_link(0, 2, 5.0).unwrap();
        n.add_link(1, 3, 1.0).unwrap();
        n.add_link(3, 2, 1.0).unwrap();
        n.add_link(2, 4, 1.0).unwrap();
        n
    }

    #[test]
    fn scanned_nodes_are_corrected() {
        let n = detour();
        let mut engine = PathEngine::new(&n).unwrap();
        let paths = engine.single_source(0, Method::Deque).unwrap();

        assert_eq!(0, paths.source());
        assert_eq!(Some(0.0), paths.distance(0));
        assert_eq!(Some(1.0), paths.distance(1));
        assert_eq!(Some(3.0), paths.distance(2));
        assert_eq!(Some(2.0), paths.distance(3));
        assert_eq!(Some(4.0), paths.distance(4));

        assert_eq!(Some(3), paths.predecessor(2));
        assert_eq!(None, paths.predecessor(0));
        assert_eq!(Some(vec![0, 1, 3, 2, 4]), paths.path_to(4));
        assert_eq!(Some(vec![0]), paths.path_to(0));
    }

    #[test]
    fn unreachable_nodes_have_no_distance() {
        let n = detour();
        let mut engine = PathEngine::new(&n).unwrap();
        let paths = engine.single_source(4, Method::Deque).unwrap();

        assert_eq!(Some(0.0), paths.distance(4));
        assert_eq!(None, paths.distance(0));
        assert_eq!(None, paths.predecessor(0));
        assert_eq!(None, paths.path_to(0));
        assert_eq!(None, paths.distance(99));
    }

    #[test]
    fn unknown_source_is_rejected() {
        let n = detour();
        let mut engine = PathEngine::new(&n).unwrap();
        assert_eq!(
            Err(Error::UnknownNode { node: 5, nodes: 5 }),
            engine.single_source(5, Method::Fifo)
        );
    }

    #[test]
    fn repeated_searches_reuse_the_deque() {
        let n = detour();
        let mut engine = PathEngine::new(&n).unwrap();

        let first = engine.single_source(0, Method::Deque).unwrap();
        engine.single_source(3, Method::MinLabel).unwrap();
        let again = engine.single_source(0, Method::Deque).unwrap();

        assert_eq!(first, again);
    }

    #[test]
    fn all_pairs_runs_every_source() {
        let n = detour();
        let mut engine = PathEngine::new(&n).unwrap();
        let all = engine.all_pairs(Method::Deque).unwrap();

        assert_eq!(5, all.len());
        for (source, paths) in all.iter().enumerate() {
            assert_eq!(source, paths.source());
            assert_eq!(Some(0.0), paths.distance(source));
        }
        assert_eq!(Some(2.0), all[1].distance(2));
        assert_eq!(None, all[2].distance(1));
    }

    #[test]
    fn empty_network_has_no_sources() {
        let n = Network::new(0);
        let mut engine = PathEngine::new(&n).unwrap();
        assert_eq!(Ok(Vec::new()), engine.all_pairs(Method::Deque));
    }

    const METHODS: [Method; 3] = [Method::Fifo, Method::Deque, Method::MinLabel];

    #[test]
    fn every_method_finds_the_same_paths() {
        let n = detour();
        let mut engine = PathEngine::new(&n).unwrap();
        let expected = engine.all_pairs(Method::Deque).unwrap();

        for &method in &METHODS {
            let all = engine.all_pairs(method).unwrap();
            for (source, paths) in all.iter().enumerate() {
                for node in 0..n.node_count() {
                    assert_eq!(expected[source].distance(node), paths.distance(node));
                }
            }
            assert_eq!(Some(vec![0, 1, 3, 2, 4]), all[0].path_to(4));
        }
    }

    #[test]
    fn every_method_rejects_unknown_sources() {
        let n = detour();
        let mut engine = PathEngine::new(&n).unwrap();
        for &method in &METHODS {
            assert_eq!(
                Err(Error::UnknownNode { node: 7, nodes: 5 }),
                engine.single_source(7, method)
            );
        }
    }

    #[test]
    fn methods_parse_by_prefix() {
        assert_eq!(Ok(Method::Fifo), "FIFO".parse());
        assert_eq!(Ok(Method::Deque), "deq".parse());
        assert_eq!(Ok(Method::MinLabel), "dijkstra".parse());
        assert_eq!(Method::Deque, Method::default());
        assert_eq!(
            Err(Error::UnknownMethod {
                name: "fw".to_string()
            }),
            "fw".parse::<Method>()
        );
    }
}
