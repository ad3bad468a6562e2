//! Weighted undirected network with a matrix-backed shortest-path engine.
//!
//! A [`Network`] composes a [`Graph`] (the adjacency relation) with a
//! parallel `f64` weight matrix where `+infinity` encodes "no edge". Both
//! matrices are resized and shifted in lockstep, so the invariant
//! `weight finite <=> adjacency bit set` holds across every vertex add and
//! remove.
//!
//! The shortest-path engine is a worklist variant of Dijkstra over raw
//! vertex indices: each round the candidate weights of all unvisited
//! vertices are rebuilt into a min-heap, the smallest is popped, and it is
//! claimed by an unvisited vertex that carries that weight *and* is
//! adjacent to the visited frontier. A popped weight no vertex can claim
//! means the remaining targets are unreachable.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;

use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::debug;

use crate::graph::Graph;
use crate::matrix::SquareMatrix;

/// Error type for network mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Edge weights must be non-negative.
    NegativeWeight(f64),
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::NegativeWeight(w) => {
                write!(f, "edge weight must be >= 0, got {}", w)
            }
        }
    }
}

impl std::error::Error for NetworkError {}

/// One finite-weight cell of the weight matrix: an undirected direct
/// connection between two vertices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path<T> {
    pub start: T,
    pub destination: T,
    pub weight: f64,
}

/// A weighted, undirected network over arbitrary vertex values.
///
/// # Examples
///
/// ```
/// use delivery_routing::network::Network;
///
/// let mut net = Network::new();
/// for v in [10, 20, 30] {
///     net.add_vertex(v);
/// }
/// net.add_edge(&10, &20, 9.0).unwrap();
/// net.add_edge(&20, &30, 4.0).unwrap();
///
/// assert_eq!(net.shortest_path(&10, &30), vec![10, 20, 30]);
/// assert_eq!(net.shortest_path_weight(&10, &30), Some(13.0));
/// assert_eq!(net.shortest_path_weight(&10, &99), None); // unknown vertex
/// ```
#[derive(Debug, Clone)]
pub struct Network<T> {
    graph: Graph<T>,
    weights: SquareMatrix<f64>,
}

impl<T: Clone + Eq + Hash> Network<T> {
    /// Creates an empty network.
    pub fn new() -> Self {
        let graph = Graph::new();
        let weights = SquareMatrix::new(graph.capacity(), f64::INFINITY);
        Self { graph, weights }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// Returns true if the network has no vertices.
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Iterates over all vertex values. Insertion order is not guaranteed
    /// to survive removals.
    pub fn vertices(&self) -> impl Iterator<Item = &T> {
        self.graph.iter()
    }

    /// Adds a vertex; the new weight row/column starts out disconnected
    /// (`+infinity`). Returns `false` if the value is already present.
    pub fn add_vertex(&mut self, vertex: T) -> bool {
        let slot = self.graph.len();
        if !self.graph.add_vertex(vertex) {
            return false;
        }
        if self.weights.capacity() < self.graph.capacity() {
            self.weights.grow();
        }
        self.weights.clear_line(slot, slot + 1);
        true
    }

    /// Removes a vertex, shifting the weight matrix in lockstep with the
    /// adjacency matrix. Returns `false` when the value is absent.
    pub fn remove_vertex(&mut self, vertex: &T) -> bool {
        let len = self.graph.len();
        let Some(index) = self.graph.index_of(vertex) else {
            return false;
        };
        self.graph.remove_vertex(vertex);
        self.weights.remove(index, len);
        true
    }

    /// Connects two vertices with the given weight, symmetrically.
    ///
    /// Rejects negative weights. Returns `Ok(false)` (no-op) when either
    /// endpoint is absent; an absent vertex is an expected outcome, not an
    /// error.
    pub fn add_edge(&mut self, v1: &T, v2: &T, weight: f64) -> Result<bool, NetworkError> {
        if weight < 0.0 {
            return Err(NetworkError::NegativeWeight(weight));
        }
        let (Some(i), Some(j)) = (self.graph.index_of(v1), self.graph.index_of(v2)) else {
            return Ok(false);
        };
        self.graph.add_edge(v1, v2);
        self.weights.set(i, j, weight);
        self.weights.set(j, i, weight);
        debug!(from = i, to = j, weight, "edge added");
        Ok(true)
    }

    /// Disconnects two vertices: the weight cells go back to `+infinity`
    /// and the adjacency bits are cleared. Returns `false` when either
    /// endpoint is absent.
    pub fn remove_edge(&mut self, v1: &T, v2: &T) -> bool {
        let (Some(i), Some(j)) = (self.graph.index_of(v1), self.graph.index_of(v2)) else {
            return false;
        };
        self.graph.remove_edge(v1, v2);
        self.weights.set(i, j, f64::INFINITY);
        self.weights.set(j, i, f64::INFINITY);
        debug!(from = i, to = j, "edge removed");
        true
    }

    /// Returns true if the two vertices are directly connected.
    pub fn has_edge(&self, v1: &T, v2: &T) -> bool {
        self.graph.has_edge(v1, v2)
    }

    /// Breadth-first visitation order from `start`.
    pub fn bfs(&self, start: &T) -> Vec<T> {
        self.graph.bfs(start)
    }

    /// Depth-first visitation order from `start`.
    pub fn dfs(&self, start: &T) -> Vec<T> {
        self.graph.dfs(start)
    }

    /// Returns true if every vertex is reachable from the first one.
    pub fn is_connected(&self) -> bool {
        self.graph.is_connected()
    }

    /// Weight of the shortest path between two vertices.
    ///
    /// Returns `None` when either vertex is absent from the network,
    /// `Some(f64::INFINITY)` when no path exists, and otherwise the sum of
    /// the consecutive-pair weights along the reconstructed path (so this
    /// always agrees with [`shortest_path`](Self::shortest_path)).
    pub fn shortest_path_weight(&self, v1: &T, v2: &T) -> Option<f64> {
        let (Some(start), Some(target)) = (self.graph.index_of(v1), self.graph.index_of(v2))
        else {
            return None;
        };
        let indices = self.shortest_path_indices(start, target);
        if indices.is_empty() {
            return Some(f64::INFINITY);
        }
        let mut total = 0.0;
        for pair in indices.windows(2) {
            total += self.weights.get(pair[0], pair[1]);
        }
        Some(total)
    }

    /// Ordered sequence of vertex values on the shortest path from `v1` to
    /// `v2`, both inclusive. Empty when either vertex is absent or no path
    /// exists; `[v1]` when the two are equal.
    pub fn shortest_path(&self, v1: &T, v2: &T) -> Vec<T> {
        let (Some(start), Some(target)) = (self.graph.index_of(v1), self.graph.index_of(v2))
        else {
            return Vec::new();
        };
        self.shortest_path_indices(start, target)
            .into_iter()
            .map(|i| self.graph.vertex_at(i).clone())
            .collect()
    }

    /// Lazily enumerates every undirected direct connection, scanning the
    /// upper triangle (`i <= j`) of the weight matrix so each pair appears
    /// once.
    pub fn paths(&self) -> impl Iterator<Item = Path<T>> + '_ {
        let n = self.graph.len();
        (0..n).flat_map(move |i| {
            (i..n).filter_map(move |j| {
                let weight = self.weights.get(i, j);
                weight.is_finite().then(|| Path {
                    start: self.graph.vertex_at(i).clone(),
                    destination: self.graph.vertex_at(j).clone(),
                    weight,
                })
            })
        })
    }

    /// Shortest path over raw indices: the worklist algorithm described in
    /// the module docs. Returns the index sequence start..=target, or empty
    /// when the target is unreachable.
    fn shortest_path_indices(&self, start: usize, target: usize) -> Vec<usize> {
        if start == target {
            return vec![start];
        }
        let n = self.graph.len();
        let mut visited = vec![false; n];
        let mut predecessor = vec![start; n];
        let mut path_weight = vec![f64::INFINITY; n];

        // Seed from the direct edges out of the start vertex.
        path_weight[start] = 0.0;
        visited[start] = true;
        for i in 0..n {
            if i != start {
                path_weight[i] = self.weights.get(start, i);
            }
        }

        let mut worklist: BinaryHeap<Reverse<OrderedFloat<f64>>> = BinaryHeap::new();
        while !visited[target] {
            // The worklist is rebuilt from scratch every round: relaxation
            // may have lowered any number of candidate weights.
            worklist.clear();
            for i in 0..n {
                if !visited[i] {
                    worklist.push(Reverse(OrderedFloat(path_weight[i])));
                }
            }
            let Some(Reverse(OrderedFloat(weight))) = worklist.pop() else {
                break;
            };
            if weight == f64::INFINITY {
                return Vec::new();
            }
            // The popped weight is claimed by an unvisited vertex carrying
            // it that touches the visited frontier; no claimant means the
            // rest of the graph is cut off.
            let Some(x) = self.claim_candidate(&visited, &path_weight, weight) else {
                return Vec::new();
            };
            visited[x] = true;
            for i in 0..n {
                if !visited[i] {
                    let through = path_weight[x] + self.weights.get(x, i);
                    if through < path_weight[i] {
                        path_weight[i] = through;
                        predecessor[i] = x;
                    }
                }
            }
        }
        if !visited[target] {
            return Vec::new();
        }

        // Walk the predecessor chain target -> start through a stack to
        // emit the path in forward order.
        let mut stack = vec![target];
        let mut index = target;
        while index != start {
            index = predecessor[index];
            stack.push(index);
        }
        let mut indices = Vec::with_capacity(stack.len());
        while let Some(i) = stack.pop() {
            indices.push(i);
        }
        indices
    }

    /// First unvisited vertex whose current path weight equals `weight` and
    /// that has a finite edge to some visited vertex.
    fn claim_candidate(
        &self,
        visited: &[bool],
        path_weight: &[f64],
        weight: f64,
    ) -> Option<usize> {
        let n = self.graph.len();
        (0..n).find(|&i| {
            !visited[i]
                && path_weight[i] == weight
                && (0..n).any(|j| visited[j] && self.weights.get(i, j).is_finite())
        })
    }
}

impl<T: Clone + Eq + Hash> Default for Network<T> {
    fn default() -> Self {
        Self::new()
    }
}
