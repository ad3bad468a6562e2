//! Undirected graph over a dense boolean adjacency matrix.
//!
//! Vertices are arbitrary values mapped to dense integer indices in
//! `[0, len)`. Removing a vertex compacts the index range: every vertex
//! above the removed one shifts down by one, and the adjacency matrix is
//! shifted identically, so surviving edges are preserved.
//!
//! Vertex values are unique: `add_vertex` refuses a value that is already
//! present instead of silently storing a duplicate.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::matrix::SquareMatrix;

/// Initial side length of the adjacency matrix; doubles when exhausted.
const DEFAULT_CAPACITY: usize = 4;

/// An undirected, unweighted graph with matrix-backed adjacency.
///
/// # Examples
///
/// ```
/// use delivery_routing::graph::Graph;
///
/// let mut g = Graph::new();
/// g.add_vertex("a");
/// g.add_vertex("b");
/// g.add_vertex("c");
/// g.add_edge(&"a", &"b");
/// g.add_edge(&"b", &"c");
///
/// assert!(g.has_edge(&"b", &"a")); // symmetric
/// assert!(g.is_connected());
/// assert_eq!(g.bfs(&"a"), vec!["a", "b", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct Graph<T> {
    vertices: Vec<T>,
    index: HashMap<T, usize>,
    adjacency: SquareMatrix<bool>,
}

impl<T: Clone + Eq + Hash> Graph<T> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            adjacency: SquareMatrix::new(DEFAULT_CAPACITY, false),
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over all vertex values in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.vertices.iter()
    }

    /// Adds a vertex, growing the backing matrix when capacity is
    /// exhausted. Returns `false` if an equal value is already present.
    pub fn add_vertex(&mut self, vertex: T) -> bool {
        if self.index.contains_key(&vertex) {
            return false;
        }
        let slot = self.vertices.len();
        if slot == self.adjacency.capacity() {
            self.adjacency.grow();
        }
        self.adjacency.clear_line(slot, slot + 1);
        self.index.insert(vertex.clone(), slot);
        self.vertices.push(vertex);
        true
    }

    /// Removes a vertex and compacts the index range. Returns `false` when
    /// the value is absent.
    pub fn remove_vertex(&mut self, vertex: &T) -> bool {
        let Some(removed) = self.index.remove(vertex) else {
            return false;
        };
        let len = self.vertices.len();
        self.vertices.remove(removed);
        self.adjacency.remove(removed, len);
        for slot in self.index.values_mut() {
            if *slot > removed {
                *slot -= 1;
            }
        }
        true
    }

    /// Connects two vertices. No-op returning `false` when either endpoint
    /// is absent; both symmetric cells are set otherwise.
    pub fn add_edge(&mut self, v1: &T, v2: &T) -> bool {
        match (self.index_of(v1), self.index_of(v2)) {
            (Some(i), Some(j)) => {
                self.adjacency.set(i, j, true);
                self.adjacency.set(j, i, true);
                true
            }
            _ => false,
        }
    }

    /// Disconnects two vertices. No-op returning `false` when either
    /// endpoint is absent.
    pub fn remove_edge(&mut self, v1: &T, v2: &T) -> bool {
        match (self.index_of(v1), self.index_of(v2)) {
            (Some(i), Some(j)) => {
                self.adjacency.set(i, j, false);
                self.adjacency.set(j, i, false);
                true
            }
            _ => false,
        }
    }

    /// Returns true if the two vertices are directly connected.
    pub fn has_edge(&self, v1: &T, v2: &T) -> bool {
        match (self.index_of(v1), self.index_of(v2)) {
            (Some(i), Some(j)) => self.adjacency.get(i, j),
            _ => false,
        }
    }

    /// Breadth-first visitation order from `start`; empty when `start` is
    /// not in the graph. Neighbors are visited in ascending index order.
    pub fn bfs(&self, start: &T) -> Vec<T> {
        let mut order = Vec::new();
        let Some(start) = self.index_of(start) else {
            return order;
        };
        let n = self.vertices.len();
        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();

        queue.push_back(start);
        visited[start] = true;
        while let Some(x) = queue.pop_front() {
            order.push(self.vertices[x].clone());
            for i in 0..n {
                if self.adjacency.get(x, i) && !visited[i] {
                    queue.push_back(i);
                    visited[i] = true;
                }
            }
        }
        order
    }

    /// Depth-first visitation order from `start`; empty when `start` is not
    /// in the graph. Descends into the lowest-index unvisited neighbor and
    /// backtracks on dead ends.
    pub fn dfs(&self, start: &T) -> Vec<T> {
        let mut order = Vec::new();
        let Some(start) = self.index_of(start) else {
            return order;
        };
        let n = self.vertices.len();
        let mut visited = vec![false; n];
        let mut stack = vec![start];

        visited[start] = true;
        order.push(self.vertices[start].clone());
        while let Some(&x) = stack.last() {
            let next = (0..n).find(|&i| self.adjacency.get(x, i) && !visited[i]);
            match next {
                Some(i) => {
                    stack.push(i);
                    order.push(self.vertices[i].clone());
                    visited[i] = true;
                }
                None => {
                    stack.pop();
                }
            }
        }
        order
    }

    /// Returns true if a breadth-first traversal from the first vertex
    /// reaches every vertex; `false` for an empty graph.
    pub fn is_connected(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.bfs(&self.vertices[0]).len() == self.vertices.len()
    }

    // Index-level accessors for the network layer, which runs its
    // shortest-path engine over raw indices.

    pub(crate) fn index_of(&self, vertex: &T) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    pub(crate) fn vertex_at(&self, index: usize) -> &T {
        &self.vertices[index]
    }

    pub(crate) fn adjacent(&self, i: usize, j: usize) -> bool {
        self.adjacency.get(i, j)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.adjacency.capacity()
    }
}

impl<T: Clone + Eq + Hash> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph<u32> {
        // 1 - 2
        // |   |
        // 3 - 4
        let mut g = Graph::new();
        for v in [1, 2, 3, 4] {
            g.add_vertex(v);
        }
        g.add_edge(&1, &2);
        g.add_edge(&1, &3);
        g.add_edge(&2, &4);
        g.add_edge(&3, &4);
        g
    }

    #[test]
    fn add_vertex_rejects_duplicates() {
        let mut g = Graph::new();
        assert!(g.add_vertex(7));
        assert!(!g.add_vertex(7));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn growth_preserves_edges() {
        let mut g = Graph::new();
        for v in 0..20u32 {
            g.add_vertex(v);
            if v > 0 {
                g.add_edge(&(v - 1), &v);
            }
        }
        for v in 1..20u32 {
            assert!(g.has_edge(&(v - 1), &v));
            assert!(g.has_edge(&v, &(v - 1)));
        }
        assert!(g.is_connected());
    }

    #[test]
    fn edge_ops_on_missing_vertices_are_noops() {
        let mut g = diamond();
        assert!(!g.add_edge(&1, &99));
        assert!(!g.remove_edge(&99, &2));
        assert!(!g.remove_vertex(&99));
        assert_eq!(g.len(), 4);
    }

    #[test]
    fn remove_vertex_compacts_and_preserves_edges() {
        let mut g = diamond();
        assert!(g.remove_vertex(&2));
        assert_eq!(g.len(), 3);
        assert!(g.has_edge(&1, &3));
        assert!(g.has_edge(&3, &4));
        assert!(!g.has_edge(&1, &4));
        // Indices above the removed one shifted down by one.
        assert_eq!(g.index_of(&1), Some(0));
        assert_eq!(g.index_of(&3), Some(1));
        assert_eq!(g.index_of(&4), Some(2));
    }

    #[test]
    fn adjacency_stays_symmetric_under_mutation() {
        let mut g = diamond();
        g.remove_vertex(&3);
        g.add_vertex(5);
        g.add_edge(&5, &1);
        g.remove_edge(&1, &2);
        let n = g.len();
        for i in 0..n {
            for j in 0..n {
                assert_eq!(g.adjacent(i, j), g.adjacent(j, i));
            }
        }
    }

    #[test]
    fn bfs_order_is_breadth_first() {
        let g = diamond();
        assert_eq!(g.bfs(&1), vec![1, 2, 3, 4]);
        assert_eq!(g.bfs(&4), vec![4, 2, 3, 1]);
    }

    #[test]
    fn dfs_descends_before_backtracking() {
        let g = diamond();
        // From 1: take 2 (lowest index), then 4, then 3, dead end, unwind.
        assert_eq!(g.dfs(&1), vec![1, 2, 4, 3]);
    }

    #[test]
    fn traversal_from_absent_vertex_is_empty() {
        let g = diamond();
        assert!(g.bfs(&42).is_empty());
        assert!(g.dfs(&42).is_empty());
    }

    #[test]
    fn connectivity() {
        let mut g = diamond();
        assert!(g.is_connected());
        g.add_vertex(9); // isolated
        assert!(!g.is_connected());
        let empty: Graph<u32> = Graph::new();
        assert!(!empty.is_connected());
    }
}
