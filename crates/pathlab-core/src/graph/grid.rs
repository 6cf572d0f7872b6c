//! 4-connected grid graph with optional blocked cells
//!
//! Cell `(x, y)` has id `y * width + x`. Edges are implicit: a cell has an
//! edge to each open cell directly above, below, left and right of it.
//! Blocked cells are never entered, but a search starting on one may leave.

use crate::graph::traversal::Graph;
use crate::graph::types::VertexId;

#[derive(Debug, Clone)]
pub struct GridGraph {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
}

impl GridGraph {
    /// Create a grid, marking the given cells as blocked.
    ///
    /// Blocked coordinates outside the grid are ignored.
    pub fn new(
        width: usize,
        height: usize,
        blocked: impl IntoIterator<Item = (i64, i64)>,
    ) -> Self {
        let mut grid = GridGraph {
            width,
            height,
            blocked: vec![false; width * height],
        };
        for (x, y) in blocked {
            if grid.in_bounds(x, y) {
                let id = grid.index(x as usize, y as usize);
                grid.blocked[id] = true;
            }
        }
        grid
    }

    /// Grid with no blocked cells
    pub fn open(width: usize, height: usize) -> Self {
        Self::new(width, height, std::iter::empty())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    pub fn index(&self, x: usize, y: usize) -> VertexId {
        y * self.width + x
    }

    pub fn coords(&self, id: VertexId) -> (usize, usize) {
        (id % self.width, id / self.width)
    }

    /// Out-of-bounds cells count as blocked
    pub fn is_blocked(&self, x: i64, y: i64) -> bool {
        !self.in_bounds(x, y) || self.blocked[self.index(x as usize, y as usize)]
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|b| **b).count()
    }

    fn open_neighbors(&self, u: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        let (x, y) = self.coords(u);
        let (x, y) = (x as i64, y as i64);
        [(x, y - 1), (x, y + 1), (x - 1, y), (x + 1, y)]
            .into_iter()
            .filter(move |&(nx, ny)| !self.is_blocked(nx, ny))
            .map(move |(nx, ny)| self.index(nx as usize, ny as usize))
    }
}

impl Graph for GridGraph {
    fn vertex_count(&self) -> usize {
        self.width * self.height
    }

    fn is_directed(&self) -> bool {
        false
    }

    fn is_weighted(&self) -> bool {
        false
    }

    /// Order is up, down, left, right; blocked or out-of-bounds targets are
    /// skipped.
    fn neighbors_into(&self, u: VertexId, out: &mut Vec<VertexId>) {
        out.clear();
        out.extend(self.open_neighbors(u));
    }

    fn weighted_neighbors_into(&self, u: VertexId, out: &mut Vec<(VertexId, f64)>) {
        out.clear();
        out.extend(self.open_neighbors(u).map(|v| (v, 1.0)));
    }

    fn weight(&self, u: VertexId, v: VertexId) -> f64 {
        if self.has_edge(u, v) {
            1.0
        } else {
            f64::INFINITY
        }
    }

    fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.open_neighbors(u).any(|n| n == v)
    }

    /// Open-open pairs only; a blocked cell's outgoing moves have no reverse
    /// and are not counted.
    fn edge_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.height as i64 {
            for x in 0..self.width as i64 {
                if self.is_blocked(x, y) {
                    continue;
                }
                count += usize::from(!self.is_blocked(x + 1, y));
                count += usize::from(!self.is_blocked(x, y + 1));
            }
        }
        count
    }
}
