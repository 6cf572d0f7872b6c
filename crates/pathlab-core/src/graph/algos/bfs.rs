use crate::graph::algos::shared::{build_path, check_endpoints, FifoFrontier, Probe};
use crate::graph::algos::ShortestPath;
use crate::graph::heuristic::Heuristic;
use crate::graph::metrics::MetricsSink;
use crate::graph::traversal::Graph;
use crate::graph::types::{Path, VertexId};

/// Breadth-first search; path cost is the hop count.
///
/// Edge weights are ignored. A vertex is labeled the first time it is
/// discovered and never relabeled. The search stops as soon as the
/// destination is dequeued.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bfs;

impl ShortestPath for Bfs {
    fn name(&self) -> &'static str {
        "BFS"
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, graph, metrics, _heuristic),
        fields(vertices = graph.vertex_count())
    )]
    fn compute(
        &self,
        graph: &dyn Graph,
        source: VertexId,
        destination: VertexId,
        metrics: Option<&mut dyn MetricsSink>,
        _heuristic: Option<&dyn Heuristic>,
    ) -> Path {
        check_endpoints(graph, source, destination);

        let n = graph.vertex_count();
        let mut probe = Probe::start(metrics);
        let mut distance: Vec<Option<usize>> = vec![None; n];
        let mut predecessor: Vec<Option<VertexId>> = vec![None; n];
        let mut frontier = FifoFrontier::new();
        let mut neighbors = Vec::new();

        distance[source] = Some(0);
        frontier.push(source, &mut probe);

        while let Some(u) = frontier.pop(&mut probe) {
            probe.expanded(u);
            if u == destination {
                break;
            }

            let Some(du) = distance[u] else {
                continue;
            };

            graph.neighbors_into(u, &mut neighbors);
            for &v in &neighbors {
                if distance[v].is_some() {
                    continue;
                }
                distance[v] = Some(du + 1);
                predecessor[v] = Some(u);
                probe.relaxed(u, v, f64::INFINITY, (du + 1) as f64);
                frontier.push(v, &mut probe);
            }
        }

        let path = match distance[destination] {
            Some(hops) => build_path(&predecessor, source, destination, hops as f64),
            None => Path::not_found(),
        };
        probe.finish(self.name(), &path);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CsrGraph, GridGraph, RunMetrics};

    #[test]
    fn test_bfs_open_grid_corner_to_corner() {
        let grid = GridGraph::open(3, 3);
        let path = Bfs.compute(&grid, 0, 8, None, None);
        assert!(path.found());
        assert_eq!(path.total_cost, 4.0);
        assert_eq!(path.len(), 5);
        assert_eq!(path.source(), Some(0));
        assert_eq!(path.destination(), Some(8));
    }

    #[test]
    fn test_bfs_grid_path_is_deterministic() {
        // up, down, left, right order plus FIFO fixes the route
        let grid = GridGraph::open(3, 3);
        let path = Bfs.compute(&grid, 0, 8, None, None);
        assert_eq!(path.vertices, vec![0, 3, 6, 7, 8]);
    }

    #[test]
    fn test_bfs_ignores_weights() {
        // 0 -> 2 directly is heavy, 0 -> 1 -> 2 is light; BFS counts hops
        let g = CsrGraph::from_weighted_edges(3, &[(0, 2, 10.0), (0, 1, 1.0), (1, 2, 1.0)], true)
            .unwrap();
        let path = Bfs.compute(&g, 0, 2, None, None);
        assert_eq!(path.vertices, vec![0, 2]);
        assert_eq!(path.total_cost, 1.0);
    }

    #[test]
    fn test_bfs_respects_direction() {
        let g = CsrGraph::from_edges(3, &[(0, 1), (1, 2)], true).unwrap();
        assert!(Bfs.compute(&g, 0, 2, None, None).found());
        assert!(!Bfs.compute(&g, 2, 0, None, None).found());
    }

    #[test]
    fn test_bfs_metrics_events() {
        // path graph 0 - 1 - 2
        let g = CsrGraph::from_edges(3, &[(0, 1), (1, 2)], false).unwrap();
        let mut metrics = RunMetrics::new();
        let path = Bfs.compute(&g, 0, 2, Some(&mut metrics), None);

        assert_eq!(path.total_cost, 2.0);
        assert_eq!(metrics.nodes_expanded, 3);
        // one relaxation per newly discovered vertex
        assert_eq!(metrics.edges_relaxed, 2);
        assert_eq!(metrics.max_frontier, 1);
        assert_eq!(metrics.path_cost, 2.0);
        assert_eq!(metrics.path_len, 3);
    }

    #[test]
    fn test_bfs_stops_when_destination_dequeued() {
        // star: 0 connected to 1..=5, destination 1 is discovered first
        let edges: Vec<_> = (1..=5).map(|v| (0, v)).collect();
        let g = CsrGraph::from_edges(6, &edges, false).unwrap();
        let mut metrics = RunMetrics::new();
        Bfs.compute(&g, 0, 1, Some(&mut metrics), None);
        assert_eq!(metrics.nodes_expanded, 2);
        assert_eq!(metrics.edges_relaxed, 5);
        assert_eq!(metrics.max_frontier, 5);
    }

    #[test]
    #[should_panic(expected = "destination 9 out of range")]
    fn test_bfs_panics_on_invalid_destination() {
        let grid = GridGraph::open(3, 3);
        Bfs.compute(&grid, 0, 9, None, None);
    }
}
