use crate::graph::algos::shared::{build_path, check_endpoints, HeapFrontier, Probe};
use crate::graph::algos::ShortestPath;
use crate::graph::heuristic::{Heuristic, ZeroHeuristic};
use crate::graph::metrics::MetricsSink;
use crate::graph::traversal::Graph;
use crate::graph::types::{Path, VertexId};

/// A* search, ordering the frontier by `g(v) + h(v, destination)`.
///
/// Without a heuristic it uses [`ZeroHeuristic`] and matches Dijkstra.
/// An entry popped with priority above the vertex's current
/// `g(u) + h(u, destination)` is stale and skipped. The returned path is
/// optimal only when the heuristic is admissible and consistent; the search
/// runs the same way regardless.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl ShortestPath for AStar {
    fn name(&self) -> &'static str {
        "AStar"
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, graph, metrics, heuristic),
        fields(
            vertices = graph.vertex_count(),
            heuristic = heuristic.map_or("zero", |h| h.name())
        )
    )]
    fn compute(
        &self,
        graph: &dyn Graph,
        source: VertexId,
        destination: VertexId,
        metrics: Option<&mut dyn MetricsSink>,
        heuristic: Option<&dyn Heuristic>,
    ) -> Path {
        check_endpoints(graph, source, destination);

        let h = heuristic.unwrap_or(&ZeroHeuristic);
        let n = graph.vertex_count();
        let mut probe = Probe::start(metrics);
        let mut distance = vec![f64::INFINITY; n];
        let mut predecessor: Vec<Option<VertexId>> = vec![None; n];
        let mut frontier = HeapFrontier::new();
        let mut edges = Vec::new();

        distance[source] = 0.0;
        frontier.push(source, h.estimate(source, destination), &mut probe);

        while let Some(entry) = frontier.pop(&mut probe) {
            let u = entry.vertex;
            let expected = distance[u] + h.estimate(u, destination);
            if entry.priority > expected {
                continue;
            }

            probe.expanded(u);
            if u == destination {
                break;
            }

            graph.weighted_neighbors_into(u, &mut edges);
            for &(v, w) in &edges {
                let alt = distance[u] + w;
                if alt < distance[v] {
                    let old = distance[v];
                    distance[v] = alt;
                    predecessor[v] = Some(u);
                    probe.relaxed(u, v, old, alt);
                    frontier.push(v, alt + h.estimate(v, destination), &mut probe);
                }
            }
        }

        let path = if distance[destination].is_finite() {
            build_path(&predecessor, source, destination, distance[destination])
        } else {
            Path::not_found()
        };
        probe.finish(self.name(), &path);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{
        CsrGraph, Dijkstra, EmbeddingCosineHeuristic, GridGraph, ManhattanHeuristic, RunMetrics,
    };

    #[test]
    fn test_astar_manhattan_open_grid() {
        let grid = GridGraph::open(3, 3);
        let h = ManhattanHeuristic::new(&grid);

        let mut astar_metrics = RunMetrics::new();
        let path = AStar.compute(&grid, 0, 8, Some(&mut astar_metrics), Some(&h));

        let mut dijkstra_metrics = RunMetrics::new();
        let reference = Dijkstra.compute(&grid, 0, 8, Some(&mut dijkstra_metrics), None);

        assert_eq!(path.total_cost, 4.0);
        assert_eq!(path.len(), 5);
        assert_eq!(reference.total_cost, 4.0);
        assert!(astar_metrics.nodes_expanded <= dijkstra_metrics.nodes_expanded);
    }

    #[test]
    fn test_astar_manhattan_expands_fewer_on_long_corridor() {
        let grid = GridGraph::open(10, 10);
        let h = ManhattanHeuristic::new(&grid);

        let mut astar_metrics = RunMetrics::new();
        AStar.compute(&grid, 0, 9, Some(&mut astar_metrics), Some(&h));
        let mut dijkstra_metrics = RunMetrics::new();
        Dijkstra.compute(&grid, 0, 9, Some(&mut dijkstra_metrics), None);

        // the straight top row is the only f = 9 route
        assert_eq!(astar_metrics.nodes_expanded, 10);
        assert!(astar_metrics.nodes_expanded < dijkstra_metrics.nodes_expanded);
    }

    #[test]
    fn test_astar_defaults_to_zero_heuristic() {
        let g = CsrGraph::from_weighted_edges(
            4,
            &[(0, 1, 1.0), (1, 3, 5.0), (0, 2, 2.0), (2, 3, 1.0)],
            true,
        )
        .unwrap();
        let path = AStar.compute(&g, 0, 3, None, None);
        assert_eq!(path.vertices, vec![0, 2, 3]);
        assert_eq!(path.total_cost, 3.0);
    }

    #[test]
    fn test_astar_skips_entries_made_stale_by_improvement() {
        // 0 -> 2 costs 5 directly, 1 via 0 -> 1 -> 2; 2 is queued twice
        let g = CsrGraph::from_weighted_edges(
            4,
            &[(0, 2, 5.0), (0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)],
            true,
        )
        .unwrap();
        let mut metrics = RunMetrics::new();
        let path = AStar.compute(&g, 0, 3, Some(&mut metrics), None);
        assert_eq!(path.vertices, vec![0, 1, 2, 3]);
        assert_eq!(path.total_cost, 3.0);
        // 0, 1, 2, 3 each expanded once; the stale (2, 5.0) entry is not
        assert_eq!(metrics.nodes_expanded, 4);
        assert_eq!(metrics.edges_relaxed, 4);
    }

    #[test]
    fn test_astar_inadmissible_heuristic_may_be_suboptimal() {
        // An overestimate on the cheap branch steers the search to the
        // expensive direct edge. The engine must not correct for this.
        struct Misleading;
        impl Heuristic for Misleading {
            fn estimate(&self, vertex: VertexId, _goal: VertexId) -> f64 {
                if vertex == 1 {
                    100.0
                } else {
                    0.0
                }
            }
            fn name(&self) -> &'static str {
                "misleading"
            }
        }

        let g = CsrGraph::from_weighted_edges(3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 5.0)], true)
            .unwrap();
        let path = AStar.compute(&g, 0, 2, None, Some(&Misleading));
        assert_eq!(path.vertices, vec![0, 2]);
        assert_eq!(path.total_cost, 5.0);
        assert_eq!(Dijkstra.compute(&g, 0, 2, None, None).total_cost, 2.0);
    }

    #[test]
    fn test_astar_with_embedding_heuristic_finds_a_path() {
        let g = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (0, 3)], false).unwrap();
        let h = EmbeddingCosineHeuristic::new(vec![
            vec![1.0, 0.0],
            vec![0.7, 0.7],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
        ]);
        let path = AStar.compute(&g, 0, 2, None, Some(&h));
        assert!(path.found());
        assert_eq!(path.source(), Some(0));
        assert_eq!(path.destination(), Some(2));
        assert_eq!(path.total_cost, (path.len() - 1) as f64);
    }
}
