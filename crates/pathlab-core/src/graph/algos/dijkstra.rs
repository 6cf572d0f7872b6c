use crate::graph::algos::shared::{build_path, check_endpoints, HeapFrontier, Probe};
use crate::graph::algos::ShortestPath;
use crate::graph::heuristic::Heuristic;
use crate::graph::metrics::MetricsSink;
use crate::graph::traversal::Graph;
use crate::graph::types::{Path, VertexId};

/// Dijkstra's algorithm over non-negative edge weights.
///
/// Uses a lazy-deletion heap: improving a vertex pushes a new entry and
/// leaves the old one in place. A popped entry whose priority exceeds the
/// vertex's recorded distance is stale and skipped without expansion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl ShortestPath for Dijkstra {
    fn name(&self) -> &'static str {
        "Dijkstra"
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
        let mut distance = vec![f64::INFINITY; n];
        let mut predecessor: Vec<Option<VertexId>> = vec![None; n];
        let mut frontier = HeapFrontier::new();
        let mut edges = Vec::new();

        distance[source] = 0.0;
        frontier.push(source, 0.0, &mut probe);

        while let Some(entry) = frontier.pop(&mut probe) {
            let u = entry.vertex;
            if entry.priority > distance[u] {
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
                    frontier.push(v, alt, &mut probe);
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
