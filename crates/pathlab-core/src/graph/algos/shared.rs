//! Building blocks shared by the search algorithms

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};
use std::time::Instant;

use crate::graph::metrics::MetricsSink;
use crate::graph::traversal::Graph;
use crate::graph::types::{Path, VertexId};

/// Priority-queue entry; `BinaryHeap<Reverse<HeapEntry>>` pops the lowest
/// priority first, lower vertex id on ties.
#[derive(Debug, Clone, Copy)]
pub struct HeapEntry {
    pub vertex: VertexId,
    pub priority: f64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

/// Forwards events to an optional sink and keeps the counts the closing
/// log line needs.
pub(crate) struct Probe<'a> {
    sink: Option<&'a mut dyn MetricsSink>,
    expanded: u64,
    started: Instant,
}

impl<'a> Probe<'a> {
    pub(crate) fn start(sink: Option<&'a mut dyn MetricsSink>) -> Self {
        Probe {
            sink,
            expanded: 0,
            started: Instant::now(),
        }
    }

    pub(crate) fn expanded(&mut self, vertex: VertexId) {
        self.expanded += 1;
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_node_expanded(vertex);
        }
    }

    pub(crate) fn relaxed(&mut self, from: VertexId, to: VertexId, old: f64, new: f64) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_edge_relaxed(from, to, old, new);
        }
    }

    pub(crate) fn frontier(&mut self, size: usize) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_frontier_size(size);
        }
    }

    /// Emit the single run-finished event
    pub(crate) fn finish(self, algorithm: &'static str, path: &Path) {
        let runtime_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(
            algorithm,
            found = path.found(),
            cost = path.total_cost,
            path_len = path.len(),
            expanded = self.expanded,
            runtime_ms,
            "search finished"
        );
        if let Some(sink) = self.sink {
            sink.on_finish(runtime_ms, path.total_cost, path.len());
        }
    }
}

/// FIFO frontier that reports its length after every push and pop
pub(crate) struct FifoFrontier {
    queue: VecDeque<VertexId>,
}

impl FifoFrontier {
    pub(crate) fn new() -> Self {
        FifoFrontier {
            queue: VecDeque::new(),
        }
    }

    pub(crate) fn push(&mut self, vertex: VertexId, probe: &mut Probe<'_>) {
        self.queue.push_back(vertex);
        probe.frontier(self.queue.len());
    }

    pub(crate) fn pop(&mut self, probe: &mut Probe<'_>) -> Option<VertexId> {
        let vertex = self.queue.pop_front()?;
        probe.frontier(self.queue.len());
        Some(vertex)
    }
}

/// Lazy-deletion min-heap frontier.
///
/// A vertex may be queued several times; callers discard stale entries on
/// pop. The reported size counts stale entries too.
pub(crate) struct HeapFrontier {
    heap: BinaryHeap<Reverse<HeapEntry>>,
}

impl HeapFrontier {
    pub(crate) fn new() -> Self {
        HeapFrontier {
            heap: BinaryHeap::new(),
        }
    }

    pub(crate) fn push(&mut self, vertex: VertexId, priority: f64, probe: &mut Probe<'_>) {
        self.heap.push(Reverse(HeapEntry { vertex, priority }));
        probe.frontier(self.heap.len());
    }

    pub(crate) fn pop(&mut self, probe: &mut Probe<'_>) -> Option<HeapEntry> {
        let Reverse(entry) = self.heap.pop()?;
        probe.frontier(self.heap.len());
        Some(entry)
    }
}

/// Panics unless both endpoints are valid vertex ids.
pub(crate) fn check_endpoints(graph: &dyn Graph, source: VertexId, destination: VertexId) {
    let n = graph.vertex_count();
    assert!(source < n, "source {source} out of range 0..{n}");
    assert!(
        destination < n,
        "destination {destination} out of range 0..{n}"
    );
}

/// Walk predecessor links back from `destination`.
///
/// Returns `[source]` when the endpoints coincide, and an empty sequence if
/// the walk does not end at `source`.
pub fn reconstruct_path(
    predecessor: &[Option<VertexId>],
    source: VertexId,
    destination: VertexId,
) -> Vec<VertexId> {
    if source == destination {
        return vec![source];
    }

    let mut vertices = vec![destination];
    let mut current = destination;
    // a well-formed chain visits each vertex at most once
    while let Some(prev) = predecessor[current] {
        if vertices.len() > predecessor.len() {
            return Vec::new();
        }
        vertices.push(prev);
        current = prev;
    }

    if current != source {
        return Vec::new();
    }
    vertices.reverse();
    vertices
}

/// Path for a reached destination, or the not-found sentinel if
/// reconstruction fails.
pub(crate) fn build_path(
    predecessor: &[Option<VertexId>],
    source: VertexId,
    destination: VertexId,
    cost: f64,
) -> Path {
    let vertices = reconstruct_path(predecessor, source, destination);
    if vertices.is_empty() {
        Path::not_found()
    } else if source == destination {
        Path::new(vertices, 0.0)
    } else {
        Path::new(vertices, cost)
    }
}
