use std::collections::HashMap;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{PathlabError, Result};
use crate::graph::VertexId;
use crate::io::{open_dataset, records};

/// Load node embeddings indexed by internal vertex id.
///
/// Each data line is `id f1 ... f_dim`. With an id map, `id` is an original
/// dataset id and lines for ids outside the map are skipped; without one,
/// `id` is the internal id itself and must be below `vertex_count`. Vertices
/// that never appear keep a zero vector. Values past `dim` are ignored.
pub fn load_embeddings(
    path: &Path,
    id_map: Option<&HashMap<u64, VertexId>>,
    vertex_count: usize,
    dim: usize,
) -> Result<Vec<Vec<f32>>> {
    if dim == 0 {
        bail_invalid!("embedding dimension", dim);
    }

    let reader = open_dataset(path, "embedding file")?;
    let mut embeddings = vec![vec![0.0f32; dim]; vertex_count];
    let mut seen = vec![false; vertex_count];
    let mut skipped = 0usize;

    for record in records(reader, path) {
        let (line, fields) = record?;
        let raw_id = &fields[0];
        let id: u64 = raw_id.parse().map_err(|_| {
            PathlabError::dataset_parse(path, line, format!("invalid vertex id {raw_id:?}"))
        })?;

        let internal = match id_map {
            Some(map) => map.get(&id).copied(),
            None => usize::try_from(id).ok().filter(|&v| v < vertex_count),
        };
        let Some(internal) = internal else {
            skipped += 1;
            continue;
        };

        if fields.len() - 1 < dim {
            return Err(PathlabError::dataset_parse(
                path,
                line,
                format!("expected {dim} values, found {}", fields.len() - 1),
            ));
        }

        let vector = &mut embeddings[internal];
        for (slot, raw) in vector.iter_mut().zip(&fields[1..=dim]) {
            *slot = raw.parse().map_err(|_| {
                PathlabError::dataset_parse(path, line, format!("invalid value {raw:?}"))
            })?;
        }
        seen[internal] = true;
    }

    let missing = seen.iter().filter(|s| !**s).count();
    if missing > 0 {
        tracing::warn!(
            path = %path.display(),
            missing,
            "vertices without an embedding use a zero vector"
        );
    }
    tracing::info!(
        path = %path.display(),
        vertices = vertex_count,
        dim,
        skipped,
        "loaded embeddings"
    );

    Ok(embeddings)
}
