//! Partitioning of a fitness-evaluated pool into ordered Pareto layers.

use itertools::Itertools;

/// Indices of candidates sharing one domination count. Layer 0 is the
/// current Pareto front.
pub type Layer = Vec<usize>;

/// Groups candidate indices into layers of equal domination count, ordered
/// by that count ascending.
///
/// The layers are disjoint and together cover every index of `counts`.
/// The sort is stable, so tie order inside a layer preserves input order
/// instead of depending on objective values.
pub fn partition_layers(counts: &[u32]) -> Vec<Layer> {
  let mut indices: Vec<usize> = (0..counts.len()).collect();
  indices.sort_by_key(|&i| counts[i]);
  let chunks = indices.into_iter().chunk_by(|&i| counts[i]);
  let mut layers = Vec::new();
  for (_, layer) in &chunks {
    layers.push(layer.collect());
  }
  layers
}
