//! Environmental selection strategies.
//!
//! An environmental selector reduces an oversized, front-partitioned pool
//! back to a fixed target size while preserving Pareto-optimal diversity.
//! Two strategies are provided: crowding-distance selection
//! ([`CrowdingSelector`], NSGA-II) and reference-point niching
//! ([`ReferencePointSelector`], NSGA-III).

pub mod crowding;
pub mod reference_point;

pub use crowding::CrowdingSelector;
pub use reference_point::ReferencePointSelector;

use crate::{
  front::Layer,
  score::{Direction, Scores},
};

/// A diversity-preserving strategy that picks which candidates of a
/// front-partitioned pool survive into the next generation.
///
/// Takes `&mut self` so strategies may own mutable state, like the explicit
/// RNG of [`ReferencePointSelector`].
pub trait EnvironmentalSelector<const M: usize> {
  /// Reduces `layers` - ordered as produced by
  /// [`partition_layers`](crate::front::partition_layers) over `scores` -
  /// down to `target` candidates and returns their indices.
  ///
  /// Whenever the layers hold at least `target` candidates, exactly
  /// `target` indices are returned; otherwise all of them are.
  fn select(
    &mut self,
    layers: &[Layer],
    scores: &[Scores<M>],
    direction: Direction,
    target: usize,
  ) -> Vec<usize>;
}

/// Moves whole layers into `selected` while they fit into `target`, then
/// returns the boundary layer that would overflow it, if any.
fn take_whole_layers<'a>(
  layers: &'a [Layer],
  target: usize,
  selected: &mut Vec<usize>,
) -> Option<&'a Layer> {
  for layer in layers {
    if selected.len() + layer.len() > target {
      return Some(layer);
    }
    selected.extend_from_slice(layer);
  }
  None
}
