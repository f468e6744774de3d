//! NSGA-II style crowding-distance selection.

use std::cmp::Ordering;

use super::{take_whole_layers, EnvironmentalSelector};
use crate::{
  front::Layer,
  score::{Direction, Score, Scores},
};

/// Guards the congestion denominator when an objective is constant across
/// the boundary layer.
const RANGE_EPSILON: Score = 1e-10;

/// An environmental selector that breaks the boundary-layer tie with
/// crowding distance: candidates sitting in sparse regions of objective
/// space are preferred over candidates with close neighbors.
///
/// Tie order among candidates with equal congestion is unspecified.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct CrowdingSelector();

impl<const M: usize> EnvironmentalSelector<M> for CrowdingSelector {
  fn select(
    &mut self,
    layers: &[Layer],
    scores: &[Scores<M>],
    _: Direction,
    target: usize,
  ) -> Vec<usize> {
    let mut selected = Vec::with_capacity(target);
    let Some(boundary) = take_whole_layers(layers, target, &mut selected)
    else {
      return selected;
    };

    let congestion = crowding_congestion(boundary, scores);
    let mut order: Vec<usize> = (0..boundary.len()).collect();
    order.sort_by(|&a, &b| congestion[b].total_cmp(&congestion[a]));
    selected.extend(
      order
        .into_iter()
        .take(target - selected.len())
        .map(|position| boundary[position]),
    );
    selected
  }
}

/// Composite crowding congestion per member of `layer`, summed over
/// objectives. The higher the value, the more isolated the member.
///
/// Per objective, the layer's extreme members get `+inf` while interior
/// members accumulate the gap between their two neighbors in the
/// objective-sorted order, normalized by that objective's range within the
/// layer.
pub fn crowding_congestion<const M: usize>(
  layer: &[usize],
  scores: &[Scores<M>],
) -> Vec<Score> {
  let mut congestion = vec![0.0; layer.len()];
  let mut order: Vec<usize> = (0..layer.len()).collect();
  for objective in 0..M {
    let value = |position: usize| scores[layer[position]][objective];
    order.sort_by(|&a, &b| {
      value(a)
        .partial_cmp(&value(b))
        .unwrap_or(Ordering::Greater) // sort NaNs away
    });

    let first = order[0];
    let last = order[order.len() - 1];
    congestion[first] = Score::INFINITY;
    congestion[last] = Score::INFINITY;
    let range = value(last) - value(first);
    for window in order.windows(3) {
      let (prev, current, next) = (window[0], window[1], window[2]);
      congestion[current] +=
        (value(next) - value(prev)).abs() / (range + RANGE_EPSILON);
    }
  }
  congestion
}
