//! NSGA-III style reference-point niching.
//!
//! The boundary layer is resolved in four steps: normalize the candidates'
//! scores against the ideal point and per-objective intercepts, associate
//! every candidate with its nearest reference direction, tally niche
//! occupancy of the already selected candidates, then fill the remaining
//! slots from the least crowded niches.

use log::trace;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{take_whole_layers, EnvironmentalSelector};
use crate::{
  front::Layer,
  reference::ReferencePoints,
  score::{Direction, Score, Scores},
};

/// Guards divisions against degenerate intercepts.
const EPSILON: Score = 1e-10;
/// Pivots below this magnitude mark the extreme-point matrix as singular.
const PIVOT_EPSILON: Score = 1e-12;
/// Off-axis weight of the achievement scalarizing function.
const ASF_WEIGHT: Score = 1e-6;

/// An environmental selector that balances the boundary layer across a
/// fixed lattice of reference directions.
///
/// Random niche tie-breaks come from an explicitly seeded RNG owned by the
/// selector, so runs are reproducible.
#[derive(Clone, Debug)]
pub struct ReferencePointSelector<const M: usize, R = StdRng> {
  points: ReferencePoints<M>,
  rng: R,
}

impl<const M: usize> ReferencePointSelector<M> {
  /// Creates a selector over `points`, seeding its RNG with `seed`.
  pub fn new(points: ReferencePoints<M>, seed: u64) -> Self {
    Self::with_rng(points, StdRng::seed_from_u64(seed))
  }
}

impl<const M: usize, R: Rng> ReferencePointSelector<M, R> {
  /// Creates a selector over `points` driven by `rng`.
  pub fn with_rng(points: ReferencePoints<M>, rng: R) -> Self {
    Self { points, rng }
  }

  /// The reference directions this selector niches against. Read-only,
  /// exposed for diagnostics.
  pub fn reference_points(&self) -> &ReferencePoints<M> {
    &self.points
  }
}

impl<const M: usize, R: Rng> EnvironmentalSelector<M>
  for ReferencePointSelector<M, R>
{
  fn select(
    &mut self,
    layers: &[Layer],
    scores: &[Scores<M>],
    direction: Direction,
    target: usize,
  ) -> Vec<usize> {
    let mut selected = Vec::with_capacity(target);
    let Some(boundary) = take_whole_layers(layers, target, &mut selected)
    else {
      return selected;
    };

    // `members` lists selected candidates first, then the boundary layer;
    // positions into it index `normalized` and `associations` as well
    let members: Vec<usize> = selected
      .iter()
      .copied()
      .chain(boundary.iter().copied())
      .collect();
    let normalized = normalize(&members, scores, direction);
    let associations = associate(&normalized, self.points.points());

    let mut niche_counts = vec![0_usize; self.points.len()];
    for association in &associations[..selected.len()] {
      niche_counts[association.point] += 1;
    }

    // boundary members still up for selection, grouped per reference point
    let mut pending: Vec<Vec<usize>> = vec![Vec::new(); self.points.len()];
    for position in selected.len()..members.len() {
      pending[associations[position].point].push(position);
    }

    let mut considered: Vec<usize> = (0..self.points.len()).collect();
    while selected.len() < target {
      let least = considered
        .iter()
        .map(|&point| niche_counts[point])
        .min()
        .expect("every reference point was retired before target was met");
      let tied: Vec<usize> = considered
        .iter()
        .copied()
        .filter(|&point| niche_counts[point] == least)
        .collect();
      let point = tied[self.rng.gen_range(0..tied.len())];

      let candidates = &mut pending[point];
      if candidates.is_empty() {
        trace!("reference point {point} has no candidates left, retiring it");
        considered.retain(|&p| p != point);
        continue;
      }
      let pick = if niche_counts[point] == 0 {
        // an empty niche claims its nearest candidate
        candidates
          .iter()
          .enumerate()
          .min_by(|a, b| {
            associations[*a.1].distance.total_cmp(&associations[*b.1].distance)
          })
          .map(|(index, _)| index)
          .expect("candidate list is not empty")
      } else {
        self.rng.gen_range(0..candidates.len())
      };
      let position = candidates.swap_remove(pick);
      selected.push(members[position]);
      niche_counts[point] += 1;
    }
    selected
  }
}

/// A candidate's nearest reference point and the squared perpendicular
/// distance to it.
#[derive(Clone, Copy, Debug)]
struct Association {
  point: usize,
  distance: Score,
}

/// Rescales the scores of `members` to comparable per-objective ranges:
/// translate by the ideal point, then divide by the intercepts of the
/// extreme-point hyperplane.
fn normalize<const M: usize>(
  members: &[usize],
  scores: &[Scores<M>],
  direction: Direction,
) -> Vec<Scores<M>> {
  let mut translated: Vec<Scores<M>> = members
    .iter()
    .map(|&index| scores[index].map(|score| direction.minimized(score)))
    .collect();

  let mut ideal = [Score::INFINITY; M];
  for row in &translated {
    for (best, value) in ideal.iter_mut().zip(row) {
      *best = best.min(*value);
    }
  }
  for row in &mut translated {
    for (value, best) in row.iter_mut().zip(&ideal) {
      *value -= best;
    }
  }

  let extremes = extreme_points(&translated);
  let intercepts = intercepts(&translated, &extremes);
  for row in &mut translated {
    for (value, intercept) in row.iter_mut().zip(&intercepts) {
      *value /= intercept.max(EPSILON);
    }
  }
  translated
}

/// Per objective, the member achieving the most along that axis: the one
/// minimizing the achievement scalarizing function with a weight vector
/// pointing down the axis.
fn extreme_points<const M: usize>(translated: &[Scores<M>]) -> [usize; M] {
  let mut extremes = [0; M];
  for (objective, extreme) in extremes.iter_mut().enumerate() {
    let mut best = Score::INFINITY;
    for (position, row) in translated.iter().enumerate() {
      let achievement = row
        .iter()
        .enumerate()
        .map(|(axis, value)| {
          let weight = if axis == objective { 1.0 } else { ASF_WEIGHT };
          value / weight
        })
        .fold(Score::NEG_INFINITY, Score::max);
      if achievement < best {
        best = achievement;
        *extreme = position;
      }
    }
  }
  extremes
}

/// Intercepts of the hyperplane through the extreme points. A singular or
/// degenerate extreme-point matrix falls back to each extreme point's own
/// diagonal coordinate.
fn intercepts<const M: usize>(
  translated: &[Scores<M>],
  extremes: &[usize; M],
) -> Scores<M> {
  let duplicated = (0..M)
    .any(|i| extremes[i + 1..].contains(&extremes[i]));
  if !duplicated {
    let mut matrix = [[0.0; M]; M];
    for (row, &extreme) in matrix.iter_mut().zip(extremes) {
      *row = translated[extreme];
    }
    if let Some(plane) = solve_unit_plane(matrix) {
      if plane.iter().all(|&b| b > EPSILON) {
        return plane.map(|b| 1.0 / b);
      }
    }
  }
  let mut diagonal = [0.0; M];
  for (objective, value) in diagonal.iter_mut().enumerate() {
    *value = translated[extremes[objective]][objective];
  }
  diagonal
}

/// Solves `matrix · b = 1` by Gaussian elimination with partial pivoting.
/// Returns `None` when a pivot vanishes, i.e. the determinant is near zero.
fn solve_unit_plane<const M: usize>(
  mut matrix: [[Score; M]; M],
) -> Option<Scores<M>> {
  let mut rhs = [1.0; M];
  for column in 0..M {
    let pivot_row = (column..M)
      .max_by(|&a, &b| {
        matrix[a][column].abs().total_cmp(&matrix[b][column].abs())
      })
      .expect("column range is not empty");
    if matrix[pivot_row][column].abs() < PIVOT_EPSILON {
      return None;
    }
    matrix.swap(column, pivot_row);
    rhs.swap(column, pivot_row);
    for row in column + 1..M {
      let factor = matrix[row][column] / matrix[column][column];
      for k in column..M {
        matrix[row][k] -= factor * matrix[column][k];
      }
      rhs[row] -= factor * rhs[column];
    }
  }
  let mut solution = [0.0; M];
  for column in (0..M).rev() {
    let mut value = rhs[column];
    for k in column + 1..M {
      value -= matrix[column][k] * solution[k];
    }
    solution[column] = value / matrix[column][column];
  }
  Some(solution)
}

/// Associates every member with its minimum-distance reference direction.
fn associate<const M: usize>(
  normalized: &[Scores<M>],
  points: &[Scores<M>],
) -> Vec<Association> {
  normalized
    .iter()
    .map(|member| {
      points
        .iter()
        .enumerate()
        .map(|(point, direction)| Association {
          point,
          distance: perpendicular_distance(member, direction),
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
        .expect("reference point set is empty")
    })
    .collect()
}

/// Squared distance from `member` to the line spanned by `direction`:
/// `‖s − (wᵗs / ‖w‖²) · w‖²`.
fn perpendicular_distance<const M: usize>(
  member: &Scores<M>,
  direction: &Scores<M>,
) -> Score {
  let dot: Score = direction.iter().zip(member).map(|(w, s)| w * s).sum();
  let norm: Score = direction.iter().map(|w| w * w).sum();
  let ratio = dot / norm;
  member
    .iter()
    .zip(direction)
    .map(|(s, w)| (s - ratio * w).powi(2))
    .sum()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{domination::domination_counts, front::partition_layers};

  fn layers_of<const M: usize>(
    scores: &[Scores<M>],
    direction: Direction,
  ) -> Vec<Layer> {
    partition_layers(&domination_counts(scores, direction))
  }

  #[test]
  fn test_perpendicular_distance() {
    // on the axis
    assert!(perpendicular_distance(&[2.0, 0.0], &[1.0, 0.0]) < 1e-12);
    // unit offset from the axis
    let d = perpendicular_distance(&[2.0, 1.0], &[1.0, 0.0]);
    assert!((d - 1.0).abs() < 1e-12);
    // distance is squared: double offset quadruples it
    let d = perpendicular_distance(&[2.0, 2.0], &[1.0, 0.0]);
    assert!((d - 4.0).abs() < 1e-12);
  }

  #[test]
  fn test_association_picks_nearest_direction() {
    let points = ReferencePoints::<2>::lattice(2).unwrap();
    // lattice: (0, 1), (0.5, 0.5), (1, 0) in some order
    let members = vec![[1.0, 0.01], [0.01, 1.0], [0.7, 0.7]];
    let associations = associate(&members, points.points());
    let nearest =
      |i: usize| points.points()[associations[i].point];
    assert_eq!(nearest(0), [1.0, 0.0]);
    assert_eq!(nearest(1), [0.0, 1.0]);
    assert_eq!(nearest(2), [0.5, 0.5]);
  }

  #[test]
  fn test_normalization_with_clean_extremes() {
    let scores: Vec<Scores<2>> = vec![[3.0, 1.0], [1.0, 3.0], [2.0, 2.0]];
    let members = vec![0, 1, 2];
    let normalized = normalize(&members, &scores, Direction::Minimize);
    // ideal is (1, 1), extremes translate to (2, 0) and (0, 2),
    // intercepts are 2 and 2
    assert!((normalized[0][0] - 1.0).abs() < 1e-9);
    assert!(normalized[0][1].abs() < 1e-9);
    assert!((normalized[1][1] - 1.0).abs() < 1e-9);
    assert!((normalized[2][0] - 0.5).abs() < 1e-9);
    assert!((normalized[2][1] - 0.5).abs() < 1e-9);
  }

  #[test]
  fn test_normalization_respects_direction() {
    let minimize: Vec<Scores<2>> = vec![[3.0, 1.0], [1.0, 3.0], [2.0, 2.0]];
    let maximize: Vec<Scores<2>> =
      minimize.iter().map(|row| row.map(|s| -s)).collect();
    let members = vec![0, 1, 2];
    let a = normalize(&members, &minimize, Direction::Minimize);
    let b = normalize(&members, &maximize, Direction::Maximize);
    for (x, y) in a.iter().zip(&b) {
      for (u, v) in x.iter().zip(y) {
        assert!((u - v).abs() < 1e-12);
      }
    }
  }

  #[test]
  fn test_degenerate_extremes_fall_back() {
    // all candidates share one point in objective space: the extreme
    // matrix is singular and every extreme is the same member
    let scores: Vec<Scores<2>> = vec![[2.0, 2.0], [2.0, 2.0], [2.0, 2.0]];
    let members = vec![0, 1, 2];
    let normalized = normalize(&members, &scores, Direction::Minimize);
    for row in &normalized {
      assert!(row.iter().all(|value| value.is_finite()));
    }
  }

  #[test]
  fn test_solve_unit_plane() {
    let solution = solve_unit_plane([[2.0, 0.0], [0.0, 4.0]]).unwrap();
    assert!((solution[0] - 0.5).abs() < 1e-12);
    assert!((solution[1] - 0.25).abs() < 1e-12);

    assert!(solve_unit_plane([[1.0, 2.0], [2.0, 4.0]]).is_none());
  }

  #[test]
  fn test_selection_hits_target_without_duplicates() {
    let scores: Vec<Scores<2>> = (0..12)
      .map(|i| {
        let x = f64::from(i);
        [x, 11.0 - x]
      })
      .collect();
    let layers = layers_of(&scores, Direction::Minimize);
    let points = ReferencePoints::<2>::lattice(4).unwrap();
    let mut selector = ReferencePointSelector::new(points, 42);
    let mut selected =
      selector.select(&layers, &scores, Direction::Minimize, 6);
    assert_eq!(selected.len(), 6);
    selected.sort_unstable();
    selected.dedup();
    assert_eq!(selected.len(), 6, "a candidate was selected twice");
  }

  #[test]
  fn test_selection_is_reproducible() {
    let scores: Vec<Scores<3>> = (0..20)
      .map(|i| {
        let x = f64::from(i);
        [(x * 7.0) % 5.0, (x * 3.0) % 7.0, (x * 11.0) % 4.0]
      })
      .collect();
    let layers = layers_of(&scores, Direction::Minimize);
    let run = |seed| {
      ReferencePointSelector::new(
        ReferencePoints::<3>::lattice(3).unwrap(),
        seed,
      )
      .select(&layers, &scores, Direction::Minimize, 10)
    };
    assert_eq!(run(7), run(7));
  }

  #[test]
  fn test_empty_niches_claim_nearest_candidates() {
    // four boundary candidates spread along the front, four reference
    // points, nothing preselected: each point with candidates pulls its
    // nearest one first
    let scores: Vec<Scores<2>> =
      vec![[0.0, 3.0], [1.0, 2.0], [2.0, 1.0], [3.0, 0.0]];
    let layers = layers_of(&scores, Direction::Minimize);
    let points = ReferencePoints::<2>::lattice(3).unwrap();
    let mut selector = ReferencePointSelector::new(points, 1);
    let mut selected =
      selector.select(&layers, &scores, Direction::Minimize, 3);
    assert_eq!(selected.len(), 3);
    selected.sort_unstable();
    selected.dedup();
    assert_eq!(selected.len(), 3);
  }

  #[test]
  fn test_whole_layers_skip_niching() {
    let scores: Vec<Scores<2>> = vec![[1.0, 2.0], [2.0, 1.0], [3.0, 3.0]];
    let layers = layers_of(&scores, Direction::Minimize);
    let points = ReferencePoints::<2>::lattice(2).unwrap();
    let mut selector = ReferencePointSelector::new(points, 0);
    let selected = selector.select(&layers, &scores, Direction::Minimize, 3);
    assert_eq!(selected.len(), 3);
  }
}
