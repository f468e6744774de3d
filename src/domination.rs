//! Pairwise strong-domination analysis.
//!
//! A candidate *strongly dominates* another if it is not worse on every
//! objective and strictly better on at least one. The per-candidate
//! *dominated-by* counts produced here drive [`front`](crate::front)
//! partitioning.

use rayon::prelude::*;

use crate::score::{Direction, Score, Scores};

/// Describes strong Pareto domination for arrays of scores.
pub trait StrongDominance {
  /// Returns `true` if `self` strongly dominates `other` under `direction`:
  /// not worse on every objective and strictly better on at least one.
  /// Equal score arrays never dominate each other in either direction.
  fn strongly_dominates(&self, other: &Self, direction: Direction) -> bool;
}

impl StrongDominance for [Score] {
  fn strongly_dominates(&self, other: &Self, direction: Direction) -> bool {
    let mut better_somewhere = false;
    for (a, b) in self.iter().zip(other) {
      if direction.worse(*a, *b) {
        return false;
      }
      if direction.better(*a, *b) {
        better_somewhere = true;
      }
    }
    better_somewhere
  }
}

/// Counts, for each candidate, how many other candidates strongly dominate
/// it. A count of zero marks a member of the Pareto front.
///
/// Runs in O(N²·M). Candidates are never compared with themselves.
pub fn domination_counts<const M: usize>(
  scores: &[Scores<M>],
  direction: Direction,
) -> Vec<u32> {
  (0..scores.len())
    .map(|i| dominators_of(i, scores, direction))
    .collect()
}

/// The parallel flavor of [`domination_counts`]. The outer loop is
/// embarrassingly parallel: every task reads the shared score slice and
/// accumulates its own counter, so the two flavors always agree.
///
/// Parallelization is implemented with [rayon]. To confine the work to a
/// dedicated pool, call this function inside `rayon::ThreadPool::install`.
pub fn par_domination_counts<const M: usize>(
  scores: &[Scores<M>],
  direction: Direction,
) -> Vec<u32> {
  (0..scores.len())
    .into_par_iter()
    .map(|i| dominators_of(i, scores, direction))
    .collect()
}

fn dominators_of<const M: usize>(
  i: usize,
  scores: &[Scores<M>],
  direction: Direction,
) -> u32 {
  scores
    .iter()
    .enumerate()
    .filter(|&(j, sc)| {
      j != i && sc.strongly_dominates(&scores[i], direction)
    })
    .count() as u32
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_strong_domination_minimize() {
    let d = Direction::Minimize;
    assert!([1.0, 2.0].strongly_dominates(&[2.0, 3.0], d));
    assert!([1.0, 2.0].strongly_dominates(&[1.0, 3.0], d));
    assert!(![2.0, 3.0].strongly_dominates(&[1.0, 2.0], d));
    // incomparable pair
    assert!(![1.0, 3.0].strongly_dominates(&[3.0, 1.0], d));
    assert!(![3.0, 1.0].strongly_dominates(&[1.0, 3.0], d));
  }

  #[test]
  fn test_strong_domination_maximize() {
    let d = Direction::Maximize;
    assert!([2.0, 3.0].strongly_dominates(&[1.0, 2.0], d));
    assert!(![1.0, 2.0].strongly_dominates(&[2.0, 3.0], d));
    assert!(![1.0, 3.0].strongly_dominates(&[3.0, 1.0], d));
  }

  #[test]
  fn test_ties_never_dominate() {
    let d = Direction::Minimize;
    assert!(![1.0, 2.0, 3.0].strongly_dominates(&[1.0, 2.0, 3.0], d));
    let d = Direction::Maximize;
    assert!(![1.0, 2.0, 3.0].strongly_dominates(&[1.0, 2.0, 3.0], d));
  }

  #[test]
  fn test_domination_is_antisymmetric() {
    let scores: Vec<Scores<2>> = vec![
      [1.0, 5.0],
      [2.0, 4.0],
      [3.0, 3.0],
      [3.0, 3.5],
      [5.0, 1.0],
      [3.0, 3.0],
    ];
    for d in [Direction::Minimize, Direction::Maximize] {
      for a in &scores {
        for b in &scores {
          assert!(
            !(a.strongly_dominates(b, d) && b.strongly_dominates(a, d)),
            "{a:?} and {b:?} dominate each other"
          );
        }
      }
    }
  }

  #[test]
  fn test_domination_counts() {
    // (3, 3.5) is dominated by (3, 3) only; (4, 4) by (2, 4), (3, 3)
    // and (3, 3.5)
    let scores: Vec<Scores<2>> = vec![
      [1.0, 5.0],
      [2.0, 4.0],
      [3.0, 3.0],
      [3.0, 3.5],
      [4.0, 4.0],
      [5.0, 1.0],
    ];
    let counts = domination_counts(&scores, Direction::Minimize);
    assert_eq!(counts, vec![0, 0, 0, 1, 3, 0]);
  }

  #[test]
  fn test_front_members_have_zero_count() {
    let scores: Vec<Scores<2>> = (0..16)
      .map(|i| {
        let x = f64::from(i);
        [x, 16.0 - x]
      })
      .collect();
    let counts = domination_counts(&scores, Direction::Minimize);
    assert!(counts.iter().all(|&c| c == 0));
  }

  #[test]
  fn test_parallel_counts_match_sequential() {
    let scores: Vec<Scores<3>> = (0..64)
      .map(|i| {
        let x = f64::from(i);
        [(x * 7.0) % 13.0, (x * 3.0) % 11.0, (x * 5.0) % 17.0]
      })
      .collect();
    for d in [Direction::Minimize, Direction::Maximize] {
      assert_eq!(
        domination_counts(&scores, d),
        par_domination_counts(&scores, d)
      );
    }
  }
}
