//! Pareto front archive and stagnation tracking.
//!
//! The archive keeps the scores of the latest Pareto front and counts how
//! many consecutive generations the front has stayed identical. The counter
//! is read by the surrounding GA loop's termination policy; the archive
//! itself never terminates anything.

use std::{
  cmp::Ordering,
  hash::{DefaultHasher, Hasher},
};

use crate::score::Scores;

/// Tracks the current Pareto front and a stagnation counter.
///
/// Front identity is content-based: a fingerprint is computed over the
/// front's fitness vectors sorted lexicographically, so it is stable across
/// runs and allocators and treats equal-fitness candidates as
/// interchangeable.
#[derive(Clone, Debug, Default)]
pub struct ParetoArchive<const M: usize> {
  front: Vec<Scores<M>>,
  fingerprint: u64,
  fails: usize,
  generations: usize,
}

impl<const M: usize> ParetoArchive<M> {
  /// Creates an empty archive.
  pub fn new() -> Self {
    Self {
      front: Vec::new(),
      fingerprint: 0,
      fails: 0,
      generations: 0,
    }
  }

  /// Replaces the tracked front with `front`.
  ///
  /// The fail counter is incremented when the new front has the same size
  /// *and* the same content fingerprint as the previous one, and reset to
  /// zero otherwise.
  pub fn update(&mut self, front: &[Scores<M>]) {
    let fingerprint = content_fingerprint(front);
    let stagnant = self.generations > 0
      && front.len() == self.front.len()
      && fingerprint == self.fingerprint;
    if stagnant {
      self.fails += 1;
    } else {
      self.fails = 0;
    }
    self.fingerprint = fingerprint;
    self.front.clear();
    self.front.extend_from_slice(front);
    self.generations += 1;
  }

  /// The fitness vectors of the latest tracked front.
  pub fn front(&self) -> &[Scores<M>] {
    &self.front
  }

  /// The number of consecutive generations the front has not changed.
  pub fn fail_count(&self) -> usize {
    self.fails
  }

  /// The number of `update` calls performed so far.
  pub fn generations(&self) -> usize {
    self.generations
  }
}

/// Hashes the IEEE bit patterns of `front`'s scores after sorting the
/// vectors lexicographically. Membership order does not affect the result.
fn content_fingerprint<const M: usize>(front: &[Scores<M>]) -> u64 {
  let mut rows: Vec<&Scores<M>> = front.iter().collect();
  rows.sort_by(|a, b| {
    a.iter()
      .zip(b.iter())
      .map(|(x, y)| x.total_cmp(y))
      .find(|ord| ord.is_ne())
      .unwrap_or(Ordering::Equal)
  });
  let mut hasher = DefaultHasher::new();
  for row in rows {
    for score in row {
      hasher.write_u64(score.to_bits());
    }
  }
  hasher.finish()
}
