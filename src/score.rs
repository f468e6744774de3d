//! Fitness score types and the domination direction shared by every
//! selection component of this crate.

/// An alias for a fitness score.
///
/// Scores are plain objective values. Whether a bigger value is better or
/// worse is decided by [`Direction`], uniformly for all objectives of a run.
pub type Score = f64;

/// An alias for an array of `M` values of `Score` type - one value per
/// objective. `M` is fixed for the whole run.
pub type Scores<const M: usize> = [Score; M];

/// The uniform domination direction of a run.
///
/// Every comparison performed by this crate is filtered through this value,
/// so objective functions can be written naturally instead of being bent
/// into a "converges at zero" shape.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Direction {
  /// Smaller scores are better.
  #[default]
  Minimize,
  /// Bigger scores are better.
  Maximize,
}

impl Direction {
  /// Returns `true` if score `a` is strictly better than score `b` under
  /// this direction.
  pub fn better(self, a: Score, b: Score) -> bool {
    match self {
      Direction::Minimize => a < b,
      Direction::Maximize => a > b,
    }
  }

  /// Returns `true` if score `a` is strictly worse than score `b` under
  /// this direction.
  pub fn worse(self, a: Score, b: Score) -> bool {
    match self {
      Direction::Minimize => a > b,
      Direction::Maximize => a < b,
    }
  }

  /// Maps a score into minimization form. Normalization and association
  /// always work on minimized scores.
  pub(crate) fn minimized(self, score: Score) -> Score {
    match self {
      Direction::Minimize => score,
      Direction::Maximize => -score,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_direction_comparisons() {
    assert!(Direction::Minimize.better(1.0, 2.0));
    assert!(!Direction::Minimize.better(2.0, 1.0));
    assert!(!Direction::Minimize.better(1.0, 1.0));
    assert!(Direction::Minimize.worse(2.0, 1.0));
    assert!(!Direction::Minimize.worse(1.0, 1.0));

    assert!(Direction::Maximize.better(2.0, 1.0));
    assert!(!Direction::Maximize.better(1.0, 2.0));
    assert!(!Direction::Maximize.better(1.0, 1.0));
    assert!(Direction::Maximize.worse(1.0, 2.0));
    assert!(!Direction::Maximize.worse(1.0, 1.0));
  }

  #[test]
  fn test_minimized_form() {
    assert_eq!(Direction::Minimize.minimized(3.0), 3.0);
    assert_eq!(Direction::Maximize.minimized(3.0), -3.0);
    assert_eq!(Direction::Maximize.minimized(-2.0), 2.0);
  }
}
