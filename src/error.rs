//! Error types of the selection engine.
//!
//! Configuration mistakes fail fast, before a single generation runs.
//! Numeric degeneracies encountered *during* a run - a constant objective
//! within a boundary layer or a singular extreme-point matrix - are not
//! errors: they are resolved with the documented epsilon guards and
//! fallbacks, and selection proceeds.

use thiserror::Error;

/// A fatal configuration error, reported before any generation runs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Error)]
pub enum ConfigError {
  /// Multi-objective selection needs at least two objectives.
  #[error("multi-objective selection requires at least 2 objectives, got {0}")]
  TooFewObjectives(usize),
  /// A reference lattice cannot be built from fewer than two divisions
  /// per objective axis.
  #[error("reference lattice precision must be at least 2, got {0}")]
  PrecisionTooLow(usize),
  /// A target population size of zero can never be reached by selection.
  #[error("target population size must be greater than zero")]
  ZeroTargetSize,
}

/// An error raised while reducing a population.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Error)]
pub enum SelectionError {
  /// A candidate reached selection before its fitness was computed.
  #[error("pool contains a candidate with uncomputed fitness")]
  UncomputedFitness,
  /// An invalid configuration slipped past construction.
  #[error(transparent)]
  Config(#[from] ConfigError),
}
