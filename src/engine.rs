//! The generation-level selection engine.
//!
//! The engine wires the whole reduction pipeline together: domination
//! counting, front partitioning, archive maintenance and the chosen
//! environmental selection strategy. It consumes already computed fitness
//! vectors; evaluating them - in parallel or not - is the caller's concern.

use log::debug;
use typed_builder::TypedBuilder;

use crate::{
  archive::ParetoArchive,
  domination::par_domination_counts,
  error::{ConfigError, SelectionError},
  front::partition_layers,
  pool::{CandidateId, Pool},
  score::{Direction, Scores},
  selection::EnvironmentalSelector,
};

/// Reduces an oversized pool of candidates back to a fixed target size,
/// once per generation.
///
/// Built with a compile time verified builder from the `typed-builder`
/// crate; [`build`](SelectionEngineBuilder::build) validates the
/// configuration and fails fast before any generation runs.
///
/// # Examples
/// ```
/// use moea_select::{
///   engine::SelectionEngine,
///   score::Direction,
///   selection::CrowdingSelector,
/// };
///
/// let solutions = vec![10.0, 20.0, 30.0, 40.0, 50.0, 35.0];
/// let scores = vec![
///   [1.0, 5.0],
///   [2.0, 4.0],
///   [3.0, 3.0],
///   [4.0, 2.0],
///   [5.0, 1.0],
///   [3.0, 3.5],
/// ];
/// let mut engine = SelectionEngine::<2, _>::builder()
///   .direction(Direction::Minimize)
///   .target_size(4)
///   .strategy(CrowdingSelector())
///   .build()
///   .unwrap();
/// let (survivors, _) = engine.reduce_vec(solutions, scores);
/// assert_eq!(survivors.len(), 4);
/// ```
#[derive(TypedBuilder, Debug)]
#[builder(build_method(vis = "", name = build_unchecked))]
pub struct SelectionEngine<const M: usize, Sel> {
  /// The uniform domination direction of the run.
  direction: Direction,
  /// The population size every generation is reduced to.
  target_size: usize,
  /// The environmental selection strategy resolving the boundary layer.
  strategy: Sel,
  #[builder(setter(skip), default)]
  archive: ParetoArchive<M>,
}

#[allow(clippy::type_complexity)]
impl<const M: usize, Sel>
  SelectionEngineBuilder<M, Sel, ((Direction,), (usize,), (Sel,))>
{
  /// Finalizes the engine, validating its configuration.
  ///
  /// # Errors
  ///
  /// Fails with [`ConfigError::TooFewObjectives`] if `M < 2` and with
  /// [`ConfigError::ZeroTargetSize`] if the target size is zero.
  pub fn build(self) -> Result<SelectionEngine<M, Sel>, ConfigError> {
    if M < 2 {
      return Err(ConfigError::TooFewObjectives(M));
    }
    let engine = self.build_unchecked();
    if engine.target_size == 0 {
      return Err(ConfigError::ZeroTargetSize);
    }
    Ok(engine)
  }
}

impl<const M: usize, Sel> SelectionEngine<M, Sel>
where
  Sel: EnvironmentalSelector<M>,
{
  /// Runs one generation of environmental selection over parallel vectors
  /// of solutions and their fitness scores, returning the survivors.
  ///
  /// Whenever the pool holds at least `target_size` candidates, exactly
  /// `target_size` survive; a smaller pool passes through whole.
  pub fn reduce_vec<S>(
    &mut self,
    solutions: Vec<S>,
    scores: Vec<Scores<M>>,
  ) -> (Vec<S>, Vec<Scores<M>>) {
    debug_assert_eq!(
      solutions.len(),
      scores.len(),
      "every solution must have fitness scores"
    );
    let survivors = self.run(&scores);
    let mut solutions: Vec<_> = solutions.into_iter().map(Some).collect();
    let mut scores: Vec<_> = scores.into_iter().map(Some).collect();
    survivors
      .into_iter()
      .map(|index| {
        (
          solutions[index].take().expect("survivor indices are unique"),
          scores[index].take().expect("survivor indices are unique"),
        )
      })
      .unzip()
  }

  /// Runs one generation of environmental selection over a [`Pool`],
  /// removing eliminated candidates in place and returning the survivors'
  /// ids.
  ///
  /// # Errors
  ///
  /// Fails with [`SelectionError::UncomputedFitness`] if any pool
  /// candidate has no computed scores; the pool is left untouched then.
  pub fn reduce<S>(
    &mut self,
    pool: &mut Pool<S, M>,
  ) -> Result<Vec<CandidateId>, SelectionError> {
    let mut ids = Vec::with_capacity(pool.len());
    let mut scores = Vec::with_capacity(pool.len());
    for (id, candidate) in pool.iter() {
      let score = candidate
        .scores()
        .ok_or(SelectionError::UncomputedFitness)?;
      ids.push(id);
      scores.push(*score);
    }

    let survivors = self.run(&scores);
    let mut keep = vec![false; ids.len()];
    for &index in &survivors {
      keep[index] = true;
    }
    for (position, id) in ids.iter().enumerate() {
      if !keep[position] {
        pool.remove(*id);
      }
    }
    Ok(survivors.into_iter().map(|index| ids[index]).collect())
  }

  /// Reduces precomputed scores down to the indices of surviving
  /// candidates, updating the archive along the way.
  pub fn select_indices(&mut self, scores: &[Scores<M>]) -> Vec<usize> {
    self.run(scores)
  }

  fn run(&mut self, scores: &[Scores<M>]) -> Vec<usize> {
    if scores.is_empty() {
      self.archive.update(&[]);
      return Vec::new();
    }
    let counts = par_domination_counts(scores, self.direction);
    let layers = partition_layers(&counts);
    let front: Vec<Scores<M>> =
      layers[0].iter().map(|&index| scores[index]).collect();
    self.archive.update(&front);
    debug!(
      "generation {}: pool {}, front {}, stagnant for {}",
      self.archive.generations(),
      scores.len(),
      front.len(),
      self.archive.fail_count()
    );
    if scores.len() <= self.target_size {
      return (0..scores.len()).collect();
    }
    self
      .strategy
      .select(&layers, scores, self.direction, self.target_size)
  }
}

impl<const M: usize, Sel> SelectionEngine<M, Sel> {
  /// The domination direction of the run.
  pub fn direction(&self) -> Direction {
    self.direction
  }

  /// The population size every generation is reduced to.
  pub fn target_size(&self) -> usize {
    self.target_size
  }

  /// The environmental selection strategy, for strategy-specific
  /// diagnostics like the reference-point matrix.
  pub fn strategy(&self) -> &Sel {
    &self.strategy
  }

  /// The fitness vectors of the latest Pareto front.
  pub fn pareto_front(&self) -> &[Scores<M>] {
    self.archive.front()
  }

  /// The number of consecutive generations the Pareto front has not
  /// changed. Read this from the outer loop's stagnation policy.
  pub fn stagnant_generations(&self) -> usize {
    self.archive.fail_count()
  }
}
