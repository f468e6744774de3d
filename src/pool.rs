//! The population container: an arena of candidates addressed by stable,
//! generation-checked ids.
//!
//! Ids stay valid while other candidates are inserted or removed, and a
//! stale id - one whose slot has been reused - is rejected instead of
//! silently resolving to an unrelated candidate.

use crate::score::Scores;

/// A stable handle to a candidate in a [`Pool`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CandidateId {
  index: u32,
  generation: u32,
}

/// A solution paired with its fitness scores.
///
/// A candidate without scores is *uncomputed*; once set for a generation,
/// scores are read-only.
#[derive(Clone, Debug)]
pub struct Candidate<S, const M: usize> {
  solution: S,
  scores: Option<Scores<M>>,
}

impl<S, const M: usize> Candidate<S, M> {
  /// The decision-variable value of this candidate.
  pub fn solution(&self) -> &S {
    &self.solution
  }

  /// The fitness scores of this candidate, or `None` if not yet computed.
  pub fn scores(&self) -> Option<&Scores<M>> {
    self.scores.as_ref()
  }

  /// Returns `true` if this candidate's fitness has been computed.
  pub fn is_computed(&self) -> bool {
    self.scores.is_some()
  }

  /// Consumes the candidate, returning its solution.
  pub fn into_solution(self) -> S {
    self.solution
  }
}

#[derive(Clone, Debug)]
struct Slot<S, const M: usize> {
  generation: u32,
  entry: Option<Candidate<S, M>>,
}

/// An arena of candidates with exclusive ownership of their lifecycle.
///
/// Candidates come into being at initialization or as offspring, and are
/// destroyed when eliminated by selection. Removal leaves a free slot that
/// later insertions reuse under a bumped generation.
#[derive(Clone, Debug, Default)]
pub struct Pool<S, const M: usize> {
  slots: Vec<Slot<S, M>>,
  free: Vec<u32>,
  len: usize,
}

impl<S, const M: usize> Pool<S, M> {
  /// Creates an empty pool.
  pub fn new() -> Self {
    Self {
      slots: Vec::new(),
      free: Vec::new(),
      len: 0,
    }
  }

  /// Creates an empty pool with room for `capacity` candidates.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      slots: Vec::with_capacity(capacity),
      free: Vec::new(),
      len: 0,
    }
  }

  /// The number of live candidates.
  pub fn len(&self) -> usize {
    self.len
  }

  /// Returns `true` if the pool holds no candidates.
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Inserts an uncomputed candidate and returns its id.
  pub fn insert(&mut self, solution: S) -> CandidateId {
    self.insert_candidate(Candidate {
      solution,
      scores: None,
    })
  }

  /// Inserts a candidate with already computed scores and returns its id.
  pub fn insert_scored(
    &mut self,
    solution: S,
    scores: Scores<M>,
  ) -> CandidateId {
    self.insert_candidate(Candidate {
      solution,
      scores: Some(scores),
    })
  }

  fn insert_candidate(&mut self, candidate: Candidate<S, M>) -> CandidateId {
    self.len += 1;
    match self.free.pop() {
      Some(index) => {
        let slot = &mut self.slots[index as usize];
        slot.entry = Some(candidate);
        CandidateId {
          index,
          generation: slot.generation,
        }
      }
      None => {
        let index = u32::try_from(self.slots.len())
          .expect("pool capacity exceeded u32::MAX");
        self.slots.push(Slot {
          generation: 0,
          entry: Some(candidate),
        });
        CandidateId {
          index,
          generation: 0,
        }
      }
    }
  }

  /// Returns the candidate behind `id`, or `None` if it was removed.
  pub fn get(&self, id: CandidateId) -> Option<&Candidate<S, M>> {
    self
      .slots
      .get(id.index as usize)
      .filter(|slot| slot.generation == id.generation)
      .and_then(|slot| slot.entry.as_ref())
  }

  /// Records computed fitness scores for the candidate behind `id`.
  /// Returns `false` if the id is stale.
  pub fn set_scores(&mut self, id: CandidateId, scores: Scores<M>) -> bool {
    match self
      .slots
      .get_mut(id.index as usize)
      .filter(|slot| slot.generation == id.generation)
      .and_then(|slot| slot.entry.as_mut())
    {
      Some(candidate) => {
        candidate.scores = Some(scores);
        true
      }
      None => false,
    }
  }

  /// Removes and returns the candidate behind `id`. The slot is recycled
  /// under a new generation, so the old id turns stale.
  pub fn remove(&mut self, id: CandidateId) -> Option<Candidate<S, M>> {
    let slot = self
      .slots
      .get_mut(id.index as usize)
      .filter(|slot| slot.generation == id.generation)?;
    let candidate = slot.entry.take()?;
    slot.generation = slot.generation.wrapping_add(1);
    self.free.push(id.index);
    self.len -= 1;
    Some(candidate)
  }

  /// Iterates over live candidates in slot order.
  pub fn iter(&self) -> impl Iterator<Item = (CandidateId, &Candidate<S, M>)> {
    self.slots.iter().enumerate().filter_map(|(index, slot)| {
      slot.entry.as_ref().map(|candidate| {
        (
          CandidateId {
            index: index as u32,
            generation: slot.generation,
          },
          candidate,
        )
      })
    })
  }

  /// Ids of all live candidates in slot order.
  pub fn ids(&self) -> Vec<CandidateId> {
    self.iter().map(|(id, _)| id).collect()
  }

  /// Drains the pool, returning every remaining solution.
  pub fn into_solutions(self) -> Vec<S> {
    self
      .slots
      .into_iter()
      .filter_map(|slot| slot.entry.map(Candidate::into_solution))
      .collect()
  }
}
