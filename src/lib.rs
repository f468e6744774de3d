//! **moea-select** implements the environmental selection engines of
//! multi-objective evolutionary algorithms: the machinery that, every
//! generation, reduces an oversized combined population of parents and
//! offspring back down to a fixed target size while preserving
//! Pareto-optimal diversity.
//!
//! This crate deliberately does *not* run the genetic loop for you. It has
//! no crossover, no mutation, no objective evaluation - those are tailored
//! to each problem and belong to your code. Instead you hand it a pool of
//! candidates with computed fitness vectors once per generation, and it
//! hands back the survivors plus diagnostic state for your termination
//! policy.
//!
//! The reduction pipeline is built from these components:
//! - [`domination`] counts, for each candidate, how many others strongly
//!   dominate it - the only O(N²) step, parallelized with [rayon]
//! - [`front`] partitions the pool into ordered Pareto layers by those
//!   counts; layer 0 is the current Pareto front
//! - [`archive`] tracks the front between generations through a
//!   content-based fingerprint and counts how long it has stagnated
//! - [`selection`] resolves the boundary layer that would overflow the
//!   target size, with one of two strategies:
//!   - [`CrowdingSelector`] - the NSGA-II policy, preferring candidates in
//!     sparse regions of objective space
//!   - [`ReferencePointSelector`] - the NSGA-III policy, balancing
//!     selection across a simplex lattice of [`reference`] directions;
//!     better suited to many objectives
//! - [`engine`] composes all of the above behind one
//!   [`SelectionEngine`](engine::SelectionEngine) with a builder from the
//!   `typed-builder` crate
//!
//! Candidates can live in plain parallel vectors of solutions and scores,
//! or in a [`pool`] - an arena that addresses candidates through stable,
//! generation-checked ids so handles never dangle across removals.
//!
//! # Directions
//!
//! Objectives are compared under a single [`Direction`] for the whole run:
//! either every objective is minimized or every objective is maximized.
//! Write your objective functions naturally and state the direction once
//! when building the engine.
//!
//! # Example
//!
//! One generation of NSGA-II style reduction over the combined pool:
//! ```
//! use moea_select::{
//!   engine::SelectionEngine,
//!   score::Direction,
//!   selection::CrowdingSelector,
//! };
//!
//! // solutions and their precomputed fitness scores, parents + offspring
//! let solutions: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0, 3.2];
//! let scores = vec![
//!   [1.0, 5.0],
//!   [2.0, 4.0],
//!   [3.0, 3.0],
//!   [4.0, 2.0],
//!   [5.0, 1.0],
//!   [3.0, 3.5], // dominated by (3, 3)
//! ];
//!
//! let mut engine = SelectionEngine::<2, _>::builder()
//!   .direction(Direction::Minimize)
//!   .target_size(4)
//!   .strategy(CrowdingSelector())
//!   .build()
//!   .expect("valid configuration");
//!
//! let (survivors, _scores) = engine.reduce_vec(solutions, scores);
//! assert_eq!(survivors.len(), 4);
//! // feed the stagnation counter to your termination policy
//! assert_eq!(engine.stagnant_generations(), 0);
//! ```
//!
//! For the NSGA-III policy, generate a reference lattice first and seed
//! the selector explicitly - all randomness in this crate is reproducible:
//! ```
//! use moea_select::{
//!   engine::SelectionEngine,
//!   reference::ReferencePoints,
//!   score::Direction,
//!   selection::ReferencePointSelector,
//! };
//!
//! let points = ReferencePoints::<3>::lattice(4).expect("valid lattice");
//! let mut engine = SelectionEngine::<3, _>::builder()
//!   .direction(Direction::Minimize)
//!   .target_size(12)
//!   .strategy(ReferencePointSelector::new(points, 42))
//!   .build()
//!   .expect("valid configuration");
//! // the generated lattice is exposed read-only for diagnostics
//! assert_eq!(engine.strategy().reference_points().len(), 15);
//! ```
//!
//! # Parallelization
//!
//! Only domination counting is parallel; every other step mutates shared
//! accumulator state and runs on a single logical owner per generation.
//! The engine carries no thread pool of its own - wrap calls in
//! `rayon::ThreadPool::install` to confine the work to a dedicated pool.
//! Fitness evaluation happens entirely outside this crate, so parallelize
//! it however your runtime likes.
//!
//! [rayon]: https://docs.rs/rayon
//! [`CrowdingSelector`]: crate::selection::CrowdingSelector
//! [`ReferencePointSelector`]: crate::selection::ReferencePointSelector
//! [`Direction`]: crate::score::Direction

#![warn(missing_docs)]

pub mod archive;
pub mod domination;
pub mod engine;
pub mod error;
pub mod front;
pub mod pool;
pub mod reference;
pub mod score;
pub mod selection;
