//! Reference direction lattices for reference-point niching.
//!
//! A lattice is the Das-Dennis simplex: every way of splitting `precision`
//! units across `M` objectives, normalized so each point's coordinates sum
//! to one. Lattices are generated once per run and reused unchanged until
//! explicitly reconfigured.

use std::f64::consts::FRAC_1_SQRT_2;

use crate::{
  error::ConfigError,
  score::{Score, Scores},
};

/// A fixed set of unit-simplex reference directions in objective space.
#[derive(Clone, PartialEq, Debug)]
pub struct ReferencePoints<const M: usize> {
  points: Vec<Scores<M>>,
}

impl<const M: usize> ReferencePoints<M> {
  /// Builds a single-layer simplex lattice with `precision` divisions per
  /// objective axis. Yields exactly `C(M + precision - 1, precision)`
  /// points.
  ///
  /// # Errors
  ///
  /// Fails with [`ConfigError::TooFewObjectives`] if `M < 2` and with
  /// [`ConfigError::PrecisionTooLow`] if `precision < 2`.
  pub fn lattice(precision: usize) -> Result<Self, ConfigError> {
    if M < 2 {
      return Err(ConfigError::TooFewObjectives(M));
    }
    if precision < 2 {
      return Err(ConfigError::PrecisionTooLow(precision));
    }
    let mut points = Vec::with_capacity(binomial(M + precision - 1, precision));
    let mut coordinates = [0.0; M];
    enumerate_partitions(precision, precision, 0, &mut coordinates, &mut points);
    Ok(Self { points })
  }

  /// Builds a double-layer lattice: an outer lattice at `outer_precision`
  /// concatenated with an inner lattice at `inner_precision` whose points
  /// are pulled toward the simplex centroid by a factor of `1/√2`. The
  /// inner layer improves coverage of the front interior when `M` is
  /// large.
  ///
  /// Shrinking happens around the centroid, so every generated point still
  /// sums to one across its coordinates.
  ///
  /// # Errors
  ///
  /// Fails like [`ReferencePoints::lattice`] does, for either precision.
  pub fn double_lattice(
    outer_precision: usize,
    inner_precision: usize,
  ) -> Result<Self, ConfigError> {
    let mut outer = Self::lattice(outer_precision)?;
    let inner = Self::lattice(inner_precision)?;
    let centroid = 1.0 / M as Score;
    outer.points.extend(inner.points.into_iter().map(|point| {
      point.map(|c| centroid + (c - centroid) * FRAC_1_SQRT_2)
    }));
    Ok(outer)
  }

  /// The number of reference points.
  pub fn len(&self) -> usize {
    self.points.len()
  }

  /// Returns `true` if the lattice holds no points. Never true for a
  /// successfully generated lattice.
  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  /// The generated reference directions.
  pub fn points(&self) -> &[Scores<M>] {
    &self.points
  }
}

/// Recursively enumerates every split of `left` lattice units over the
/// axes from `axis` on, emitting a point per complete split.
fn enumerate_partitions<const M: usize>(
  left: usize,
  precision: usize,
  axis: usize,
  coordinates: &mut Scores<M>,
  points: &mut Vec<Scores<M>>,
) {
  if axis == M - 1 {
    coordinates[axis] = left as Score / precision as Score;
    points.push(*coordinates);
    return;
  }
  for part in 0..=left {
    coordinates[axis] = part as Score / precision as Score;
    enumerate_partitions(left - part, precision, axis + 1, coordinates, points);
  }
}

/// C(n, k) without intermediate overflow for the lattice sizes in use.
fn binomial(n: usize, k: usize) -> usize {
  let k = k.min(n - k);
  let mut result: u128 = 1;
  for i in 0..k {
    result = result * (n - i) as u128 / (i + 1) as u128;
  }
  result as usize
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_sums_to_one<const M: usize>(points: &ReferencePoints<M>) {
    for point in points.points() {
      let sum: Score = point.iter().sum();
      assert!(
        (sum - 1.0).abs() < 1e-9,
        "point {point:?} sums to {sum}, not 1"
      );
    }
  }

  #[test]
  fn test_three_objectives_precision_two() {
    let points = ReferencePoints::<3>::lattice(2).unwrap();
    assert_eq!(points.len(), 6);
    assert_sums_to_one(&points);
    for expected in [[1.0, 0.0, 0.0], [0.5, 0.5, 0.0], [0.0, 0.0, 1.0]] {
      assert!(
        points.points().contains(&expected),
        "lattice misses {expected:?}"
      );
    }
  }

  #[test]
  fn test_lattice_cardinality() {
    // C(M + p - 1, p)
    assert_eq!(ReferencePoints::<2>::lattice(4).unwrap().len(), 5);
    assert_eq!(ReferencePoints::<3>::lattice(12).unwrap().len(), 91);
    assert_eq!(ReferencePoints::<5>::lattice(6).unwrap().len(), 210);
  }

  #[test]
  fn test_lattice_sums_to_one() {
    assert_sums_to_one(&ReferencePoints::<4>::lattice(5).unwrap());
    assert_sums_to_one(&ReferencePoints::<8>::lattice(3).unwrap());
  }

  #[test]
  fn test_double_lattice() {
    let single_outer = ReferencePoints::<3>::lattice(4).unwrap().len();
    let single_inner = ReferencePoints::<3>::lattice(3).unwrap().len();
    let double = ReferencePoints::<3>::double_lattice(4, 3).unwrap();
    assert_eq!(double.len(), single_outer + single_inner);
    assert_sums_to_one(&double);
  }

  #[test]
  fn test_double_lattice_inner_layer_is_shrunk() {
    let double = ReferencePoints::<3>::double_lattice(2, 2).unwrap();
    let outer_len = ReferencePoints::<3>::lattice(2).unwrap().len();
    let centroid = 1.0 / 3.0;
    // the shrunk image of (1, 0, 0)
    let expected = centroid + (1.0 - centroid) * FRAC_1_SQRT_2;
    let inner = &double.points()[outer_len..];
    assert!(inner
      .iter()
      .any(|p| (p[0] - expected).abs() < 1e-12 && p[1] == p[2]));
  }

  #[test]
  fn test_configuration_errors() {
    assert_eq!(
      ReferencePoints::<1>::lattice(3),
      Err(ConfigError::TooFewObjectives(1))
    );
    assert_eq!(
      ReferencePoints::<3>::lattice(1),
      Err(ConfigError::PrecisionTooLow(1))
    );
    assert_eq!(
      ReferencePoints::<3>::double_lattice(4, 0),
      Err(ConfigError::PrecisionTooLow(0))
    );
  }

  #[test]
  fn test_binomial() {
    assert_eq!(binomial(4, 2), 6);
    assert_eq!(binomial(14, 12), 91);
    assert_eq!(binomial(10, 6), 210);
  }
}
