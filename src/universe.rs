use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;

/// Sample spacing used by [`Universe::from_range`] when none is given.
pub const DEFAULT_STEP: f64 = 0.1;

/// The discretized domain of a variable: at least two finite, strictly increasing samples.
///
/// Samples are shared behind an `Arc`, so cloning a universe (e.g. into an output curve)
/// is cheap.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe(Arc<[f64]>);

impl Universe {
    /// Wraps explicit sample points.
    pub fn new(points: impl Into<Vec<f64>>) -> Result<Self> {
        let points = points.into();

        if points.len() < 2 {
            return Err(FuzzyError::InvalidUniverse(format!(
                "expected at least 2 samples, got {}",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(FuzzyError::InvalidUniverse(format!("sample {bad} is not finite")));
        }
        if let Some(window) = points.windows(2).find(|w| w[0] >= w[1]) {
            return Err(FuzzyError::InvalidUniverse(format!(
                "samples must be strictly increasing, found {} then {}",
                window[0], window[1]
            )));
        }

        Ok(Self(points.into()))
    }

    /// Samples `range` every `step` (default [`DEFAULT_STEP`]), always including both ends.
    ///
    /// `0.0..=4000.0` with a step of `1.0` yields the 4001 integers of that range.
    pub fn from_range(range: RangeInclusive<f64>, step: Option<f64>) -> Result<Self> {
        let step = step.unwrap_or(DEFAULT_STEP);
        let min_u = *range.start();
        let max_u = *range.end();

        if !(step.is_finite() && step > 0.) {
            return Err(FuzzyError::InvalidUniverse(format!("step {step} must be positive")));
        }
        if !(min_u.is_finite() && max_u.is_finite()) || min_u >= max_u {
            return Err(FuzzyError::InvalidUniverse(format!("empty range [{min_u}, {max_u}]")));
        }

        // floor is closest approx to what python does for int() conversion
        let num = ((max_u - min_u) / step).floor() as usize + 1;

        Self::linspace(min_u, max_u, num.max(2))
    }

    /// `n` evenly spaced samples over `[min, max]`.
    pub fn linspace(min: f64, max: f64, n: usize) -> Result<Self> {
        Self::new(Linspace::new(min, max, n).collect::<Vec<_>>())
    }

    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn max(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    pub fn points(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed universe.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min() <= x && x <= self.max()
    }

    /// Clamps `x` to the nearest bound.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min(), self.max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_range_integer_step() {
        let u = Universe::from_range(0. ..=4000., Some(1.)).unwrap();

        assert_eq!(u.len(), 4001);
        assert_eq!(u.min(), 0.);
        assert_eq!(u.max(), 4000.);
        assert_eq!(u.points()[1234], 1234.);
    }

    #[test]
    fn test_from_range_default_step() {
        let u = Universe::from_range(0. ..=1., None).unwrap();

        assert_eq!(u.len(), 11);
        assert_eq!(u.max(), 1.);
    }

    #[test]
    fn test_invalid_universes() {
        assert!(matches!(Universe::new(vec![]), Err(FuzzyError::InvalidUniverse(_))));
        assert!(matches!(Universe::new(vec![1.]), Err(FuzzyError::InvalidUniverse(_))));
        assert!(matches!(Universe::new(vec![0., 2., 1.]), Err(FuzzyError::InvalidUniverse(_))));
        assert!(matches!(Universe::new(vec![0., 0., 1.]), Err(FuzzyError::InvalidUniverse(_))));
        assert!(matches!(Universe::new(vec![0., f64::NAN]), Err(FuzzyError::InvalidUniverse(_))));
        assert!(matches!(
            Universe::from_range(5. ..=5., Some(1.)),
            Err(FuzzyError::InvalidUniverse(_))
        ));
        assert!(matches!(
            Universe::from_range(0. ..=5., Some(0.)),
            Err(FuzzyError::InvalidUniverse(_))
        ));
    }

    #[test]
    fn test_clamp() {
        let u = Universe::new(vec![0., 1., 7.]).unwrap();

        assert_eq!(u.clamp(-3.), 0.);
        assert_eq!(u.clamp(9.), 7.);
        assert_eq!(u.clamp(4.5), 4.5);
        assert!(u.contains(7.));
        assert!(!u.contains(7.5));
    }
}
