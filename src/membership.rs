//! Triangular membership functions and automatic partitioning of a universe.

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::universe::Universe;

/// A triangular fuzzy set with feet `a`, `c` and peak `b`.
///
/// `a == b` (or `b == c`) makes that edge a step: the degree is already 1 at the foot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangular {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangular {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite();

        if !finite || a > b || b > c {
            return Err(FuzzyError::InvalidShape { a, b, c });
        }

        Ok(Self { a, b, c })
    }

    pub fn points(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;

        let degree = if x == b {
            1.
        } else if x <= a || x >= c {
            0.
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        };

        degree.clamp(0., 1.)
    }

    /// Samples the shape at every point of `universe`.
    pub fn sample(&self, universe: &Universe) -> Vec<f64> {
        universe.points().iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// Conventional name sets for [`automf_default`](crate::LinguisticVariable::automf_default).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoNames {
    /// poor .. good
    Quality,
    /// low .. high
    Quantity,
}

impl AutoNames {
    pub(crate) fn names(self, n: usize) -> Option<&'static [&'static str]> {
        let names: &'static [&'static str] = match (self, n) {
            (Self::Quality, 3) => &["poor", "average", "good"],
            (Self::Quality, 5) => &["poor", "mediocre", "average", "decent", "good"],
            (Self::Quality, 7) => &["dismal", "poor", "mediocre", "average", "decent", "good", "excellent"],
            (Self::Quantity, 3) => &["low", "average", "high"],
            (Self::Quantity, 5) => &["lowest", "lower", "average", "higher", "highest"],
            (Self::Quantity, 7) => &["lowest", "lower", "low", "average", "high", "higher", "highest"],
            _ => return None,
        };

        Some(names)
    }
}

/// `n` overlapping triangles with evenly spaced peaks from `universe.min()` to `universe.max()`.
///
/// Each triangle's feet sit on its neighbours' peaks; the outermost terms saturate at the
/// universe bounds (`a == b == min` for the first, `b == c == max` for the last), so
/// adjacent terms sum to exactly one between their peaks. Returns `None` for `n < 3`.
pub(crate) fn automf(universe: &Universe, n: usize) -> Option<Vec<Triangular>> {
    if n < 3 {
        return None;
    }

    let peaks: Vec<f64> = Linspace::new(universe.min(), universe.max(), n).collect();

    let shapes = (0..n)
        .map(|i| {
            let left = peaks[i.saturating_sub(1)];
            let right = peaks[(i + 1).min(n - 1)];

            Triangular {
                a: left,
                b: peaks[i],
                c: right,
            }
        })
        .collect();

    Some(shapes)
}
