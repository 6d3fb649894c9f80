use slotmap::SecondaryMap;

use crate::math::interp;
use crate::ops::centroid;
use crate::universe::Universe;
use crate::variable::{Consequent, Fuzzified, Variable, VariableKey};

/// A membership curve sampled over a variable's universe.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    universe: Universe,
    degrees: Vec<f64>,
}

impl Curve {
    pub(crate) fn new(universe: Universe, degrees: Vec<f64>) -> Self {
        debug_assert_eq!(universe.len(), degrees.len());

        Self { universe, degrees }
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn degrees(&self) -> &[f64] {
        &self.degrees
    }

    /// `(universe point, degree)` pairs in increasing x.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.universe.points().iter().copied().zip(self.degrees.iter().copied())
    }

    /// Linear interpolation between samples; saturates at the end samples outside the universe.
    /// NaN for a NaN `x`.
    pub fn degree_at(&self, x: f64) -> f64 {
        interp(Some(x), self.points()).into_iter().next().unwrap_or(0.)
    }

    pub fn centroid(&self) -> Option<f64> {
        centroid(self.universe.points(), &self.degrees)
    }

    pub fn height(&self) -> f64 {
        self.degrees.iter().copied().fold(0., f64::max)
    }
}

/// Everything computed for one consequent.
#[derive(Clone, Debug)]
pub struct ConsequentOutput {
    pub(crate) crisp: f64,
    pub(crate) curve: Curve,
    pub(crate) terms: Vec<(String, Curve)>,
}

impl ConsequentOutput {
    pub fn crisp(&self) -> f64 {
        self.crisp
    }

    /// Pointwise max over all term curves.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Aggregated curve of a single term.
    pub fn term_curve(&self, term: &str) -> Option<&Curve> {
        self.terms.iter().find(|(name, _)| name == term).map(|(_, curve)| curve)
    }
}

/// Result of one inference pass.
#[derive(Clone, Debug)]
pub struct Outputs {
    pub(crate) fuzzified: SecondaryMap<VariableKey, Fuzzified>,
    pub(crate) firing_strengths: Vec<f64>,
    pub(crate) consequents: SecondaryMap<VariableKey, ConsequentOutput>,
}

impl Outputs {
    pub fn get_inferred_membership(&self, var: Variable<Consequent>) -> Option<f64> {
        self.consequent(var.0).map(ConsequentOutput::crisp)
    }

    pub fn consequent(&self, key: VariableKey) -> Option<&ConsequentOutput> {
        self.consequents.get(key)
    }

    pub fn fuzzified(&self, key: VariableKey) -> Option<&Fuzzified> {
        self.fuzzified.get(key)
    }

    /// Weighted firing strength of each rule, in rule order.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    pub fn max_firing_strength(&self) -> f64 {
        self.firing_strengths.iter().copied().fold(0., f64::max)
    }
}

#[test]
fn test_curve_queries() {
    let universe = Universe::new(vec![0., 1., 2., 3.]).unwrap();
    let curve = Curve::new(universe, vec![0., 0.5, 0.5, 0.]);

    assert_eq!(curve.points().collect::<Vec<_>>(), vec![(0., 0.), (1., 0.5), (2., 0.5), (3., 0.)]);
    assert_eq!(curve.degree_at(0.5), 0.25);
    assert_eq!(curve.degree_at(1.5), 0.5);
    assert_eq!(curve.degree_at(10.), 0.);
    assert!(curve.degree_at(f64::NAN).is_nan());
    assert_eq!(curve.centroid(), Some(1.5));
    assert_eq!(curve.height(), 0.5);
}
