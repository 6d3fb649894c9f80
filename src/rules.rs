use crate::dsl::{Consequence, Expr};

/// Ordered rule list, validated when turned into a [`RuleBase`](crate::RuleBase).
#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// Adds a rule with the default weight of 1.0.
    pub fn add(&mut self, premise: Expr, consequence: impl IntoIterator<Item = Consequence>) {
        self.add_weighted(premise, consequence, 1.0);
    }

    /// Adds a rule whose firing strength is scaled by `weight`, expected in (0, 1].
    pub fn add_weighted(&mut self, premise: Expr, consequence: impl IntoIterator<Item = Consequence>, weight: f64) {
        self.0.push(Rule {
            premise,
            consequence: consequence.into_iter().collect(),
            weight,
        });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub(crate) premise: Expr,
    pub(crate) consequence: Vec<Consequence>,
    pub(crate) weight: f64,
}

impl Rule {
    pub fn premise(&self) -> &Expr {
        &self.premise
    }

    pub fn consequence(&self) -> &[Consequence] {
        &self.consequence
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}
