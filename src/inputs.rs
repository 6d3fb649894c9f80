use slotmap::SecondaryMap;

use crate::variable::{Antecedent, Variable, VariableKey};

/// Crisp values bound to antecedents.
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) SecondaryMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(SecondaryMap::new())
    }

    /// Binds `val` to `var`, replacing any previous value.
    pub fn add(&mut self, var: Variable<Antecedent>, val: f64) {
        self.insert(var.0, val);
    }

    pub(crate) fn insert(&mut self, key: VariableKey, val: f64) -> Option<f64> {
        self.0.insert(key, val)
    }

    pub fn get(&self, var: Variable<Antecedent>) -> Option<f64> {
        self.0.get(var.0).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
