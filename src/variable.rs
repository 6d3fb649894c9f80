use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use slotmap::{new_key_type, SlotMap};
use tracing::warn;

use crate::error::{FuzzyError, Result};
use crate::membership::{automf, AutoNames, Triangular};
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Whether a variable feeds rule conditions or receives rule conclusions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Antecedent,
    Consequent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Antecedent => f.write_str("antecedent"),
            Self::Consequent => f.write_str("consequent"),
        }
    }
}

/// Type-level marker for input variables.
#[derive(Debug)]
pub enum Antecedent {}

/// Type-level marker for output variables.
#[derive(Debug)]
pub enum Consequent {}

pub trait VariableRole {
    const ROLE: Role;
}

impl VariableRole for Antecedent {
    const ROLE: Role = Role::Antecedent;
}

impl VariableRole for Consequent {
    const ROLE: Role = Role::Consequent;
}

/// Handle to a variable registered in [`Variables`], typed by its role.
pub struct Variable<R>(pub(crate) VariableKey, PhantomData<R>);

impl<R> Variable<R> {
    pub fn key(self) -> VariableKey {
        self.0
    }
}

impl<R> Clone for Variable<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Variable<R> {}

impl<R> fmt::Debug for Variable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

/// A named term and its shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub name: String,
    pub shape: Triangular,
}

/// A named axis of meaning: a universe plus an ordered set of uniquely named terms.
#[derive(Clone, Debug, PartialEq)]
pub struct LinguisticVariable {
    name: String,
    universe: Universe,
    terms: Vec<Term>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            terms: Vec::new(),
        }
    }

    /// Adds an explicit term. Its control points must lie within the universe bounds.
    pub fn with_term(mut self, term: impl Into<String>, shape: Triangular) -> Result<Self> {
        self.insert_term(term.into(), shape)?;

        Ok(self)
    }

    /// Convenience for `with_term(term, Triangular::new(a, b, c)?)`.
    pub fn with_trimf(self, term: impl Into<String>, [a, b, c]: [f64; 3]) -> Result<Self> {
        self.with_term(term, Triangular::new(a, b, c)?)
    }

    /// Partitions the universe into `names.len()` overlapping triangles, in order.
    pub fn automf<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self> {
        let shapes = automf(&self.universe, names.len()).ok_or_else(|| FuzzyError::InvalidAutomf {
            variable: self.name.clone(),
            n: names.len(),
        })?;

        for (name, shape) in names.iter().zip(shapes) {
            self.insert_term(name.as_ref().to_owned(), shape)?;
        }

        Ok(self)
    }

    /// [`automf`](Self::automf) with conventional names; `n` must be 3, 5 or 7.
    pub fn automf_default(self, n: usize, names: AutoNames) -> Result<Self> {
        let Some(names) = names.names(n) else {
            return Err(FuzzyError::InvalidAutomf {
                variable: self.name,
                n,
            });
        };

        self.automf(names)
    }

    fn insert_term(&mut self, name: String, shape: Triangular) -> Result<()> {
        if self.term(&name).is_some() {
            return Err(FuzzyError::DuplicateTerm {
                variable: self.name.clone(),
                term: name,
            });
        }

        let [a, _, c] = shape.points();

        if a < self.universe.min() || c > self.universe.max() {
            return Err(FuzzyError::TermOutOfUniverse {
                variable: self.name.clone(),
                term: name,
                min: self.universe.min(),
                max: self.universe.max(),
            });
        }

        self.terms.push(Term { name, shape });

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn term(&self, name: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.name == name)
    }

    /// Degree of every term at `x`, after clamping `x` into the universe.
    pub fn fuzzify(&self, x: f64) -> Fuzzified {
        let value = self.universe.clamp(x);

        if value != x {
            warn!(variable = %self.name, input = x, clamped = value, "Input outside universe, clamped");
        }

        Fuzzified {
            input: x,
            value,
            degrees: self
                .terms
                .iter()
                .map(|t| (t.name.clone(), t.shape.evaluate(value)))
                .collect(),
        }
    }
}

/// Result of fuzzifying one crisp input.
#[derive(Clone, Debug, PartialEq)]
pub struct Fuzzified {
    input: f64,
    value: f64,
    degrees: Vec<(String, f64)>,
}

impl Fuzzified {
    /// The crisp value as supplied.
    pub fn input(&self) -> f64 {
        self.input
    }

    /// The value actually evaluated (clamped into the universe).
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn was_clamped(&self) -> bool {
        self.input != self.value
    }

    pub fn degree(&self, term: &str) -> Option<f64> {
        self.degrees.iter().find(|(name, _)| name == term).map(|(_, d)| *d)
    }

    /// `(term, degree)` pairs in term declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.degrees.iter().map(|(name, d)| (name.as_str(), *d))
    }
}

pub(crate) struct VariableEntry {
    pub(crate) variable: LinguisticVariable,
    pub(crate) role: Role,
}

/// Registry of every variable a rule base may reference.
#[derive(Default)]
pub struct Variables {
    pub(crate) entries: SlotMap<VariableKey, VariableEntry>,
    by_name: HashMap<String, VariableKey>,
    order: Vec<VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_antecedent(&mut self, variable: LinguisticVariable) -> Result<Variable<Antecedent>> {
        self.add(variable)
    }

    pub fn add_consequent(&mut self, variable: LinguisticVariable) -> Result<Variable<Consequent>> {
        self.add(variable)
    }

    fn add<R: VariableRole>(&mut self, variable: LinguisticVariable) -> Result<Variable<R>> {
        if self.by_name.contains_key(variable.name()) {
            return Err(FuzzyError::DuplicateVariable(variable.name().to_owned()));
        }

        let name = variable.name().to_owned();
        let key = self.entries.insert(VariableEntry { variable, role: R::ROLE });

        self.by_name.insert(name, key);
        self.order.push(key);

        Ok(Variable(key, PhantomData))
    }

    pub fn antecedent(&self, name: &str) -> Result<Variable<Antecedent>> {
        self.lookup(name)
    }

    pub fn consequent(&self, name: &str) -> Result<Variable<Consequent>> {
        self.lookup(name)
    }

    fn lookup<R: VariableRole>(&self, name: &str) -> Result<Variable<R>> {
        let key = self.key(name)?;

        self.expect_role(key, R::ROLE)?;

        Ok(Variable(key, PhantomData))
    }

    pub(crate) fn key(&self, name: &str) -> Result<VariableKey> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_owned()))
    }

    pub(crate) fn expect_role(&self, key: VariableKey, role: Role) -> Result<&LinguisticVariable> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| FuzzyError::UnknownVariable(format!("{key:?}")))?;

        if entry.role != role {
            return Err(FuzzyError::RoleMismatch {
                variable: entry.variable.name().to_owned(),
                expected: role,
            });
        }

        Ok(&entry.variable)
    }

    pub fn get(&self, key: VariableKey) -> Option<&LinguisticVariable> {
        self.entries.get(key).map(|e| &e.variable)
    }

    pub fn by_name(&self, name: &str) -> Option<&LinguisticVariable> {
        self.by_name.get(name).and_then(|key| self.get(*key))
    }

    pub fn role(&self, key: VariableKey) -> Option<Role> {
        self.entries.get(key).map(|e| e.role)
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = VariableKey> + '_ {
        self.order.iter().copied()
    }

    pub fn consequents(&self) -> impl Iterator<Item = VariableKey> + '_ {
        self.keys().filter(|key| self.role(*key) == Some(Role::Consequent))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
