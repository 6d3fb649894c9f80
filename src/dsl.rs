use slotmap::SecondaryMap;

use crate::error::{FuzzyError, Result};
use crate::ops::{zadeh_and, zadeh_not, zadeh_or};
use crate::variable::{Antecedent, Consequent, Fuzzified, Variable, VariableKey, Variables};

/// A rule condition: `(variable is term)` leaves combined with fuzzy AND / OR / NOT.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Is(VariableKey, String),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    pub fn and2(self, rhs: Expr, rhs2: Expr) -> Self {
        self.and(rhs).and(rhs2)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// Every `(variable, term)` leaf, left to right.
    pub fn propositions(&self) -> Vec<(VariableKey, &str)> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<(VariableKey, &'p str)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((*var_key, term)),
                Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                    parse(lhs, out);
                    parse(rhs, out);
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        parse(self, &mut props);

        props
    }

    /// Firing strength of this condition under the given fuzzified inputs.
    pub(crate) fn eval(&self, vars: &Variables, facts: &SecondaryMap<VariableKey, Fuzzified>) -> Result<f64> {
        match self {
            Expr::Is(var_key, term) => {
                let name = || vars.get(*var_key).map_or_else(|| format!("{var_key:?}"), |v| v.name().to_owned());
                let fact = facts.get(*var_key).ok_or_else(|| FuzzyError::UnboundVariable(name()))?;

                fact.degree(term).ok_or_else(|| FuzzyError::UnknownTerm {
                    variable: name(),
                    term: term.clone(),
                })
            },
            Expr::And(lhs, rhs) => Ok(zadeh_and(lhs.eval(vars, facts)?, rhs.eval(vars, facts)?)),
            Expr::Or(lhs, rhs) => Ok(zadeh_or(lhs.eval(vars, facts)?, rhs.eval(vars, facts)?)),
            Expr::Not(expr) => Ok(zadeh_not(expr.eval(vars, facts)?)),
        }
    }
}

/// One `(consequent, term)` clause of a rule's conclusion.
#[derive(Clone, Debug, PartialEq)]
pub struct Consequence {
    pub(crate) variable: VariableKey,
    pub(crate) term: String,
}

impl Consequence {
    pub fn variable(&self) -> VariableKey {
        self.variable
    }

    pub fn term(&self) -> &str {
        &self.term
    }
}

impl Variable<Antecedent> {
    pub fn is(self, term: impl Into<String>) -> Expr {
        Expr::Is(self.0, term.into())
    }
}

impl Variable<Consequent> {
    pub fn is(self, term: impl Into<String>) -> Consequence {
        Consequence {
            variable: self.0,
            term: term.into(),
        }
    }
}
