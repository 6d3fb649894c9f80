use tracing::debug;

use crate::error::{FuzzyError, Result};
use crate::rules::{Rule, Rules};
use crate::variable::{Role, VariableKey, Variables};

/// Validated, immutable rule set together with the variables it references.
///
/// Construction fails fast on any dangling variable or term, non-positive weight, or role
/// misuse, so a `RuleBase` that exists is always safe to simulate against. It owns all of
/// its data and can be shared by reference across threads.
pub struct RuleBase {
    variables: Variables,
    rules: Vec<Rule>,
    antecedents: Vec<VariableKey>,
    consequents: Vec<VariableKey>,
}

impl RuleBase {
    pub fn new(variables: Variables, rules: Rules) -> Result<Self> {
        let mut antecedents = Vec::new();

        for (i, rule) in rules.0.iter().enumerate() {
            if !(rule.weight > 0. && rule.weight <= 1.) {
                return Err(FuzzyError::InvalidWeight { rule: i, weight: rule.weight });
            }
            if rule.consequence.is_empty() {
                return Err(FuzzyError::EmptyConsequence(i));
            }

            for (var_key, term) in rule.premise.propositions() {
                let var = variables.expect_role(var_key, Role::Antecedent)?;

                if var.term(term).is_none() {
                    return Err(FuzzyError::UnknownTerm {
                        variable: var.name().to_owned(),
                        term: term.to_owned(),
                    });
                }
                if !antecedents.contains(&var_key) {
                    antecedents.push(var_key);
                }
            }

            for consequence in &rule.consequence {
                let var = variables.expect_role(consequence.variable, Role::Consequent)?;

                if var.term(&consequence.term).is_none() {
                    return Err(FuzzyError::UnknownTerm {
                        variable: var.name().to_owned(),
                        term: consequence.term.clone(),
                    });
                }
            }
        }

        let consequents: Vec<_> = variables.consequents().collect();

        debug!(
            rules = rules.0.len(),
            antecedents = antecedents.len(),
            consequents = consequents.len(),
            "Rule base validated"
        );

        Ok(Self {
            variables,
            rules: rules.0,
            antecedents,
            consequents,
        })
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Antecedents referenced by at least one rule, in order of first reference.
    pub fn antecedents(&self) -> &[VariableKey] {
        &self.antecedents
    }

    /// Every registered consequent, in registration order.
    pub fn consequents(&self) -> &[VariableKey] {
        &self.consequents
    }

    /// Consequents named by at least one rule clause.
    pub fn referenced_consequents(&self) -> impl Iterator<Item = VariableKey> + '_ {
        self.consequents.iter().copied().filter(|key| {
            self.rules
                .iter()
                .any(|rule| rule.consequence.iter().any(|c| c.variable == *key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::Consequence;
    use crate::universe::Universe;
    use crate::variable::{Antecedent, Consequent, LinguisticVariable, Variable};

    fn setup() -> (Variables, Variable<Antecedent>, Variable<Consequent>) {
        let universe = Universe::from_range(0. ..=10., Some(1.)).unwrap();
        let mut vars = Variables::new();
        let temp = vars
            .add_antecedent(
                LinguisticVariable::new("temperature", universe.clone())
                    .automf(&["cold", "mild", "hot"])
                    .unwrap(),
            )
            .unwrap();
        let fan = vars
            .add_consequent(
                LinguisticVariable::new("fan", universe)
                    .with_trimf("slow", [0., 0., 5.])
                    .unwrap()
                    .with_trimf("fast", [5., 10., 10.])
                    .unwrap(),
            )
            .unwrap();

        (vars, temp, fan)
    }

    #[test]
    fn test_valid_rule_base() {
        let (vars, temp, fan) = setup();
        let mut rules = Rules::new();

        rules.add(temp.is("hot"), [fan.is("fast")]);
        rules.add_weighted(temp.is("cold").or(temp.is("mild")), [fan.is("slow")], 0.5);

        let rule_base = RuleBase::new(vars, rules).unwrap();

        assert_eq!(rule_base.rules().len(), 2);
        assert_eq!(rule_base.rules()[1].weight(), 0.5);
        assert_eq!(rule_base.antecedents(), &[temp.key()]);
        assert_eq!(rule_base.consequents(), &[fan.key()]);
        assert_eq!(rule_base.referenced_consequents().count(), 1);
    }

    #[test]
    fn test_unknown_term_fails_fast() {
        let (vars, temp, fan) = setup();
        let mut rules = Rules::new();

        rules.add(temp.is("scorching"), [fan.is("fast")]);

        assert_eq!(
            RuleBase::new(vars, rules).err(),
            Some(FuzzyError::UnknownTerm {
                variable: "temperature".into(),
                term: "scorching".into()
            })
        );

        let (vars, temp, fan) = setup();
        let mut rules = Rules::new();

        rules.add(temp.is("hot"), [fan.is("turbo")]);

        assert!(matches!(RuleBase::new(vars, rules), Err(FuzzyError::UnknownTerm { .. })));
    }

    #[test]
    fn test_foreign_variable_fails_fast() {
        let (_, foreign, _) = setup();
        let (vars, _, fan) = setup();
        let mut other = Variables::new();
        let stray = other
            .add_antecedent(LinguisticVariable::new(
                "stray",
                Universe::linspace(0., 1., 3).unwrap(),
            ))
            .unwrap();
        let mut rules = Rules::new();

        // Keys from a different registry do not resolve (or resolve to the wrong slot)
        rules.add(stray.is("x").and(foreign.is("hot")), [fan.is("fast")]);

        assert!(matches!(
            RuleBase::new(vars, rules),
            Err(FuzzyError::UnknownVariable(_) | FuzzyError::RoleMismatch { .. } | FuzzyError::UnknownTerm { .. })
        ));
    }

    #[test]
    fn test_invalid_weights() {
        for weight in [0., -0.5, 1.5, f64::NAN] {
            let (vars, temp, fan) = setup();
            let mut rules = Rules::new();

            rules.add(temp.is("hot"), [fan.is("fast")]);
            rules.add_weighted(temp.is("cold"), [fan.is("slow")], weight);

            assert!(matches!(
                RuleBase::new(vars, rules),
                Err(FuzzyError::InvalidWeight { rule: 1, .. })
            ));
        }
    }

    #[test]
    fn test_empty_consequence() {
        let (vars, temp, _) = setup();
        let mut rules = Rules::new();

        rules.add(temp.is("hot"), Vec::<Consequence>::new());

        assert_eq!(RuleBase::new(vars, rules).err(), Some(FuzzyError::EmptyConsequence(0)));
    }

    #[test]
    fn test_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<RuleBase>();
    }
}
