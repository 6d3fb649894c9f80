use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops::{clip, union};
use crate::outputs::{ConsequentOutput, Curve, Outputs};
use crate::rule_base::RuleBase;
use crate::variable::Role;

/// Mamdani inference: min-AND, max-OR, min-implication, max-aggregation, centroid.
#[derive(Clone, Copy, Debug, Default)]
pub struct MamdaniInference;

impl MamdaniInference {
    pub fn new() -> Self {
        Self
    }

    /// Runs one full pass. Pure: neither the rule base nor the inputs are modified, and on
    /// error nothing is produced.
    pub fn eval(&self, rule_base: &RuleBase, inputs: &Inputs) -> Result<Outputs> {
        let vars = rule_base.variables();

        for key in rule_base.antecedents() {
            if !inputs.0.contains_key(*key) {
                let name = vars.get(*key).map_or("?", |v| v.name());

                return Err(FuzzyError::UnboundVariable(name.to_owned()));
            }
        }

        // Fuzzificate Facts
        let mut fact_values = SecondaryMap::with_capacity(inputs.0.len());

        for (key, input_value) in &inputs.0 {
            let var = vars.expect_role(key, Role::Antecedent)?;

            if !input_value.is_finite() {
                return Err(FuzzyError::NonFiniteInput {
                    variable: var.name().to_owned(),
                    value: *input_value,
                });
            }

            fact_values.insert(key, var.fuzzify(*input_value));
        }

        // Compute Rule Firing Strengths
        let mut firing_strengths = Vec::with_capacity(rule_base.rules().len());

        for (i, rule) in rule_base.rules().iter().enumerate() {
            let strength = rule.weight * rule.premise.eval(vars, &fact_values)?;

            debug!(rule = i, strength, "Rule evaluated");
            firing_strengths.push(strength);
        }

        // Implication and Aggregation, per consequent
        let mut consequents = SecondaryMap::with_capacity(rule_base.consequents().len());

        for &var_key in rule_base.consequents() {
            let var = vars.expect_role(var_key, Role::Consequent)?;
            let universe = var.universe();
            let mut terms = Vec::with_capacity(var.terms().len());

            for term in var.terms() {
                let mut aggregated = vec![0.; universe.len()];
                let mut membership = None;

                for (rule, &strength) in rule_base.rules().iter().zip(&firing_strengths) {
                    // A zero-strength rule clips to an all-zero shape, which max ignores
                    if strength <= 0. || !rule.consequence.iter().any(|c| c.variable == var_key && c.term == term.name) {
                        continue;
                    }

                    let sampled = membership.get_or_insert_with(|| term.shape.sample(universe));

                    aggregated = union(aggregated, clip(sampled.iter().copied(), strength)).collect();
                }

                terms.push((term.name.clone(), Curve::new(universe.clone(), aggregated)));
            }

            let combined = terms.iter().fold(vec![0.; universe.len()], |acc, (_, curve)| {
                union(acc, curve.degrees().iter().copied()).collect()
            });
            let curve = Curve::new(universe.clone(), combined);

            // Defuzzificate
            let Some(crisp) = curve.centroid() else {
                return Err(FuzzyError::NoRuleFired(var.name().to_owned()));
            };

            trace!(variable = %var.name(), crisp, height = curve.height(), "Consequent defuzzified");

            consequents.insert(var_key, ConsequentOutput { crisp, curve, terms });
        }

        Ok(Outputs {
            fuzzified: fact_values,
            firing_strengths,
            consequents,
        })
    }
}
