use crate::error::{FuzzyError, Result};
use crate::inference::MamdaniInference;
use crate::inputs::Inputs;
use crate::outputs::{Curve, Outputs};
use crate::rule_base::RuleBase;
use crate::variable::{Antecedent, Consequent, Fuzzified, Role, Variable, VariableKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    /// Some antecedent referenced by the rules has no input yet.
    Created,
    /// Every referenced antecedent is bound; outputs are stale or absent.
    InputsSet,
    /// Outputs reflect the current inputs.
    Computed,
}

/// One evaluation session over a shared [`RuleBase`].
///
/// Holds the crisp inputs and, after a successful [`compute`](Self::compute), the outputs for
/// exactly those inputs. Changing any input discards the outputs.
pub struct Simulation<'r> {
    rule_base: &'r RuleBase,
    engine: MamdaniInference,
    inputs: Inputs,
    outputs: Option<Outputs>,
}

impl<'r> Simulation<'r> {
    pub fn new(rule_base: &'r RuleBase) -> Self {
        Self {
            rule_base,
            engine: MamdaniInference::new(),
            inputs: Inputs::new(),
            outputs: None,
        }
    }

    pub fn rule_base(&self) -> &'r RuleBase {
        self.rule_base
    }

    pub fn state(&self) -> SimulationState {
        if self.outputs.is_some() {
            SimulationState::Computed
        } else if self.rule_base.antecedents().iter().all(|key| self.inputs.0.contains_key(*key)) {
            SimulationState::InputsSet
        } else {
            SimulationState::Created
        }
    }

    /// Binds a crisp value to the antecedent called `name`.
    ///
    /// Values outside the universe are accepted and clamped at compute time; see
    /// [`clamped_inputs`](Self::clamped_inputs).
    pub fn set_input(&mut self, name: &str, value: f64) -> Result<()> {
        let key = self.rule_base.variables().key(name)?;

        self.bind(key, value)
    }

    pub fn set(&mut self, var: Variable<Antecedent>, value: f64) -> Result<()> {
        self.bind(var.0, value)
    }

    fn bind(&mut self, key: VariableKey, value: f64) -> Result<()> {
        let var = self.rule_base.variables().expect_role(key, Role::Antecedent)?;

        if !value.is_finite() {
            return Err(FuzzyError::NonFiniteInput {
                variable: var.name().to_owned(),
                value,
            });
        }

        self.inputs.insert(key, value);
        self.outputs = None;

        Ok(())
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Bound inputs that fall outside their variable's universe, as `(variable, value)`.
    pub fn clamped_inputs(&self) -> impl Iterator<Item = (&'r str, f64)> + '_ {
        let vars = self.rule_base.variables();

        self.inputs.0.iter().filter_map(move |(key, &value)| {
            let var = vars.get(key)?;

            (!var.universe().contains(value)).then_some((var.name(), value))
        })
    }

    /// Runs inference on the current inputs. On error the session is left as it was.
    pub fn compute(&mut self) -> Result<()> {
        let outputs = self.engine.eval(self.rule_base, &self.inputs)?;

        self.outputs = Some(outputs);

        Ok(())
    }

    /// Full outputs of the last successful compute, if still current.
    pub fn outputs(&self) -> Option<&Outputs> {
        self.outputs.as_ref()
    }

    fn ready(&self, name: &str) -> Result<&Outputs> {
        self.outputs
            .as_ref()
            .ok_or_else(|| FuzzyError::OutputNotReady(name.to_owned()))
    }

    fn consequent_key(&self, name: &str) -> Result<VariableKey> {
        let key = self.rule_base.variables().key(name)?;

        self.rule_base.variables().expect_role(key, Role::Consequent)?;

        Ok(key)
    }

    /// Crisp value of the consequent called `name`.
    pub fn get_output(&self, name: &str) -> Result<f64> {
        let key = self.consequent_key(name)?;

        self.ready(name)?
            .consequent(key)
            .map(|out| out.crisp())
            .ok_or_else(|| FuzzyError::OutputNotReady(name.to_owned()))
    }

    pub fn output(&self, var: Variable<Consequent>) -> Result<f64> {
        let name = self.rule_base.variables().expect_role(var.0, Role::Consequent)?.name();

        self.get_output(name)
    }

    /// Per-term degrees of the antecedent called `name`, as used by the last compute.
    pub fn get_fuzzified(&self, name: &str) -> Result<&Fuzzified> {
        let vars = self.rule_base.variables();
        let key = vars.key(name)?;

        vars.expect_role(key, Role::Antecedent)?;

        self.ready(name)?
            .fuzzified(key)
            .ok_or_else(|| FuzzyError::UnboundVariable(name.to_owned()))
    }

    /// Aggregated output curve (max over every term) of the consequent called `name`.
    pub fn get_aggregated_curve(&self, name: &str) -> Result<&Curve> {
        let key = self.consequent_key(name)?;

        self.ready(name)?
            .consequent(key)
            .map(|out| out.curve())
            .ok_or_else(|| FuzzyError::OutputNotReady(name.to_owned()))
    }

    /// Aggregated curve of a single term of the consequent called `name`.
    pub fn get_term_curve(&self, name: &str, term: &str) -> Result<&Curve> {
        let key = self.consequent_key(name)?;
        let out = self
            .ready(name)?
            .consequent(key)
            .ok_or_else(|| FuzzyError::OutputNotReady(name.to_owned()))?;

        out.term_curve(term).ok_or_else(|| FuzzyError::UnknownTerm {
            variable: name.to_owned(),
            term: term.to_owned(),
        })
    }

    /// Per-rule firing strengths of the last compute, in rule order.
    pub fn firing_strengths(&self) -> Option<&[f64]> {
        self.outputs.as_ref().map(Outputs::firing_strengths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rules;
    use crate::universe::Universe;
    use crate::variable::{LinguisticVariable, Variables};

    fn tipping() -> RuleBase {
        let ten = Universe::from_range(0. ..=10., Some(1.)).unwrap();
        let mut vars = Variables::new();
        let service = vars
            .add_antecedent(
                LinguisticVariable::new("service", ten.clone())
                    .automf(&["poor", "average", "good"])
                    .unwrap(),
            )
            .unwrap();
        let food = vars
            .add_antecedent(
                LinguisticVariable::new("food", ten)
                    .automf(&["poor", "average", "good"])
                    .unwrap(),
            )
            .unwrap();
        let tip = vars
            .add_consequent(
                LinguisticVariable::new("tip", Universe::from_range(0. ..=25., Some(1.)).unwrap())
                    .with_trimf("low", [0., 0., 13.])
                    .unwrap()
                    .with_trimf("medium", [0., 13., 25.])
                    .unwrap()
                    .with_trimf("high", [13., 25., 25.])
                    .unwrap(),
            )
            .unwrap();
        let mut rules = Rules::new();

        rules.add(food.is("poor").or(service.is("poor")), [tip.is("low")]);
        rules.add(service.is("average"), [tip.is("medium")]);
        rules.add(service.is("good").or(food.is("good")), [tip.is("high")]);
        rules.add(food.is("poor").not().and(service.is("poor").not()), [tip.is("medium")]);

        RuleBase::new(vars, rules).unwrap()
    }

    #[test]
    fn test_state_machine() {
        let rule_base = tipping();
        let mut sim = Simulation::new(&rule_base);

        assert_eq!(sim.state(), SimulationState::Created);
        assert_eq!(sim.get_output("tip"), Err(FuzzyError::OutputNotReady("tip".into())));

        sim.set_input("service", 9.8).unwrap();
        assert_eq!(sim.state(), SimulationState::Created);
        assert_eq!(sim.compute(), Err(FuzzyError::UnboundVariable("food".into())));
        assert_eq!(sim.state(), SimulationState::Created);

        sim.set_input("food", 6.5).unwrap();
        assert_eq!(sim.state(), SimulationState::InputsSet);

        sim.compute().unwrap();
        assert_eq!(sim.state(), SimulationState::Computed);

        let tip = sim.get_output("tip").unwrap();
        assert!(tip > 13. && tip < 25., "{tip}");

        sim.set_input("food", 2.).unwrap();
        assert_eq!(sim.state(), SimulationState::InputsSet);
        assert_eq!(sim.get_output("tip"), Err(FuzzyError::OutputNotReady("tip".into())));
        assert!(sim.firing_strengths().is_none());

        sim.compute().unwrap();
        assert!(sim.get_output("tip").unwrap() < tip);
    }

    #[test]
    fn test_lookup_errors() {
        let rule_base = tipping();
        let mut sim = Simulation::new(&rule_base);

        assert_eq!(sim.set_input("ambience", 3.), Err(FuzzyError::UnknownVariable("ambience".into())));
        assert_eq!(
            sim.set_input("tip", 3.),
            Err(FuzzyError::RoleMismatch {
                variable: "tip".into(),
                expected: Role::Antecedent
            })
        );
        assert!(matches!(
            sim.set_input("food", f64::NAN),
            Err(FuzzyError::NonFiniteInput { .. })
        ));

        sim.set_input("service", 3.).unwrap();
        sim.set_input("food", 3.).unwrap();
        sim.compute().unwrap();

        assert!(matches!(sim.get_output("service"), Err(FuzzyError::RoleMismatch { .. })));
        assert!(matches!(sim.get_fuzzified("tip"), Err(FuzzyError::RoleMismatch { .. })));
        assert!(matches!(
            sim.get_term_curve("tip", "enormous"),
            Err(FuzzyError::UnknownTerm { .. })
        ));
    }

    #[test]
    fn test_introspection() {
        let rule_base = tipping();
        let mut sim = Simulation::new(&rule_base);

        sim.set_input("service", 5.).unwrap();
        sim.set_input("food", 0.).unwrap();
        sim.compute().unwrap();

        let service = sim.get_fuzzified("service").unwrap();

        assert_eq!(service.degree("average"), Some(1.));
        assert_eq!(service.degree("poor"), Some(0.));

        // rules: low 1.0, medium 1.0, high 0.0, medium (not poor food) 0.0
        assert_eq!(sim.firing_strengths().unwrap(), &[1., 1., 0., 0.]);

        let curve = sim.get_aggregated_curve("tip").unwrap();

        assert_eq!(curve.points().count(), 26);
        assert_eq!(curve.height(), 1.);
        assert_eq!(sim.get_term_curve("tip", "high").unwrap().height(), 0.);
        assert_eq!(curve.centroid(), Some(sim.get_output("tip").unwrap()));
    }

    #[test]
    fn test_clamped_inputs_are_reported() {
        let rule_base = tipping();
        let mut sim = Simulation::new(&rule_base);

        sim.set_input("service", 14.).unwrap();
        sim.set_input("food", -1.).unwrap();

        let mut clamped: Vec<_> = sim.clamped_inputs().collect();
        clamped.sort_by(|a, b| a.0.cmp(b.0));

        assert_eq!(clamped, vec![("food", -1.), ("service", 14.)]);

        sim.compute().unwrap();

        let service = sim.get_fuzzified("service").unwrap();

        assert!(service.was_clamped());
        assert_eq!(service.value(), 10.);
        assert_eq!(service.degree("good"), Some(1.));
    }

    #[test]
    fn test_typed_handles() {
        let rule_base = tipping();
        let service = rule_base.variables().antecedent("service").unwrap();
        let food = rule_base.variables().antecedent("food").unwrap();
        let tip = rule_base.variables().consequent("tip").unwrap();
        let mut sim = Simulation::new(&rule_base);

        sim.set(service, 7.).unwrap();
        sim.set(food, 7.).unwrap();
        sim.compute().unwrap();

        assert_eq!(sim.output(tip), sim.get_output("tip"));
        assert_eq!(sim.inputs().get(food), Some(7.));
    }
}
