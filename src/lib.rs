//! Mamdani fuzzy inference.
//!
//! Crisp inputs are fuzzified against triangular terms, rules combine term degrees with
//! min/max/complement, each firing rule clips its consequent terms at its firing strength,
//! clipped shapes are merged by pointwise max, and the merged curve is reduced to a crisp
//! output by its centroid.
//!
//! ```
//! use fuzzy_mamdani::{LinguisticVariable, RuleBase, Rules, Simulation, Universe, Variables};
//!
//! # fn main() -> fuzzy_mamdani::Result<()> {
//! let mut vars = Variables::new();
//! let temp = vars.add_antecedent(
//!     LinguisticVariable::new("temperature", Universe::from_range(0. ..=40., Some(1.))?)
//!         .automf(&["cold", "mild", "hot"])?,
//! )?;
//! let fan = vars.add_consequent(
//!     LinguisticVariable::new("fan", Universe::from_range(0. ..=100., Some(1.))?)
//!         .with_trimf("slow", [0., 0., 50.])?
//!         .with_trimf("fast", [50., 100., 100.])?,
//! )?;
//!
//! let mut rules = Rules::new();
//! rules.add(temp.is("cold").or(temp.is("mild")), [fan.is("slow")]);
//! rules.add(temp.is("hot"), [fan.is("fast")]);
//!
//! let rule_base = RuleBase::new(vars, rules)?;
//! let mut sim = Simulation::new(&rule_base);
//!
//! sim.set_input("temperature", 35.)?;
//! sim.compute()?;
//!
//! assert!(sim.get_output("fan")? > 50.);
//! # Ok(())
//! # }
//! ```

mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
pub mod ops;
mod outputs;
mod rule_base;
mod rules;
mod simulation;
mod universe;
mod variable;

pub use dsl::{Consequence, Expr};
pub use error::{FuzzyError, Result};
pub use inference::MamdaniInference;
pub use inputs::Inputs;
pub use membership::{AutoNames, Triangular};
pub use outputs::{ConsequentOutput, Curve, Outputs};
pub use rule_base::RuleBase;
pub use rules::{Rule, Rules};
pub use simulation::{Simulation, SimulationState};
pub use universe::{Universe, DEFAULT_STEP};
pub use variable::{
    Antecedent, Consequent, Fuzzified, LinguisticVariable, Role, Term, Variable, VariableKey, VariableRole, Variables,
};
