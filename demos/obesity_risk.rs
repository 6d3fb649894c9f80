//! Reads daily calories, weekly activity days and session length from stdin, then prints the
//! estimated obesity risk (0-100) and BMI with the fuzzified degrees behind them.
//!
//! `RUST_LOG=fuzzy_mamdani=debug cargo run --example obesity_risk` shows per-rule strengths.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use fuzzy_mamdani::{LinguisticVariable, RuleBase, Rules, Simulation, Universe, Variables};
use tracing_subscriber::EnvFilter;

fn build_rule_base() -> fuzzy_mamdani::Result<RuleBase> {
    let mut vars = Variables::new();
    let calories = vars.add_antecedent(
        LinguisticVariable::new("calories", Universe::from_range(0. ..=4000., Some(1.))?)
            .automf(&["low", "moderate", "high"])?,
    )?;
    let activity = vars.add_antecedent(
        LinguisticVariable::new("activity_days", Universe::from_range(0. ..=7., Some(1.))?)
            .automf(&["none", "little", "moderate", "high"])?,
    )?;
    let session = vars.add_antecedent(
        LinguisticVariable::new("session_minutes", Universe::from_range(0. ..=180., Some(1.))?)
            .automf(&["short", "medium", "long"])?,
    )?;
    let risk = vars.add_consequent(
        LinguisticVariable::new("risk", Universe::from_range(0. ..=100., Some(1.))?)
            .with_trimf("low", [0., 25., 50.])?
            .with_trimf("medium", [25., 50., 75.])?
            .with_trimf("high", [50., 75., 100.])?,
    )?;
    let bmi = vars.add_consequent(
        LinguisticVariable::new("bmi_estimate", Universe::from_range(15. ..=40., Some(1.))?)
            .with_trimf("normal", [18.5, 22.5, 25.])?
            .with_trimf("overweight", [25., 27.5, 30.])?
            .with_trimf("obese_I", [30., 32.5, 35.])?
            .with_trimf("obese_II", [35., 37.5, 40.])?,
    )?;

    let rule = |c: &str, a: &str, s: &str| calories.is(c).and(activity.is(a)).and(session.is(s));
    let mut rules = Rules::with_capacity(10);

    rules.add(rule("high", "none", "short"), [risk.is("high"), bmi.is("obese_II")]);
    rules.add(rule("low", "high", "long"), [risk.is("low"), bmi.is("normal")]);
    rules.add(rule("moderate", "moderate", "medium"), [risk.is("medium"), bmi.is("overweight")]);
    rules.add(rule("high", "moderate", "medium"), [risk.is("high"), bmi.is("obese_I")]);
    rules.add(rule("high", "high", "short"), [risk.is("medium"), bmi.is("overweight")]);
    rules.add(rule("moderate", "none", "short"), [risk.is("high"), bmi.is("obese_I")]);
    rules.add(rule("low", "little", "medium"), [risk.is("low"), bmi.is("normal")]);
    rules.add(rule("moderate", "high", "long"), [risk.is("low"), bmi.is("normal")]);
    rules.add(rule("low", "moderate", "medium"), [risk.is("low"), bmi.is("normal")]);
    rules.add(rule("moderate", "little", "short"), [risk.is("medium"), bmi.is("overweight")]);

    RuleBase::new(vars, rules)
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, label: &str) -> anyhow::Result<i64> {
    print!("{label}: ");
    io::stdout().flush()?;

    let Some(line) = lines.next() else {
        bail!("unexpected end of input while reading {label}");
    };
    let line = line?;

    line.trim()
        .parse()
        .with_context(|| format!("`{}` is not a whole number", line.trim()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let rule_base = build_rule_base().context("building the rule base")?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let calories = prompt(&mut lines, "Daily calories")?;
    let days = prompt(&mut lines, "Days of physical activity per week")?;
    let minutes = prompt(&mut lines, "Minutes of activity per session")?;

    let mut sim = Simulation::new(&rule_base);

    sim.set_input("calories", calories as f64)?;
    sim.set_input("activity_days", days as f64)?;
    sim.set_input("session_minutes", minutes as f64)?;

    for (variable, value) in sim.clamped_inputs() {
        eprintln!("note: {variable} = {value} is outside the modelled range and was clamped");
    }

    sim.compute().context("no rule covers this combination of inputs")?;

    println!();
    println!("Daily calories: {calories}");
    println!("Days of physical activity per week: {days}");
    println!("Minutes per session: {minutes}");
    println!("Obesity risk: {:5.2}", sim.get_output("risk")?);
    println!("Estimated BMI: {:5.2}", sim.get_output("bmi_estimate")?);

    println!();
    for name in ["calories", "activity_days", "session_minutes"] {
        let degrees = sim
            .get_fuzzified(name)?
            .iter()
            .map(|(term, degree)| format!("{term}={degree:.2}"))
            .collect::<Vec<_>>()
            .join(" ");

        println!("{name:>16}: {degrees}");
    }

    Ok(())
}
