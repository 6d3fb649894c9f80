use crate::variable::Role;

/// Errors raised while building variables and rule bases, or while running a simulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FuzzyError {
    /// Triangle control points are not ordered `a <= b <= c` (or are not finite).
    #[error("invalid triangular shape [{a}, {b}, {c}]: expected a <= b <= c")]
    InvalidShape { a: f64, b: f64, c: f64 },

    /// Empty, too short, non-finite or non-increasing universe.
    #[error("invalid universe: {0}")]
    InvalidUniverse(String),

    /// A term's control points fall outside its variable's universe.
    #[error("term `{term}` of `{variable}` lies outside the universe [{min}, {max}]")]
    TermOutOfUniverse {
        variable: String,
        term: String,
        min: f64,
        max: f64,
    },

    #[error("term `{term}` is already defined on `{variable}`")]
    DuplicateTerm { variable: String, term: String },

    #[error("variable `{0}` is already defined")]
    DuplicateVariable(String),

    /// automf needs at least three terms (or a supported default name count).
    #[error("cannot generate {n} automatic terms for `{variable}`")]
    InvalidAutomf { variable: String, n: usize },

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("unknown term `{term}` on `{variable}`")]
    UnknownTerm { variable: String, term: String },

    #[error("variable `{variable}` is not an {expected}")]
    RoleMismatch { variable: String, expected: Role },

    #[error("rule {rule} has weight {weight}, expected a value in (0, 1]")]
    InvalidWeight { rule: usize, weight: f64 },

    #[error("rule {0} has no consequent clauses")]
    EmptyConsequence(usize),

    #[error("input {value} for `{variable}` is not a finite number")]
    NonFiniteInput { variable: String, value: f64 },

    /// An antecedent referenced by the rule base has no crisp input.
    #[error("no input bound for antecedent `{0}`")]
    UnboundVariable(String),

    #[error("output `{0}` is not available before compute()")]
    OutputNotReady(String),

    /// Every rule touching this consequent fired at zero, so the centroid is undefined.
    #[error("no rule fired for consequent `{0}`")]
    NoRuleFired(String),
}

pub type Result<T> = std::result::Result<T, FuzzyError>;
