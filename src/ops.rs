//! Zadeh operators, Mamdani implication/aggregation and centroid defuzzification.

use std::iter::Sum;

use num::Float;

/// Fuzzy conjunction (min).
pub fn zadeh_and<F: Float>(u: F, v: F) -> F {
    F::min(u, v)
}

/// Fuzzy disjunction (max).
pub fn zadeh_or<F: Float>(u: F, v: F) -> F {
    F::max(u, v)
}

/// Fuzzy complement.
pub fn zadeh_not<F: Float>(u: F) -> F {
    F::one() - u
}

/// Min-implication: caps every degree of `membership` at `strength`.
pub fn clip<F: Float>(membership: impl IntoIterator<Item = F>, strength: F) -> impl Iterator<Item = F> {
    membership.into_iter().map(move |m| F::min(m, strength))
}

/// Max-aggregation of two curves sampled over the same universe.
pub fn union<F: Float>(u: impl IntoIterator<Item = F>, v: impl IntoIterator<Item = F>) -> impl Iterator<Item = F> {
    u.into_iter().zip(v).map(|(u, v)| F::max(u, v))
}

/// Center of gravity `Σ x·μ(x) / Σ μ(x)` over the samples.
///
/// Returns `None` when the curve carries no mass or its mass is not finite.
pub fn centroid<F: Float + Sum>(universe: &[F], membership: &[F]) -> Option<F> {
    debug_assert_eq!(universe.len(), membership.len());

    let den = membership.iter().copied().sum::<F>();

    if !den.is_finite() || den <= F::zero() {
        return None;
    }

    let num = universe
        .iter()
        .copied()
        .zip(membership.iter().copied())
        .map(|(x, m)| x * m)
        .sum::<F>();
    let center = num / den;

    center.is_finite().then_some(center)
}
