//! Errors reported by ring construction and by the engines.
use thiserror::Error;

/// A coefficient domain or polynomial ring could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDomainError {
    #[error("{0} is not a prime, so Z/{0} is not a field")]
    NotPrime(u64),
    #[error("variable `{0}` occurs more than once")]
    DuplicateVariable(String),
    #[error("a polynomial ring needs at least one variable")]
    NoVariables,
    #[error("a rational function field needs at least one parameter")]
    NoParameters,
}

/// The radical decomposition could not be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecompositionError {
    #[error("generator {index} is defined over other variables than the ring of the ideal")]
    ForeignGenerator { index: usize },
    #[error("generator {index} is defined over another coefficient field than the ring of the ideal")]
    ForeignField { index: usize },
}

/// Complex or real root isolation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsolationError {
    #[error("the zero polynomial has infinitely many roots")]
    ZeroPolynomial,
    #[error("the precision must be a positive rational number")]
    NonPositivePrecision,
    #[error("root isolation requires a univariate polynomial")]
    NotUnivariate,
    #[error("no split point with a root-free boundary found after {0} perturbations")]
    PerturbationLimit(usize),
    #[error("refinement did not reach the requested precision within {0} subdivisions")]
    RefinementLimit(usize),
}
