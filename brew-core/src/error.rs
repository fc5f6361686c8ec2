//! # Error Types
//!
//! Failures are rare in this crate: the conversions are total functions of
//! their inputs. Only two things can go wrong:
//! - the secant root finder fails to converge (inverting a fit)
//! - a caller-supplied polynomial or calibration is malformed

use thiserror::Error;

/// Reasons the secant root finder gave up.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RootFindError {
    /// The two most recent guesses evaluate to (nearly) the same value,
    /// so the secant through them has no usable slope.
    #[error("secant slope vanished between x = {x_prev} and x = {x}")]
    FlatSecant { x_prev: f64, x: f64 },

    /// An iterate or its function value overflowed or became NaN.
    #[error("root finder diverged to a non-finite value after {iterations} iterations")]
    NonFinite { iterations: u32 },

    /// The iteration bound was reached before the residual dropped below precision.
    #[error("no root found after {iterations} iterations (last guess {last_guess})")]
    NoConvergence { iterations: u32, last_guess: f64 },
}

/// Problems constructing a [`crate::Polynomial`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolynomialError {
    #[error("polynomial has no coefficients")]
    Empty,

    #[error("order {order} polynomial needs {expected} coefficients, got {got}")]
    LengthMismatch {
        order: usize,
        expected: usize,
        got: usize,
    },

    #[error("coefficient {index} is not finite ({value})")]
    NonFiniteCoefficient { index: usize, value: f64 },
}

/// Problems loading a [`crate::Calibration`].
#[derive(Error, Debug)]
pub enum CalibrationError {
    /// Malformed JSON, or a polynomial that failed validation while parsing.
    #[error("invalid calibration document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{name} must be a positive finite number, got {value}")]
    InvalidConstant { name: &'static str, value: f64 },
}

/// Root error type for everything `brew-core` can report.
#[derive(Error, Debug)]
pub enum BrewError {
    #[error(transparent)]
    RootFind(#[from] RootFindError),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

pub type BrewResult<T> = Result<T, BrewError>;
