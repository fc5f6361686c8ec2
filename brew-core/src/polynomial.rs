//! # Polynomial Kernel
//!
//! Small numeric building blocks that every brewing fit is evaluated with:
//! integer powers, Horner evaluation of an order-N polynomial, and a bounded
//! secant-method root finder used to invert the fits.
//!
//! Coefficients are always stored lowest degree first, so `[a, b, c]`
//! is `a + b*x + c*x^2`.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{PolynomialError, RootFindError};

/// Residual below which a root-finder guess is accepted.
pub const ROOT_PRECISION: f64 = 1e-7;

/// Upper bound on secant iterations before reporting non-convergence.
pub const MAX_ROOT_ITERATIONS: u32 = 100;

/// Raises `base` to a non-negative integer power by repeated multiplication.
///
/// `int_pow(b, 0)` is `1.0` for every `b`, including `0.0`.
pub fn int_pow(base: f64, n: u32) -> f64 {
    (0..n).fold(1.0, |acc, _| acc * base)
}

/// Evaluates `Σ poly[i] * x^i` for `i` in `0..=order`.
///
/// # Arguments
/// * `poly` - Coefficients, lowest degree first
/// * `order` - Degree of the polynomial
/// * `x` - Point to evaluate at
///
/// # Panics
/// * If `poly` holds fewer than `order + 1` coefficients
pub fn poly_eval(poly: &[f64], order: usize, x: f64) -> f64 {
    poly[..=order]
        .iter()
        .rev()
        .fold(0.0, |acc, &coefficient| acc * x + coefficient)
}

/// Finds `x` such that `poly_eval(poly, order, x)` is within [`ROOT_PRECISION`]
/// of zero, using the secant method seeded with `x0` and `x1`.
///
/// This is a local method: a root outside the basin of attraction of the two
/// seeds will not be found.
///
/// # Returns
/// * `Ok(root)` - The first iterate whose residual is below precision
/// * `Err(RootFindError)` - Flat secant, divergence, or iteration bound hit
///
/// # Panics
/// * If `poly` holds fewer than `order + 1` coefficients
pub fn root_find(poly: &[f64], order: usize, x0: f64, x1: f64) -> Result<f64, RootFindError> {
    let f = |x: f64| poly_eval(poly, order, x);

    let (mut x_prev, mut x) = (x0, x1);
    let (mut f_prev, mut fx) = (f(x_prev), f(x));

    if fx.abs() < ROOT_PRECISION {
        return Ok(x);
    }
    if f_prev.abs() < ROOT_PRECISION {
        return Ok(x_prev);
    }

    for iteration in 1..=MAX_ROOT_ITERATIONS {
        if !(x.is_finite() && fx.is_finite() && f_prev.is_finite()) {
            debug!(iteration, x, "root finder diverged");
            return Err(RootFindError::NonFinite { iterations: iteration - 1 });
        }

        let denominator = fx - f_prev;
        if denominator.abs() <= f64::EPSILON * fx.abs().max(f_prev.abs()) {
            debug!(iteration, x_prev, x, "secant slope vanished");
            return Err(RootFindError::FlatSecant { x_prev, x });
        }

        let next = x - fx * (x - x_prev) / denominator;
        let f_next = f(next);
        trace!(iteration, next, residual = f_next, "secant step");

        if !(next.is_finite() && f_next.is_finite()) {
            debug!(iteration, "root finder diverged");
            return Err(RootFindError::NonFinite { iterations: iteration });
        }
        if f_next.abs() < ROOT_PRECISION {
            return Ok(next);
        }

        x_prev = x;
        f_prev = fx;
        x = next;
        fx = f_next;
    }

    debug!(last_guess = x, "root finder hit iteration bound");
    Err(RootFindError::NoConvergence {
        iterations: MAX_ROOT_ITERATIONS,
        last_guess: x,
    })
}

/// An immutable polynomial: coefficients lowest degree first, plus its order.
///
/// Always holds exactly `order + 1` finite coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolynomialRepr", into = "PolynomialRepr")]
pub struct Polynomial {
    coefficients: Vec<f64>,
    order: usize,
}

/// On-disk shape of a polynomial. `order` may be omitted and is then
/// inferred from the coefficient count.
#[derive(Serialize, Deserialize)]
struct PolynomialRepr {
    coefficients: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<usize>,
}

impl Polynomial {
    /// Creates a polynomial of the given order, checking that exactly
    /// `order + 1` finite coefficients were supplied.
    pub fn new(coefficients: Vec<f64>, order: usize) -> Result<Self, PolynomialError> {
        if coefficients.is_empty() {
            return Err(PolynomialError::Empty);
        }
        if coefficients.len() != order + 1 {
            return Err(PolynomialError::LengthMismatch {
                order,
                expected: order + 1,
                got: coefficients.len(),
            });
        }
        if let Some((index, &value)) = coefficients.iter().enumerate().find(|(_, c)| !c.is_finite()) {
            return Err(PolynomialError::NonFiniteCoefficient { index, value });
        }
        Ok(Self { coefficients, order })
    }

    /// Creates a polynomial whose order is inferred from the coefficient count.
    pub fn from_coefficients(coefficients: &[f64]) -> Result<Self, PolynomialError> {
        let order = coefficients.len().checked_sub(1).ok_or(PolynomialError::Empty)?;
        Self::new(coefficients.to_vec(), order)
    }

    /// Builds a polynomial from one of the crate's fixed coefficient tables.
    pub(crate) fn from_table<const N: usize>(table: &[f64; N]) -> Self {
        const { assert!(N > 0) };
        Self {
            coefficients: table.to_vec(),
            order: N - 1,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Evaluates the polynomial at `x`.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        poly_eval(&self.coefficients, self.order, x)
    }

    /// Finds a root near the seeds `x0` and `x1`. See [`root_find`].
    pub fn root(&self, x0: f64, x1: f64) -> Result<f64, RootFindError> {
        root_find(&self.coefficients, self.order, x0, x1)
    }

    /// Returns a copy with `delta` added to the constant term.
    ///
    /// Solving `p(x) = y` is the same as finding a root of `p.shifted(-y)`.
    pub fn shifted(&self, delta: f64) -> Self {
        let mut coefficients = self.coefficients.clone();
        coefficients[0] += delta;
        Self {
            coefficients,
            order: self.order,
        }
    }
}

impl TryFrom<PolynomialRepr> for Polynomial {
    type Error = PolynomialError;

    fn try_from(repr: PolynomialRepr) -> Result<Self, Self::Error> {
        match repr.order {
            Some(order) => Self::new(repr.coefficients, order),
            None => Self::from_coefficients(&repr.coefficients),
        }
    }
}

impl From<Polynomial> for PolynomialRepr {
    fn from(poly: Polynomial) -> Self {
        Self {
            coefficients: poly.coefficients,
            order: Some(poly.order),
        }
    }
}
