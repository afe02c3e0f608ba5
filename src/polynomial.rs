use serde::{Deserialize, Serialize};

use crate::{display, statistics, value::Value};

/// A fitted regression model.
///
/// Holds coefficients `c₀ … c_D` in ascending power order, expanded around an
/// `origin` x₀:
///
/// ```math
/// y(x) = c₀ + c₁(x - x₀) + c₂(x - x₀)² + … + c_D(x - x₀)^D
/// ```
///
/// The fitter uses the midpoint of the fitted x range as the origin, which
/// keeps the coefficients meaningful for large inputs such as millisecond
/// timestamps.
/// When the origin is zero the coefficients are the plain power coefficients;
/// [`FittedModel::to_monomial`] converts any model into that form.
///
/// # Example
/// ```
/// # use frame_regression::FittedModel;
/// let model = FittedModel::new(0.0, vec![1.0, 2.0, 3.0]); // 1 + 2x + 3x²
/// assert_eq!(model.y(2.0), 17.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel<T: Value = f64> {
    origin: T,
    coefficients: Vec<T>,
}

impl<T: Value> FittedModel<T> {
    /// Creates a model from its origin and ascending coefficients.
    #[must_use]
    pub fn new(origin: T, coefficients: Vec<T>) -> Self {
        Self {
            origin,
            coefficients,
        }
    }

    /// The x value the coefficients are expanded around
    #[must_use]
    pub fn origin(&self) -> T {
        self.origin
    }

    /// Coefficients in ascending power order
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Returns the degree of the polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the model at `x` using Horner's method.
    pub fn y(&self, x: T) -> T {
        let dx = x - self.origin;
        self.coefficients
            .iter()
            .rev()
            .fold(T::zero(), |acc, &c| acc * dx + c)
    }

    /// Evaluates the model at every x in order.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<T> {
        x.into_iter().map(|x| self.y(x)).collect()
    }

    /// Expands the model into plain power coefficients `a₀ … a_D` with
    /// `y(x) = a₀ + a₁x + … + a_Dx^D`.
    ///
    /// For a large origin this form loses precision; prefer [`FittedModel::y`]
    /// for evaluation.
    #[must_use]
    pub fn to_monomial(&self) -> Vec<T> {
        // Horner in polynomial arithmetic: acc = acc * (x - x₀) + c_j
        let mut acc: Vec<T> = Vec::with_capacity(self.coefficients.len());
        for &c in self.coefficients.iter().rev() {
            let mut next = vec![T::zero(); acc.len() + 1];
            for (i, &a) in acc.iter().enumerate() {
                next[i + 1] += a;
                next[i] -= a * self.origin;
            }
            next[0] += c;
            acc = next;
        }
        acc
    }

    /// Summarizes how well this model explains the data it was fitted to.
    pub fn properties(&self, x: &[T], y: &[T]) -> FitProperties<T> {
        let y_fit = self.solve(x.iter().copied());
        FitProperties {
            degree: self.degree(),
            data_points: x.len(),
            origin: self.origin,
            coefficients: self.coefficients.clone(),
            mse: statistics::mean_squared_error(y.iter().copied(), y_fit.iter().copied()),
            residual_variance: statistics::residual_variance(
                y.iter().copied(),
                y_fit.iter().copied(),
                self.coefficients.len(),
            ),
            r_squared: statistics::r_squared(y.iter().copied(), y_fit.into_iter()),
        }
    }

    /// Returns a human-readable string of the model equation, e.g. `y(x) = 2.00x + 1.00`.
    #[expect(clippy::missing_panics_doc, reason = "Infallible operation")]
    #[must_use]
    pub fn equation(&self) -> String {
        let mut output = String::new();
        display::format_polynomial(&mut output, self.origin, &self.coefficients)
            .expect("String should be infallible");
        output
    }
}

impl<T: Value> std::fmt::Display for FittedModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        display::format_polynomial(f, self.origin, &self.coefficients)
    }
}

/// A set of diagnostic properties for a fitted model.
///
/// Can be serialized to JSON or other formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitProperties<T: Value = f64> {
    /// The degree of the fitted polynomial.
    pub degree: usize,

    /// The number of data points used in the fit.
    pub data_points: usize,

    /// The x value the coefficients are expanded around.
    pub origin: T,

    /// The coefficients of the fitted polynomial, ascending.
    pub coefficients: Vec<T>,

    /// The mean squared error of the fit.
    pub mse: T,

    /// Unbiased estimate of the noise variance.
    pub residual_variance: T,

    /// The R² value of the fit. NaN when the data is constant.
    pub r_squared: T,
}
