//! Goodness-of-fit statistics
//!
//! Small helpers used to describe how well a fitted model explains the data
//! it was fitted to. They all take the observed values `y` and the model's
//! predictions `y_fit` at the same x positions.
//!
//! ```rust
//! # use frame_regression::statistics::{r_squared, mean_squared_error};
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.1, 1.9, 3.05];
//! let r2 = r_squared(y.iter().copied(), y_fit.iter().copied());
//! let mse = mean_squared_error(y.into_iter(), y_fit.into_iter());
//! assert!(r2 > 0.9 && mse < 0.01);
//! ```
use crate::value::Value;

/// Computes the residual variance of a model's predictions.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// σ² = Σ (y_i - y_fit_i)² / (n - k)
/// where
///   n = number of observations, k = number of model parameters
/// ```
/// </div>
///
/// Returns zero when there are no degrees of freedom left (`n <= k`).
pub fn residual_variance<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
    k: usize,
) -> T {
    let mut ss_residual = T::zero();
    let mut n = 0usize;
    for (y, y_fit) in y.zip(y_fit) {
        let r = y - y_fit;
        ss_residual += r * r;
        n += 1;
    }

    if n <= k {
        return T::zero();
    }
    ss_residual / T::from_positive_int(n - k)
}

/// Calculate the R-squared value for a set of data.
///
/// R-squared tells you how much of the variation in `y` the model explains:
/// `1` is a perfect fit, `0` is no better than the mean.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// If `y` is constant, `SS_tot` is zero and the result is NaN (or -∞).
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += (y - y_mean) * (y - y_mean);
        ss_residual += (y - y_fit) * (y - y_fit);
    }

    T::one() - (ss_residual / ss_total)
}

/// Computes the arithmetic mean of a sequence of values.
///
/// Returns zero if the iterator yields no elements.
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = 0usize;
    for value in data {
        sum += value;
        count += 1;
    }

    if count == 0 {
        return T::zero();
    }
    sum / T::from_positive_int(count)
}

/// Computes the mean squared error (MSE) between two sets of values.
///
/// Returns NaN for empty input.
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let mut total = T::zero();
    let mut n = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        total += (y - y_fit) * (y - y_fit);
        n += T::one();
    }
    total / n
}
