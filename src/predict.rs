//! Evaluating fitted models over a prediction domain
use crate::{
    polynomial::FittedModel,
    value::{self, EvenlySpaced, Value},
};

/// The x values a model is evaluated at.
///
/// - When `count` equals the number of original points, the original x
///   values are reused as-is, in their original order.
/// - Otherwise `count` evenly spaced values from the smallest to the largest
///   original x, both included. A single point is the smallest x.
///
/// No original points means there is nothing to span, so the domain is empty.
///
/// ```
/// # use frame_regression::predict::domain;
/// assert_eq!(domain(&[0.0, 4.0, 1.0], 3), vec![0.0, 4.0, 1.0]);
/// assert_eq!(domain(&[0.0, 4.0, 1.0], 5), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(domain(&[0.0, 4.0, 1.0], 1), vec![0.0]);
/// assert!(domain(&[0.0, 4.0, 1.0], 0).is_empty());
/// ```
pub fn domain<T: Value>(original_x: &[T], count: usize) -> Vec<T> {
    if count == original_x.len() {
        return original_x.to_vec();
    }

    match value::bounds(original_x.iter().copied()) {
        Some((min, max)) => EvenlySpaced::new(min..=max, count).collect(),
        None => Vec::new(),
    }
}

/// Evaluates the model at every x, in order.
pub fn predict<T: Value>(model: &FittedModel<T>, xs: &[T]) -> Vec<T> {
    model.solve(xs.iter().copied())
}
