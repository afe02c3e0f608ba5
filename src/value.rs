//! Numeric types and iteration utilities for fitting.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used for fitting and evaluation, ensuring
//! compatibility with nalgebra, floating-point operations, and formatting.
//!
//! Frames always carry `f64`, but the fitter and the fitted model are generic
//! so they can be used on their own with `f32` data.
//!
//! # Iterators
//!
//! - [`EvenlySpaced`]: `count` evenly spaced values over a closed range,
//!   used to generate prediction domains.
//!
//! # Example
//!
//! ```rust
//! use frame_regression::value::EvenlySpaced;
//!
//! let xs: Vec<f64> = EvenlySpaced::new(0.0..=1.0, 5).collect();
//! assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
//! ```
use std::ops::RangeInclusive;

use crate::error::Error;

/// Numeric type for fits
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
{
    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// True if the value is neither NaN nor infinite
    fn is_real(&self) -> bool {
        num_traits::float::FloatCore::is_finite(*self)
    }

    /// Check if the value is negative
    fn is_sign_negative(&self) -> bool {
        self < &Self::zero()
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
{
}

/// Returns the smallest and largest value of a sequence, or `None` if it is empty.
pub fn bounds<T: Value>(values: impl IntoIterator<Item = T>) -> Option<(T, T)> {
    values.into_iter().fold(None, |acc, x| {
        Some(match acc {
            Some((min, max)) => (
                nalgebra::RealField::min(min, x),
                nalgebra::RealField::max(max, x),
            ),
            None => (x, x),
        })
    })
}

/// Iterator over `count` evenly spaced values of a closed range.
///
/// The first value is always `range.start()`. With two or more values the
/// last one is exactly `range.end()`, independent of rounding in the step.
#[derive(Debug, Clone)]
pub struct EvenlySpaced<T: Value> {
    start: T,
    end: T,
    count: usize,
    index: usize,
}
impl<T: Value> EvenlySpaced<T> {
    /// Creates a new iterator yielding `count` values from `range.start` to `range.end`
    pub fn new(range: RangeInclusive<T>, count: usize) -> Self {
        let (start, end) = range.into_inner();
        Self {
            start,
            end,
            count,
            index: 0,
        }
    }
}
impl<T: Value> Iterator for EvenlySpaced<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }

        let i = self.index;
        self.index += 1;

        let value = match i {
            0 => self.start,
            _ if i + 1 == self.count => self.end,
            _ => {
                let t = T::from_positive_int(i) / T::from_positive_int(self.count - 1);
                self.start + (self.end - self.start) * t
            }
        };
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}
impl<T: Value> ExactSizeIterator for EvenlySpaced<T> {}
