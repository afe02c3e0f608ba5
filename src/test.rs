//! Test helpers for code working with frames and fitted models.
//!
//! # Features
//!
//! ### [`crate::frame!`]
//! Builds a [`crate::frame::Frame`] from a compact field list. Great for test inputs!
//! ```rust
//! # use frame_regression::frame;
//! let frame = frame!(
//!     "time": Time = [0.0, 1000.0, 2000.0],
//!     "value": Number = [1.0, 2.0, 3.0],
//! );
//! assert_eq!(frame.len(), 3);
//! ```
//!
//! ### [`crate::assert_close`]
//! Asserts that two floating-point values are approximately equal within a tolerance.
//! - `assert_eq!` equivalent for floats.
//!
//! ### [`crate::assert_all_close`]
//! Asserts that two slices of floating-point values are approximately equal element-wise.
//! - Element-wise [`crate::assert_close`].
use crate::value::Value;


/// Absolute tolerance used by [`crate::assert_close`] when none is given
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// True if `a` and `b` are equal, or differ by no more than `tolerance`.
///
/// A tolerance that cannot be represented in `T` only accepts exact equality.
#[allow(clippy::float_cmp)]
pub fn is_close<T: Value>(a: T, b: T, tolerance: f64) -> bool {
    if a == b {
        return true;
    }

    match T::try_cast(tolerance) {
        Ok(tolerance) => Value::abs(a - b) <= tolerance,
        Err(_) => false,
    }
}

/// Builds a frame from `"name": Type = [values…]` entries.
///
/// - `Type` is any [`crate::frame::FieldType`] variant.
/// - Values are anything [`crate::frame::FieldValue`] converts from: numbers, strings, booleans, `None`.
///
/// # Panics
/// Panics if a value does not match its field type, or if the fields differ in length.
///
/// # Example
/// ```
/// # use frame_regression::frame;
/// let frame = frame!(
///     "x": Number = [0.0, 1.0],
///     "label": String = ["a", "b"],
/// );
/// assert_eq!(frame.fields().len(), 2);
/// ```
#[macro_export]
macro_rules! frame {
    ($( $name:literal : $ty:ident = [ $($value:expr),* $(,)? ] ),* $(,)?) => {
        $crate::frame::Frame::new(vec![$(
            $crate::frame::Field::new(
                $name,
                $crate::frame::FieldType::$ty,
                vec![$( $crate::frame::FieldValue::from($value) ),*],
            )
            .expect("Field values must match the field type")
        ),*])
        .expect("Fields must have the same length")
    };
}

#[cfg(test)]
mod tests {
    use crate::frame::{FieldType, FieldValue};

    #[test]
    fn test_frame_macro() {
        let frame = frame!(
            "time": Time = [0.0, 1.0],
            "value": Number = [Some(2.0), None],
            "label": String = ["a", "b"],
        );

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.fields()[0].field_type(), FieldType::Time);
        assert_eq!(frame.fields()[1].values()[1], FieldValue::Null);
        assert_eq!(frame.fields()[2].values()[0], FieldValue::from("a"));
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_frame_macro_length_mismatch() {
        let _ = frame!("a": Number = [1.0], "b": Number = [1.0, 2.0]);
    }

    #[test]
    fn test_is_close() {
        assert!(super::is_close(1.0, 1.0 + 1e-12, 1e-9));
        assert!(!super::is_close(1.0, 1.1, 1e-9));
        assert!(super::is_close(f64::INFINITY, f64::INFINITY, 0.0));
    }
}
