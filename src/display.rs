//! Human-readable equations for fitted models
//!
//! [`format_polynomial`] renders coefficients in ascending power order as
//! `y(x) = 2.00x² - 3.00x + 1.00`. When a model is expanded around a
//! non-zero origin the variable is written as `(x - x₀)` instead.
//!
//! # Helpers
//! - [`format_coefficient`]: Formats a numeric coefficient, skipping zeros.
//! - [`format_variable`]: Formats a variable raised to a power using superscripts.
#![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

use crate::value::Value;

/// Default precision for formatting coefficients
pub const DEFAULT_PRECISION: usize = 2;

/// Values with magnitude in this range are written without scientific notation
const FIXED_RANGE: std::ops::Range<f64> = 1e-3..1e3;

/// Represents the sign of a polynomial term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if Value::is_sign_negative(&coef) {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// `+` for `Positive`, `-` for `Negative`.
    #[must_use]
    pub fn char(self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// Formats a number with fixed precision, or in scientific notation outside `1e-3..1e3`.
pub fn format_float<T: Value>(n: T, precision: usize) -> String {
    let in_range = match (T::try_cast(FIXED_RANGE.start), T::try_cast(FIXED_RANGE.end)) {
        (Ok(start), Ok(end)) => (start..end).contains(&Value::abs(n)),
        _ => false,
    };

    if in_range || n.is_zero() {
        format!("{n:.precision$}")
    } else {
        format!("{n:.precision$e}")
    }
}

/// Formats the magnitude of a coefficient for display in a polynomial term.
///
/// - Returns `None` if the coefficient is zero or effectively zero (≤ epsilon).
/// - Returns an empty string for a unit coefficient on a non-constant term.
///
/// ```
/// # use frame_regression::display::format_coefficient;
/// assert_eq!(format_coefficient(0.0, 1, 2), None);
/// assert_eq!(format_coefficient(-2.5, 1, 2), Some("2.50".to_string()));
/// assert_eq!(format_coefficient(1.0, 1, 2), Some(String::new()));
/// assert_eq!(format_coefficient(1e5, 1, 2), Some("1.00e5".to_string()));
/// ```
pub fn format_coefficient<T: Value>(coef: T, degree: i32, precision: usize) -> Option<String> {
    let abs = Value::abs(coef);
    if abs <= T::epsilon() {
        return None;
    }

    if Value::abs(abs - T::one()) <= T::epsilon() && degree != 0 {
        return Some(String::new());
    }

    Some(format_float(abs, precision))
}

/// Formats `base` raised to `exp`.
///
/// ```
/// # use frame_regression::display::format_variable;
/// assert_eq!(format_variable("x", 0), "");
/// assert_eq!(format_variable("x", 1), "x");
/// assert_eq!(format_variable("x", 12), "x¹²");
/// ```
#[must_use]
pub fn format_variable(base: &str, exp: i32) -> String {
    match exp {
        0 => String::new(),
        1 => base.to_string(),
        _ => format!("{base}{}", superscript(&exp.to_string())),
    }
}

/// Convert a string into a superscript string, ignoring characters without a superscript form
#[must_use]
pub fn superscript(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '0' => Some('⁰'),
            '1' => Some('¹'),
            '2' => Some('²'),
            '3' => Some('³'),
            '4' => Some('⁴'),
            '5' => Some('⁵'),
            '6' => Some('⁶'),
            '7' => Some('⁷'),
            '8' => Some('⁸'),
            '9' => Some('⁹'),
            '-' => Some('⁻'),
            _ => None,
        })
        .collect()
}

/// Writes `y(x) = …` for a polynomial expanded around `origin`.
///
/// `coefficients[j]` multiplies `(x - origin)^j`. Terms are written from the
/// highest power down and zero terms are skipped.
///
/// # Errors
/// Returns an error if writing to `buffer` fails.
pub fn format_polynomial<T: Value, W: std::fmt::Write>(
    buffer: &mut W,
    origin: T,
    coefficients: &[T],
) -> std::fmt::Result {
    let variable = if origin.is_zero() {
        "x".to_string()
    } else {
        let sign = Sign::from_coef(origin);
        let sign = match sign {
            Sign::Positive => '-',
            Sign::Negative => '+',
        };
        format!("(x {sign} {})", format_float(Value::abs(origin), DEFAULT_PRECISION))
    };

    let mut terms = Vec::new();
    for (degree, &coef) in coefficients.iter().enumerate().rev() {
        let degree = degree as i32;
        let Some(magnitude) = format_coefficient(coef, degree, DEFAULT_PRECISION) else {
            continue;
        };
        let body = format!("{magnitude}{}", format_variable(&variable, degree));
        terms.push((Sign::from_coef(coef), body));
    }

    write!(buffer, "y(x) = ")?;
    let mut terms = terms.into_iter();
    let Some((sign, body)) = terms.next() else {
        return write!(buffer, "0");
    };

    if sign == Sign::Negative {
        write!(buffer, "-")?;
    }
    write!(buffer, "{body}")?;

    for (sign, body) in terms {
        write!(buffer, " {} {body}", sign.char())?;
    }

    Ok(())
}
