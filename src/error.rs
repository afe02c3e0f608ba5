//! Error types for the regression transform
//!
//! This module defines the failure modes of selecting, fitting, predicting and
//! building frames, along with a convenient `Result` alias.
use crate::{
    frame::{FieldType, FrameLabel},
    model::Model,
};

/// Errors that can occur while transforming frames.
///
/// Configuration problems are reported before any frame is touched.
/// Everything that goes wrong while processing one frame is wrapped in
/// [`Error::Frame`], which names the frame and the requested model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transform options are invalid.
    #[error("Invalid option `{option}`: {reason}")]
    InvalidOption {
        /// Name of the option, as it appears in the serialized options
        option: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A named field does not exist in the frame.
    #[error("Field `{field}` not found")]
    MissingField {
        /// The requested field name
        field: String,
    },

    /// No field name was given and the frame has no field that could stand in for it.
    #[error("No suitable {role} field found; expected {expected}")]
    NoCandidateField {
        /// `x` or `y`
        role: &'static str,
        /// The field types that would have been accepted
        expected: &'static str,
    },

    /// A field exists, but holds the wrong kind of values.
    #[error("Field `{field}` has type `{found}`, expected {expected}")]
    TypeMismatch {
        /// The field name
        field: String,
        /// The field types that would have been accepted
        expected: &'static str,
        /// The declared type of the field
        found: FieldType,
    },

    /// There are not enough data points for the requested degree.
    ///
    /// A fit of degree `D` needs at least `D + 1` points.
    #[error("Not enough data to fit: {points} usable points, need at least {required}")]
    InsufficientData {
        /// Number of usable data points
        points: usize,
        /// Minimum number of points for the requested model
        required: usize,
    },

    /// The normal equations cannot be solved reliably.
    ///
    /// Usually the x values are duplicated or too few distinct for the
    /// requested degree. Very high degrees, and NaN, infinite or overflowing
    /// values, end here too.
    #[error(
        "Normal matrix (VᵀV) is singular or too ill-conditioned to solve; the x values may be duplicated, too few distinct for the degree, or not finite. [n: {n}, k: {k}]"
    )]
    SingularMatrix {
        /// Number of data points
        n: usize,
        /// Number of coefficients
        k: usize,
    },

    /// The fields of a frame do not share a common length.
    #[error("Field `{field}` has {found} values, expected {expected}")]
    LengthMismatch {
        /// The offending field
        field: String,
        /// The length of the frame
        expected: usize,
        /// The length of the field
        found: usize,
    },

    /// A field holds a value that does not match its declared type.
    #[error("Field `{field}` of type `{field_type}` holds a {found} value at row {row}")]
    ValueKind {
        /// The offending field
        field: String,
        /// The declared type of the field
        field_type: FieldType,
        /// Index of the offending value
        row: usize,
        /// Kind of the offending value
        found: &'static str,
    },

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// Processing a single frame failed.
    #[error("{model} regression failed for {frame}: {source}")]
    Frame {
        /// The frame that failed
        frame: FrameLabel,
        /// The requested model
        model: Model,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Returns the innermost error, looking through [`Error::Frame`] wrappers.
    #[must_use]
    pub fn root(&self) -> &Error {
        match self {
            Error::Frame { source, .. } => source.root(),
            other => other,
        }
    }

    /// Wraps this error with the frame and model it happened for.
    #[must_use]
    pub fn in_frame(self, frame: FrameLabel, model: Model) -> Self {
        Error::Frame {
            frame,
            model,
            source: Box::new(self),
        }
    }
}

/// Result type for the regression transform
pub type Result<T> = std::result::Result<T, Error>;
