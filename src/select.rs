//! Locating the x and y columns of a frame
//!
//! [`select`] resolves the requested field names, checks their types and
//! pulls the usable rows out as plain `f64` vectors ready for fitting.
use crate::{
    error::{Error, Result},
    frame::{Field, FieldType, Frame},
};

/// Accepted types for the x field
const X_TYPES: &str = "number or time";

/// Accepted types for the y field
const Y_TYPES: &str = "number";

/// Name and type of a selected source field.
///
/// The predicted frame reuses both for its x column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedField {
    /// The field name
    pub name: String,

    /// The declared type
    pub field_type: FieldType,
}

impl From<&Field> for SelectedField {
    fn from(field: &Field) -> Self {
        Self {
            name: field.name().to_string(),
            field_type: field.field_type(),
        }
    }
}

/// The x/y data extracted from a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The x source field
    pub x_field: SelectedField,

    /// The y source field
    pub y_field: SelectedField,

    /// Usable x values, in row order
    pub x: Vec<f64>,

    /// Usable y values, in row order
    pub y: Vec<f64>,
}

impl Selection {
    /// Number of usable points
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True if no row was usable
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Selects the x and y fields of `frame`.
///
/// When a name is `None` a field is picked automatically: x is the first
/// time field, or failing that the first number field; y is the first number
/// field that is not the x field.
///
/// Rows where either value is null or not finite are skipped.
///
/// # Errors
/// - [`Error::MissingField`] if a named field does not exist.
/// - [`Error::NoCandidateField`] if no field could be picked automatically.
/// - [`Error::TypeMismatch`] if x is not a number or time field, or y is not a number field.
pub fn select(frame: &Frame, x_name: Option<&str>, y_name: Option<&str>) -> Result<Selection> {
    let x_field = match x_name {
        Some(name) => find(frame, name)?,
        None => auto_x(frame)?,
    };
    if !x_field.field_type().is_numeric() {
        return Err(Error::TypeMismatch {
            field: x_field.name().to_string(),
            expected: X_TYPES,
            found: x_field.field_type(),
        });
    }

    let y_field = match y_name {
        Some(name) => find(frame, name)?,
        None => auto_y(frame, x_field)?,
    };
    if y_field.field_type() != FieldType::Number {
        return Err(Error::TypeMismatch {
            field: y_field.name().to_string(),
            expected: Y_TYPES,
            found: y_field.field_type(),
        });
    }

    let mut x = Vec::with_capacity(frame.len());
    let mut y = Vec::with_capacity(frame.len());
    for (xv, yv) in x_field.values().iter().zip(y_field.values()) {
        match (xv.as_number(), yv.as_number()) {
            (Some(xv), Some(yv)) if xv.is_finite() && yv.is_finite() => {
                x.push(xv);
                y.push(yv);
            }
            _ => {}
        }
    }

    Ok(Selection {
        x_field: x_field.into(),
        y_field: y_field.into(),
        x,
        y,
    })
}

fn find<'a>(frame: &'a Frame, name: &str) -> Result<&'a Field> {
    frame.field(name).ok_or_else(|| Error::MissingField {
        field: name.to_string(),
    })
}

fn auto_x(frame: &Frame) -> Result<&Field> {
    let fields = frame.fields();
    fields
        .iter()
        .find(|f| f.field_type() == FieldType::Time)
        .or_else(|| fields.iter().find(|f| f.field_type() == FieldType::Number))
        .ok_or(Error::NoCandidateField {
            role: "x",
            expected: X_TYPES,
        })
}

fn auto_y<'a>(frame: &'a Frame, x_field: &Field) -> Result<&'a Field> {
    frame
        .fields()
        .iter()
        .find(|f| f.field_type() == FieldType::Number && !std::ptr::eq(*f, x_field))
        .ok_or(Error::NoCandidateField {
            role: "y",
            expected: Y_TYPES,
        })
}
