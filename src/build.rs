//! Assembling the predicted frame
use crate::{
    error::{Error, Result},
    frame::{Field, FieldType, Frame},
    model::Model,
    select::SelectedField,
};

/// Suffix appended to the y field name in predicted frames
pub const PREDICTED_SUFFIX: &str = " predicted";

/// Name of the predicted frame for a model, e.g. `linear regression`.
#[must_use]
pub fn frame_name(model: Model) -> String {
    format!("{} regression", model.label())
}

/// Builds the frame holding a model's predictions.
///
/// The frame is named after the model family and has two fields:
/// 1. the x values, with the name and type of the source x field
/// 2. the predicted values as a number field named `<y> predicted`
///
/// It has no reference id and no field configuration.
///
/// # Errors
/// Returns [`Error::LengthMismatch`] if `xs` and `ys` differ in length.
pub fn build(
    model: Model,
    y_field_name: &str,
    x_field: &SelectedField,
    xs: Vec<f64>,
    ys: Vec<f64>,
) -> Result<Frame> {
    if xs.len() != ys.len() {
        return Err(Error::LengthMismatch {
            field: format!("{y_field_name}{PREDICTED_SUFFIX}"),
            expected: xs.len(),
            found: ys.len(),
        });
    }

    let frame = Frame::new(vec![
        Field::numeric(x_field.name.clone(), x_field.field_type, xs),
        Field::numeric(
            format!("{y_field_name}{PREDICTED_SUFFIX}"),
            FieldType::Number,
            ys,
        ),
    ])?;
    Ok(frame.with_name(frame_name(model)))
}
