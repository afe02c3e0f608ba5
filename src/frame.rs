//! A minimal tabular data model
//!
//! Frames are what the regression transform consumes and produces:
//! an ordered, named collection of typed [`Field`]s sharing one length, with
//! an optional reference id tying it back to the query that produced it.
//!
//! Both types validate their invariants on construction and on
//! deserialization, so the rest of the crate can rely on them:
//! - every non-null value of a field matches the field's declared type
//! - every field of a frame has the same length
//!
//! ```rust
//! use frame_regression::frame::{Field, FieldType, Frame};
//!
//! let frame = Frame::new(vec![
//!     Field::time("time", [0.0, 1000.0, 2000.0]),
//!     Field::numbers("value", [1.0, 2.0, 3.0]),
//! ])
//! .unwrap()
//! .with_name("data")
//! .with_ref_id("A");
//!
//! assert_eq!(frame.len(), 3);
//! assert_eq!(frame.field("time").unwrap().field_type(), FieldType::Time);
//! ```
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Milliseconds since the Unix epoch, stored as numbers
    Time,

    /// Numeric values
    Number,

    /// Text values
    String,

    /// Boolean values
    Boolean,

    /// Anything else; values are not checked
    Other,
}

impl FieldType {
    /// Returns true if the values of this field are numbers (including time).
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldType::Time | FieldType::Number)
    }

    /// Returns true if `value` may be stored in a field of this type.
    #[must_use]
    pub fn accepts(self, value: &FieldValue) -> bool {
        match (self, value) {
            (_, FieldValue::Null) | (FieldType::Other, _) => true,
            (FieldType::Time | FieldType::Number, FieldValue::Number(_)) => true,
            (FieldType::String, FieldValue::String(_)) => true,
            (FieldType::Boolean, FieldValue::Boolean(_)) => true,
            _ => false,
        }
    }

    /// The name used in serialized frames.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Time => "time",
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Other => "other",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single cell of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Missing value
    Null,

    /// A number, or a time in milliseconds since the Unix epoch
    Number(f64),

    /// Text
    String(String),

    /// A boolean
    Boolean(bool),
}

impl FieldValue {
    /// Returns the numeric value, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// A short name for the kind of value, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Number(_) => "number",
            FieldValue::String(_) => "string",
            FieldValue::Boolean(_) => "boolean",
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}
impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Number)
    }
}
impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}
impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}
impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// Display configuration attached to a field.
///
/// The regression transform carries it along without looking inside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldConfig(pub serde_json::Map<String, serde_json::Value>);

impl FieldConfig {
    /// Returns true if no configuration is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A named, typed column of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField")]
pub struct Field {
    name: String,

    #[serde(rename = "type")]
    field_type: FieldType,

    values: Vec<FieldValue>,

    #[serde(default, skip_serializing_if = "FieldConfig::is_empty")]
    config: FieldConfig,
}

impl Field {
    /// Creates a new field, checking every value against the declared type.
    ///
    /// # Errors
    /// Returns [`Error::ValueKind`] if a non-null value does not match `field_type`.
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        values: impl IntoIterator<Item = FieldValue>,
    ) -> Result<Self> {
        let name = name.into();
        let values: Vec<_> = values.into_iter().collect();

        if let Some((row, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !field_type.accepts(v))
        {
            return Err(Error::ValueKind {
                field: name,
                field_type,
                row,
                found: value.kind(),
            });
        }

        Ok(Self {
            name,
            field_type,
            values,
            config: FieldConfig::default(),
        })
    }

    /// Creates a number field.
    pub fn numbers(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::numeric(name, FieldType::Number, values)
    }

    /// Creates a time field from milliseconds since the Unix epoch.
    pub fn time(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::numeric(name, FieldType::Time, values)
    }

    /// Creates a numeric field (number or time) from raw numbers.
    ///
    /// Numbers are valid in both types, so this cannot fail.
    pub(crate) fn numeric(
        name: impl Into<String>,
        field_type: FieldType,
        values: impl IntoIterator<Item = f64>,
    ) -> Self {
        debug_assert!(field_type.is_numeric());
        Self {
            name: name.into(),
            field_type,
            values: values.into_iter().map(FieldValue::Number).collect(),
            config: FieldConfig::default(),
        }
    }

    /// Creates a string field.
    pub fn strings<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::String,
            values: values
                .into_iter()
                .map(|s| FieldValue::String(s.into()))
                .collect(),
            config: FieldConfig::default(),
        }
    }

    /// Replaces the display configuration of this field.
    #[must_use]
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// The field name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// The values, in row order
    #[must_use]
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// The display configuration
    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Number of values
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the field holds no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    values: Vec<FieldValue>,
    #[serde(default)]
    config: FieldConfig,
}

impl TryFrom<RawField> for Field {
    type Error = Error;

    fn try_from(raw: RawField) -> Result<Self> {
        Ok(Field::new(raw.name, raw.field_type, raw.values)?.with_config(raw.config))
    }
}

/// An ordered collection of same-length fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrame", rename_all = "camelCase")]
pub struct Frame {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    ref_id: Option<String>,

    fields: Vec<Field>,
}

impl Frame {
    /// Creates a new unnamed frame.
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] if the fields do not all have the same length.
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        if let Some(first) = fields.first() {
            let expected = first.len();
            if let Some(field) = fields.iter().find(|f| f.len() != expected) {
                return Err(Error::LengthMismatch {
                    field: field.name.clone(),
                    expected,
                    found: field.len(),
                });
            }
        }

        Ok(Self {
            name: None,
            ref_id: None,
            fields,
        })
    }

    /// Sets the frame name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the reference id
    #[must_use]
    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    /// The frame name, if any
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The reference id, if any
    #[must_use]
    pub fn ref_id(&self) -> Option<&str> {
        self.ref_id.as_deref()
    }

    /// The fields, in order
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Finds a field by name. The first match wins.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.first().map_or(0, Field::len)
    }

    /// True if the frame has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Describes this frame for error messages, given its position in the input.
    #[must_use]
    pub fn label(&self, index: usize) -> FrameLabel {
        FrameLabel::new(index, self.name.clone(), self.ref_id.clone())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrame {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    ref_id: Option<String>,
    #[serde(default)]
    fields: Vec<Field>,
}

impl TryFrom<RawFrame> for Frame {
    type Error = Error;

    fn try_from(raw: RawFrame) -> Result<Self> {
        let mut frame = Frame::new(raw.fields)?;
        frame.name = raw.name;
        frame.ref_id = raw.ref_id;
        Ok(frame)
    }
}

/// Identifies a frame in error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLabel {
    /// Position of the frame in the input
    pub index: usize,

    /// Frame name, if any
    pub name: Option<String>,

    /// Reference id, if any
    pub ref_id: Option<String>,
}

impl FrameLabel {
    /// Creates a new label
    #[must_use]
    pub fn new(index: usize, name: Option<String>, ref_id: Option<String>) -> Self {
        Self {
            index,
            name,
            ref_id,
        }
    }
}

impl std::fmt::Display for FrameLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame {}", self.index)?;
        match (&self.name, &self.ref_id) {
            (Some(name), Some(ref_id)) => write!(f, " (name `{name}`, refId `{ref_id}`)"),
            (Some(name), None) => write!(f, " (name `{name}`)"),
            (None, Some(ref_id)) => write!(f, " (refId `{ref_id}`)"),
            (None, None) => Ok(()),
        }
    }
}
