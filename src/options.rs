//! Options for the regression transform
//!
//! [`RegressionOptions`] is the serialized form a pipeline stores, with
//! camelCase keys and defaults for everything:
//!
//! ```json
//! { "modelType": "polynomial", "degree": 3, "predictionCount": 50, "xFieldName": "time", "yFieldName": "value" }
//! ```
//!
//! [`RegressionOptions::validate`] turns it into a [`RegressionConfig`], which
//! is what the transform runs on.
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    model::{Model, ModelType},
};

/// Degree used for polynomial models when none is given
pub const DEFAULT_DEGREE: i64 = 2;

/// Number of predicted points when none is given
pub const DEFAULT_PREDICTION_COUNT: i64 = 100;

/// Largest accepted number of predicted points per frame
pub const MAX_PREDICTION_COUNT: i64 = 10_000_000;

/// User-facing options for the regression transform.
///
/// Integers are signed so that out-of-range values reach
/// [`RegressionOptions::validate`] and get a descriptive error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegressionOptions {
    /// The model family to fit
    pub model_type: ModelType,

    /// Degree of the polynomial. Ignored for linear models.
    pub degree: i64,

    /// Number of points in each predicted frame
    pub prediction_count: i64,

    /// Name of the x field. Picked automatically when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_field_name: Option<String>,

    /// Name of the y field. Picked automatically when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_field_name: Option<String>,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self {
            model_type: ModelType::Linear,
            degree: DEFAULT_DEGREE,
            prediction_count: DEFAULT_PREDICTION_COUNT,
            x_field_name: None,
            y_field_name: None,
        }
    }
}

impl RegressionOptions {
    /// Options for a linear model with default settings
    #[must_use]
    pub fn linear() -> Self {
        Self::default()
    }

    /// Options for a polynomial model of the given degree
    #[must_use]
    pub fn polynomial(degree: i64) -> Self {
        Self {
            model_type: ModelType::Polynomial,
            degree,
            ..Self::default()
        }
    }

    /// Sets the x and y field names
    #[must_use]
    pub fn with_fields(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_field_name = Some(x.into());
        self.y_field_name = Some(y.into());
        self
    }

    /// Sets the number of predicted points
    #[must_use]
    pub fn with_prediction_count(mut self, count: i64) -> Self {
        self.prediction_count = count;
        self
    }

    /// Checks the options and resolves them into a [`RegressionConfig`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidOption`] if:
    /// - the model is polynomial and `degree` is less than 1
    /// - `predictionCount` is negative or above [`MAX_PREDICTION_COUNT`]
    /// - a field name is given but empty
    pub fn validate(&self) -> Result<RegressionConfig> {
        let model = match self.model_type {
            ModelType::Linear => Model::Linear,
            ModelType::Polynomial => {
                let degree = usize::try_from(self.degree)
                    .ok()
                    .filter(|&d| d >= 1)
                    .ok_or_else(|| Error::InvalidOption {
                        option: "degree",
                        reason: format!("must be at least 1, got {}", self.degree),
                    })?;
                Model::Polynomial { degree }
            }
        };

        let prediction_count =
            usize::try_from(self.prediction_count).map_err(|_| Error::InvalidOption {
                option: "predictionCount",
                reason: format!("must not be negative, got {}", self.prediction_count),
            })?;
        if self.prediction_count > MAX_PREDICTION_COUNT {
            return Err(Error::InvalidOption {
                option: "predictionCount",
                reason: format!(
                    "must be at most {MAX_PREDICTION_COUNT}, got {}",
                    self.prediction_count
                ),
            });
        }

        Ok(RegressionConfig {
            model,
            prediction_count,
            x_field_name: field_name("xFieldName", self.x_field_name.as_deref())?,
            y_field_name: field_name("yFieldName", self.y_field_name.as_deref())?,
        })
    }
}

fn field_name(option: &'static str, name: Option<&str>) -> Result<Option<String>> {
    match name {
        Some("") => Err(Error::InvalidOption {
            option,
            reason: "must not be empty".to_string(),
        }),
        name => Ok(name.map(str::to_string)),
    }
}

/// Validated settings of a regression transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegressionConfig {
    model: Model,
    prediction_count: usize,
    x_field_name: Option<String>,
    y_field_name: Option<String>,
}

impl RegressionConfig {
    /// The model to fit
    #[must_use]
    pub fn model(&self) -> Model {
        self.model
    }

    /// Number of points in each predicted frame
    #[must_use]
    pub fn prediction_count(&self) -> usize {
        self.prediction_count
    }

    /// Name of the x field, if one was given
    #[must_use]
    pub fn x_field_name(&self) -> Option<&str> {
        self.x_field_name.as_deref()
    }

    /// Name of the y field, if one was given
    #[must_use]
    pub fn y_field_name(&self) -> Option<&str> {
        self.y_field_name.as_deref()
    }
}

impl TryFrom<&RegressionOptions> for RegressionConfig {
    type Error = Error;

    fn try_from(options: &RegressionOptions) -> Result<Self> {
        options.validate()
    }
}
