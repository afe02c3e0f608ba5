//! Regression model families
//!
//! [`ModelType`] is what a user picks in the options; [`Model`] is the
//! validated form, carrying everything the fitter needs for that family.
use serde::{Deserialize, Serialize};

/// The family of regression model, as it appears in serialized options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// A straight line: `y = c₀ + c₁x`
    #[default]
    Linear,

    /// A polynomial of a chosen degree: `y = c₀ + c₁x + … + c_Dx^D`
    Polynomial,
}

impl ModelType {
    /// The label used in predicted frame names, e.g. `linear regression`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ModelType::Linear => "linear",
            ModelType::Polynomial => "polynomial",
        }
    }
}

/// A fully specified regression model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    /// Least-squares line
    Linear,

    /// Least-squares polynomial of the given degree
    Polynomial {
        /// Highest power of x; at least 1 once validated
        degree: usize,
    },
}

impl Model {
    /// The degree of the fitted polynomial. Linear models have degree 1.
    #[must_use]
    pub fn degree(self) -> usize {
        match self {
            Model::Linear => 1,
            Model::Polynomial { degree } => degree,
        }
    }

    /// Number of coefficients the model has.
    #[must_use]
    pub fn k(self) -> usize {
        self.degree() + 1
    }

    /// The family this model belongs to.
    #[must_use]
    pub fn model_type(self) -> ModelType {
        match self {
            Model::Linear => ModelType::Linear,
            Model::Polynomial { .. } => ModelType::Polynomial,
        }
    }

    /// See [`ModelType::label`]
    #[must_use]
    pub fn label(self) -> &'static str {
        self.model_type().label()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Model::Linear => write!(f, "linear"),
            Model::Polynomial { degree } => write!(f, "polynomial (degree {degree})"),
        }
    }
}
