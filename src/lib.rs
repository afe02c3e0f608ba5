//! # frame-regression
//! ## Trend lines for tabular time series
//!
//! This crate turns frames of data (named, typed columns such as a time field
//! and a value field) into regression models, and appends the predicted curve
//! of each model as a new frame next to its source.
//!
//! The simplest use-case is to add a trend line to every series in a batch:
//! ```rust
//! # use frame_regression::{frame, transformer, RegressionOptions};
//! let source = vec![frame!(
//!     "time": Time = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
//!     "value": Number = [0.0, 1.0, 2.0, 2.0, 1.0, 0.0],
//! )];
//!
//! let options = RegressionOptions::polynomial(2)
//!     .with_fields("time", "value")
//!     .with_prediction_count(6);
//! let output = transformer(&options).unwrap()(&source).unwrap();
//!
//! assert_eq!(output.len(), 2);
//! assert_eq!(output[1].name(), Some("polynomial regression"));
//! assert_eq!(output[1].fields()[1].name(), "value predicted");
//! ```
//!
//! # Core Concepts
//! - A [`frame::Frame`] is an ordered set of [`frame::Field`]s of equal length.
//!     - Time fields hold milliseconds since the Unix epoch, and can be used as `x`.
//! - A [`Model`] is the kind of curve to fit:
//!     - [`Model::Linear`] is a straight line `y = c₀ + c₁x`
//!     - [`Model::Polynomial`] is `y = c₀ + c₁x + … + c_Dx^D` for a chosen degree `D`
//! - A [`FittedModel`] is the result of fitting a model with least squares.
//!     - It can be evaluated at any `x`, and printed as an equation.
//! - The **prediction domain** is the set of x values the model is evaluated at.
//!     - It spans the source data, see [`predict::domain`].
//!
//! # Implementation Details
//!
//! Fitting solves the normal equations with an SVD from `nalgebra`, on x
//! values shifted and scaled into `[-1, 1]`, so that large time stamps fit as
//! well as small numbers. Rank-deficient problems are reported as errors
//! rather than producing NaN.
//!
//! The `parallel` feature processes frames, and very large fits, with `rayon`.
//!
//! # Testing utilities
//!
//! See [`test`] for the [`frame!`] macro and float assertions.
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod test;

pub mod build;
pub mod display;
pub mod error;
pub mod frame;
pub mod options;
pub mod predict;
pub mod select;
pub mod statistics;
pub mod value;

mod fit;
mod model;
mod polynomial;
mod transform;

pub use error::{Error, Result};
pub use fit::{fit, SINGULAR_TOLERANCE};
pub use model::{Model, ModelType};
pub use options::{RegressionConfig, RegressionOptions};
pub use polynomial::{FitProperties, FittedModel};
pub use transform::{transformer, FrameFit, RegressionTransform, Transform, TransformContext};

pub use nalgebra;
