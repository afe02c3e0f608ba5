//! The regression transform
//!
//! Takes a batch of frames and returns them followed by one predicted frame
//! per input frame, in the same order:
//!
//! ```text
//! [a, b] -> [a, b, a', b']
//! ```
//!
//! Each predicted frame holds a model fitted to the x/y fields of its source
//! frame, evaluated over a prediction domain (see [`crate::predict::domain`]).
//!
//! Any failure fails the whole batch; no partial output is ever produced.
//! Errors name the frame they happened for, see [`crate::Error::Frame`].
//!
//! With the `parallel` feature, frames are processed concurrently. The output,
//! and the error reported when several frames fail, are the same as without it.
use crate::{
    build::build,
    error::Result,
    fit::fit,
    frame::Frame,
    options::{RegressionConfig, RegressionOptions},
    polynomial::{FitProperties, FittedModel},
    predict::{domain, predict},
    select::{select, Selection},
};

/// Invocation context handed to a transform.
///
/// The regression transform does not use it.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct TransformContext {}

/// Trait for transforming batches of frames.
pub trait Transform {
    /// Applies the transform to `frames`, returning the new batch.
    ///
    /// # Errors
    /// Returns an error if any frame cannot be transformed.
    fn apply(&self, frames: &[Frame], ctx: &TransformContext) -> Result<Vec<Frame>>;
}

/// The outcome of fitting one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameFit {
    /// The fitted model
    pub model: FittedModel,

    /// The data the model was fitted to
    pub selection: Selection,

    /// How well the model explains that data
    pub properties: FitProperties,
}

/// Fits a regression model to each frame and appends its predictions.
///
/// Holds only validated configuration, so it can be shared between threads
/// and reused for any number of batches.
///
/// # Example
/// ```
/// # use frame_regression::{frame, RegressionOptions, RegressionTransform, Transform, TransformContext};
/// let source = [frame!(
///     "time": Time = [0.0, 1.0, 2.0, 3.0],
///     "value": Number = [1.0, 3.0, 5.0, 7.0],
/// )];
///
/// let options = RegressionOptions::linear().with_prediction_count(2);
/// let transform = RegressionTransform::new(&options).unwrap();
/// let output = transform.apply(&source, &TransformContext::default()).unwrap();
///
/// assert_eq!(output.len(), 2);
/// assert_eq!(output[1].name(), Some("linear regression"));
/// assert_eq!(output[1].len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RegressionTransform {
    config: RegressionConfig,
}

impl RegressionTransform {
    /// Creates a transform from user options.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidOption`] if the options are invalid.
    pub fn new(options: &RegressionOptions) -> Result<Self> {
        Ok(Self::from_config(options.validate()?))
    }

    /// Creates a transform from an already validated configuration.
    #[must_use]
    pub fn from_config(config: RegressionConfig) -> Self {
        Self { config }
    }

    /// The configuration this transform runs with
    #[must_use]
    pub fn config(&self) -> &RegressionConfig {
        &self.config
    }

    /// Fits the configured model to a single frame.
    ///
    /// # Errors
    /// Returns an error if the fields cannot be selected or the model cannot be fitted.
    /// The error is not wrapped in [`crate::Error::Frame`].
    pub fn fit_frame(&self, frame: &Frame) -> Result<FrameFit> {
        let (selection, model) = self.select_and_fit(frame)?;
        let properties = model.properties(&selection.x, &selection.y);
        Ok(FrameFit {
            model,
            selection,
            properties,
        })
    }

    /// Fits every frame, keeping their order.
    ///
    /// # Errors
    /// Returns the error of the first frame that fails, wrapped in [`crate::Error::Frame`].
    pub fn fit_frames(&self, frames: &[Frame]) -> Result<Vec<FrameFit>> {
        self.for_each_frame(frames, |frame| self.fit_frame(frame))
    }

    /// Builds the predicted frame for a single frame.
    ///
    /// # Errors
    /// Same as [`RegressionTransform::fit_frame`].
    pub fn predict_frame(&self, frame: &Frame) -> Result<Frame> {
        let (selection, model) = self.select_and_fit(frame)?;

        let xs = domain(&selection.x, self.config.prediction_count());
        let ys = predict(&model, &xs);
        log::trace!("Predicted {} points for `{}`", xs.len(), selection.y_field.name);

        build(
            self.config.model(),
            &selection.y_field.name,
            &selection.x_field,
            xs,
            ys,
        )
    }

    fn select_and_fit(&self, frame: &Frame) -> Result<(Selection, FittedModel)> {
        let selection = select(
            frame,
            self.config.x_field_name(),
            self.config.y_field_name(),
        )?;

        let model = fit(&selection.x, &selection.y, self.config.model())?;
        log::debug!(
            "Fitted {} regression of `{}` against `{}` over {} points: {model}",
            self.config.model(),
            selection.y_field.name,
            selection.x_field.name,
            selection.len(),
        );
        log::trace!(
            "Coefficients around x = {}: {:?}",
            model.origin(),
            model.coefficients()
        );

        Ok((selection, model))
    }

    /// Runs `f` on every frame in order, labelling errors with the frame they came from.
    ///
    /// The first failing frame, in input order, decides the error.
    fn for_each_frame<R, F>(&self, frames: &[Frame], f: F) -> Result<Vec<R>>
    where
        R: Send,
        F: Fn(&Frame) -> Result<R> + Sync,
    {
        let model = self.config.model();
        let run = |(index, frame): (usize, &Frame)| {
            f(frame).map_err(|e| e.in_frame(frame.label(index), model))
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            let results: Vec<Result<R>> = frames.par_iter().enumerate().map(run).collect();
            results.into_iter().collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            frames.iter().enumerate().map(run).collect()
        }
    }
}

impl Transform for RegressionTransform {
    fn apply(&self, frames: &[Frame], _ctx: &TransformContext) -> Result<Vec<Frame>> {
        log::debug!(
            "Applying {} regression to {} frames",
            self.config.model(),
            frames.len()
        );

        let predicted = self.for_each_frame(frames, |frame| self.predict_frame(frame))?;

        let mut output = Vec::with_capacity(frames.len() * 2);
        output.extend_from_slice(frames);
        output.extend(predicted);
        Ok(output)
    }
}

/// Creates the transform function for a set of options.
///
/// The options are validated once, up front; the returned function can be
/// called any number of times.
///
/// # Errors
/// Returns [`crate::Error::InvalidOption`] if the options are invalid.
///
/// # Example
/// ```
/// # use frame_regression::{frame, transformer, RegressionOptions};
/// let options = RegressionOptions::polynomial(2).with_fields("time", "value");
/// let transform = transformer(&options).unwrap();
///
/// let source = [frame!(
///     "time": Time = [0.0, 1.0, 2.0, 3.0],
///     "value": Number = [0.0, 1.0, 4.0, 9.0],
/// )];
/// let output = transform(&source).unwrap();
/// assert_eq!(output[1].len(), 100);
/// ```
pub fn transformer(options: &RegressionOptions) -> Result<impl Fn(&[Frame]) -> Result<Vec<Frame>>> {
    let transform = RegressionTransform::new(options)?;
    let ctx = TransformContext::default();
    Ok(move |frames: &[Frame]| transform.apply(frames, &ctx))
}
