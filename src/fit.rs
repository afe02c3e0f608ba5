use nalgebra::{DMatrix, DVector, MatrixViewMut, SVD};

use crate::{
    error::{Error, Result},
    model::Model,
    polynomial::FittedModel,
    value::{self, Value},
};

/// Smallest singular value of the normal matrix, relative to the largest,
/// below which the system is treated as singular.
pub const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Fits a regression model to a set of points using ordinary least squares.
///
/// Each [`Model`] variant has its own strategy; all of them end up solving
/// the normal equations `(VᵀV) c = Vᵀy` for the Vandermonde matrix `V`.
///
/// # Errors
/// - [`Error::LengthMismatch`] if `x` and `y` differ in length.
/// - [`Error::InsufficientData`] if there are not more points than the degree.
/// - [`Error::SingularMatrix`] if the x values cannot support the requested
///   degree (for example duplicated x values), if any x or y is NaN or
///   infinite, or if the range of x overflows.
///
/// # Example
/// ```
/// # use frame_regression::{fit, Model};
/// let x: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
/// let y = [1.0, 3.0, 5.0, 7.0];
/// let model = fit(&x, &y, Model::Linear).unwrap();
/// assert!((model.coefficients()[1] - 2.0).abs() < 1e-9);
/// ```
pub fn fit<T: Value>(x: &[T], y: &[T], model: Model) -> Result<FittedModel<T>> {
    match model {
        Model::Linear => fit_linear(x, y),
        Model::Polynomial { degree } => fit_polynomial(x, y, degree),
    }
}

/// Least-squares line. Shares the general polynomial path.
fn fit_linear<T: Value>(x: &[T], y: &[T]) -> Result<FittedModel<T>> {
    fit_polynomial(x, y, 1)
}

/// Least-squares polynomial of the given degree.
fn fit_polynomial<T: Value>(x: &[T], y: &[T], degree: usize) -> Result<FittedModel<T>> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            field: "y".to_string(),
            expected: x.len(),
            found: y.len(),
        });
    }

    let n = x.len();
    let k = degree + 1;
    if n <= degree {
        return Err(Error::InsufficientData {
            points: n,
            required: k,
        });
    }

    let singular = Error::SingularMatrix { n, k };
    if !x.iter().chain(y).all(Value::is_real) {
        return Err(singular);
    }

    let scaling = Scaling::from_data(x).ok_or(singular)?;

    let (xtx, xtb) = create_normal_equations(x, y, &scaling, k);
    let scaled = solve_matrix(xtx, &xtb, n)?;
    let coefficients = scaling.unscale(scaled);

    // Make sure the coefficients are valid
    if coefficients.iter().any(|c| !Value::is_real(c)) {
        return Err(Error::SingularMatrix { n, k });
    }

    Ok(FittedModel::new(scaling.origin, coefficients))
}

/// Maps x onto `u = (x - origin) / scale`, so that `u` lies in `[-1, 1]`.
///
/// `origin` is the midpoint of the data and `scale` half its span. Fitting on
/// `u` keeps the normal matrix well scaled no matter how large or how far from
/// zero the x values are.
struct Scaling<T: Value> {
    origin: T,
    scale: T,
}
impl<T: Value> Scaling<T> {
    /// `None` for empty data, or when the span of x is not finite.
    fn from_data(x: &[T]) -> Option<Self> {
        let (min, max) = value::bounds(x.iter().copied())?;
        let span = max - min;
        if !Value::is_real(&span) {
            return None;
        }

        let two = T::one() + T::one();
        let half = span / two;
        let scale = if half > T::zero() { half } else { T::one() };
        Some(Self {
            origin: min + half,
            scale,
        })
    }

    fn normalize_x(&self, x: T) -> T {
        (x - self.origin) / self.scale
    }

    /// Coefficients in `u` become coefficients in `x - origin`: `c_j = d_j / scale^j`.
    fn unscale(&self, mut coefficients: Vec<T>) -> Vec<T> {
        let mut factor = T::one();
        for c in &mut coefficients {
            *c /= factor;
            factor *= self.scale;
        }
        coefficients
    }
}

/// Populates a row of the Vandermonde matrix: `[1, u, u², …]`.
fn fill_matrix_row<T: Value, R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
    u: T,
    mut row: MatrixViewMut<T, R, C, RS, CS>,
) {
    let mut power = T::one();
    for j in 0..row.ncols() {
        row[j] = power;
        power *= u;
    }
}

/// Turns a dataset portion into a design matrix and y-values vector.
fn create_matrix<T: Value>(
    x: &[T],
    y: &[T],
    scaling: &Scaling<T>,
    k: usize,
) -> (DMatrix<T>, DVector<T>) {
    let mut bigx = DMatrix::zeros(x.len(), k);
    let b = DVector::from_column_slice(y);

    for (row, &x) in bigx.row_iter_mut().zip(x.iter()) {
        fill_matrix_row(scaling.normalize_x(x), row);
    }

    (bigx, b)
}

/// Reduce the n by k / 1 by n into a k by k and k by 1 system.
fn invert_matrix<T: Value>(matrix: &DMatrix<T>, b: &DVector<T>) -> (DMatrix<T>, DVector<T>) {
    let xtx = matrix.transpose() * matrix;
    let xtb = matrix.transpose() * b;
    (xtx, xtb)
}

/// Builds `(VᵀV, Vᵀy)`.
///
/// With the `parallel` feature and a large dataset, the rows are split into
/// chunks whose partial products are computed in parallel and then summed
/// in chunk order, so the result does not depend on scheduling.
fn create_normal_equations<T: Value>(
    x: &[T],
    y: &[T],
    scaling: &Scaling<T>,
    k: usize,
) -> (DMatrix<T>, DVector<T>) {
    #[cfg(not(feature = "parallel"))]
    {
        let (m, b) = create_matrix(x, y, scaling, k);
        invert_matrix(&m, &b)
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        const MIN_ROWS_TO_PARALLEL: usize = 500_000;

        if x.len() < MIN_ROWS_TO_PARALLEL {
            let (m, b) = create_matrix(x, y, scaling, k);
            return invert_matrix(&m, &b);
        }

        let threads = rayon::current_num_threads();
        let chunk_size = (x.len() / threads).max(1);
        let partial_results: Vec<(DMatrix<T>, DVector<T>)> = x
            .par_chunks(chunk_size)
            .zip(y.par_chunks(chunk_size))
            .map(|(x, y)| {
                let (m, b) = create_matrix(x, y, scaling, k);
                invert_matrix(&m, &b)
            })
            .collect();

        // We use kahan summation here to reduce numerical error
        let mut xtx = DMatrix::<T>::zeros(k, k);
        let mut xtb = DVector::<T>::zeros(k);
        let mut xtx_c = DMatrix::<T>::zeros(k, k);
        let mut xtb_c = DVector::<T>::zeros(k);
        for (part_xtx, part_xtb) in partial_results {
            for i in 0..k {
                let y = part_xtb[i] - xtb_c[i];
                let t = xtb[i] + y;
                xtb_c[i] = (t - xtb[i]) - y;
                xtb[i] = t;

                for j in 0..k {
                    let y = part_xtx[(i, j)] - xtx_c[(i, j)];
                    let t = xtx[(i, j)] + y;
                    xtx_c[(i, j)] = (t - xtx[(i, j)]) - y;
                    xtx[(i, j)] = t;
                }
            }
        }

        (xtx, xtb)
    }
}

/// Solves the normal equations using SVD, refusing rank-deficient systems.
fn solve_matrix<T: Value>(xtx: DMatrix<T>, xtb: &DVector<T>, n: usize) -> Result<Vec<T>> {
    let k = xtx.nrows();
    let singular = Error::SingularMatrix { n, k };

    // SVD cannot handle NaN or infinite entries
    if !xtx.iter().chain(xtb.iter()).all(Value::is_real) {
        return Err(singular);
    }

    // Calculate the singular value decomposition of the matrix
    let decomp = SVD::new(xtx, true, true);

    let sigma_max = decomp.singular_values.max();
    let sigma_min = decomp.singular_values.min();
    let tolerance = T::try_cast(SINGULAR_TOLERANCE)? * sigma_max;
    if !(sigma_max > T::zero() && Value::is_real(&sigma_max)) || sigma_min <= tolerance {
        return Err(singular);
    }

    // Solve for X in `SVD * X = b`
    let big_x = decomp.solve(xtb, tolerance).map_err(|_| singular)?;
    Ok(big_x.iter().copied().collect())
}
