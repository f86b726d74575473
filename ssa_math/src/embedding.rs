//! Trajectory embedding and diagonal averaging
//!
//! A series `x` of length `N` embedded with window `L` gives the L×K
//! trajectory (Hankel) matrix with `K = N - L + 1` and `X[i][j] = x[i + j]`.
//! Diagonal averaging is the inverse map from any L×K matrix back to a series.

use crate::{MathError, Result};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

fn check_window(len: usize, window: usize) -> Result<()> {
    if window < 2 {
        return Err(MathError::InvalidInput(
            "Window size must be at least 2".to_string(),
        ));
    }
    if len < window {
        return Err(MathError::InsufficientData(format!(
            "Series of length {} is shorter than window size {}",
            len, window
        )));
    }
    Ok(())
}

/// Build the L×K trajectory matrix of `series` for window `L`
pub fn trajectory_matrix(series: &[f64], window: usize) -> Result<DenseMatrix<f64>> {
    check_window(series.len(), window)?;

    let k = series.len() - window + 1;
    let rows: Vec<Vec<f64>> = (0..window)
        .map(|i| series[i..i + k].to_vec())
        .collect();
    Ok(DenseMatrix::from_2d_vec(&rows)?)
}

/// Lag-covariance matrix `X·Xᵀ` of the trajectory matrix, without materializing `X`
pub fn lag_covariance(series: &[f64], window: usize) -> Result<DenseMatrix<f64>> {
    check_window(series.len(), window)?;

    let k = series.len() - window + 1;
    let mut rows = vec![vec![0.0; window]; window];
    for a in 0..window {
        for b in a..window {
            let sum: f64 = (0..k).map(|j| series[a + j] * series[b + j]).sum();
            rows[a][b] = sum;
            rows[b][a] = sum;
        }
    }
    Ok(DenseMatrix::from_2d_vec(&rows)?)
}

/// Average the anti-diagonals of an L×K matrix into a series of length `L + K - 1`
pub fn diagonal_average(matrix: &DenseMatrix<f64>) -> Vec<f64> {
    let (l, k) = matrix.shape();
    if l == 0 || k == 0 {
        return Vec::new();
    }

    let mut sums = vec![0.0; l + k - 1];
    let mut counts = vec![0usize; l + k - 1];
    for i in 0..l {
        for j in 0..k {
            sums[i + j] += *matrix.get((i, j));
            counts[i + j] += 1;
        }
    }

    sums.iter()
        .zip(counts)
        .map(|(s, c)| s / c as f64)
        .collect()
}

/// Orthogonal projection of `vector` onto the span of an orthonormal `basis`
pub fn project(basis: &[Vec<f64>], vector: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; vector.len()];
    for u in basis {
        let weight: f64 = u.iter().zip(vector).map(|(a, b)| a * b).sum();
        for (o, ui) in out.iter_mut().zip(u) {
            *o += weight * ui;
        }
    }
    out
}

/// Reconstruct `series` from the subspace spanned by `basis`
///
/// Every lagged window is projected onto the subspace, then the projected
/// trajectory matrix is diagonal-averaged back into a series of the same length.
pub fn reconstruct(series: &[f64], basis: &[Vec<f64>]) -> Result<Vec<f64>> {
    let window = match basis.first() {
        Some(u) => u.len(),
        None => {
            return Err(MathError::InvalidInput(
                "Reconstruction needs at least one basis vector".to_string(),
            ))
        }
    };
    if basis.iter().any(|u| u.len() != window) {
        return Err(MathError::InvalidInput(
            "Basis vectors must all have the window length".to_string(),
        ));
    }

    let x = trajectory_matrix(series, window)?;
    let (l, k) = x.shape();
    let mut rows = vec![vec![0.0; k]; l];
    for j in 0..k {
        let column: Vec<f64> = (0..l).map(|i| *x.get((i, j))).collect();
        for (i, value) in project(basis, &column).into_iter().enumerate() {
            rows[i][j] = value;
        }
    }

    Ok(diagonal_average(&DenseMatrix::from_2d_vec(&rows)?))
}
