//! Eigen-decomposition of symmetric matrices
//!
//! Wraps smartcore's symmetric EVD (Householder tridiagonalization followed
//! by implicit QL) and orders the eigenpairs by descending eigenvalue.

use crate::{MathError, Result};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linalg::traits::evd::EVDDecomposable;

/// Eigenvalues and eigenvectors of a symmetric matrix, sorted by descending eigenvalue
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricEigen {
    values: Vec<f64>,
    vectors: Vec<Vec<f64>>,
}

impl SymmetricEigen {
    /// Eigenvalues in descending order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Unit eigenvectors, `vectors()[i]` belongs to `values()[i]`
    pub fn vectors(&self) -> &[Vec<f64>] {
        &self.vectors
    }

    /// The first `rank` eigenvectors
    pub fn leading(&self, rank: usize) -> Vec<Vec<f64>> {
        self.vectors.iter().take(rank).cloned().collect()
    }

    /// Number of eigenvalues above `tolerance` times the largest one
    ///
    /// Zero when the largest eigenvalue is not positive.
    pub fn numerical_rank(&self, tolerance: f64) -> usize {
        match self.values.first() {
            Some(&largest) if largest > 0.0 => {
                let cutoff = largest * tolerance;
                self.values.iter().take_while(|&&v| v > cutoff).count()
            }
            _ => 0,
        }
    }
}

/// Decompose a symmetric matrix into eigenvalues and eigenvectors
pub fn symmetric_eigen(matrix: &DenseMatrix<f64>) -> Result<SymmetricEigen> {
    let (rows, cols) = matrix.shape();
    if rows != cols || rows == 0 {
        return Err(MathError::InvalidInput(format!(
            "Eigen-decomposition needs a non-empty square matrix, got {}x{}",
            rows, cols
        )));
    }

    let n = rows;
    let mut scale = 0.0_f64;
    for i in 0..n {
        for j in 0..n {
            let value = *matrix.get((i, j));
            if !value.is_finite() {
                return Err(MathError::InvalidInput(
                    "Matrix contains non-finite values".to_string(),
                ));
            }
            scale = scale.max(value.abs());
        }
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if (matrix.get((i, j)) - matrix.get((j, i))).abs() > scale * 1e-12 {
                return Err(MathError::InvalidInput(
                    "Eigen-decomposition needs a symmetric matrix".to_string(),
                ));
            }
        }
    }

    let evd = matrix.evd(true)?;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| evd.d[j].total_cmp(&evd.d[i]));

    let values = order.iter().map(|&i| evd.d[i]).collect();
    let vectors = order
        .iter()
        .map(|&i| (0..n).map(|row| *evd.V.get((row, i))).collect())
        .collect();

    Ok(SymmetricEigen { values, vectors })
}
