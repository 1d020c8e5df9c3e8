//! Dense linear-algebra kernels over row-major buffers.

use nalgebra::{DMatrix, DMatrixView, DMatrixViewMut, SymmetricEigen};

use crate::error::KernelError;

/// The dense linear-algebra capabilities the integrators rely on.
///
/// All matrices are row-major slices. For the products, `a` is `m × p`, `b`
/// is `p × n` and `c` is `m × n`.
pub trait LinearAlgebra {
    /// `c = a·b`.
    fn multiply(&self, a: &[f64], b: &[f64], c: &mut [f64], m: usize, p: usize, n: usize);

    /// `c += a·b`.
    fn multiply_add(&self, a: &[f64], b: &[f64], c: &mut [f64], m: usize, p: usize, n: usize);

    /// Decompose the symmetric `n × n` matrix `a` as `U·diag(Λ)·Uᵗ`.
    ///
    /// Returns `(U, Λ)`: `U` row-major with column `k` the eigenvector of
    /// `Λ[k]`, and `Uᵗ·U = I` to working precision.
    fn symmetric_eigen(&self, a: &[f64], n: usize) -> Result<(Vec<f64>, Vec<f64>), KernelError>;
}

/// [`LinearAlgebra`] backed by `nalgebra`.
#[derive(Clone, Copy, Debug)]
pub struct Nalgebra {
    /// Convergence threshold of the symmetric QR iteration
    pub eps: f64,
    /// Iteration cap of the symmetric QR iteration (0 = unbounded)
    pub max_iterations: usize,
}

impl Default for Nalgebra {
    fn default() -> Self {
        Self {
            eps: f64::EPSILON,
            max_iterations: 100_000,
        }
    }
}

impl Nalgebra {
    pub fn with_limits(eps: f64, max_iterations: usize) -> Self {
        Self {
            eps,
            max_iterations,
        }
    }

    fn gemm(&self, a: &[f64], b: &[f64], c: &mut [f64], dims: (usize, usize, usize), beta: f64) {
        let (m, p, n) = dims;
        assert_eq!(a.len(), m * p, "left operand must be {m}x{p}");
        assert_eq!(b.len(), p * n, "right operand must be {p}x{n}");
        assert_eq!(c.len(), m * n, "output must be {m}x{n}");

        // A row-major buffer read as column-major is the transpose, so the
        // product is formed as cᵗ = bᵗ·aᵗ without copying.
        let at = DMatrixView::from_slice(a, p, m);
        let bt = DMatrixView::from_slice(b, n, p);
        let mut ct = DMatrixViewMut::from_slice(c, n, m);
        ct.gemm(1.0, &bt, &at, beta);
    }
}

impl LinearAlgebra for Nalgebra {
    fn multiply(&self, a: &[f64], b: &[f64], c: &mut [f64], m: usize, p: usize, n: usize) {
        self.gemm(a, b, c, (m, p, n), 0.0);
    }

    fn multiply_add(&self, a: &[f64], b: &[f64], c: &mut [f64], m: usize, p: usize, n: usize) {
        self.gemm(a, b, c, (m, p, n), 1.0);
    }

    fn symmetric_eigen(&self, a: &[f64], n: usize) -> Result<(Vec<f64>, Vec<f64>), KernelError> {
        assert_eq!(a.len(), n * n, "matrix must be {n}x{n}");

        let matrix = DMatrix::from_row_slice(n, n, a);
        let eigen = SymmetricEigen::try_new(matrix, self.eps, self.max_iterations)
            .ok_or(KernelError::NotConverged { size: n })?;

        let mut u = vec![0.0; n * n];
        for i in 0..n {
            for k in 0..n {
                u[i * n + k] = eigen.eigenvectors[(i, k)];
            }
        }
        Ok((u, eigen.eigenvalues.as_slice().to_vec()))
    }
}
