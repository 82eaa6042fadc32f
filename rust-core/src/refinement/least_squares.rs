use log::{debug, info};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::REQUIRED_RANK;
use crate::errors::LatticeError;
use crate::lattice::lattice3d::Lattice;
use crate::lattice::lattice_construction::lattice_from_solution;
use crate::refinement::reflection::Reflection;

/// Output of the linear least-squares solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeastSquaresSolution {
    /// `[a*², b*², c*², 2a*·b*, 2a*·c*, 2b*·c*]`
    pub coefficients: [f64; 6],
    /// Sum of squared residuals |A·x − q|²
    pub residual: f64,
    /// Numerical rank of the design matrix
    pub rank: usize,
    /// Singular values of the design matrix, largest first
    pub singular_values: Vec<f64>,
}

impl LeastSquaresSolution {
    /// Whether every coefficient was resolved by the data.
    pub fn is_full_rank(&self) -> bool {
        self.rank == REQUIRED_RANK
    }
}

/// A refined lattice together with the solve it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeRefinement {
    pub lattice: Lattice,
    pub solution: LeastSquaresSolution,
}

/// Design-matrix row of a reflection: `[h², k², l², hk, hl, kl]`.
///
/// The cross terms carry no factor 2; it ends up in the solved coefficients instead
/// and is removed when the angles are decoded.
pub fn design_row(h: i32, k: i32, l: i32) -> [f64; 6] {
    let (h, k, l) = (h as f64, k as f64, l as f64);
    [h * h, k * k, l * l, h * k, h * l, k * l]
}

/// Design matrix with one row per index triple.
pub fn design_matrix(hkl: &[[i32; 3]]) -> DMatrix<f64> {
    let rows: Vec<[f64; 6]> = hkl.iter().map(|&[h, k, l]| design_row(h, k, l)).collect();
    DMatrix::from_fn(rows.len(), REQUIRED_RANK, |i, j| rows[i][j])
}

/// Solve `A·x ≈ q` in the least-squares sense through an SVD.
///
/// Singular values below `ε·max(rows, 6)·σ_max` are treated as zero, which yields the
/// minimum-norm solution for rank-deficient systems. The solution is returned whatever
/// its rank; callers decide whether it is usable.
pub fn solve_least_squares(
    hkl: &[[i32; 3]],
    q_crys_sq: &[f64],
) -> Result<LeastSquaresSolution, LatticeError> {
    if hkl.len() != q_crys_sq.len() {
        return Err(LatticeError::InvalidParameters(format!(
            "{} index triples but {} target values",
            hkl.len(),
            q_crys_sq.len()
        )));
    }
    if let Some(bad) = q_crys_sq.iter().find(|q| !q.is_finite()) {
        return Err(LatticeError::InvalidParameters(format!(
            "target value {} is not finite",
            bad
        )));
    }
    if hkl.is_empty() {
        return Ok(LeastSquaresSolution {
            coefficients: [0.0; 6],
            residual: 0.0,
            rank: 0,
            singular_values: Vec::new(),
        });
    }

    let design = design_matrix(hkl);
    let target = DVector::from_column_slice(q_crys_sq);

    let svd = design.clone().svd(true, true);
    let sigma_max = svd.singular_values.max();
    let eps = f64::EPSILON * hkl.len().max(REQUIRED_RANK) as f64 * sigma_max;
    let rank = svd.rank(eps);

    let x = svd
        .solve(&target, eps)
        .map_err(|e| LatticeError::InvalidSolution(e.to_string()))?;
    let residual = (&design * &x - &target).norm_squared();

    let mut coefficients = [0.0; 6];
    coefficients.copy_from_slice(x.as_slice());

    let solution = LeastSquaresSolution {
        coefficients,
        residual,
        rank,
        singular_values: svd.singular_values.iter().copied().collect(),
    };

    debug!("SLN {:?}", solution.coefficients);
    debug!("RES {:e}", solution.residual);
    debug!("RNK {}", solution.rank);
    debug!("SNG {:?}", solution.singular_values);

    Ok(solution)
}

/// Refine a direct-space lattice from indices and their 1/d² values.
pub fn refine_lattice_from_q(hkl: &[[i32; 3]], q_crys_sq: &[f64]) -> Result<Lattice, LatticeError> {
    refine_from_q(hkl, q_crys_sq).map(|refinement| refinement.lattice)
}

/// Refine a direct-space lattice from indexed reflections.
///
/// Needs at least six reflections whose design rows are linearly independent;
/// otherwise fails with [`LatticeError::UnderdeterminedSystem`].
pub fn refine_lattice(reflections: &[Reflection]) -> Result<Lattice, LatticeError> {
    refine_lattice_detailed(reflections).map(|refinement| refinement.lattice)
}

/// Like [`refine_lattice`], but also returns the solver diagnostics.
pub fn refine_lattice_detailed(
    reflections: &[Reflection],
) -> Result<LatticeRefinement, LatticeError> {
    let hkl: Vec<[i32; 3]> = reflections.iter().map(Reflection::hkl).collect();
    let q: Vec<f64> = reflections.iter().map(Reflection::q_crys_sq).collect();
    refine_from_q(&hkl, &q)
}

/// Refine independent reflection lists. Each entry is handled on its own; with the
/// `parallel` feature the lists are distributed over the rayon thread pool.
pub fn refine_lattices(batches: &[Vec<Reflection>]) -> Vec<Result<Lattice, LatticeError>> {
    #[cfg(feature = "parallel")]
    {
        batches.par_iter().map(|batch| refine_lattice(batch)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        batches.iter().map(|batch| refine_lattice(batch)).collect()
    }
}

fn refine_from_q(hkl: &[[i32; 3]], q_crys_sq: &[f64]) -> Result<LatticeRefinement, LatticeError> {
    let solution = solve_least_squares(hkl, q_crys_sq)?;

    if !solution.is_full_rank() {
        return Err(LatticeError::UnderdeterminedSystem {
            rank: solution.rank,
            required: REQUIRED_RANK,
        });
    }

    let lattice = lattice_from_solution(&solution.coefficients)?;
    info!(
        "Refined lattice from {} reflections: {} (residual {:e})",
        hkl.len(),
        lattice.scalar_constants(),
        solution.residual
    );

    Ok(LatticeRefinement { lattice, solution })
}
