// Refinement module: recovers unit-cell parameters from indexed reflections
// The quadratic form 1/d² = hkl·G*·hkl is linear in the six independent entries of the reciprocal metric G*,
// so the fit is a single linear least-squares solve

// ======================== MODULE DECLARATIONS ========================
pub mod least_squares;
pub mod reflection;


// ======================== REFLECTIONS ========================
pub use reflection::Reflection;     // struct - (h, k, l, d_spacing) with optional multiplicity

// ======================== LEAST-SQUARES REFINEMENT ========================
pub use least_squares::{
    LatticeRefinement,              // struct - refined lattice plus solver diagnostics
    LeastSquaresSolution,           // struct - coefficients, residual, rank, singular values
    design_matrix,                  // fn(&[[i32; 3]]) -> DMatrix<f64> - one row per reflection
    design_row,                     // fn(h, k, l) -> [f64; 6] - [h², k², l², hk, hl, kl]
    refine_lattice,                 // fn(&[Reflection]) -> Result<Lattice>
    refine_lattice_detailed,        // fn(&[Reflection]) -> Result<LatticeRefinement>
    refine_lattice_from_q,          // fn(&[[i32; 3]], &[f64]) -> Result<Lattice> - targets given as 1/d²
    refine_lattices,                // fn(&[Vec<Reflection>]) -> Vec<Result<Lattice>> - independent batches
    solve_least_squares,            // fn(&[[i32; 3]], &[f64]) -> Result<LeastSquaresSolution>
};
