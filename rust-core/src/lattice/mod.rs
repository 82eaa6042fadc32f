// Lattice module: unit-cell geometry in direct and reciprocal space
// This module provides the lattice value type, its scalar constants, the B-matrix and the lattice builders

// ======================== MODULE DECLARATIONS ========================
pub mod base_matrix;
pub mod lattice3d;
pub mod lattice_constants;
pub mod lattice_construction;

// Test modules
mod _tests_base_matrix;
mod _tests_lattice_construction;

// ======================== LATTICE STRUCTURE ========================
pub use lattice3d::Lattice;        // struct - immutable 3D lattice (basis vectors + space)
// Lattice impl methods:
//   new(a, b, c: Vector3<f64>, space: Space) -> Result<Self>  - validating constructor, snaps near-zero components
//   direct(a, b, c: Vector3<f64>) -> Result<Self>              - direct-space constructor
//   volume(&self) -> f64                                       - signed volume a·(b×c)
//   lattice_parameters(&self) -> (f64, f64, f64)               - lengths a, b, c
//   lattice_angles(&self) -> (f64, f64, f64)                   - angles α, β, γ in degrees
//   scalar_constants(&self) -> LatticeConstants                - all six constants
//   reciprocal(&self) -> Result<Lattice>                       - reciprocal lattice (no 2π factor)
//   b_matrix(&self) -> BMatrix                                 - crystallographic B-matrix
//   q_crys_sq(&self, h, k, l) -> f64                           - 1/d² of a reflection
//   d_spacing(&self, h, k, l) -> f64                           - d-spacing of a reflection
//   check_approx_eq(&self, other, tol) -> Result<()>           - labeled comparison of scalar constants
//   metric_tensor(&self) -> Matrix3<f64>                       - G = A^T * A

// ======================== SCALAR CONSTANTS ========================
pub use lattice_constants::LatticeConstants; // struct - (a, b, c, α, β, γ) with validation and labeled comparison

// ======================== B-MATRIX ========================
pub use base_matrix::BMatrix;      // struct - maps (h, k, l) to Cartesian reciprocal vectors

// ======================== LATTICE CONSTRUCTION UTILITIES ========================
pub use lattice_construction::{
    lattice_from_scalars,           // fn(a, b, c, α, β, γ) -> Result<Lattice> - triclinic construction, angles in degrees
    lattice_from_constants,         // fn(&LatticeConstants, Space) -> Result<Lattice> - same, in a chosen space
    lattice_from_vectors,           // fn(a, b, c: Vector3<f64>) -> Result<Lattice> - explicit basis vectors
    lattice_from_components,        // fn(&[f64], &[f64], &[f64]) -> Result<Lattice> - basis vectors from slices
    lattice_from_solution,          // fn(&[f64; 6]) -> Result<Lattice> - decodes a least-squares solution
    cubic_lattice,                  // fn(a) -> Result<Lattice>
    hexagonal_lattice,              // fn(a, c) -> Result<Lattice>
    tetragonal_lattice,             // fn(a, c) -> Result<Lattice>
    orthorhombic_lattice,           // fn(a, b, c) -> Result<Lattice>
};
