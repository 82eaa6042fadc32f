//! Crystal lattice geometry and least-squares lattice refinement
//!
//! This library models a crystallographic unit cell by its three basis vectors, converts
//! between direct and reciprocal space, builds the B-matrix, and recovers unit-cell
//! parameters from indexed reflections (h, k, l) and their measured d-spacings.

pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod io;
pub mod lattice;
pub mod refinement;

pub use errors::LatticeError;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, LatticeError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
