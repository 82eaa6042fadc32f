use thiserror::Error;

/// Errors raised by lattice construction, refinement and reflection parsing.
#[derive(Error, Debug)]
pub enum LatticeError {
    #[error("invalid lattice parameters: {0}")]
    InvalidParameters(String),

    #[error("invalid lattice geometry: {0}")]
    InvalidGeometry(String),

    #[error("degenerate lattice: {0}")]
    DegenerateLattice(String),

    #[error("underdetermined system: least-squares rank is {rank}, {required} independent reflections are required")]
    UnderdeterminedSystem { rank: usize, required: usize },

    #[error("least-squares solution does not describe a lattice: {0}")]
    InvalidSolution(String),

    #[error("no usable reflections: {0}")]
    NoUsableData(String),

    #[error("lattice constant {constant} differs: expected {expected}, got {actual} (tolerance {tolerance})")]
    ConstantMismatch {
        constant: &'static str,
        expected: f64,
        actual: f64,
        tolerance: f64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
