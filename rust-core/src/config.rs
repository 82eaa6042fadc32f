// Constants

// Tolerances
pub const ZERO_COMPONENT_TOLERANCE: f64 = 1e-8; // Vector components below this are snapped to 0
pub const VOLUME_TOLERANCE: f64 = 1e-10; // Cells with |V| / (|a||b||c|) below this are degenerate
pub const VOLUME_TERM_TOLERANCE: f64 = 1e-10; // (V / abc)² from three angles below this cannot close a cell
pub const ANGLE_COSINE_TOLERANCE: f64 = 1e-10; // |cos| below this is reported as exactly 90°
pub const DEFAULT_COMPARISON_TOLERANCE: f64 = 1e-5; // Absolute tolerance for constant comparisons

// Least squares
pub const REQUIRED_RANK: usize = 6; // Independent terms of the reciprocal metric quadratic form
