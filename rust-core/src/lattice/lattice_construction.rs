use log::debug;
use nalgebra::Vector3;

use crate::config::{ANGLE_COSINE_TOLERANCE, VOLUME_TERM_TOLERANCE};
use crate::errors::LatticeError;
use crate::interfaces::Space;
use crate::lattice::lattice3d::Lattice;
use crate::lattice::lattice_constants::LatticeConstants;

// Standard lattice construction utilities

/// Create a direct-space lattice from the six scalar constants (angles in degrees).
pub fn lattice_from_scalars(
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> Result<Lattice, LatticeError> {
    lattice_from_constants(&LatticeConstants::new(a, b, c, alpha, beta, gamma), Space::Real)
}

/// Create a lattice in `space` from scalar constants using the standard triclinic setting:
/// a along x, b in the xy-plane, c completing the cell.
///
/// Fails with [`LatticeError::InvalidParameters`] for non-positive lengths or angles
/// outside (0°, 180°), and with [`LatticeError::DegenerateLattice`] when the three angles
/// cannot close a cell.
pub fn lattice_from_constants(
    constants: &LatticeConstants,
    space: Space,
) -> Result<Lattice, LatticeError> {
    constants.validate()?;

    let LatticeConstants {
        a,
        b,
        c,
        alpha,
        beta,
        gamma,
    } = *constants;
    let cos_alpha = alpha.to_radians().cos();
    let cos_beta = beta.to_radians().cos();
    let cos_gamma = gamma.to_radians().cos();
    let sin_gamma = gamma.to_radians().sin();

    let v_term_sq = 1.0 - cos_alpha * cos_alpha - cos_beta * cos_beta - cos_gamma * cos_gamma
        + 2.0 * cos_alpha * cos_beta * cos_gamma;
    // (V / abc)²; rounding can leave a tiny positive value for angles that only close flat
    if v_term_sq.is_nan() || v_term_sq < VOLUME_TERM_TOLERANCE {
        return Err(LatticeError::DegenerateLattice(format!(
            "angles alpha={}°, beta={}°, gamma={}° do not form a cell (volume term {:e})",
            alpha, beta, gamma, v_term_sq
        )));
    }
    if sin_gamma.abs() < ANGLE_COSINE_TOLERANCE {
        return Err(LatticeError::DegenerateLattice(format!(
            "gamma={}° leaves a and b collinear",
            gamma
        )));
    }
    let v_term = v_term_sq.sqrt();

    let a_vec = Vector3::new(a, 0.0, 0.0);
    let b_vec = Vector3::new(b * cos_gamma, b * sin_gamma, 0.0);
    let c_vec = Vector3::new(
        c * cos_beta,
        c * (cos_alpha - cos_gamma * cos_beta) / sin_gamma,
        c * v_term / sin_gamma,
    );

    Lattice::new(a_vec, b_vec, c_vec, space).map_err(|e| match e {
        LatticeError::InvalidGeometry(msg) => LatticeError::DegenerateLattice(msg),
        other => other,
    })
}

/// Create a direct-space lattice from explicit basis vectors
pub fn lattice_from_vectors(
    a_vec: Vector3<f64>,
    b_vec: Vector3<f64>,
    c_vec: Vector3<f64>,
) -> Result<Lattice, LatticeError> {
    Lattice::direct(a_vec, b_vec, c_vec)
}

/// Create a direct-space lattice from component slices, each of which must hold exactly
/// three values.
pub fn lattice_from_components(
    a_vec: &[f64],
    b_vec: &[f64],
    c_vec: &[f64],
) -> Result<Lattice, LatticeError> {
    let to_vector = |label: &str, components: &[f64]| match components {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(LatticeError::InvalidGeometry(format!(
            "basis vector {} has {} components, expected 3",
            label,
            components.len()
        ))),
    };
    lattice_from_vectors(
        to_vector("a", a_vec)?,
        to_vector("b", b_vec)?,
        to_vector("c", c_vec)?,
    )
}

/// Create a cubic lattice with given lattice parameter
pub fn cubic_lattice(a: f64) -> Result<Lattice, LatticeError> {
    lattice_from_scalars(a, a, a, 90.0, 90.0, 90.0)
}

/// Create a hexagonal lattice (γ = 120°) with given lattice parameters
pub fn hexagonal_lattice(a: f64, c: f64) -> Result<Lattice, LatticeError> {
    lattice_from_scalars(a, a, c, 90.0, 90.0, 120.0)
}

/// Create a tetragonal lattice with given lattice parameters
pub fn tetragonal_lattice(a: f64, c: f64) -> Result<Lattice, LatticeError> {
    lattice_from_scalars(a, a, c, 90.0, 90.0, 90.0)
}

/// Create an orthorhombic lattice with given lattice parameters
pub fn orthorhombic_lattice(a: f64, b: f64, c: f64) -> Result<Lattice, LatticeError> {
    lattice_from_scalars(a, b, c, 90.0, 90.0, 90.0)
}

/// Create the direct-space lattice described by a least-squares solution.
///
/// `solution` holds the coefficients of the reciprocal metric quadratic form
/// `[a*², b*², c*², 2a*·b*, 2a*·c*, 2b*·c*]`. The reciprocal lattice is rebuilt from
/// these and its reciprocal returned. Any coefficient set that does not decode to a
/// physical reciprocal cell fails with [`LatticeError::InvalidSolution`].
pub fn lattice_from_solution(solution: &[f64; 6]) -> Result<Lattice, LatticeError> {
    let mut lengths = [0.0; 3];
    for (i, label) in ["a*", "b*", "c*"].iter().enumerate() {
        let squared = solution[i];
        if !squared.is_finite() || squared <= 0.0 {
            return Err(LatticeError::InvalidSolution(format!(
                "squared reciprocal length {}² = {} is not positive",
                label, squared
            )));
        }
        lengths[i] = squared.sqrt();
    }
    let [a_star, b_star, c_star] = lengths;

    let gamma_star = decode_angle(solution[3], a_star, b_star, "gamma*")?;
    let beta_star = decode_angle(solution[4], a_star, c_star, "beta*")?;
    let alpha_star = decode_angle(solution[5], b_star, c_star, "alpha*")?;

    let reciprocal_constants =
        LatticeConstants::new(a_star, b_star, c_star, alpha_star, beta_star, gamma_star);
    debug!("Reciprocal constants from solution: {}", reciprocal_constants);

    let reciprocal = lattice_from_constants(&reciprocal_constants, Space::Reciprocal)
        .map_err(|e| LatticeError::InvalidSolution(e.to_string()))?;
    reciprocal
        .reciprocal()
        .map_err(|e| LatticeError::InvalidSolution(e.to_string()))
}

// cos(angle) = 0.5 * cross / (len1 * len2); the 0.5 undoes the doubled cross term.
fn decode_angle(cross: f64, len1: f64, len2: f64, label: &str) -> Result<f64, LatticeError> {
    let cos = 0.5 * cross / (len1 * len2);
    if cos.abs() < ANGLE_COSINE_TOLERANCE {
        return Ok(90.0);
    }
    let angle = cos.acos().to_degrees();
    if angle.is_nan() {
        return Err(LatticeError::InvalidSolution(format!(
            "{} has cosine {} outside [-1, 1]",
            label, cos
        )));
    }
    Ok(angle)
}
