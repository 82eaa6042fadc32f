use serde::{Deserialize, Serialize};

use crate::errors::LatticeError;

/// The six scalar lattice constants of a unit cell.
///
/// Lengths are in the unit of the basis vectors (Å for direct space, Å⁻¹ for reciprocal
/// space), angles are in degrees. `alpha` is the angle between b and c, `beta` between
/// a and c, `gamma` between a and b.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeConstants {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl LatticeConstants {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        LatticeConstants {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// Labeled view of the constants, in the order a, b, c, α, β, γ.
    pub fn labeled(&self) -> [(&'static str, f64); 6] {
        [
            ("a", self.a),
            ("b", self.b),
            ("c", self.c),
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ]
    }

    /// Check that the constants can describe a cell: finite positive lengths and
    /// angles strictly inside (0°, 180°).
    ///
    /// Whether the three angles are mutually compatible is only known once the volume
    /// term is computed, so that is checked during construction.
    pub fn validate(&self) -> Result<(), LatticeError> {
        for (label, length) in &self.labeled()[..3] {
            if !length.is_finite() || *length <= 0.0 {
                return Err(LatticeError::InvalidParameters(format!(
                    "length {} = {} must be a finite positive number",
                    label, length
                )));
            }
        }
        for (label, angle) in &self.labeled()[3..] {
            if !angle.is_finite() || *angle <= 0.0 || *angle >= 180.0 {
                return Err(LatticeError::InvalidParameters(format!(
                    "angle {} = {}° must lie strictly between 0° and 180°",
                    label, angle
                )));
            }
        }
        Ok(())
    }

    /// Compare against `expected` constant by constant.
    ///
    /// Fails on the first constant whose absolute deviation exceeds `tolerance`,
    /// naming it, so a mismatch in γ is not reported as a generic failure.
    pub fn check_approx_eq(
        &self,
        expected: &LatticeConstants,
        tolerance: f64,
    ) -> Result<(), LatticeError> {
        for ((label, actual), (_, wanted)) in self.labeled().iter().zip(expected.labeled().iter())
        {
            let difference = (actual - wanted).abs();
            if difference.is_nan() || difference > tolerance {
                return Err(LatticeError::ConstantMismatch {
                    constant: *label,
                    expected: *wanted,
                    actual: *actual,
                    tolerance,
                });
            }
        }
        Ok(())
    }

    /// Per-constant signed deviation `self - reference`.
    pub fn deviation_from(&self, reference: &LatticeConstants) -> [(&'static str, f64); 6] {
        let mine = self.labeled();
        let theirs = reference.labeled();
        std::array::from_fn(|i| (mine[i].0, mine[i].1 - theirs[i].1))
    }
}

impl std::fmt::Display for LatticeConstants {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "a={:.6} b={:.6} c={:.6} alpha={:.5} beta={:.5} gamma={:.5}",
            self.a, self.b, self.c, self.alpha, self.beta, self.gamma
        )
    }
}
