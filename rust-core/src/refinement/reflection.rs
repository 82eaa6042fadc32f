use serde::{Deserialize, Serialize};

use crate::errors::LatticeError;

/// An indexed reflection: Miller indices (h, k, l) and the measured plane spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub h: i32,
    pub k: i32,
    pub l: i32,
    /// Multiplicity column of the input, carried along but unused by the fit.
    pub multiplicity: Option<u32>,
    pub d_spacing: f64,
}

impl Reflection {
    /// Create a reflection; `d_spacing` must be finite and positive.
    pub fn new(h: i32, k: i32, l: i32, d_spacing: f64) -> Result<Self, LatticeError> {
        if !d_spacing.is_finite() || d_spacing <= 0.0 {
            return Err(LatticeError::InvalidParameters(format!(
                "d-spacing {} of reflection ({} {} {}) must be a finite positive number",
                d_spacing, h, k, l
            )));
        }
        Ok(Reflection {
            h,
            k,
            l,
            multiplicity: None,
            d_spacing,
        })
    }

    pub fn with_multiplicity(mut self, multiplicity: u32) -> Self {
        self.multiplicity = Some(multiplicity);
        self
    }

    pub fn hkl(&self) -> [i32; 3] {
        [self.h, self.k, self.l]
    }

    /// 1/d²
    pub fn q_crys_sq(&self) -> f64 {
        1.0 / (self.d_spacing * self.d_spacing)
    }
}
