use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::{ANGLE_COSINE_TOLERANCE, VOLUME_TOLERANCE, ZERO_COMPONENT_TOLERANCE};
use crate::errors::LatticeError;
use crate::interfaces::Space;
use crate::lattice::base_matrix::BMatrix;
use crate::lattice::lattice_constants::LatticeConstants;

/// A 3D lattice given by its three basis vectors.
///
/// A `Lattice` is only ever created through a validating constructor and never mutated
/// afterwards; the reciprocal lattice and any rebuilt lattice are new values. Lattice
/// constants are derived from the vectors on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLattice")]
pub struct Lattice {
    a_vec: Vector3<f64>,
    b_vec: Vector3<f64>,
    c_vec: Vector3<f64>,
    space: Space,
}

/// Unvalidated serialized form, checked through [`Lattice::new`] on deserialization.
#[derive(Deserialize)]
struct RawLattice {
    a_vec: Vector3<f64>,
    b_vec: Vector3<f64>,
    c_vec: Vector3<f64>,
    space: Space,
}

impl TryFrom<RawLattice> for Lattice {
    type Error = LatticeError;

    fn try_from(raw: RawLattice) -> Result<Self, Self::Error> {
        Lattice::new(raw.a_vec, raw.b_vec, raw.c_vec, raw.space)
    }
}

impl Lattice {
    /// Construct a lattice from three basis vectors living in `space`.
    ///
    /// Components within [`ZERO_COMPONENT_TOLERANCE`] of zero are snapped to zero. Fails
    /// with [`LatticeError::InvalidGeometry`] for non-finite components or when the
    /// vectors are coplanar (normalized volume below [`VOLUME_TOLERANCE`]).
    pub fn new(
        a_vec: Vector3<f64>,
        b_vec: Vector3<f64>,
        c_vec: Vector3<f64>,
        space: Space,
    ) -> Result<Self, LatticeError> {
        for (label, v) in [("a", &a_vec), ("b", &b_vec), ("c", &c_vec)] {
            if v.iter().any(|x| !x.is_finite()) {
                return Err(LatticeError::InvalidGeometry(format!(
                    "basis vector {} = [{}, {}, {}] has non-finite components",
                    label, v[0], v[1], v[2]
                )));
            }
        }

        let lattice = Lattice {
            a_vec: snap_to_zero(a_vec),
            b_vec: snap_to_zero(b_vec),
            c_vec: snap_to_zero(c_vec),
            space,
        };

        let normalized = lattice.normalized_volume();
        if normalized.is_nan() || normalized.abs() < VOLUME_TOLERANCE {
            return Err(LatticeError::InvalidGeometry(format!(
                "basis vectors are coplanar or zero: volume {:e}, normalized volume {:e} is below {:e}",
                lattice.volume(),
                normalized,
                VOLUME_TOLERANCE
            )));
        }

        Ok(lattice)
    }

    /// Construct a direct-space lattice from three basis vectors.
    pub fn direct(
        a_vec: Vector3<f64>,
        b_vec: Vector3<f64>,
        c_vec: Vector3<f64>,
    ) -> Result<Self, LatticeError> {
        Self::new(a_vec, b_vec, c_vec, Space::Real)
    }

    /// Signed cell volume a·(b×c). Negative for a left-handed basis.
    pub fn volume(&self) -> f64 {
        self.a_vec.dot(&self.b_vec.cross(&self.c_vec))
    }

    /// Signed volume divided by |a||b||c|; scale free, so the degeneracy test does not
    /// depend on cell size. NaN when a basis vector has zero length.
    pub fn normalized_volume(&self) -> f64 {
        self.volume() / (self.a_vec.norm() * self.b_vec.norm() * self.c_vec.norm())
    }

    /// Get lattice parameters: a, b, c (lengths)
    pub fn lattice_parameters(&self) -> (f64, f64, f64) {
        (self.a_vec.norm(), self.b_vec.norm(), self.c_vec.norm())
    }

    /// Get lattice angles: α, β, γ (in degrees)
    pub fn lattice_angles(&self) -> (f64, f64, f64) {
        (
            angle_degrees(&self.b_vec, &self.c_vec),
            angle_degrees(&self.a_vec, &self.c_vec),
            angle_degrees(&self.a_vec, &self.b_vec),
        )
    }

    /// The six scalar lattice constants (a, b, c, α, β, γ).
    pub fn scalar_constants(&self) -> LatticeConstants {
        let (a, b, c) = self.lattice_parameters();
        let (alpha, beta, gamma) = self.lattice_angles();
        LatticeConstants::new(a, b, c, alpha, beta, gamma)
    }

    /// The reciprocal lattice a* = (b×c)/V, b* = (c×a)/V, c* = (a×b)/V.
    ///
    /// Crystallographic convention, no 2π factor, so a*·a = 1. Taking the reciprocal twice
    /// gives back the same cell.
    pub fn reciprocal(&self) -> Result<Lattice, LatticeError> {
        let normalized = self.normalized_volume();
        if normalized.is_nan() || normalized.abs() < VOLUME_TOLERANCE {
            return Err(LatticeError::DegenerateLattice(format!(
                "cannot invert a cell of volume {:e} (normalized {:e})",
                self.volume(),
                normalized
            )));
        }
        let [a_star, b_star, c_star] = self.reciprocal_vectors();
        Lattice::new(a_star, b_star, c_star, self.space.dual()).map_err(|e| match e {
            LatticeError::InvalidGeometry(msg) => LatticeError::DegenerateLattice(msg),
            other => other,
        })
    }

    /// Crystallographic B-matrix mapping (h, k, l) to a Cartesian reciprocal vector.
    pub fn b_matrix(&self) -> BMatrix {
        BMatrix::from_lattice(self)
    }

    /// Squared length of the reciprocal vector of (h, k, l), i.e. 1/d².
    pub fn q_crys_sq(&self, h: i32, k: i32, l: i32) -> f64 {
        self.b_matrix().q_crys_sq(h, k, l)
    }

    /// Plane spacing d of (h, k, l). Infinite for (0, 0, 0).
    pub fn d_spacing(&self, h: i32, k: i32, l: i32) -> f64 {
        self.b_matrix().d_spacing(h, k, l)
    }

    /// Compare scalar constants against `other`, naming the first constant that differs
    /// by more than `tolerance`.
    ///
    /// Raw vectors are not compared since they depend on orientation and handedness.
    pub fn check_approx_eq(&self, other: &Lattice, tolerance: f64) -> Result<(), LatticeError> {
        self.scalar_constants()
            .check_approx_eq(&other.scalar_constants(), tolerance)
    }

    /// Boolean form of [`Lattice::check_approx_eq`].
    pub fn approx_eq(&self, other: &Lattice, tolerance: f64) -> bool {
        self.check_approx_eq(other, tolerance).is_ok()
    }

    /// Metric tensor G = A^T * A, with the basis vectors as the columns of A.
    pub fn metric_tensor(&self) -> Matrix3<f64> {
        let basis = self.basis_matrix();
        basis.transpose() * basis
    }

    /// Basis vectors as the columns of a matrix.
    pub fn basis_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&[self.a_vec, self.b_vec, self.c_vec])
    }

    /// Get the basis vectors as an array [a, b, c]
    pub fn vectors(&self) -> [Vector3<f64>; 3] {
        [self.a_vec, self.b_vec, self.c_vec]
    }

    pub fn a_vec(&self) -> &Vector3<f64> {
        &self.a_vec
    }

    pub fn b_vec(&self) -> &Vector3<f64> {
        &self.b_vec
    }

    pub fn c_vec(&self) -> &Vector3<f64> {
        &self.c_vec
    }

    /// Whether the vectors are direct-space or reciprocal-space vectors.
    pub fn space(&self) -> Space {
        self.space
    }

    // Constructor guarantees a non-zero volume, so this is always defined.
    pub(crate) fn reciprocal_vectors(&self) -> [Vector3<f64>; 3] {
        let volume = self.volume();
        [
            self.b_vec.cross(&self.c_vec) / volume,
            self.c_vec.cross(&self.a_vec) / volume,
            self.a_vec.cross(&self.b_vec) / volume,
        ]
    }
}

/// Angle between two vectors in degrees. A cosine within [`ANGLE_COSINE_TOLERANCE`] of
/// zero is reported as exactly 90°.
pub(crate) fn angle_degrees(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    let cos = u.dot(v) / (u.norm() * v.norm());
    if cos.abs() < ANGLE_COSINE_TOLERANCE {
        return 90.0;
    }
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

fn snap_to_zero(v: Vector3<f64>) -> Vector3<f64> {
    v.map(|x| if x.abs() < ZERO_COMPONENT_TOLERANCE { 0.0 } else { x })
}
