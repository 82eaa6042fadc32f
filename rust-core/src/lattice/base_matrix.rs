use nalgebra::{Matrix3, Vector3};

use crate::lattice::lattice3d::{angle_degrees, Lattice};

/// The crystallographic B-matrix of a lattice (Busing & Levy orthogonalization).
///
/// ```text
/// B = [ a*   b*·cosγ*   c*·cosβ*       ]
///     [ 0    b*·sinγ*  -c*·sinβ*·cosα  ]
///     [ 0    0          1/c            ]
/// ```
///
/// Starred quantities are reciprocal-lattice constants, α and c belong to the direct
/// lattice. For an index triple h, |B·h|² = 1/d².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BMatrix {
    matrix: Matrix3<f64>,
}

impl BMatrix {
    /// Build the B-matrix of a direct-space lattice.
    pub fn from_lattice(lattice: &Lattice) -> Self {
        let [a_star_vec, b_star_vec, c_star_vec] = lattice.reciprocal_vectors();
        let a_star = a_star_vec.norm();
        let b_star = b_star_vec.norm();
        let c_star = c_star_vec.norm();
        let beta_star = angle_degrees(&a_star_vec, &c_star_vec).to_radians();
        let gamma_star = angle_degrees(&a_star_vec, &b_star_vec).to_radians();

        let alpha = angle_degrees(lattice.b_vec(), lattice.c_vec()).to_radians();
        let c = lattice.c_vec().norm();

        let matrix = Matrix3::new(
            a_star,
            b_star * gamma_star.cos(),
            c_star * beta_star.cos(),
            0.0,
            b_star * gamma_star.sin(),
            -c_star * beta_star.sin() * alpha.cos(),
            0.0,
            0.0,
            1.0 / c,
        );

        BMatrix { matrix }
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Cartesian reciprocal-space vector of the index triple (h, k, l).
    pub fn index_to_cartesian(&self, h: i32, k: i32, l: i32) -> Vector3<f64> {
        self.matrix * Vector3::new(h as f64, k as f64, l as f64)
    }

    /// 1/d² of the (h, k, l) planes.
    pub fn q_crys_sq(&self, h: i32, k: i32, l: i32) -> f64 {
        self.index_to_cartesian(h, k, l).norm_squared()
    }

    /// d-spacing of the (h, k, l) planes
    pub fn d_spacing(&self, h: i32, k: i32, l: i32) -> f64 {
        1.0 / self.q_crys_sq(h, k, l).sqrt()
    }
}
