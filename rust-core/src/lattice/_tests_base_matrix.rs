#[cfg(test)]
mod _tests_base_matrix {
    use super::super::lattice_construction::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::Matrix3;

    const TOL: f64 = 1e-10;

    // |h a* + k b* + l c*|², computed without the B-matrix
    fn q_from_reciprocal_vectors(lattice: &crate::lattice::Lattice, hkl: [i32; 3]) -> f64 {
        let [a_star, b_star, c_star] = lattice.reciprocal().unwrap().vectors();
        (a_star * hkl[0] as f64 + b_star * hkl[1] as f64 + c_star * hkl[2] as f64).norm_squared()
    }

    #[test]
    fn test_b_matrix_cubic_is_scaled_identity() {
        let lattice = cubic_lattice(1.0).unwrap();
        let b = lattice.b_matrix();
        assert_relative_eq!(*b.matrix(), Matrix3::identity(), epsilon = TOL);

        let lattice = cubic_lattice(4.0).unwrap();
        assert_relative_eq!(
            *lattice.b_matrix().matrix(),
            Matrix3::identity() * 0.25,
            epsilon = TOL
        );
    }

    #[test]
    fn test_b_matrix_is_upper_triangular() {
        let lattice = lattice_from_scalars(1.0, 2.0, 3.0, 60.0, 70.0, 80.0).unwrap();
        let b = *lattice.b_matrix().matrix();
        assert_eq!(b[(1, 0)], 0.0);
        assert_eq!(b[(2, 0)], 0.0);
        assert_eq!(b[(2, 1)], 0.0);
        assert_abs_diff_eq!(b[(2, 2)], 1.0 / 3.0, epsilon = TOL);
    }

    #[test]
    fn test_b_matrix_reproduces_reciprocal_metric() {
        let lattice = lattice_from_scalars(6.6, 6.8, 7.5, 106.1, 106.5, 111.6).unwrap();
        let b = *lattice.b_matrix().matrix();
        let reciprocal_metric = lattice.reciprocal().unwrap().metric_tensor();
        assert_relative_eq!(b.transpose() * b, reciprocal_metric, epsilon = 1e-10);
    }

    #[test]
    fn test_q_crys_sq_matches_reciprocal_vectors() {
        let lattice = lattice_from_scalars(3.0, 4.0, 5.0, 80.0, 95.0, 105.0).unwrap();
        for hkl in [[1, 0, 0], [0, 1, 0], [1, 1, 0], [1, -1, 2], [2, 3, -1]] {
            assert_relative_eq!(
                lattice.q_crys_sq(hkl[0], hkl[1], hkl[2]),
                q_from_reciprocal_vectors(&lattice, hkl),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_d_spacing_orthorhombic() {
        let lattice = orthorhombic_lattice(2.0, 3.0, 4.0).unwrap();
        assert_abs_diff_eq!(lattice.d_spacing(1, 0, 0), 2.0, epsilon = TOL);
        assert_abs_diff_eq!(lattice.d_spacing(0, 1, 0), 3.0, epsilon = TOL);
        assert_abs_diff_eq!(lattice.d_spacing(0, 0, 2), 2.0, epsilon = TOL);
        // 1/d² = 1/4 + 1/9
        let expected = 1.0 / (0.25_f64 + 1.0 / 9.0).sqrt();
        assert_abs_diff_eq!(lattice.d_spacing(1, 1, 0), expected, epsilon = TOL);
    }

    #[test]
    fn test_d_spacing_hexagonal() {
        let (a, c) = (2.5_f64, 4.0_f64);
        let lattice = hexagonal_lattice(a, c).unwrap();
        // 1/d² = 4/3 (h² + hk + k²)/a² + l²/c²
        let q = 4.0 / 3.0 * (1.0 + 1.0 + 1.0) / (a * a) + 1.0 / (c * c);
        assert_relative_eq!(lattice.q_crys_sq(1, 1, 1), q, epsilon = 1e-12);
    }

    #[test]
    fn test_d_spacing_of_origin_is_infinite() {
        let lattice = cubic_lattice(1.0).unwrap();
        assert!(lattice.d_spacing(0, 0, 0).is_infinite());
    }
}
