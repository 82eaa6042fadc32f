#[cfg(test)]
mod _tests_lattice_construction {
    use super::super::lattice_constants::LatticeConstants;
    use super::super::lattice_construction::*;
    use crate::config::DEFAULT_COMPARISON_TOLERANCE;
    use crate::errors::LatticeError;
    use crate::interfaces::Space;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    const TOL: f64 = DEFAULT_COMPARISON_TOLERANCE;

    fn assert_vec_eq(actual: &Vector3<f64>, expected: [f64; 3]) {
        for i in 0..3 {
            assert_abs_diff_eq!(actual[i], expected[i], epsilon = TOL);
        }
    }

    // ==================== Conventional cells ====================

    #[test]
    fn test_cubic_unit_vectors() {
        let lattice = lattice_from_scalars(1.0, 1.0, 1.0, 90.0, 90.0, 90.0).unwrap();
        assert_eq!(*lattice.a_vec(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(*lattice.b_vec(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(*lattice.c_vec(), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(lattice.space(), Space::Real);
    }

    #[test]
    fn test_cubic_matches_scalars() {
        let cubic = cubic_lattice(3.5).unwrap();
        let scalars = lattice_from_scalars(3.5, 3.5, 3.5, 90.0, 90.0, 90.0).unwrap();
        assert_eq!(cubic, scalars);
    }

    #[test]
    fn test_hexagonal_shape() {
        let (a, c) = (1.0, 3.0);
        let lattice = hexagonal_lattice(a, c).unwrap();

        assert_vec_eq(lattice.a_vec(), [a, 0.0, 0.0]);
        assert_vec_eq(lattice.c_vec(), [0.0, 0.0, c]);
        assert_abs_diff_eq!(lattice.b_vec()[2], 0.0, epsilon = TOL);
        assert_abs_diff_eq!(lattice.b_vec().norm(), a, epsilon = TOL);

        let constants = lattice.scalar_constants();
        assert_abs_diff_eq!(constants.gamma, 120.0, epsilon = TOL);
        assert_eq!(constants.alpha, 90.0);
        assert_eq!(constants.beta, 90.0);
    }

    #[test]
    fn test_tetragonal_and_orthorhombic() {
        let tetragonal = tetragonal_lattice(2.0, 5.0).unwrap();
        assert_vec_eq(tetragonal.b_vec(), [0.0, 2.0, 0.0]);
        assert_vec_eq(tetragonal.c_vec(), [0.0, 0.0, 5.0]);

        let orthorhombic = orthorhombic_lattice(2.0, 3.0, 4.0).unwrap();
        assert_abs_diff_eq!(orthorhombic.volume(), 24.0, epsilon = TOL);
    }

    #[test]
    fn test_triclinic_vector_lengths() {
        let lattice = lattice_from_scalars(1.0, 2.0, 3.0, 60.0, 70.0, 80.0).unwrap();
        assert_vec_eq(lattice.a_vec(), [1.0, 0.0, 0.0]);
        assert_abs_diff_eq!(lattice.b_vec().norm_squared(), 4.0, epsilon = TOL);
        assert_abs_diff_eq!(lattice.c_vec().norm_squared(), 9.0, epsilon = TOL);
        assert!(lattice.volume() > 0.0);
    }

    #[test]
    fn test_constants_in_reciprocal_space() {
        let constants = LatticeConstants::new(0.5, 0.5, 0.25, 90.0, 90.0, 90.0);
        let lattice = lattice_from_constants(&constants, Space::Reciprocal).unwrap();
        assert_eq!(lattice.space(), Space::Reciprocal);
        let direct = lattice.reciprocal().unwrap();
        assert_eq!(direct.space(), Space::Real);
        assert_abs_diff_eq!(direct.scalar_constants().c, 4.0, epsilon = TOL);
    }

    // ==================== Invalid parameters ====================

    #[test]
    fn test_zero_angle_rejected() {
        let result = lattice_from_scalars(1.0, 1.0, 1.0, 0.0, 90.0, 90.0);
        assert!(matches!(
            result,
            Err(LatticeError::InvalidParameters(_)) | Err(LatticeError::DegenerateLattice(_))
        ));
    }

    #[test]
    fn test_angle_upper_bound_rejected() {
        for gamma in [180.0, 200.0] {
            let result = lattice_from_scalars(1.0, 1.0, 1.0, 90.0, 90.0, gamma);
            assert!(matches!(result, Err(LatticeError::InvalidParameters(_))));
        }
    }

    #[test]
    fn test_non_positive_lengths_rejected() {
        assert!(matches!(
            lattice_from_scalars(0.0, 1.0, 1.0, 90.0, 90.0, 90.0),
            Err(LatticeError::InvalidParameters(_))
        ));
        assert!(matches!(
            lattice_from_scalars(1.0, -2.0, 1.0, 90.0, 90.0, 90.0),
            Err(LatticeError::InvalidParameters(_))
        ));
        assert!(matches!(
            cubic_lattice(f64::NAN),
            Err(LatticeError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_impossible_angle_combination() {
        // α + β < γ cannot close a cell
        let result = lattice_from_scalars(1.0, 1.0, 1.0, 30.0, 30.0, 120.0);
        assert!(matches!(result, Err(LatticeError::DegenerateLattice(_))));
    }

    #[test]
    fn test_flat_angle_combination() {
        // α = β + γ closes only a flat cell; rounding may leave a tiny positive volume term
        for (a, alpha, beta, gamma) in [(20.0, 90.0, 40.0, 50.0), (1.0, 150.0, 90.0, 120.0)] {
            let result = lattice_from_scalars(a, a, a, alpha, beta, gamma);
            assert!(
                matches!(result, Err(LatticeError::DegenerateLattice(_))),
                "({}, {}, {}) should be degenerate, got {:?}",
                alpha,
                beta,
                gamma,
                result
            );
        }
    }

    // ==================== Vector construction ====================

    #[test]
    fn test_from_vectors_pass_through() {
        let lattice = lattice_from_vectors(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.5, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 2.0),
        )
        .unwrap();
        assert_abs_diff_eq!(lattice.volume(), 2.0, epsilon = TOL);
    }

    #[test]
    fn test_from_components_requires_three_values() {
        let ok = lattice_from_components(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]);
        assert!(ok.is_ok());

        let short = lattice_from_components(&[1.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]);
        assert!(matches!(short, Err(LatticeError::InvalidGeometry(_))));

        let empty = lattice_from_components(&[1.0, 0.0, 0.0], &[], &[0.0, 0.0, 1.0]);
        assert!(matches!(empty, Err(LatticeError::InvalidGeometry(_))));
    }

    // ==================== Least-squares solutions ====================

    #[test]
    fn test_from_solution_cubic() {
        // a* = 1/a for a cubic cell
        let a: f64 = 2.0;
        let q = 1.0 / (a * a);
        let lattice = lattice_from_solution(&[q, q, q, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(lattice.space(), Space::Real);
        lattice
            .check_approx_eq(&cubic_lattice(a).unwrap(), TOL)
            .unwrap();
    }

    #[test]
    fn test_from_solution_triclinic() {
        let expected = lattice_from_scalars(3.0, 4.0, 5.0, 80.0, 95.0, 105.0).unwrap();
        let metric = expected.reciprocal().unwrap().metric_tensor();
        let solution = [
            metric[(0, 0)],
            metric[(1, 1)],
            metric[(2, 2)],
            2.0 * metric[(0, 1)],
            2.0 * metric[(0, 2)],
            2.0 * metric[(1, 2)],
        ];
        let lattice = lattice_from_solution(&solution).unwrap();
        lattice.check_approx_eq(&expected, TOL).unwrap();
    }

    #[test]
    fn test_from_solution_rejects_flat_reciprocal_cell() {
        // Unit reciprocal lengths with γ* = 50°, β* = 40°, α* = 90° close no cell
        let solution = [
            1.0,
            1.0,
            1.0,
            2.0 * 50f64.to_radians().cos(),
            2.0 * 40f64.to_radians().cos(),
            0.0,
        ];
        let result = lattice_from_solution(&solution);
        assert!(matches!(result, Err(LatticeError::InvalidSolution(_))));
    }

    #[test]
    fn test_from_solution_rejects_negative_length() {
        let result = lattice_from_solution(&[1.0, -1.0, 1.0, 0.0, 0.0, 0.0]);
        assert!(matches!(result, Err(LatticeError::InvalidSolution(_))));
    }

    #[test]
    fn test_from_solution_rejects_impossible_angle() {
        // |cos γ*| = 0.5 * 4 / 1 = 2
        let result = lattice_from_solution(&[1.0, 1.0, 1.0, 4.0, 0.0, 0.0]);
        assert!(matches!(result, Err(LatticeError::InvalidSolution(_))));
    }
}
