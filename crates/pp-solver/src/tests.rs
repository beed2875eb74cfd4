//! Unit tests for pp-solver.

#[cfg(test)]
mod systems {
    use crate::{OdeSystem, StateVector};

    /// Independent exponential decay `y_i' = −rate · y_i`.
    pub struct Decay {
        pub rate: f64,
    }

    impl OdeSystem for Decay {
        fn derivatives(&self, y: &StateVector, dydt: &mut StateVector) {
            for i in 0..y.len() {
                dydt[i] = -self.rate * y[i];
            }
        }
    }

    /// Robertson's chemical kinetics problem in the first three components.
    pub struct Robertson;

    impl OdeSystem for Robertson {
        fn derivatives(&self, y: &StateVector, dydt: &mut StateVector) {
            let (a, b, c) = (y[0], y[1], y[2]);
            dydt[0] = -0.04 * a + 1.0e4 * b * c;
            dydt[1] = 0.04 * a - 1.0e4 * b * c - 3.0e7 * b * b;
            dydt[2] = 3.0e7 * b * b;
            dydt[3] = 0.0;
            dydt[4] = 0.0;
        }
    }

    /// SIR epidemic: `S + I + R` is a linear invariant.
    pub struct Sir;

    impl OdeSystem for Sir {
        fn derivatives(&self, y: &StateVector, dydt: &mut StateVector) {
            let infection = 2.0 * y[0] * y[1];
            let recovery = 0.5 * y[1];
            dydt[0] = -infection;
            dydt[1] = infection - recovery;
            dydt[2] = recovery;
            dydt[3] = 0.0;
            dydt[4] = 0.0;
        }
    }

    /// Always returns NaN.
    pub struct Poisoned;

    impl OdeSystem for Poisoned {
        fn derivatives(&self, _y: &StateVector, dydt: &mut StateVector) {
            dydt.fill(f64::NAN);
        }
    }
}

#[cfg(test)]
mod radau5 {
    use super::systems::{Decay, Poisoned, Robertson, Sir};
    use crate::{Integrator, Radau5Integrator, SolverError, StateVector, Tolerance};

    fn ones() -> StateVector {
        StateVector::from_element(1.0)
    }

    #[test]
    fn decay_matches_closed_form() {
        let tol = Tolerance::uniform(1e-8, 1e-12);
        let times = [0.0, 0.5, 1.0, 2.0];
        let sol = Radau5Integrator::default().integrate(&Decay { rate: 1.0 }, &ones(), &times, &tol).unwrap();

        assert_eq!(sol.states.len(), times.len());
        for (state, &t) in sol.states.iter().zip(&times) {
            let exact = (-t).exp();
            assert!((state[0] - exact).abs() / exact < 1e-5, "t={t}: {} vs {exact}", state[0]);
        }
    }

    #[test]
    fn first_state_is_initial_state() {
        let y0 = StateVector::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let sol = Radau5Integrator::default()
            .integrate(&Decay { rate: 0.3 }, &y0, &[2.0, 3.0], &Tolerance::default())
            .unwrap();
        assert_eq!(sol.states[0], y0);
    }

    #[test]
    fn single_time_returns_initial_state_without_work() {
        let sol = Radau5Integrator::default()
            .integrate(&Decay { rate: 1.0 }, &ones(), &[5.0], &Tolerance::default())
            .unwrap();
        assert_eq!(sol.states.len(), 1);
        assert_eq!(sol.stats.steps(), 0);
    }

    #[test]
    fn robertson_is_cheap_for_a_stiff_solver() {
        let tol = Tolerance::new(1e-6, [1e-8, 1e-12, 1e-8, 1e-8, 1e-8]);
        let y0 = StateVector::new(1.0, 0.0, 0.0, 0.0, 0.0);
        let sol = Radau5Integrator::default().integrate(&Robertson, &y0, &[0.0, 40.0], &tol).unwrap();

        let end = sol.states[1];
        assert!((end[0] - 0.7158).abs() < 2e-3, "y1(40) = {}", end[0]);
        assert!((end[2] - 0.2842).abs() < 2e-3, "y3(40) = {}", end[2]);
        assert!((end[0] + end[1] + end[2] - 1.0).abs() < 1e-10);
        // An explicit method would need millions of steps here.
        assert!(sol.stats.accepted_steps < 5_000, "{:?}", sol.stats);
    }

    #[test]
    fn linear_invariant_preserved() {
        let y0 = StateVector::new(0.99, 0.01, 0.0, 0.0, 0.0);
        let times: Vec<f64> = (0..=20).map(|k| k as f64).collect();
        let sol = Radau5Integrator::default()
            .integrate(&Sir, &y0, &times, &Tolerance::uniform(1e-6, 1e-10))
            .unwrap();
        for state in &sol.states {
            assert!((state[0] + state[1] + state[2] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn stats_are_counted() {
        let sol = Radau5Integrator::default()
            .integrate(&Decay { rate: 1.0 }, &ones(), &[0.0, 1.0], &Tolerance::default())
            .unwrap();
        assert!(sol.stats.accepted_steps > 0);
        assert!(sol.stats.jacobian_updates > 0);
        assert!(sol.stats.rhs_evaluations > sol.stats.accepted_steps);
    }

    #[test]
    fn stats_accumulate_over_output_intervals() {
        let sys = Decay { rate: 1.0 };
        let tol = Tolerance::uniform(1e-8, 1e-12);
        let one = Radau5Integrator::default().integrate(&sys, &ones(), &[0.0, 1.0], &tol).unwrap();
        let many = Radau5Integrator::default()
            .integrate(&sys, &ones(), &[0.0, 0.25, 0.5, 0.75, 1.0], &tol)
            .unwrap();
        assert!(many.stats.accepted_steps >= 4);
        assert!((many.states[4][0] - one.states[1][0]).abs() < 1e-6);
    }

    #[test]
    fn per_component_tolerance_reaches_tiny_components() {
        // Second component lives at 1e-10; its absolute tolerance is scaled to match.
        let y0 = StateVector::new(1.0, 1.0e-10, 1.0, 1.0, 1.0);
        let tol = Tolerance::new(1e-8, [1e-12, 1e-22, 1e-12, 1e-12, 1e-12]);
        let sol = Radau5Integrator::default()
            .integrate(&Decay { rate: 2.0 }, &y0, &[0.0, 1.0], &tol)
            .unwrap();
        let exact = 1.0e-10 * (-2.0_f64).exp();
        assert!((sol.states[1][1] - exact).abs() / exact < 1e-5, "{}", sol.states[1][1]);
    }

    #[test]
    fn step_limit_reported() {
        let err = Radau5Integrator::default()
            .with_max_steps(3)
            .integrate(&Decay { rate: 1.0 }, &ones(), &[0.0, 100.0], &Tolerance::uniform(1e-10, 1e-14))
            .unwrap_err();
        assert!(matches!(err, SolverError::StepLimitExceeded { max_steps: 3, .. }), "{err}");
    }

    #[test]
    fn step_limit_is_shared_by_all_output_intervals() {
        // Every interval costs at least one step, so 100 intervals cannot fit in 20.
        let times: Vec<f64> = (0..=100).map(|k| k as f64).collect();
        let err = Radau5Integrator::default()
            .with_max_steps(20)
            .integrate(&Decay { rate: 0.01 }, &ones(), &times, &Tolerance::default())
            .unwrap_err();
        assert!(matches!(err, SolverError::StepLimitExceeded { max_steps: 20, .. }), "{err}");
    }

    #[test]
    fn nan_rhs_reported_not_returned() {
        let err = Radau5Integrator::default()
            .integrate(&Poisoned, &ones(), &[0.0, 1.0], &Tolerance::default())
            .unwrap_err();
        assert!(matches!(err, SolverError::NonFinite { .. }), "{err}");
    }

    #[test]
    fn bad_time_sequences_rejected() {
        let r = Radau5Integrator::default();
        let sys = Decay { rate: 1.0 };
        let tol = Tolerance::default();
        for times in [vec![], vec![0.0, 0.0], vec![1.0, 0.5], vec![0.0, f64::NAN]] {
            let err = r.integrate(&sys, &ones(), &times, &tol).unwrap_err();
            assert!(matches!(err, SolverError::BadTimeSequence(_)), "{times:?}: {err}");
        }
    }

    #[test]
    fn non_finite_initial_state_rejected() {
        let mut y0 = ones();
        y0[2] = f64::INFINITY;
        let err = Radau5Integrator::default()
            .integrate(&Decay { rate: 1.0 }, &y0, &[0.0, 1.0], &Tolerance::default())
            .unwrap_err();
        assert_eq!(err, SolverError::NonFiniteInitialState);
    }

    #[test]
    fn invalid_tolerance_rejected() {
        let err = Radau5Integrator::default()
            .integrate(&Decay { rate: 1.0 }, &ones(), &[0.0, 1.0], &Tolerance::uniform(1e-6, 0.0))
            .unwrap_err();
        assert_eq!(err, SolverError::InvalidTolerance);
    }
}

#[cfg(test)]
mod tolerance {
    use crate::{SolverStats, StateVector, Tolerance};

    #[test]
    fn error_norm_weights_each_component() {
        let tol = Tolerance::new(0.0, [1.0, 2.0, 4.0, 8.0, 16.0]);
        let err = StateVector::new(0.5, 1.0, 2.0, 4.0, 32.0);
        let y = StateVector::zeros();
        assert_eq!(tol.error_norm(&err, &y, &y), 2.0);
    }

    #[test]
    fn error_norm_uses_larger_magnitude() {
        let tol = Tolerance::uniform(0.1, 1e-12);
        let err = StateVector::from_element(1.0);
        let small = StateVector::from_element(1.0);
        let big = StateVector::from_element(100.0);
        assert!((tol.error_norm(&err, &small, &big) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn nan_error_is_infinite() {
        let tol = Tolerance::default();
        let mut err = StateVector::zeros();
        err[3] = f64::NAN;
        let y = StateVector::zeros();
        assert_eq!(tol.error_norm(&err, &y, &y), f64::INFINITY);
    }

    #[test]
    fn validity() {
        assert!(Tolerance::default().is_valid());
        assert!(!Tolerance::uniform(-1.0, 1.0).is_valid());
        assert!(!Tolerance::uniform(1e-6, 0.0).is_valid());
    }

    #[test]
    fn stats_accumulate() {
        let mut total = SolverStats::default();
        let one = SolverStats { accepted_steps: 3, rejected_steps: 1, rhs_evaluations: 20, jacobian_updates: 4, lu_decompositions: 4 };
        total += one;
        total += one;
        assert_eq!(total.steps(), 8);
        assert_eq!(total.rhs_evaluations, 40);
    }
}
