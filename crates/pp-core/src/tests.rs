//! Unit tests for pp-core primitives.

#[cfg(test)]
mod kinetics {
    use crate::{
        BOLTZMANN_EV, CoreError, KineticParameters, KineticsViolation, MetaParameters, ScalingLaw,
        arrhenius,
    };

    fn violation(result: Result<KineticParameters, CoreError>) -> KineticsViolation {
        match result {
            Err(CoreError::InvalidKinetics { violation, .. }) => violation,
            other => panic!("expected InvalidKinetics, got {other:?}"),
        }
    }

    #[test]
    fn arrhenius_is_one_at_reference() {
        assert_eq!(arrhenius(0.46, 293.15, 293.15), 1.0);
        assert_eq!(arrhenius(0.0, 310.0, 293.15), 1.0);
    }

    #[test]
    fn arrhenius_matches_closed_form() {
        let (e, t, t0) = (0.6, 300.0, 290.0);
        let expected = (e * (t - t0) / (BOLTZMANN_EV * t * t0)).exp();
        assert!((arrhenius(e, t, t0) - expected).abs() < 1e-12);
        assert!(arrhenius(e, t, t0) > 1.0);
        assert!(arrhenius(e, 280.0, t0) < 1.0);
    }

    #[test]
    fn valid_range_satisfies_invariants() {
        let meta = MetaParameters::default();
        for &size in &[0.5, 1.0, 10.0, 100.0, 1.0e3, 1.0e4, 1.0e5, 1.0e6] {
            for &temp in &[278.15, 293.15, 303.15] {
                let k = KineticParameters::from_size_at(size, temp, &meta)
                    .unwrap_or_else(|e| panic!("size {size} T {temp}: {e}"));
                assert!(k.qmin > 0.0);
                assert!(k.qmax > k.qmin);
                assert!(k.vmax > 0.0);
                assert!(k.mu_inf > 0.0 && k.mu_inf.is_finite());
                assert!(k.half_saturation > 0.0);
            }
        }
    }

    #[test]
    fn mu_inf_follows_droop_conversion() {
        let meta = MetaParameters::default();
        let size = 100.0;
        let k = KineticParameters::from_size(size, &meta).unwrap();

        let mu_max = meta.mu_max.evaluate(size, meta.temperature, meta.reference_temperature);
        let span = k.qmax - k.qmin;
        let expected = mu_max * k.vmax * k.qmax / (k.vmax * span - mu_max * k.qmin * span);
        assert!((k.mu_inf - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn half_saturation_divides_by_temperature() {
        let meta = MetaParameters::default();
        let k = KineticParameters::from_size(100.0, &meta).unwrap();
        let expected = 50.0 * 100.0_f64.powf(0.27) / 293.15;
        assert!((k.half_saturation - expected).abs() < 1e-12);
    }

    #[test]
    fn warmer_water_speeds_uptake() {
        let meta = MetaParameters::default();
        let cold = KineticParameters::from_size_at(100.0, 283.15, &meta).unwrap();
        let warm = KineticParameters::from_size_at(100.0, 303.15, &meta).unwrap();
        assert!(warm.vmax > cold.vmax);
        assert!(warm.mortality > cold.mortality);
        // Quotas carry no activation energy in the defaults.
        assert_eq!(warm.qmin, cold.qmin);
    }

    #[test]
    fn tiny_cells_break_growth_denominator() {
        let meta = MetaParameters::default();
        let v = violation(KineticParameters::from_size(0.01, &meta));
        assert_eq!(v, KineticsViolation::GrowthDenominator);
    }

    #[test]
    fn non_positive_size_rejected() {
        let meta = MetaParameters::default();
        assert_eq!(violation(KineticParameters::from_size(0.0, &meta)), KineticsViolation::NonPositiveSize);
        assert_eq!(violation(KineticParameters::from_size(-5.0, &meta)), KineticsViolation::NonPositiveSize);
        assert_eq!(violation(KineticParameters::from_size(f64::NAN, &meta)), KineticsViolation::NonPositiveSize);
    }

    #[test]
    fn non_positive_temperature_rejected() {
        let meta = MetaParameters::default();
        assert_eq!(
            violation(KineticParameters::from_size_at(10.0, 0.0, &meta)),
            KineticsViolation::NonPositiveTemperature
        );
    }

    #[test]
    fn inverted_quota_laws_report_ordering() {
        let meta = MetaParameters {
            qmax: ScalingLaw::new(1.0e-9, 0.77, 0.0),
            ..MetaParameters::default()
        };
        assert_eq!(violation(KineticParameters::from_size(100.0, &meta)), KineticsViolation::QuotaOrdering);
    }

    #[test]
    fn error_carries_size_and_temperature() {
        let meta = MetaParameters::default();
        match KineticParameters::from_size(0.01, &meta) {
            Err(CoreError::InvalidKinetics { size, temperature, .. }) => {
                assert_eq!(size, 0.01);
                assert_eq!(temperature, 293.15);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn explicit_construction_checks_invariants() {
        assert!(KineticParameters::new(1.0, 2.0, 1.0, 1.0, 1.0, 0.1).is_ok());
        assert_eq!(
            KineticParameters::new(1.0, 1.0, 1.0, 1.0, 1.0, 0.1),
            Err(KineticsViolation::QuotaOrdering)
        );
        assert_eq!(
            KineticParameters::new(0.0, 1.0, 1.0, 1.0, 1.0, 0.1),
            Err(KineticsViolation::NonPositiveQmin)
        );
        assert_eq!(
            KineticParameters::new(1.0, 2.0, 0.0, 1.0, 1.0, 0.1),
            Err(KineticsViolation::NonPositiveVmax)
        );
        assert_eq!(
            KineticParameters::new(1.0, 2.0, 1.0, f64::INFINITY, 1.0, 0.1),
            Err(KineticsViolation::NonFinite("mu_inf"))
        );
        // Zero growth and mortality are allowed (degenerate but well defined).
        assert!(KineticParameters::new(1.0, 2.0, 1.0, 0.0, 1.0, 0.0).is_ok());
    }

    #[test]
    fn quota_helpers() {
        let k = KineticParameters::new(1.0, 3.0, 1.0, 1.0, 1.0, 0.1).unwrap();
        assert_eq!(k.quota_span(), 2.0);
        assert_eq!(k.quota_midpoint(), 2.0);
    }
}

#[cfg(test)]
mod meta {
    use crate::{CoreError, MetaParameters, ScalingLaw};

    #[test]
    fn defaults_validate() {
        assert!(MetaParameters::default().validate().is_ok());
    }

    #[test]
    fn zero_reference_temperature_rejected() {
        let meta = MetaParameters { reference_temperature: 0.0, ..MetaParameters::default() };
        assert!(matches!(meta.validate(), Err(CoreError::InvalidMeta(_))));
    }

    #[test]
    fn non_finite_coefficient_rejected() {
        let meta = MetaParameters {
            vmax: ScalingLaw::new(f64::NAN, 0.67, 0.46),
            ..MetaParameters::default()
        };
        let err = meta.validate().unwrap_err();
        assert!(err.to_string().contains("vmax"), "got {err}");
    }

    #[test]
    fn at_temperature_only_changes_temperature() {
        let base = MetaParameters::default();
        let warm = base.at_temperature(300.0);
        assert_eq!(warm.temperature, 300.0);
        assert_eq!(warm.reference_temperature, base.reference_temperature);
        assert_eq!(warm.qmin, base.qmin);
    }

    #[test]
    fn scaling_law_evaluates_power_law() {
        let law = ScalingLaw::new(2.0, 0.5, 0.0);
        assert!((law.evaluate(16.0, 300.0, 293.15) - 8.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod state {
    use crate::{Field, KineticParameters, SimulationState, Strain};

    #[test]
    fn array_roundtrip_keeps_time() {
        let s = SimulationState::new(3.0, 1.0, 2.0, 0.1, 0.2, 5.0);
        assert_eq!(s.to_array(), [1.0, 2.0, 0.1, 0.2, 5.0]);
        assert_eq!(SimulationState::from_array(3.0, s.to_array()), s);
    }

    #[test]
    fn midpoint_quotas_replace_placeholders() {
        let k = [
            KineticParameters::new(1.0, 3.0, 1.0, 1.0, 1.0, 0.1).unwrap(),
            KineticParameters::new(10.0, 30.0, 1.0, 1.0, 1.0, 0.1).unwrap(),
        ];
        let s = SimulationState::new(0.0, 1.0, 1.0, 999.0, 999.0, 4.0).with_midpoint_quotas(&k);
        assert_eq!(s.q_i, 2.0);
        assert_eq!(s.q_j, 20.0);
        assert_eq!(s.r, 4.0);
    }

    #[test]
    fn total_nutrient_sums_pools() {
        let s = SimulationState::new(0.0, 2.0, 3.0, 0.5, 1.0, 4.0);
        assert_eq!(s.total_nutrient(), 4.0 + 1.0 + 3.0);
    }

    #[test]
    fn strain_accessors() {
        let s = SimulationState::new(0.0, 2.0, 3.0, 0.5, 1.0, 4.0);
        assert_eq!(s.population(Strain::I), 2.0);
        assert_eq!(s.quota(Strain::J), 1.0);
        assert_eq!(s.field(Field::Nutrient), 4.0);
        assert_eq!(Strain::J.index(), 1);
        assert_eq!(Strain::I.to_string(), "i");
    }

    #[test]
    fn field_names_match_export_header() {
        let names: Vec<_> = Field::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["time", "N_i", "N_j", "Q_i", "Q_j", "R"]);
    }
}

#[cfg(test)]
mod trajectory {
    use crate::{SimulationState, Strain, Trajectory};

    fn at(t: f64, tag: f64) -> SimulationState {
        SimulationState::new(t, tag, 0.0, 0.0, 0.0, 0.0)
    }

    #[test]
    fn dedup_keeps_later_entry() {
        let mut traj: Trajectory = vec![at(0.0, 1.0), at(7.0, 2.0), at(14.0, 3.0), at(14.0, 4.0), at(21.0, 5.0)].into();
        assert_eq!(traj.dedup_keep_last(), 1);
        assert_eq!(traj.times(), [0.0, 7.0, 14.0, 21.0]);
        assert_eq!(traj.at_time(14.0).unwrap().n_i, 4.0);
        assert!(traj.is_strictly_increasing());
    }

    #[test]
    fn dedup_collapses_longer_runs() {
        let mut traj: Trajectory = vec![at(1.0, 1.0), at(1.0, 2.0), at(1.0, 3.0)].into();
        assert_eq!(traj.dedup_keep_last(), 2);
        assert_eq!(traj.len(), 1);
        assert_eq!(traj.points()[0].n_i, 3.0);
    }

    #[test]
    fn dedup_on_empty_is_noop() {
        let mut traj = Trajectory::new();
        assert_eq!(traj.dedup_keep_last(), 0);
        assert!(traj.is_empty());
    }

    #[test]
    fn strictly_increasing_detects_duplicates() {
        let traj: Trajectory = vec![at(0.0, 1.0), at(0.0, 1.0)].into();
        assert!(!traj.is_strictly_increasing());
    }

    #[test]
    fn winner_compares_final_populations() {
        let mut traj = Trajectory::new();
        assert_eq!(traj.winner(), None);
        traj.push(SimulationState::new(0.0, 1.0, 2.0, 0.0, 0.0, 0.0));
        assert_eq!(traj.winner(), Some(Strain::J));
        traj.push(SimulationState::new(1.0, 5.0, 2.0, 0.0, 0.0, 0.0));
        assert_eq!(traj.winner(), Some(Strain::I));
        assert_eq!(traj.final_state().unwrap().t, 1.0);
    }
}
