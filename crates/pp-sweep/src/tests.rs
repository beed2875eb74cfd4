//! Unit tests for pp-sweep.

#[cfg(test)]
mod spec {
    use crate::{Combination, SweepError, SweepSpec};

    #[test]
    fn grid_is_cartesian_with_period_innermost() {
        let spec = SweepSpec::grid(&[1.0, 2.0], &[10.0, 20.0, 30.0], &[7.0, 14.0]);
        assert_eq!(spec.len(), 12);
        let c = spec.combinations();
        assert_eq!(c[0], Combination::new(1.0, 10.0, 7.0));
        assert_eq!(c[1], Combination::new(1.0, 10.0, 14.0));
        assert_eq!(c[2], Combination::new(1.0, 20.0, 7.0));
        assert_eq!(c[11], Combination::new(2.0, 30.0, 14.0));
    }

    #[test]
    fn empty_axis_gives_empty_spec() {
        assert!(SweepSpec::grid(&[], &[1.0], &[7.0]).is_empty());
    }

    #[test]
    fn log_uniform_is_seeded_and_in_range() {
        let a = SweepSpec::log_uniform(50, (1.0, 1.0e4), &[7.0, 14.0, 21.0], 42).unwrap();
        let b = SweepSpec::log_uniform(50, (1.0, 1.0e4), &[7.0, 14.0, 21.0], 42).unwrap();
        let c = SweepSpec::log_uniform(50, (1.0, 1.0e4), &[7.0, 14.0, 21.0], 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        for combo in a.combinations() {
            for size in combo.sizes() {
                assert!((1.0 - 1e-9..=1.0e4 * (1.0 + 1e-9)).contains(&size), "{size}");
            }
            assert!([7.0, 14.0, 21.0].contains(&combo.period));
        }
    }

    #[test]
    fn log_uniform_degenerate_range_repeats_the_size() {
        let spec = SweepSpec::log_uniform(3, (50.0, 50.0), &[7.0], 1).unwrap();
        assert!(spec.combinations().iter().all(|c| c.size_i == 50.0 && c.size_j == 50.0));
    }

    #[test]
    fn log_uniform_rejects_bad_input() {
        assert!(matches!(
            SweepSpec::log_uniform(3, (0.0, 10.0), &[7.0], 1),
            Err(SweepError::InvalidSpec(_))
        ));
        assert!(matches!(
            SweepSpec::log_uniform(3, (10.0, 1.0), &[7.0], 1),
            Err(SweepError::InvalidSpec(_))
        ));
        assert!(matches!(
            SweepSpec::log_uniform(3, (1.0, 10.0), &[], 1),
            Err(SweepError::InvalidSpec(_))
        ));
    }
}

#[cfg(test)]
mod runner {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pp_core::MetaParameters;
    use pp_sim::{FailureKind, RunConfig, SampleSpec};

    use crate::{
        Combination, RunStatus, SweepError, SweepOutcome, SweepRunner, SweepSpec,
        default_worker_count,
    };

    fn short_config() -> RunConfig {
        RunConfig::default().with_samples(SampleSpec::Regular { end: 28.0, interval: 7.0 })
    }

    fn mixed_spec() -> SweepSpec {
        SweepSpec::from_combinations(vec![
            Combination::new(100.0, 10_000.0, 14.0),
            Combination::new(0.01, 100.0, 14.0),
            Combination::new(10.0, 1_000.0, 7.0),
        ])
    }

    #[test]
    fn one_bad_combination_does_not_sink_the_sweep() {
        let report = SweepRunner::new(MetaParameters::default(), short_config())
            .threads(2)
            .run(&mixed_spec())
            .unwrap();

        assert_eq!(report.len(), 3);
        assert_eq!(report.successes().count(), 2);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.partial_failure(), Some(SweepError::PartialFailure { failed: 1, total: 3 }));

        let outcomes = report.outcomes();
        assert_eq!(outcomes.iter().map(|o| o.index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(outcomes[0].is_success());
        assert_eq!(outcomes[1].failure_kind(), Some(FailureKind::InvalidKineticParameters));
        assert!(outcomes[2].is_success());

        let (combo, _) = report.failures().next().unwrap();
        assert_eq!(*combo, Combination::new(0.01, 100.0, 14.0));

        for (_, out) in report.successes() {
            assert_eq!(out.trajectory.times(), vec![0.0, 7.0, 14.0, 21.0, 28.0]);
        }
    }

    #[test]
    fn summary_rows_never_report_failed_runs_as_zero() {
        let report = SweepRunner::new(MetaParameters::default(), short_config())
            .threads(1)
            .run(&mixed_spec())
            .unwrap();
        let rows = report.summary_rows();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].status, RunStatus::Ok);
        assert!(rows[0].final_n_i.is_some_and(|n| n > 0.0));
        assert!(rows[0].winner.is_some());
        assert!(rows[0].error.is_none());

        assert_eq!(rows[1].status, RunStatus::InvalidKineticParameters);
        assert_eq!(rows[1].final_n_i, None);
        assert_eq!(rows[1].final_r, None);
        assert!(rows[1].error.as_deref().is_some_and(|e| e.contains("0.01")));
    }

    #[test]
    fn worker_count_does_not_change_results() {
        let spec = SweepSpec::grid(&[10.0, 100.0], &[1_000.0], &[7.0, 14.0]);
        let run = |n| {
            SweepRunner::new(MetaParameters::default(), short_config())
                .threads(n)
                .run(&spec)
                .unwrap()
        };
        assert_eq!(run(1), run(3));
    }

    #[test]
    fn progress_sees_every_combination() {
        let seen = AtomicUsize::new(0);
        let last_done = AtomicUsize::new(0);
        let progress = |done: usize, total: usize, _outcome: &SweepOutcome| {
            assert_eq!(total, 3);
            seen.fetch_add(1, Ordering::Relaxed);
            last_done.fetch_max(done, Ordering::Relaxed);
        };
        SweepRunner::new(MetaParameters::default(), short_config())
            .threads(2)
            .run_with_progress(&mixed_spec(), &progress)
            .unwrap();
        assert_eq!(seen.load(Ordering::Relaxed), 3);
        assert_eq!(last_done.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn empty_spec_gives_empty_report() {
        let report = SweepRunner::new(MetaParameters::default(), short_config())
            .run(&SweepSpec::default())
            .unwrap();
        assert!(report.is_empty());
        assert_eq!(report.partial_failure(), None);
    }

    #[test]
    fn thread_counts_are_at_least_one() {
        assert!(default_worker_count() >= 1);
        let runner = SweepRunner::new(MetaParameters::default(), short_config()).threads(0);
        assert_eq!(runner.worker_count(), 1);
    }

    #[test]
    fn thread_override_never_exceeds_the_default_pool() {
        let runner = SweepRunner::new(MetaParameters::default(), short_config()).threads(usize::MAX);
        assert_eq!(runner.worker_count(), default_worker_count());
        let runner = SweepRunner::new(MetaParameters::default(), short_config()).threads(1);
        assert_eq!(runner.worker_count(), 1);
    }

    #[test]
    fn tiny_period_fails_alone() {
        let spec = SweepSpec::from_combinations(vec![
            Combination::new(100.0, 10_000.0, 14.0),
            Combination::new(100.0, 10_000.0, 1e-7),
            Combination::new(50.0, 5_000.0, 7.0),
        ]);
        let report = SweepRunner::new(MetaParameters::default(), short_config())
            .threads(2)
            .run(&spec)
            .unwrap();

        assert_eq!(report.len(), 3);
        assert!(report.outcomes()[0].is_success());
        assert_eq!(report.outcomes()[1].failure_kind(), Some(FailureKind::ScheduleError));
        assert!(report.outcomes()[2].is_success());
        assert_eq!(report.summary_rows()[1].status, RunStatus::ScheduleError);
    }
}
