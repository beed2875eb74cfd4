//! Sweep results, one outcome per combination in input order.

use pp_sim::{FailureKind, RunOutput, SimError};
use serde::Serialize;

use crate::{Combination, SweepError};

/// What happened to one combination.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepOutcome {
    /// Position in the [`SweepSpec`][crate::SweepSpec].
    pub index:       usize,
    pub combination: Combination,
    pub result:      Result<RunOutput, SimError>,
}

impl SweepOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.result.as_ref().err().map(SimError::kind)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Ok,
    InvalidKineticParameters,
    IntegrationFailure,
    ScheduleError,
    InvalidInput,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            RunStatus::Ok => return f.write_str("ok"),
            RunStatus::InvalidKineticParameters => FailureKind::InvalidKineticParameters,
            RunStatus::IntegrationFailure       => FailureKind::IntegrationFailure,
            RunStatus::ScheduleError            => FailureKind::ScheduleError,
            RunStatus::InvalidInput             => FailureKind::InvalidInput,
        };
        write!(f, "{kind}")
    }
}

impl From<FailureKind> for RunStatus {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::InvalidKineticParameters => RunStatus::InvalidKineticParameters,
            FailureKind::IntegrationFailure       => RunStatus::IntegrationFailure,
            FailureKind::ScheduleError            => RunStatus::ScheduleError,
            FailureKind::InvalidInput             => RunStatus::InvalidInput,
        }
    }
}

/// Flat per-combination summary.  Failed runs carry `None` in every final
/// value and the error text, so they can never be mistaken for a collapse
/// to zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryRow {
    pub size_i:    f64,
    pub size_j:    f64,
    pub period:    f64,
    pub status:    RunStatus,
    pub final_n_i: Option<f64>,
    pub final_n_j: Option<f64>,
    pub final_r:   Option<f64>,
    pub winner:    Option<String>,
    pub error:     Option<String>,
}

impl SummaryRow {
    pub fn from_outcome(outcome: &SweepOutcome) -> Self {
        let c = outcome.combination;
        let mut row = SummaryRow {
            size_i:    c.size_i,
            size_j:    c.size_j,
            period:    c.period,
            status:    RunStatus::Ok,
            final_n_i: None,
            final_n_j: None,
            final_r:   None,
            winner:    None,
            error:     None,
        };
        match &outcome.result {
            Ok(output) => {
                if let Some(last) = output.trajectory.final_state() {
                    row.final_n_i = Some(last.n_i);
                    row.final_n_j = Some(last.n_j);
                    row.final_r = Some(last.r);
                }
                row.winner = output.trajectory.winner().map(|s| s.to_string());
            }
            Err(e) => {
                row.status = e.kind().into();
                row.error = Some(e.to_string());
            }
        }
        row
    }
}

/// All outcomes of a sweep, in the order of the input combinations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SweepReport {
    outcomes: Vec<SweepOutcome>,
}

impl SweepReport {
    pub(crate) fn new(outcomes: Vec<SweepOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[SweepOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<SweepOutcome> {
        self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn successes(&self) -> impl Iterator<Item = (&Combination, &RunOutput)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|out| (&o.combination, out)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Combination, &SimError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.combination, e)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// `Some(SweepError::PartialFailure)` if any combination failed.
    pub fn partial_failure(&self) -> Option<SweepError> {
        let failed = self.failure_count();
        (failed > 0).then_some(SweepError::PartialFailure { failed, total: self.len() })
    }

    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.outcomes.iter().map(SummaryRow::from_outcome).collect()
    }
}
