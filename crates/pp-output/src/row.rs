//! Plain data row types written by output backends.

use pp_core::{Field, SimulationState};

/// Column order of a trajectory file: `time,N_i,N_j,Q_i,Q_j,R`.
pub fn trajectory_header() -> [&'static str; 6] {
    Field::ALL.map(Field::name)
}

/// Column order of a sweep summary file.
pub const SUMMARY_HEADER: [&str; 9] = [
    "size_i", "size_j", "period", "status", "final_N_i", "final_N_j", "final_R", "winner", "error",
];

/// One sampled state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRow {
    pub time: f64,
    pub n_i:  f64,
    pub n_j:  f64,
    pub q_i:  f64,
    pub q_j:  f64,
    pub r:    f64,
}

impl From<&SimulationState> for TrajectoryRow {
    fn from(s: &SimulationState) -> Self {
        Self { time: s.t, n_i: s.n_i, n_j: s.n_j, q_i: s.q_i, q_j: s.q_j, r: s.r }
    }
}

impl TrajectoryRow {
    pub fn to_record(&self) -> [String; 6] {
        [self.time, self.n_i, self.n_j, self.q_i, self.q_j, self.r].map(|v| v.to_string())
    }
}

/// One pulse: populations and nutrient just before and just after mixing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseRow {
    pub time:     f64,
    pub n_i_pre:  f64,
    pub n_j_pre:  f64,
    pub r_pre:    f64,
    pub n_i_post: f64,
    pub n_j_post: f64,
    pub r_post:   f64,
}

impl PulseRow {
    pub fn new(time: f64, pre: &SimulationState, post: &SimulationState) -> Self {
        Self {
            time,
            n_i_pre:  pre.n_i,
            n_j_pre:  pre.n_j,
            r_pre:    pre.r,
            n_i_post: post.n_i,
            n_j_post: post.n_j,
            r_post:   post.r,
        }
    }
}
