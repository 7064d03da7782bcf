//! The constraint-solver collaborator and its CP-SAT implementation.
use std::time::{Duration, Instant};

use cp_sat::builder::{BoolVar, CpModelBuilder, LinearExpr};
use cp_sat::proto::{CpSolverStatus, SatParameters};
use log::{debug, info};

use crate::error::SettingsError;
use crate::model::{Relation, TimetableModel, Valuation};

/// Status reported by a solver backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible solution found.
    Feasible,
    /// No valuation satisfies the model.
    Infeasible,
    /// Search stopped before feasibility was decided.
    Unknown,
    /// The backend rejected the model.
    ModelInvalid,
}

impl SolveStatus {
    /// `Optimal` and `Feasible` both carry a usable valuation.
    pub fn is_solution_found(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl From<CpSolverStatus> for SolveStatus {
    fn from(status: CpSolverStatus) -> Self {
        match status {
            CpSolverStatus::Optimal => SolveStatus::Optimal,
            CpSolverStatus::Feasible => SolveStatus::Feasible,
            CpSolverStatus::Infeasible => SolveStatus::Infeasible,
            CpSolverStatus::ModelInvalid => SolveStatus::ModelInvalid,
            CpSolverStatus::Unknown => SolveStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// Present when a solution was found.
    pub valuation: Option<Valuation>,
    pub wall_time: Duration,
}

impl SolveOutcome {
    pub fn without_solution(status: SolveStatus) -> Self {
        Self {
            status,
            valuation: None,
            wall_time: Duration::ZERO,
        }
    }
}

/// Search limits handed to the solver, checked by [`SolverSettings::validate`] before a run.
#[derive(Debug, Clone)]
pub struct SolverSettings {
    pub time_limit_seconds: Option<f64>,
    pub num_workers: i32,
    pub random_seed: i32,
    pub log_search_progress: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            time_limit_seconds: Some(60.0),
            num_workers: 8,
            random_seed: 42,
            log_search_progress: false,
        }
    }
}

impl SolverSettings {
    /// Rejects limits CP-SAT would answer with MODEL_INVALID.
    ///
    /// A worker count of zero lets CP-SAT pick one.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(limit) = self.time_limit_seconds {
            if limit.is_nan() || limit < 0.0 {
                return Err(SettingsError::InvalidTimeLimit(limit));
            }
        }
        if self.num_workers < 0 {
            return Err(SettingsError::NegativeWorkers(self.num_workers));
        }
        Ok(())
    }

    pub fn to_sat_parameters(&self) -> SatParameters {
        let mut params = SatParameters::default();
        params.max_time_in_seconds = self.time_limit_seconds;
        params.num_search_workers = Some(self.num_workers);
        params.random_seed = Some(self.random_seed);
        params.log_search_progress = Some(self.log_search_progress);
        // The search log goes to stderr; stdout carries only the timetable.
        params.log_to_stdout = Some(false);
        params
    }
}

/// A constraint solver that can decide a [`TimetableModel`].
///
/// Implementations are called once per run and must return a valuation for
/// every model variable whenever the status is `Optimal` or `Feasible`.
pub trait SolverBackend {
    fn solve(&self, model: &TimetableModel, settings: &SolverSettings) -> SolveOutcome;
}

/// Google OR-Tools CP-SAT through the `cp_sat` bindings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpSatBackend;

impl CpSatBackend {
    pub fn new() -> Self {
        Self
    }

    /// Translates the model into a CP-SAT builder; `vars[i]` is the handle of `VarId` index `i`.
    fn translate(model: &TimetableModel) -> (CpModelBuilder, Vec<BoolVar>) {
        let mut builder = CpModelBuilder::default();
        let vars: Vec<BoolVar> = model
            .space()
            .iter()
            .map(|(id, _)| builder.new_bool_var_with_name(model.label(id)))
            .collect();

        for constraint in model.constraints() {
            let expr: LinearExpr = constraint
                .terms
                .iter()
                .map(|var| (1, vars[var.index()].clone()))
                .collect();
            match constraint.relation {
                Relation::Eq => {
                    builder.add_eq(expr, LinearExpr::from(constraint.rhs));
                }
                Relation::Le => {
                    builder.add_le(expr, LinearExpr::from(constraint.rhs));
                }
            }
        }
        (builder, vars)
    }
}

impl SolverBackend for CpSatBackend {
    fn solve(&self, model: &TimetableModel, settings: &SolverSettings) -> SolveOutcome {
        let (builder, vars) = Self::translate(model);
        debug!(
            "handing {} variables and {} constraints to CP-SAT",
            vars.len(),
            model.constraints().len()
        );

        let started = Instant::now();
        let response = builder.solve_with_parameters(&settings.to_sat_parameters());
        let wall_time = started.elapsed();
        let status = SolveStatus::from(response.status());
        info!("CP-SAT finished with status {status:?} in {wall_time:?}");

        if !status.is_solution_found() {
            return SolveOutcome {
                status,
                valuation: None,
                wall_time,
            };
        }

        // CP-SAT numbers variables in creation order, so the response index
        // of vars[i] is i. Anything past the returned solution stays unassigned.
        let mut valuation = Valuation::unassigned(vars.len());
        for ((id, _), var) in model.space().iter().zip(&vars).take(response.solution.len()) {
            valuation.assign(id, var.solution_value(&response));
        }
        SolveOutcome {
            status,
            valuation: Some(valuation),
            wall_time,
        }
    }
}
