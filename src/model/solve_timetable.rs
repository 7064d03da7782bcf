//! One timetable run: validate, build, solve once, check and report.
use log::{info, warn};

use crate::config::TimetableConfig;
use crate::error::{TimetableError, TimetableResult};
use crate::model::{ProblemInstance, build_model_pipeline};
use crate::schedule::{Timetable, report_timetable};
use crate::solver::{SolveStatus, SolverBackend, SolverSettings};

/// Validates `config`, then builds, solves and reports its timetable.
pub fn schedule_from_config(
    config: &TimetableConfig,
    backend: &impl SolverBackend,
    settings: &SolverSettings,
) -> TimetableResult<Timetable> {
    let instance = config.validate()?;
    schedule_timetable(&instance, backend, settings)
}

/// Builds the model for `instance`, makes exactly one solver call and decodes the result.
///
/// Settings are checked before the model is built. `Optimal` and `Feasible` are
/// both success. Every other status maps to its own [`TimetableError`] variant
/// and no schedule is produced.
pub fn schedule_timetable(
    instance: &ProblemInstance,
    backend: &impl SolverBackend,
    settings: &SolverSettings,
) -> TimetableResult<Timetable> {
    settings.validate()?;
    let model = build_model_pipeline(instance);
    let outcome = backend.solve(&model, settings);
    info!("solver status {:?} after {:?}", outcome.status, outcome.wall_time);

    let valuation = match outcome.status {
        SolveStatus::Optimal | SolveStatus::Feasible => outcome.valuation.unwrap_or_default(),
        SolveStatus::Infeasible => return Err(TimetableError::Infeasible),
        SolveStatus::Unknown => return Err(TimetableError::Unknown),
        SolveStatus::ModelInvalid => return Err(TimetableError::ModelInvalid),
    };

    for constraint in model.violated_constraints(&valuation)? {
        warn!("solver returned a solution violating: {}", model.describe(constraint));
    }
    Ok(report_timetable(&model, &valuation)?)
}
