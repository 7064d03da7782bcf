//! Error types for building, solving and reporting timetables.
use std::path::PathBuf;

use thiserror::Error;

use crate::model::VarId;

pub type TimetableResult<T> = Result<T, TimetableError>;

/// Terminal outcome of a timetable run that did not produce a schedule.
///
/// Every variant ends the run; nothing here is retried.
#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid timetable input: {0}")]
    ModelConstruction(#[from] ModelConstructionError),
    #[error("invalid solver settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("infeasible: no timetable satisfies every credit and non-overlap constraint")]
    Infeasible,
    #[error(
        "unknown: the solver stopped before deciding feasibility (time or resource limit reached)"
    )]
    Unknown,
    #[error("model invalid: the solver rejected the generated model")]
    ModelInvalid,
    #[error("solution lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

/// Malformed problem input, detected before the solver is invoked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelConstructionError {
    #[error("course `{course}` has negative credit count {credits}")]
    NegativeCredits { course: String, credits: i64 },
    #[error("batch `{0}` is declared more than once")]
    DuplicateBatch(String),
    #[error("course `{0}` is declared more than once")]
    DuplicateCourse(String),
    #[error("course `{0}` has no entry in `creditsByCourse`")]
    MissingCredits(String),
    #[error("`creditsByCourse` names `{0}`, which is not a declared course")]
    UnknownCourse(String),
    #[error(
        "{batches} batches x {courses} courses x {days} days x {slots_per_day} slots is too large"
    )]
    GridTooLarge {
        batches: usize,
        courses: usize,
        days: usize,
        slots_per_day: usize,
    },
}

/// Solver limits CP-SAT would reject, caught before any model is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("time limit must be a non-negative number of seconds, got {0}")]
    InvalidTimeLimit(f64),
    #[error("worker count must be non-negative, got {0}")]
    NegativeWorkers(i32),
}

/// The valuation has no value for a variable the model declared.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no value for variable {label} (#{})", .var.index())]
pub struct LookupError {
    pub var: VarId,
    pub label: String,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}
