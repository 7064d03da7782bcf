//! Class timetabling as a constraint-satisfaction problem.
//!
//! A [`ProblemInstance`](model::ProblemInstance) (batches, courses with weekly
//! credit counts, a days × slots grid) is turned into a boolean model with one
//! variable per (batch, course, day, slot), an equality per (batch, course)
//! fixing its weekly credits, and an at-most-one per (batch, day, slot). The
//! model is decided by a [`SolverBackend`](solver::SolverBackend), normally
//! OR-Tools CP-SAT, and the solution is decoded into a
//! [`Timetable`](schedule::Timetable).

pub mod config;
pub mod error;
pub mod model;
pub mod schedule;
pub mod solver;

pub use config::TimetableConfig;
pub use error::{TimetableError, TimetableResult};
pub use model::{schedule_from_config, schedule_timetable};
pub use schedule::Timetable;
pub use solver::{CpSatBackend, SolverSettings};
