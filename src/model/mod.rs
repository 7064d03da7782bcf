//! Model building and constraint logic for the timetable solver.

mod model_constraint;
mod model_context;
mod model_credits;
mod model_overlap;
mod model_variables;
mod solve_timetable;

pub use model_constraint::{ConstraintOrigin, LinearConstraint, Relation};
pub use model_context::{
    Course, ModelBuilderContext, ModelStats, ProblemInstance, TimetableModel, build_model_pipeline,
};
use model_credits::*;
use model_overlap::*;
pub use model_variables::{Valuation, VarId, VarKey, VariableSpace};
pub use solve_timetable::*;
