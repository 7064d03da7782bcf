//! Problem instance, builder context and the finished timetable model.
use std::collections::HashSet;

use log::{debug, warn};

use super::model_constraint::{ConstraintOrigin, LinearConstraint, Relation};
use super::model_variables::{Valuation, VarId, VarKey, VariableSpace};
use super::{add_credit_constraints, add_overlap_constraints};
use crate::error::{LookupError, ModelConstructionError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub name: String,
    /// Distinct weekly slots the course occupies for every batch.
    pub credits: i64,
}

impl Course {
    pub fn new(name: impl Into<String>, credits: i64) -> Self {
        Self {
            name: name.into(),
            credits,
        }
    }
}

/// Validated timetable input: unique names, non-negative credits and a grid
/// whose size fits in `usize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemInstance {
    days: usize,
    slots_per_day: usize,
    batches: Vec<String>,
    courses: Vec<Course>,
    space: VariableSpace,
}

impl ProblemInstance {
    pub fn new(
        days: usize,
        slots_per_day: usize,
        batches: Vec<String>,
        courses: Vec<Course>,
    ) -> Result<Self, ModelConstructionError> {
        let mut seen = HashSet::new();
        for batch in &batches {
            if !seen.insert(batch.as_str()) {
                return Err(ModelConstructionError::DuplicateBatch(batch.clone()));
            }
        }
        let mut seen = HashSet::new();
        for course in &courses {
            if !seen.insert(course.name.as_str()) {
                return Err(ModelConstructionError::DuplicateCourse(course.name.clone()));
            }
            if course.credits < 0 {
                return Err(ModelConstructionError::NegativeCredits {
                    course: course.name.clone(),
                    credits: course.credits,
                });
            }
        }

        let too_large = || ModelConstructionError::GridTooLarge {
            batches: batches.len(),
            courses: courses.len(),
            days,
            slots_per_day,
        };
        // Empty name lists still need `days * slots_per_day` to fit.
        VariableSpace::checked_len(batches.len().max(1), courses.len().max(1), days, slots_per_day)
            .ok_or_else(too_large)?;
        let space = VariableSpace::new(batches.len(), courses.len(), days, slots_per_day)
            .ok_or_else(too_large)?;
        Ok(Self {
            days,
            slots_per_day,
            batches,
            courses,
            space,
        })
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn slots_per_day(&self) -> usize {
        self.slots_per_day
    }

    pub fn batches(&self) -> &[String] {
        &self.batches
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Slots available to each batch per week.
    pub fn weekly_capacity(&self) -> usize {
        self.days * self.slots_per_day
    }

    /// Slots every batch must fill per week.
    pub fn weekly_demand(&self) -> i64 {
        self.courses.iter().map(|course| course.credits).sum()
    }
}

/// Mutable state shared by the constraint-adding passes.
pub struct ModelBuilderContext<'a> {
    pub instance: &'a ProblemInstance,
    pub space: VariableSpace,
    pub constraints: Vec<LinearConstraint>,
}

impl<'a> ModelBuilderContext<'a> {
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            instance,
            space: instance.space,
            constraints: Vec::new(),
        }
    }

    pub fn var(&self, batch: usize, course: usize, day: usize, slot: usize) -> VarId {
        self.space.id(VarKey {
            batch,
            course,
            day,
            slot,
        })
    }

    pub fn push(
        &mut self,
        origin: ConstraintOrigin,
        terms: Vec<VarId>,
        relation: Relation,
        rhs: i64,
    ) {
        self.constraints.push(LinearConstraint {
            origin,
            terms,
            relation,
            rhs,
        });
    }

    fn finish(self) -> TimetableModel {
        TimetableModel {
            instance: self.instance.clone(),
            space: self.space,
            constraints: self.constraints,
        }
    }
}

/// Runs every constraint pass over a fresh context and returns the model.
pub fn build_model_pipeline(instance: &ProblemInstance) -> TimetableModel {
    let capacity = instance.weekly_capacity();
    let demand = instance.weekly_demand();
    if !instance.batches.is_empty() && demand > capacity as i64 {
        warn!(
            "each batch needs {demand} slots per week but only {capacity} exist; \
             the model is infeasible"
        );
    }

    let mut ctx = ModelBuilderContext::new(instance);
    add_credit_constraints(&mut ctx);
    add_overlap_constraints(&mut ctx);
    let model = ctx.finish();

    let stats = model.stats();
    debug!(
        "built timetable model: {} variables, {} equalities, {} inequalities",
        stats.variables, stats.equalities, stats.inequalities
    );
    model
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelStats {
    pub variables: usize,
    pub equalities: usize,
    pub inequalities: usize,
}

/// The complete constraint-satisfaction model for one problem instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableModel {
    instance: ProblemInstance,
    space: VariableSpace,
    constraints: Vec<LinearConstraint>,
}

impl TimetableModel {
    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    pub fn space(&self) -> &VariableSpace {
        &self.space
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn var_count(&self) -> usize {
        self.space.len()
    }

    pub fn var(&self, batch: usize, course: usize, day: usize, slot: usize) -> VarId {
        self.space.id(VarKey {
            batch,
            course,
            day,
            slot,
        })
    }

    /// Diagnostic name of a variable, e.g. `Batch1_Math_day0_slot2`.
    pub fn label(&self, var: VarId) -> String {
        let key = self.space.key(var);
        format!(
            "{}_{}_day{}_slot{}",
            self.instance.batches[key.batch],
            self.instance.courses[key.course].name,
            key.day,
            key.slot
        )
    }

    pub fn value_of(&self, valuation: &Valuation, var: VarId) -> Result<bool, LookupError> {
        valuation.get(var).ok_or_else(|| LookupError {
            var,
            label: self.label(var),
        })
    }

    /// Constraints that `valuation` does not satisfy, in model order.
    pub fn violated_constraints(
        &self,
        valuation: &Valuation,
    ) -> Result<Vec<&LinearConstraint>, LookupError> {
        let mut violated = Vec::new();
        for constraint in &self.constraints {
            let count = constraint.true_count(valuation).map_err(|var| LookupError {
                var,
                label: self.label(var),
            })?;
            if !constraint.holds_for(count) {
                violated.push(constraint);
            }
        }
        Ok(violated)
    }

    /// Human-readable description of a constraint, naming its batch and course or slot.
    pub fn describe(&self, constraint: &LinearConstraint) -> String {
        match constraint.origin {
            ConstraintOrigin::CreditFulfillment { batch, course } => format!(
                "{} must attend {} exactly {} {}",
                self.instance.batches[batch],
                self.instance.courses[course].name,
                constraint.rhs,
                if constraint.rhs == 1 { "time" } else { "times" }
            ),
            ConstraintOrigin::NoOverlap { batch, day, slot } => format!(
                "{} may attend at most {} course(s) on day {}, slot {}",
                self.instance.batches[batch],
                constraint.rhs,
                day + 1,
                slot + 1
            ),
        }
    }

    pub fn stats(&self) -> ModelStats {
        let equalities = self
            .constraints
            .iter()
            .filter(|constraint| constraint.relation == Relation::Eq)
            .count();
        ModelStats {
            variables: self.var_count(),
            equalities,
            inequalities: self.constraints.len() - equalities,
        }
    }
}
