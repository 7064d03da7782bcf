//! Non-overlap constraints.
use super::model_constraint::{ConstraintOrigin, Relation};
use super::model_context::ModelBuilderContext;

/// For every (batch, day, slot): at most one course. Free periods are allowed.
pub fn add_overlap_constraints(ctx: &mut ModelBuilderContext<'_>) {
    let instance = ctx.instance;
    if instance.courses().is_empty() {
        return;
    }
    for batch in 0..instance.batches().len() {
        for day in 0..instance.days() {
            for slot in 0..instance.slots_per_day() {
                let terms = (0..instance.courses().len())
                    .map(|course| ctx.var(batch, course, day, slot))
                    .collect();
                ctx.push(
                    ConstraintOrigin::NoOverlap { batch, day, slot },
                    terms,
                    Relation::Le,
                    1,
                );
            }
        }
    }
}
