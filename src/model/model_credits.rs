//! Credit-fulfillment constraints.
use super::model_constraint::{ConstraintOrigin, Relation};
use super::model_context::ModelBuilderContext;

/// For every (batch, course): the course occupies exactly `credits` slots of the batch's week.
pub fn add_credit_constraints(ctx: &mut ModelBuilderContext<'_>) {
    let instance = ctx.instance;
    for batch in 0..instance.batches().len() {
        for (course, spec) in instance.courses().iter().enumerate() {
            let terms = (0..instance.days())
                .flat_map(|day| (0..instance.slots_per_day()).map(move |slot| (day, slot)))
                .map(|(day, slot)| ctx.var(batch, course, day, slot))
                .collect();
            ctx.push(
                ConstraintOrigin::CreditFulfillment { batch, course },
                terms,
                Relation::Eq,
                spec.credits,
            );
        }
    }
}
