//! Solver-agnostic linear constraints over boolean decision variables.
use super::model_variables::{Valuation, VarId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `sum(terms) == rhs`
    Eq,
    /// `sum(terms) <= rhs`
    Le,
}

/// Which constraint family a constraint belongs to, with its group indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOrigin {
    CreditFulfillment { batch: usize, course: usize },
    NoOverlap { batch: usize, day: usize, slot: usize },
}

/// `sum(terms) <relation> rhs`, every term having coefficient one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub origin: ConstraintOrigin,
    pub terms: Vec<VarId>,
    pub relation: Relation,
    pub rhs: i64,
}

impl LinearConstraint {
    /// Number of terms that are true under `valuation`, or the first term without a value.
    pub fn true_count(&self, valuation: &Valuation) -> Result<i64, VarId> {
        let mut count = 0;
        for &var in &self.terms {
            match valuation.get(var) {
                Some(true) => count += 1,
                Some(false) => {}
                None => return Err(var),
            }
        }
        Ok(count)
    }

    pub fn holds_for(&self, count: i64) -> bool {
        match self.relation {
            Relation::Eq => count == self.rhs,
            Relation::Le => count <= self.rhs,
        }
    }
}
