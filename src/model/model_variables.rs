//! The (batch, course, day, slot) variable space and valuations over it.

/// Structural identity of a decision variable: its dense index in the variable space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The tuple a decision variable stands for, as declaration-order indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarKey {
    pub batch: usize,
    pub course: usize,
    pub day: usize,
    pub slot: usize,
}

/// Dense four-dimensional index over batches × courses × days × slots.
///
/// `id = ((batch * courses + course) * days + day) * slots + slot`, so the
/// slot index varies fastest and ids are contiguous from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableSpace {
    batches: usize,
    courses: usize,
    days: usize,
    slots: usize,
    len: usize,
}

impl VariableSpace {
    /// `None` if the number of variables does not fit in `usize`.
    pub fn new(batches: usize, courses: usize, days: usize, slots: usize) -> Option<Self> {
        let len = Self::checked_len(batches, courses, days, slots)?;
        Some(Self {
            batches,
            courses,
            days,
            slots,
            len,
        })
    }

    /// `batches * courses * days * slots`, or `None` if it overflows.
    pub fn checked_len(
        batches: usize,
        courses: usize,
        days: usize,
        slots: usize,
    ) -> Option<usize> {
        batches.checked_mul(courses)?.checked_mul(days)?.checked_mul(slots)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn id(&self, key: VarKey) -> VarId {
        debug_assert!(
            key.batch < self.batches
                && key.course < self.courses
                && key.day < self.days
                && key.slot < self.slots,
            "variable key {key:?} outside {self:?}"
        );
        let course = key.batch * self.courses + key.course;
        VarId((course * self.days + key.day) * self.slots + key.slot)
    }

    pub fn key(&self, id: VarId) -> VarKey {
        let mut rest = id.0;
        let slot = rest % self.slots;
        rest /= self.slots;
        let day = rest % self.days;
        rest /= self.days;
        let course = rest % self.courses;
        VarKey {
            batch: rest / self.courses,
            course,
            day,
            slot,
        }
    }

    /// All variables in id order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, VarKey)> + '_ {
        (0..self.len()).map(move |index| (VarId(index), self.key(VarId(index))))
    }
}

/// A boolean value per variable, as handed back by a solver.
///
/// Entries may be missing; callers decide whether a gap is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Valuation {
    values: Vec<Option<bool>>,
}

impl Valuation {
    /// A valuation over `len` variables with no value assigned yet.
    pub fn unassigned(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    pub fn assign(&mut self, var: VarId, value: bool) {
        if var.0 >= self.values.len() {
            self.values.resize(var.0 + 1, None);
        }
        self.values[var.0] = Some(value);
    }

    pub fn get(&self, var: VarId) -> Option<bool> {
        self.values.get(var.0).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<bool> for Valuation {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Some).collect(),
        }
    }
}
