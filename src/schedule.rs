//! Decoding a solver valuation into per-batch weekly schedules.
use std::fmt;

use crate::error::LookupError;
use crate::model::{TimetableModel, Valuation};

/// One attended class: `course` in zero-based (`day`, `slot`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub day: usize,
    pub slot: usize,
    pub course: String,
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {}, Slot {}: {}", self.day + 1, self.slot + 1, self.course)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSchedule {
    pub batch: String,
    /// Sorted by (day, slot); free periods have no entry.
    pub entries: Vec<ScheduleEntry>,
}

impl BatchSchedule {
    /// The rendered entry lines, e.g. `Day 1, Slot 1: Math`.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

/// Weekly schedule of every batch, in batch declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    pub batches: Vec<BatchSchedule>,
}

impl Timetable {
    pub fn batch(&self, name: &str) -> Option<&BatchSchedule> {
        self.batches.iter().find(|schedule| schedule.batch == name)
    }
}

impl fmt::Display for Timetable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Timetable:")?;
        for schedule in &self.batches {
            writeln!(f)?;
            writeln!(f, "{}:", schedule.batch)?;
            for entry in &schedule.entries {
                writeln!(f, "{entry}")?;
            }
        }
        Ok(())
    }
}

/// Reads every variable of `model` from `valuation` and lists the true ones per batch.
///
/// If a (batch, day, slot) has several true courses, all of them are listed
/// in course order; the caller sees the overlap instead of a silent pick.
pub fn report_timetable(
    model: &TimetableModel,
    valuation: &Valuation,
) -> Result<Timetable, LookupError> {
    let instance = model.instance();
    let mut batches = Vec::with_capacity(instance.batches().len());
    for (batch, name) in instance.batches().iter().enumerate() {
        let mut entries = Vec::new();
        for day in 0..instance.days() {
            for slot in 0..instance.slots_per_day() {
                for (course, spec) in instance.courses().iter().enumerate() {
                    if model.value_of(valuation, model.var(batch, course, day, slot))? {
                        entries.push(ScheduleEntry {
                            day,
                            slot,
                            course: spec.name.clone(),
                        });
                    }
                }
            }
        }
        batches.push(BatchSchedule {
            batch: name.clone(),
            entries,
        });
    }
    Ok(Timetable { batches })
}
