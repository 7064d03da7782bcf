use std::cell::Cell;
use std::time::Duration;

use timetable_core::model::{TimetableModel, Valuation, VarKey};
use timetable_core::solver::{SolveOutcome, SolveStatus, SolverBackend, SolverSettings};
use timetable_core::error::SettingsError;
use timetable_core::{TimetableConfig, TimetableError, schedule_from_config};

/// Returns a fixed status and derives each variable's value from its key.
struct ScriptedBackend {
    status: SolveStatus,
    value: fn(VarKey) -> Option<bool>,
    calls: Cell<usize>,
}

impl ScriptedBackend {
    fn new(status: SolveStatus, value: fn(VarKey) -> Option<bool>) -> Self {
        Self {
            status,
            value,
            calls: Cell::new(0),
        }
    }
}

impl SolverBackend for ScriptedBackend {
    fn solve(&self, model: &TimetableModel, _settings: &SolverSettings) -> SolveOutcome {
        self.calls.set(self.calls.get() + 1);
        if !self.status.is_solution_found() {
            return SolveOutcome::without_solution(self.status);
        }
        let mut valuation = Valuation::unassigned(model.var_count());
        for (id, key) in model.space().iter() {
            if let Some(value) = (self.value)(key) {
                valuation.assign(id, value);
            }
        }
        SolveOutcome {
            status: self.status,
            valuation: Some(valuation),
            wall_time: Duration::ZERO,
        }
    }
}

fn config(days: usize, slots: usize, batches: &[&str], credits: &[(&str, i64)]) -> TimetableConfig {
    TimetableConfig {
        days,
        slots_per_day: slots,
        batches: batches.iter().map(|b| b.to_string()).collect(),
        courses: credits.iter().map(|(name, _)| name.to_string()).collect(),
        credits_by_course: credits
            .iter()
            .map(|&(name, credits)| (name.to_string(), credits))
            .collect(),
    }
}

/// Course `k` in slot `k` of day 0, nothing else.
fn diagonal(key: VarKey) -> Option<bool> {
    Some(key.day == 0 && key.course == key.slot)
}

#[test]
fn optimal_and_feasible_are_both_reported() {
    let config = config(1, 2, &["Batch1"], &[("Math", 1), ("Physics", 1)]);
    for status in [SolveStatus::Optimal, SolveStatus::Feasible] {
        let backend = ScriptedBackend::new(status, diagonal);
        let timetable =
            schedule_from_config(&config, &backend, &SolverSettings::default()).unwrap();
        assert_eq!(
            timetable.batch("Batch1").unwrap().lines(),
            vec!["Day 1, Slot 1: Math", "Day 1, Slot 2: Physics"]
        );
        assert_eq!(backend.calls.get(), 1);
    }
}

#[test]
fn failed_statuses_map_to_distinct_errors() {
    let config = config(1, 1, &["X"], &[("A", 1)]);
    let settings = SolverSettings::default();

    let backend = ScriptedBackend::new(SolveStatus::Infeasible, diagonal);
    assert!(matches!(
        schedule_from_config(&config, &backend, &settings),
        Err(TimetableError::Infeasible)
    ));

    let backend = ScriptedBackend::new(SolveStatus::Unknown, diagonal);
    assert!(matches!(
        schedule_from_config(&config, &backend, &settings),
        Err(TimetableError::Unknown)
    ));

    let backend = ScriptedBackend::new(SolveStatus::ModelInvalid, diagonal);
    assert!(matches!(
        schedule_from_config(&config, &backend, &settings),
        Err(TimetableError::ModelInvalid)
    ));
}

#[test]
fn error_messages_name_the_case() {
    assert!(TimetableError::Infeasible.to_string().starts_with("infeasible"));
    assert!(TimetableError::Unknown.to_string().starts_with("unknown"));
    assert!(TimetableError::ModelInvalid.to_string().starts_with("model invalid"));
}

#[test]
fn missing_value_is_a_lookup_error() {
    let config = config(1, 2, &["Batch1"], &[("Math", 1)]);
    let backend =
        ScriptedBackend::new(SolveStatus::Feasible, |key| (key.slot == 0).then_some(true));
    match schedule_from_config(&config, &backend, &SolverSettings::default()) {
        Err(TimetableError::Lookup(err)) => assert_eq!(err.label, "Batch1_Math_day0_slot1"),
        other => panic!("expected lookup error, got {other:?}"),
    }
}

#[test]
fn success_without_valuation_is_a_lookup_error() {
    struct EmptyHanded;
    impl SolverBackend for EmptyHanded {
        fn solve(&self, _model: &TimetableModel, _settings: &SolverSettings) -> SolveOutcome {
            SolveOutcome::without_solution(SolveStatus::Optimal)
        }
    }

    let config = config(1, 1, &["Batch1"], &[("Math", 1)]);
    assert!(matches!(
        schedule_from_config(&config, &EmptyHanded, &SolverSettings::default()),
        Err(TimetableError::Lookup(_))
    ));
}

#[test]
fn overlapping_solution_is_surfaced_not_masked() {
    let config = config(1, 1, &["Batch1"], &[("Math", 1), ("Physics", 1)]);
    let backend = ScriptedBackend::new(SolveStatus::Feasible, |_| Some(true));
    let timetable = schedule_from_config(&config, &backend, &SolverSettings::default()).unwrap();
    assert_eq!(
        timetable.batch("Batch1").unwrap().lines(),
        vec!["Day 1, Slot 1: Math", "Day 1, Slot 1: Physics"]
    );
}

#[test]
fn malformed_input_never_reaches_the_solver() {
    let backend = ScriptedBackend::new(SolveStatus::Optimal, diagonal);
    let settings = SolverSettings::default();

    let negative = config(1, 1, &["Batch1"], &[("Math", -1)]);
    assert!(matches!(
        schedule_from_config(&negative, &backend, &settings),
        Err(TimetableError::ModelConstruction(_))
    ));

    let duplicate = config(1, 1, &["Batch1", "Batch1"], &[("Math", 1)]);
    assert!(matches!(
        schedule_from_config(&duplicate, &backend, &settings),
        Err(TimetableError::ModelConstruction(_))
    ));

    assert_eq!(backend.calls.get(), 0);
}

#[test]
fn empty_instance_reports_empty_timetable() {
    let config = config(0, 0, &[], &[]);
    let backend = ScriptedBackend::new(SolveStatus::Optimal, diagonal);
    let timetable = schedule_from_config(&config, &backend, &SolverSettings::default()).unwrap();
    assert!(timetable.batches.is_empty());
    assert_eq!(timetable.to_string(), "Timetable:\n");
}

#[test]
fn bad_solver_settings_never_reach_the_solver() {
    let config = config(1, 1, &["Batch1"], &[("Math", 1)]);
    let backend = ScriptedBackend::new(SolveStatus::ModelInvalid, diagonal);

    let negative_time = SolverSettings {
        time_limit_seconds: Some(-1.0),
        ..SolverSettings::default()
    };
    match schedule_from_config(&config, &backend, &negative_time) {
        Err(TimetableError::Settings(err)) => {
            assert_eq!(err, SettingsError::InvalidTimeLimit(-1.0))
        }
        other => panic!("expected a settings error, got {other:?}"),
    }

    let negative_workers = SolverSettings {
        num_workers: -2,
        ..SolverSettings::default()
    };
    assert!(matches!(
        schedule_from_config(&config, &backend, &negative_workers),
        Err(TimetableError::Settings(SettingsError::NegativeWorkers(-2)))
    ));

    assert_eq!(backend.calls.get(), 0);
}
