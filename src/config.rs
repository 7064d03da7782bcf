//! Timetable input as read from JSON, and its validation into a [`ProblemInstance`].
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ModelConstructionError};
use crate::model::{Course, ProblemInstance};

/// Raw problem description.
///
/// ```json
/// {
///   "days": 5,
///   "slotsPerDay": 4,
///   "batches": ["Batch1"],
///   "courses": ["Math"],
///   "creditsByCourse": { "Math": 3 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableConfig {
    pub days: usize,
    pub slots_per_day: usize,
    pub batches: Vec<String>,
    pub courses: Vec<String>,
    pub credits_by_course: HashMap<String, i64>,
}

impl Default for TimetableConfig {
    /// Three batches over a six-day week of six periods.
    fn default() -> Self {
        let credits = [
            ("Math", 3),
            ("Physics Lab", 2),
            ("Chemistry", 4),
            ("Biology", 2),
            ("English", 1),
        ];
        Self {
            days: 6,
            slots_per_day: 6,
            batches: vec!["Batch1".into(), "Batch2".into(), "Batch3".into()],
            courses: credits.iter().map(|(name, _)| name.to_string()).collect(),
            credits_by_course: credits
                .iter()
                .map(|&(name, credits)| (name.to_string(), credits))
                .collect(),
        }
    }
}

impl TimetableConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pairs every declared course with its credits and checks the result.
    ///
    /// Courses keep their order in `courses`; the map's iteration order is never used.
    pub fn validate(&self) -> Result<ProblemInstance, ModelConstructionError> {
        let declared: HashSet<&str> = self.courses.iter().map(String::as_str).collect();
        let mut unknown: Vec<&String> = self
            .credits_by_course
            .keys()
            .filter(|name| !declared.contains(name.as_str()))
            .collect();
        unknown.sort();
        if let Some(name) = unknown.first() {
            return Err(ModelConstructionError::UnknownCourse((*name).clone()));
        }

        let courses = self
            .courses
            .iter()
            .map(|name| match self.credits_by_course.get(name) {
                Some(&credits) => Ok(Course::new(name.clone(), credits)),
                None => Err(ModelConstructionError::MissingCredits(name.clone())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        ProblemInstance::new(self.days, self.slots_per_day, self.batches.clone(), courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case() {
        let config = TimetableConfig::from_json(
            r#"{
                "days": 1,
                "slotsPerDay": 2,
                "batches": ["Batch1"],
                "courses": ["Math", "Physics"],
                "creditsByCourse": {"Physics": 1, "Math": 1}
            }"#,
        )
        .unwrap();
        assert_eq!(config.slots_per_day, 2);
        assert_eq!(config.credits_by_course["Physics"], 1);

        let instance = config.validate().unwrap();
        let names: Vec<_> = instance.courses().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Math", "Physics"]);
    }

    #[test]
    fn test_malformed_json() {
        let err = TimetableConfig::from_json(r#"{"days": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = TimetableConfig::from_file("/nonexistent/timetable.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_default_instance() {
        let instance = TimetableConfig::default().validate().unwrap();
        assert_eq!(instance.weekly_capacity(), 36);
        assert_eq!(instance.weekly_demand(), 12);
        assert_eq!(instance.batches().len(), 3);
        assert_eq!(instance.courses()[1], Course::new("Physics Lab", 2));
    }

    #[test]
    fn test_json_round_trip_of_default() {
        let config = TimetableConfig::default();
        let parsed = TimetableConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_credits() {
        let mut config = TimetableConfig::default();
        config.credits_by_course.remove("Biology");
        assert_eq!(
            config.validate().unwrap_err(),
            ModelConstructionError::MissingCredits("Biology".into())
        );
    }

    #[test]
    fn test_unknown_course_in_credits() {
        let mut config = TimetableConfig::default();
        config.credits_by_course.insert("Geology".into(), 2);
        assert_eq!(
            config.validate().unwrap_err(),
            ModelConstructionError::UnknownCourse("Geology".into())
        );
    }

    #[test]
    fn test_negative_credits() {
        let mut config = TimetableConfig::default();
        config.credits_by_course.insert("English".into(), -2);
        assert_eq!(
            config.validate().unwrap_err(),
            ModelConstructionError::NegativeCredits {
                course: "English".into(),
                credits: -2
            }
        );
    }

    #[test]
    fn test_duplicate_course() {
        let mut config = TimetableConfig::default();
        config.courses.push("Math".into());
        assert_eq!(
            config.validate().unwrap_err(),
            ModelConstructionError::DuplicateCourse("Math".into())
        );
    }
}
