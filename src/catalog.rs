use std::collections::{BTreeSet, HashSet};
use serde::{Serialize, Deserialize};
use crate::grid::MeetingRecord;

/// A course suggestion
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
}

impl Course {
    pub fn key(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Unique courses in the sheet, sorted by code then name
pub fn course_catalog(records: &[MeetingRecord]) -> Vec<Course> {
    let courses: BTreeSet<Course> = records
        .iter()
        .filter(|r| !r.course_code.trim().is_empty() && !r.course_name.trim().is_empty())
        .map(|r| Course {
            code: r.course_code.trim().to_string(),
            name: r.course_name.trim().to_string(),
        })
        .collect();
    courses.into_iter().collect()
}

/// Case-insensitive match of `query` against course codes and names.
/// An empty query matches every course.
pub fn search_courses<'a>(catalog: &'a [Course], query: &str) -> Vec<&'a Course> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return catalog.iter().collect();
    }
    catalog
        .iter()
        .filter(|c| c.code.to_lowercase().contains(&query) || c.name.to_lowercase().contains(&query))
        .collect()
}

/// Extracts the course code from an identity key ("CS101 - Programming" -> "CS101").
/// A bare code is returned unchanged.
pub fn course_code_from_key(key: &str) -> &str {
    key.split(" - ").next().unwrap_or(key).trim()
}

/// Splits a comma-separated course selection, dropping blank entries
pub fn parse_course_list(courses: &str) -> Vec<String> {
    courses
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
        .collect()
}

/// Keeps the records of the selected courses. Selections may be codes or identity
/// keys; matching ignores case. An empty selection keeps every record.
pub fn filter_records<S: AsRef<str>>(records: &[MeetingRecord], selection: &[S]) -> Vec<MeetingRecord> {
    let codes: HashSet<String> = selection
        .iter()
        .map(|s| course_code_from_key(s.as_ref()).to_uppercase())
        .filter(|c| !c.is_empty())
        .collect();
    if codes.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| codes.contains(&r.course_code.trim().to_uppercase()))
        .cloned()
        .collect()
}
