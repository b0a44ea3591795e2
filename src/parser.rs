use std::cmp::Ordering;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::DatesheetError;
use crate::grid::MeetingRecord;

/// Title rows above the header in the published date sheet
pub const DEFAULT_HEADER_ROW: usize = 2;

/// Marker that distinguishes a timeslot header from other column headers
const TIME_SLOT_MARKER: &str = " - ";

/// Output format for normalized dates, e.g. "25-Feb-2025"
const DATE_DISPLAY_FORMAT: &str = "%d-%b-%Y";

/// Date formats tried in order, day-first where ambiguous
const DATE_FORMATS: [&str; 7] = [
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y-%m-%d",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M"];

const TIME_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];

/// A loaded date sheet: every exam in the sheet plus its timeslot columns
#[derive(Debug, Clone, Default, Serialize)]
pub struct DateSheet {
    pub records: Vec<MeetingRecord>,
    pub time_slots: Vec<String>,
}

/// Loads a date sheet from a CSV export
///
/// # Arguments
/// * `csv_path` - Path to the CSV file
/// * `header_row` - Number of title rows above the header row
pub fn load_datesheet<P: AsRef<Path>>(csv_path: P, header_row: usize) -> Result<DateSheet, DatesheetError> {
    let path = csv_path.as_ref();
    info!(path = %path.display(), "Loading date sheet");
    let file = File::open(path)?;
    read_datesheet(file, header_row)
}

/// Reads a date sheet from any CSV source.
///
/// Layout: Day and Date in the first two columns, followed by (course code, course name)
/// column pairs. The header of each course-name column is that pair's timeslot.
pub fn read_datesheet<R: Read>(source: R, header_row: usize) -> Result<DateSheet, DatesheetError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut rows = reader.records().skip(header_row);
    let headers: Vec<String> = match rows.next() {
        Some(record) => record?.iter().map(|h| h.trim().to_string()).collect(),
        None => return Err(DatesheetError::MissingHeader { skipped: header_row }),
    };
    if headers.len() < 2 {
        return Err(DatesheetError::TooFewColumns { found: headers.len() });
    }

    let mut data: Vec<StringRecord> = Vec::new();
    for record in rows {
        data.push(record?);
    }

    // A mostly blank first row is a sub-header left over from merged title cells
    if let Some(first) = data.first() {
        let blanks = (0..headers.len())
            .filter(|&i| first.get(i).map(|v| v.trim().is_empty()).unwrap_or(true))
            .count();
        if blanks > headers.len() / 2 {
            debug!("Dropping sparse sub-header row");
            data.remove(0);
        }
    }

    let mut records = Vec::new();
    let mut day = String::new();
    let mut date = String::new();

    for row in &data {
        // Day and Date are merged cells in the sheet, so carry them down
        let cell = |i: usize| row.get(i).map(str::trim).unwrap_or("");
        if !cell(0).is_empty() {
            day = cell(0).to_string();
        }
        if !cell(1).is_empty() {
            date = normalize_date(cell(1));
        }

        let mut i = 2;
        while i + 1 < headers.len() {
            let code = cell(i);
            if !code.is_empty() {
                records.push(MeetingRecord {
                    day: day.clone(),
                    date: date.clone(),
                    time_slot: headers[i + 1].clone(),
                    course_code: code.to_uppercase(),
                    course_name: cell(i + 1).to_string(),
                });
            }
            i += 2;
        }
    }

    let time_slots = extract_time_slots(&headers);
    info!(
        records = records.len(),
        time_slots = time_slots.len(),
        "Loaded date sheet"
    );

    Ok(DateSheet { records, time_slots })
}

/// Collects the timeslot labels from the header row, ordered by start time
pub fn extract_time_slots(headers: &[String]) -> Vec<String> {
    let mut slots: Vec<String> = headers
        .iter()
        .skip(2)
        .filter(|h| h.contains(TIME_SLOT_MARKER))
        .cloned()
        .collect();
    slots.sort_by(|a, b| compare_time_slots(a, b));
    slots.dedup();
    slots
}

/// Orders labels by parsed start time; unparseable labels sort last, lexicographically
fn compare_time_slots(a: &str, b: &str) -> Ordering {
    match (slot_start(a), slot_start(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Parses the start time of a label such as "08:30 - 10:00"
fn slot_start(label: &str) -> Option<NaiveTime> {
    let mut start = label.split(TIME_SLOT_MARKER).next()?.trim().to_uppercase();
    // "9 AM" / "9AM" carry no minutes, which the time formats require
    if !start.contains(':') {
        if let Some(pos) = start.find(|c: char| !c.is_ascii_digit()) {
            if pos > 0 {
                start.insert_str(pos, ":00");
            }
        }
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&start, fmt).ok())
}

/// Normalizes a date to "DD-Mon-YYYY"; values that don't parse are kept as given
pub fn normalize_date(value: &str) -> String {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok().map(|dt| dt.date()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
        .map(|d| d.format(DATE_DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
Mid Term Examination Schedule,,,,,,
Spring Semester,,,,,,
Day,Date,Code,08:30 - 10:00,Code,11:00 - 12:30,Notes
,,,,,,,
Monday,24/02/2025,cs101 ,Programming Fundamentals,MT101,Calculus,
,,EE201,Circuits,,,
Tuesday,25/02/2025,,,PH101,Physics,
";

    fn slots(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reads_pairs_into_records() {
        let sheet = read_datesheet(SHEET.as_bytes(), 2).unwrap();

        assert_eq!(sheet.time_slots, slots(&["08:30 - 10:00", "11:00 - 12:30"]));
        assert_eq!(sheet.records.len(), 4);

        let first = &sheet.records[0];
        assert_eq!(first.day, "Monday");
        assert_eq!(first.date, "24-Feb-2025");
        assert_eq!(first.time_slot, "08:30 - 10:00");
        assert_eq!(first.course_code, "CS101");
        assert_eq!(first.course_name, "Programming Fundamentals");
        assert_eq!(sheet.records[1].time_slot, "11:00 - 12:30");
    }

    #[test]
    fn test_forward_fills_day_and_date() {
        let sheet = read_datesheet(SHEET.as_bytes(), 2).unwrap();
        let circuits = sheet.records.iter().find(|r| r.course_code == "EE201").unwrap();
        assert_eq!(circuits.day, "Monday");
        assert_eq!(circuits.date, "24-Feb-2025");

        let physics = sheet.records.iter().find(|r| r.course_code == "PH101").unwrap();
        assert_eq!(physics.day, "Tuesday");
        assert_eq!(physics.date, "25-Feb-2025");
    }

    #[test]
    fn test_header_row_offset() {
        let csv = "Day,Date,Code,09:00 - 10:00\nMon,x,A1,Alpha\n";
        let sheet = read_datesheet(csv.as_bytes(), 0).unwrap();
        assert_eq!(sheet.records.len(), 1);
        assert_eq!(sheet.records[0].date, "x");
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let err = read_datesheet("only one line\n".as_bytes(), 2).unwrap_err();
        assert!(matches!(err, DatesheetError::MissingHeader { skipped: 2 }));
    }

    #[test]
    fn test_too_few_columns_is_an_error() {
        let err = read_datesheet("Day\nMonday\n".as_bytes(), 0).unwrap_err();
        assert!(matches!(err, DatesheetError::TooFewColumns { found: 1 }));
    }

    #[test]
    fn test_time_slots_sorted_by_start_time() {
        let headers = slots(&[
            "Day",
            "Date",
            "Code",
            "2:00 PM - 3:30 PM",
            "Code",
            "9:00 AM - 10:30 AM",
            "Code",
            "11:00 AM - 12:30 PM",
            "Code",
            "Evening - TBA",
        ]);
        assert_eq!(
            extract_time_slots(&headers),
            slots(&["9:00 AM - 10:30 AM", "11:00 AM - 12:30 PM", "2:00 PM - 3:30 PM", "Evening - TBA"])
        );
    }

    #[test]
    fn test_hour_only_time_slots_sorted_by_start_time() {
        let headers = slots(&[
            "Day",
            "Date",
            "Code",
            "11 AM - 1 PM",
            "Code",
            "2 PM - 4 PM",
            "Code",
            "9AM - 11AM",
        ]);
        assert_eq!(slot_start("9AM - 11AM"), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(slot_start("2 PM - 4 PM"), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(
            extract_time_slots(&headers),
            slots(&["9AM - 11AM", "11 AM - 1 PM", "2 PM - 4 PM"])
        );
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("25/02/2025"), "25-Feb-2025");
        assert_eq!(normalize_date("2025-02-25 00:00:00"), "25-Feb-2025");
        assert_eq!(normalize_date("2025-02-25"), "25-Feb-2025");
        assert_eq!(normalize_date("TBA"), "TBA");
    }
}
