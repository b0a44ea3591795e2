use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};
use super::color::{ColorAssigner, HashColorAssigner};
use super::types::{Color, Grid, GridCell, MeetingRecord, PhysicalRow};

/// Separator between course keys sharing a cell under `CollisionPolicy::MergeCell`
pub const MERGE_SEPARATOR: &str = " / ";

/// What to do when several courses occupy the same day and timeslot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CollisionPolicy {
    /// Give every colliding course its own physical row
    #[default]
    #[value(name = "split")]
    SplitRows,
    /// Join colliding courses into one cell, colored after the first
    #[value(name = "merge")]
    MergeCell,
}

/// Builds a grid with row splitting and hash-derived colors
pub fn build_grid(records: &[MeetingRecord], time_slots: &[String]) -> Grid {
    build_grid_with(records, time_slots, CollisionPolicy::default(), &mut HashColorAssigner)
}

/// Pivots flat meeting records into a day x timeslot grid.
///
/// Days keep the order in which they first appear in `records`; columns keep the
/// order of `time_slots`. Records naming a timeslot outside `time_slots` are
/// left out of the grid.
pub fn build_grid_with<A>(
    records: &[MeetingRecord],
    time_slots: &[String],
    collisions: CollisionPolicy,
    assigner: &mut A,
) -> Grid
where
    A: ColorAssigner + ?Sized,
{
    if records.is_empty() {
        debug!("No meeting records; returning an empty grid");
    }
    if time_slots.is_empty() {
        debug!("No timeslots supplied; grid rows will carry labels only");
    }

    let known_slots: HashSet<&str> = time_slots.iter().map(String::as_str).collect();

    // Distinct days in first-seen order, each with the date of its first record
    let mut days: Vec<String> = Vec::new();
    let mut dates: HashMap<&str, &str> = HashMap::new();
    // (day, slot) -> records in input order
    let mut occupancy: HashMap<(&str, &str), Vec<&MeetingRecord>> = HashMap::new();

    for record in records {
        if !dates.contains_key(record.day.as_str()) {
            dates.insert(record.day.as_str(), record.date.as_str());
            days.push(record.day.clone());
        }
        if !known_slots.contains(record.time_slot.as_str()) {
            warn!(
                course = %record.course_key(),
                day = %record.day,
                time_slot = %record.time_slot,
                "Timeslot not in the supplied list; record left out of the grid"
            );
            continue;
        }
        occupancy
            .entry((record.day.as_str(), record.time_slot.as_str()))
            .or_default()
            .push(record);
    }

    let mut course_colors: BTreeMap<String, Color> = BTreeMap::new();
    let mut color_of = |key: &str| -> Color {
        if key.is_empty() {
            return Color::Neutral;
        }
        if let Some(color) = course_colors.get(key) {
            return *color;
        }
        let color = assigner.color_for(key);
        course_colors.insert(key.to_string(), color);
        color
    };

    let mut rows = Vec::new();
    for day in &days {
        let date = dates.get(day.as_str()).copied().unwrap_or_default();
        let columns: Vec<&[&MeetingRecord]> = time_slots
            .iter()
            .map(|slot| {
                occupancy
                    .get(&(day.as_str(), slot.as_str()))
                    .map(Vec::as_slice)
                    .unwrap_or(&[])
            })
            .collect();

        match collisions {
            CollisionPolicy::SplitRows => {
                let max_occupancy = columns.iter().map(|c| c.len()).max().unwrap_or(0).max(1);
                if max_occupancy > 1 {
                    debug!(day = %day, rows = max_occupancy, "Splitting day across physical rows");
                }
                for i in 0..max_occupancy {
                    let cells = columns
                        .iter()
                        .map(|column| match column.get(i) {
                            Some(record) => {
                                let text = record.course_key();
                                let color = color_of(&text);
                                GridCell { text, color }
                            }
                            None => GridCell::empty(),
                        })
                        .collect();
                    rows.push(labelled_row(i == 0, day, date, cells));
                }
            }
            CollisionPolicy::MergeCell => {
                let cells = columns
                    .iter()
                    .map(|column| {
                        let keys: Vec<String> = column.iter().map(|r| r.course_key()).collect();
                        let mut color = Color::Neutral;
                        for (idx, key) in keys.iter().enumerate() {
                            let c = color_of(key);
                            if idx == 0 {
                                color = c;
                            }
                        }
                        GridCell { text: keys.join(MERGE_SEPARATOR), color }
                    })
                    .collect();
                rows.push(labelled_row(true, day, date, cells));
            }
        }
    }

    debug!(
        days = days.len(),
        rows = rows.len(),
        courses = course_colors.len(),
        "Built date-sheet grid"
    );

    Grid {
        days,
        time_slots: time_slots.to_vec(),
        rows,
        course_colors,
    }
}

fn labelled_row(first: bool, day: &str, date: &str, cells: Vec<GridCell>) -> PhysicalRow {
    if first {
        PhysicalRow { day: day.to_string(), date: date.to_string(), cells }
    } else {
        PhysicalRow { day: String::new(), date: String::new(), cells }
    }
}
