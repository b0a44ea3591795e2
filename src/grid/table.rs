use serde::Serialize;
use super::types::{Color, Grid, MeetingRecord};

pub const DAY_HEADER: &str = "Day";
pub const DATE_HEADER: &str = "Date";

/// Row matrix of a grid with the Day and Date columns prepended.
/// `fills` runs parallel to `rows`.
#[derive(Debug, Clone, Serialize)]
pub struct GridTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub fills: Vec<Vec<Color>>,
}

impl GridTable {
    pub fn from_grid(grid: &Grid) -> Self {
        let mut header = vec![DAY_HEADER.to_string(), DATE_HEADER.to_string()];
        header.extend(grid.time_slots.iter().cloned());

        let mut rows = Vec::with_capacity(grid.rows.len());
        let mut fills = Vec::with_capacity(grid.rows.len());
        for physical in &grid.rows {
            let mut row = vec![physical.day.clone(), physical.date.clone()];
            let mut fill = vec![Color::Neutral, Color::Neutral];
            for cell in &physical.cells {
                row.push(cell.text.clone());
                fill.push(cell.color);
            }
            rows.push(row);
            fills.push(fill);
        }

        GridTable { header, rows, fills }
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Column-major view of the cell texts, one vector per header entry
    pub fn columns(&self) -> Vec<Vec<String>> {
        transpose(&self.rows, self.width())
    }

    /// Column-major view of the cell fills
    pub fn fill_columns(&self) -> Vec<Vec<Color>> {
        transpose(&self.fills, self.width())
    }
}

fn transpose<T: Clone>(rows: &[Vec<T>], width: usize) -> Vec<Vec<T>> {
    let mut columns: Vec<Vec<T>> = (0..width).map(|_| Vec::with_capacity(rows.len())).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate().take(width) {
            columns[i].push(value.clone());
        }
    }
    columns
}

/// Flat list of meeting records as displayed in the list view
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ListView {
    pub fn from_records(records: &[MeetingRecord]) -> Self {
        let header = [DAY_HEADER, DATE_HEADER, "Time Slot", "Course Code", "Course Name"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let rows = records
            .iter()
            .map(|r| {
                vec![
                    r.day.clone(),
                    r.date.clone(),
                    r.time_slot.clone(),
                    r.course_code.clone(),
                    r.course_name.clone(),
                ]
            })
            .collect();
        ListView { header, rows }
    }
}
