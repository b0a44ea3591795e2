use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize, Serializer};

/// One exam event: a course sitting on a given day in a given timeslot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRecord {
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time Slot")]
    pub time_slot: String,
    #[serde(rename = "Course Code")]
    pub course_code: String,
    #[serde(rename = "Course Name")]
    pub course_name: String,
}

impl MeetingRecord {
    /// Identity key used to group and color-match a course: "{code} - {name}"
    pub fn course_key(&self) -> String {
        format!("{} - {}", self.course_code, self.course_name)
    }
}

/// Background color of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Cells with no course, and the Day/Date columns
    Neutral,
    Hsl { hue: u16, saturation: u8, lightness: u8 },
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Neutral => write!(f, "white"),
            Color::Hsl { hue, saturation, lightness } => {
                write!(f, "hsl({}, {}%, {}%)", hue, saturation, lightness)
            }
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single cell in one physical row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub text: String,
    pub color: Color,
}

impl GridCell {
    pub fn empty() -> Self {
        GridCell { text: String::new(), color: Color::Neutral }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// One renderable table row. A day with colliding courses spans several of these;
/// only the first carries the day and date labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhysicalRow {
    pub day: String,
    pub date: String,
    pub cells: Vec<GridCell>, // one per timeslot, in column order
}

/// Day x timeslot grid produced from a flat record list
#[derive(Debug, Clone, Serialize)]
pub struct Grid {
    pub days: Vec<String>,
    pub time_slots: Vec<String>,
    pub rows: Vec<PhysicalRow>,
    pub course_colors: BTreeMap<String, Color>, // course key -> color
}

impl Grid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of physical rows emitted for `day`
    pub fn rows_for_day(&self, day: &str) -> usize {
        let Some(start) = self.rows.iter().position(|r| r.day == day) else {
            return 0;
        };
        1 + self.rows[start + 1..]
            .iter()
            .take_while(|r| r.day.is_empty())
            .count()
    }
}
