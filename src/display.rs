use crate::catalog::Course;
use crate::grid::{Grid, GridTable, ListView};

/// Placeholder shown when a selection has no exams
pub const NO_DATA: &str = "No data available";

/// Renders a header and rows as a plain-text table with padded columns
pub fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| format!("{:<w$}", cells.get(i).map(String::as_str).unwrap_or(""), w = w))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let mut lines = vec![format_row(header), format!("|-{}-|", separator.join("-|-"))];
    lines.extend(rows.iter().map(|r| format_row(r)));
    lines.join("\n")
}

/// Prints the flat list view of the selected exams
pub fn print_list_view(view: &ListView) {
    println!("\n=== Generated Date Sheet ===");
    if view.rows.is_empty() {
        println!("{}", NO_DATA);
        return;
    }
    println!("{}", render_table(&view.header, &view.rows));
}

/// Prints the day x timeslot grid along with the course color legend
pub fn print_grid_view(grid: &Grid, table: &GridTable) {
    println!("\n=== Grid View ===");
    if grid.is_empty() {
        println!("{}", NO_DATA);
        return;
    }
    println!("{}", render_table(&table.header, &table.rows));

    let placed = grid
        .rows
        .iter()
        .flat_map(|r| &r.cells)
        .filter(|c| !c.is_empty())
        .count();
    println!("\nExam cells: {}", placed);
    for day in &grid.days {
        let rows = grid.rows_for_day(day);
        if rows > 1 {
            println!("⚠️  {} has overlapping exams ({} rows)", day, rows);
        }
    }

    println!("\nCourse colors:");
    for (course, color) in &grid.course_colors {
        println!("  {} -> {}", course, color);
    }
}

/// Prints course suggestions, one identity key per line
pub fn print_courses(courses: &[&Course]) {
    if courses.is_empty() {
        println!("No matching courses");
        return;
    }
    for course in courses {
        println!("{}", course.key());
    }
}
