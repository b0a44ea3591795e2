use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use crate::error::DatesheetError;
use crate::grid::GridTable;

/// Writes the grid table to a CSV file. Day and Date are only filled on the first
/// physical row of each day, as in the grid view.
pub fn export_grid_to_csv(table: &GridTable, csv_path: &Path) -> Result<(), DatesheetError> {
    let file = File::create(csv_path)?;
    write_grid_csv(table, file)?;
    info!(path = %csv_path.display(), rows = table.rows.len(), "Exported grid");
    Ok(())
}

/// Writes the grid table as CSV to any writer
pub fn write_grid_csv<W: Write>(table: &GridTable, writer: W) -> Result<(), DatesheetError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_writer(writer);

    wtr.write_record(&table.header)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}
