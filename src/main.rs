mod catalog;
mod config;
mod display;
mod error;
mod export;
mod grid;
mod parser;
mod web;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::{course_catalog, filter_records, search_courses};
use config::{Cli, Commands, View};
use display::{print_courses, print_grid_view, print_list_view};
use export::export_grid_to_csv;
use grid::{build_grid, build_grid_with, CollisionPolicy, ColorPolicy, GridTable, ListView};
use parser::load_datesheet;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let sheet = load_datesheet(&cli.datesheet, cli.header_row)?;

    match cli.command {
        Commands::Serve { port } => {
            println!("Access the site at http://localhost:{}", port);
            web::start_server(port, sheet).await?;
        }

        Commands::Courses { query } => {
            let catalog = course_catalog(&sheet.records);
            let matches = search_courses(&catalog, &query);
            info!(matches = matches.len(), "Course search for {:?}", query);
            print_courses(&matches);
        }

        Commands::Show { courses, view, colors, collisions, seed, output } => {
            let records = filter_records(&sheet.records, &courses);
            info!(
                selected = courses.len(),
                exams = records.len(),
                "Generating date sheet"
            );

            let grid = if colors == ColorPolicy::Hash && collisions == CollisionPolicy::SplitRows {
                build_grid(&records, &sheet.time_slots)
            } else {
                let mut assigner = colors.assigner(seed);
                build_grid_with(&records, &sheet.time_slots, collisions, assigner.as_mut())
            };
            let table = GridTable::from_grid(&grid);

            match view {
                View::List => print_list_view(&ListView::from_records(&records)),
                View::Grid => print_grid_view(&grid, &table),
            }

            if let Some(path) = output {
                export_grid_to_csv(&table, &path)?;
                println!("Grid saved to {}", path.display());
            }
        }
    }

    Ok(())
}
