use std::path::PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use crate::grid::{CollisionPolicy, ColorPolicy};
use crate::parser::DEFAULT_HEADER_ROW;

/// Exam date-sheet generator
#[derive(Debug, Parser)]
#[command(name = "datesheet", version, about)]
pub struct Cli {
    /// CSV export of the published date sheet
    #[arg(long, env = "DATESHEET_PATH", default_value = "data/datesheet.csv", global = true)]
    pub datesheet: PathBuf,

    /// Title rows above the header row
    #[arg(long, default_value_t = DEFAULT_HEADER_ROW, global = true)]
    pub header_row: usize,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List courses matching a search query
    Courses {
        #[arg(default_value = "")]
        query: String,
    },

    /// Print the date sheet for the selected courses
    Show {
        /// Course code or "CODE - Name" key; repeat or comma-separate
        #[arg(short, long = "course", value_delimiter = ',')]
        courses: Vec<String>,

        #[arg(long, value_enum, default_value_t = View::Grid)]
        view: View,

        #[arg(long, value_enum, default_value_t = ColorPolicy::Hash)]
        colors: ColorPolicy,

        #[arg(long, value_enum, default_value_t = CollisionPolicy::SplitRows)]
        collisions: CollisionPolicy,

        /// Seed for reproducible random colors
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the grid to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the date-sheet UI and JSON API
    Serve {
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },
}

/// How the selected exams are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    List,
    Grid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_defaults() {
        let cli = Cli::try_parse_from(["datesheet", "show", "-c", "CS101,MT101"]).unwrap();
        assert_eq!(cli.header_row, DEFAULT_HEADER_ROW);
        match cli.command {
            Commands::Show { courses, view, colors, collisions, seed, output } => {
                assert_eq!(courses, vec!["CS101", "MT101"]);
                assert_eq!(view, View::Grid);
                assert_eq!(colors, ColorPolicy::Hash);
                assert_eq!(collisions, CollisionPolicy::SplitRows);
                assert!(seed.is_none());
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_show_policies() {
        let cli = Cli::try_parse_from([
            "datesheet", "show", "--course", "CS101", "--view", "list",
            "--colors", "random", "--collisions", "merge", "--seed", "7",
        ])
        .unwrap();
        match cli.command {
            Commands::Show { view, colors, collisions, seed, .. } => {
                assert_eq!(seed, Some(7));
                assert_eq!(view, View::List);
                assert_eq!(colors, ColorPolicy::Random);
                assert_eq!(collisions, CollisionPolicy::MergeCell);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
