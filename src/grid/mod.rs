pub mod types;
pub mod color;
pub mod builder;
pub mod table;

pub use types::{Color, Grid, MeetingRecord};
pub use color::ColorPolicy;
pub use builder::{build_grid, build_grid_with, CollisionPolicy};
pub use table::{GridTable, ListView};
