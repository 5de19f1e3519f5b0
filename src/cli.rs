//! CLI domain: parse, route, output, and presentation only.
//! Tree construction and comparison live in the library; the route table only dispatches.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat, TreeOptions};
pub use presentation::{BuildSummary, DiffSummary, LevelMismatch, RangeReport};
pub use route::RunContext;
