//! Commands module - CLI subcommand implementations.

mod batch;
mod languages;
mod score;
mod utils;

// Re-export all public items
pub use batch::{parse_requests, run_batch, BatchItem, BatchOptions, BatchSummary};
pub use languages::run_languages;
pub use score::{run_score, ScoreOptions};
pub use utils::{read_source, resolve_scoring, write_output};
