//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod generate;
pub mod models;
pub mod run;
pub mod utils;

// Re-export main command functions
pub use generate::execute_generate;
pub use models::{GenerateArgs, RunArgs};
pub use run::execute_run;
pub use utils::render_run_summary;
