pub mod config;
pub mod export;
pub mod pipeline;
pub mod process;
pub mod qa;
pub mod schema;

pub use config::Config;
pub use pipeline::{merge_directory, merge_files, MergeRun};
