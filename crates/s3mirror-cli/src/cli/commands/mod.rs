//! CLI command handlers. Each command is in its own file.

mod buckets;
mod download;
mod list;
mod paths;
mod sanitize;

pub use buckets::run_buckets;
pub use download::run_download;
pub use list::run_list;
#[cfg(test)]
pub(crate) use list::format_listing;
pub use paths::run_paths;
pub use sanitize::{run_sanitize, run_sanitize_path};
