//! CLI command handlers.

mod convert;
mod export;
mod fetch;
mod list;
mod manifest_file;
mod validate;

pub use convert::run_convert_command;
pub use export::run_export_command;
pub use fetch::run_fetch_command;
pub use list::run_list_fetchers_command;
pub use validate::run_validate_manifest_command;
