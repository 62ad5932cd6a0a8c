mod create;
mod update;

pub use create::{create_project, CreateError, CreateOptions};
pub use update::{update_project, UpdateError, UpdateOptions, UpdateSummary};
