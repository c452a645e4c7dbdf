//! Projects module - enumerate, create and remove projects

mod api;
mod commands;
mod models;

pub use commands::{
    read_projects_csv, run_create_projects_command, run_list_projects_command,
    run_remove_projects_command,
};
pub use models::{Namespace, Project};
