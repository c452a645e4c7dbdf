//! Groups module - list, find and create groups

mod api;
mod commands;
mod models;

pub use commands::run_list_groups_command;
pub use models::Group;
