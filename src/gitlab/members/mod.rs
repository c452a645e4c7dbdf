//! Members module - users, project membership and owner replacement

mod api;
mod commands;
mod models;

pub use commands::{run_add_member_command, run_replace_owners_command};
pub use models::{AccessLevel, ProjectMember, User};
