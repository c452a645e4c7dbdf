//! Repository module - branches, tags and file trees

mod api;
mod commands;
mod models;

pub use commands::run_list_files_command;
pub use models::{count_lines, Branch, FileNode, RefName, Tag, TreeEntry};
