//! Deploy keys module - copy a reference key onto projects or remove it

mod api;
mod commands;
mod models;

pub use commands::run_deploy_key_command;
pub use models::DeployKey;
