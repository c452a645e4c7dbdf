//! Terminal UI helpers: progress spinners and confirmation prompts

mod confirm;
mod spinner;

pub use confirm::confirm_removal;
pub use spinner::{create_spinner, finish_spinner};
