//! GitLab API client module
//!
//! The HTTP client, the paginated enumerators (materialized and streaming)
//! and one submodule per resource with its models, API calls and command
//! handler.

mod client;
pub mod deploy_keys;
pub mod groups;
pub mod helpers;
pub mod members;
pub mod pagination;
pub mod projects;
pub mod repository;
pub mod stream;
pub mod tls;
pub mod traits;

pub use client::GitlabClient;
pub use deploy_keys::{run_deploy_key_command, DeployKey};
pub use groups::{run_list_groups_command, Group};
pub use helpers::{apply_to_public_projects, BatchTally, Filter};
pub use members::{
    run_add_member_command, run_replace_owners_command, AccessLevel, ProjectMember, User,
};
pub use pagination::{collect_pages, walk_pages, ListOptions, Page, PageMeta};
pub use projects::{
    read_projects_csv, run_create_projects_command, run_list_projects_command,
    run_remove_projects_command, Namespace, Project,
};
pub use repository::{
    count_lines, run_list_files_command, Branch, FileNode, RefName, Tag, TreeEntry,
};
pub use stream::{fan_out, PageSink, PageStream};
pub use tls::{build_http_client, dereference};
pub use traits::GitlabResource;
