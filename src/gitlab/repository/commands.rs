//! Repository command handlers

use log::{debug, info};

use crate::cli::{Cli, ListFilesArgs};
use crate::error::{Result, ResultExt};
use crate::gitlab::helpers::Filter;
use crate::gitlab::pagination::ListOptions;
use crate::gitlab::{GitlabClient, Group, Project};
use crate::output::{FileRecord, Printer};
use crate::ui::{create_spinner, finish_spinner};

use super::models::{count_lines, RefName};

/// Which kinds of refs a listing walks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RefKinds {
    branches: bool,
    tags: bool,
}

impl RefKinds {
    fn from_filters(branch: &Filter, tag: &Filter) -> Self {
        Self {
            branches: branch.is_set() || !tag.is_set(),
            tags: tag.is_set() || !branch.is_set(),
        }
    }
}

/// Per-invocation state shared by every ref listing
struct FileScan<'a> {
    client: &'a GitlabClient,
    printer: Printer,
    files: Filter,
    count_lines: bool,
}

impl FileScan<'_> {
    async fn list_ref(&self, group: &Group, project: &Project, git_ref: RefName) -> Result<()> {
        let nodes = self
            .client
            .list_tree(project, &git_ref, "")
            .await
            .with_context(|| format!("listing files of '{}'", git_ref.as_str()))?;

        for node in nodes {
            if !self.files.matches(&node.path) {
                info!("Skipped file '{}' in '{}'", node.path, project.name);
                continue;
            }

            let lines = if self.count_lines {
                let content = self
                    .client
                    .raw_blob(project, node.blob_id())
                    .await
                    .with_context(|| format!("getting content of '{}'", node.path))?;
                count_lines(&content)
            } else {
                0
            };

            let (branch, tag) = git_ref.parts();
            self.printer.emit(&FileRecord {
                group: group.name.clone(),
                project: project.name.clone(),
                branch: branch.map(str::to_string),
                tag: tag.map(str::to_string),
                path: node.path,
                lines,
            });
        }
        Ok(())
    }
}

/// Run the 'list-files' command
pub async fn run_list_files_command(
    client: &GitlabClient,
    cli: &Cli,
    args: &ListFilesArgs,
) -> Result<()> {
    let groups_filter = Filter::new(args.group.as_deref())?;
    let projects_filter = Filter::new(args.project.as_deref())?;
    let branch_filter = Filter::new(args.branch.as_deref())?;
    let tag_filter = Filter::new(args.tag.as_deref())?;
    let kinds = RefKinds::from_filters(&branch_filter, &tag_filter);

    let scan = FileScan {
        client,
        printer: Printer::new(args.format, cli.debug),
        files: Filter::new(args.file.as_deref())?,
        count_lines: args.count_lines,
    };

    let spinner = create_spinner("Fetching groups...", cli.batch);
    let groups = client.list_groups(ListOptions::default()).await;
    finish_spinner(spinner);
    let groups = groups.context("listing groups")?;

    for group in groups.iter().filter(|g| groups_filter.accepts(*g, "group")) {
        let projects = client
            .list_group_projects(group)
            .await
            .context("listing group projects")?;

        for project in projects.iter().filter(|p| projects_filter.accepts(*p, "project")) {
            debug!("Scanning project '{}' ({})", project.name, project.id);

            if kinds.branches {
                let branches = client
                    .list_branches(project)
                    .await
                    .context("listing project branches")?;
                for branch in branches.iter().filter(|b| branch_filter.accepts(*b, "branch")) {
                    let git_ref = RefName::from_parts(Some(&branch.name), None)?;
                    scan.list_ref(group, project, git_ref)
                        .await
                        .context("listing branch files")?;
                }
            }

            if kinds.tags {
                let tags = client
                    .list_tags(project)
                    .await
                    .context("listing project tags")?;
                for tag in tags.iter().filter(|t| tag_filter.accepts(*t, "tag")) {
                    let git_ref = RefName::from_parts(None, Some(&tag.name))?;
                    scan.list_ref(group, project, git_ref)
                        .await
                        .context("listing tag files")?;
                }
            }
        }
    }
    Ok(())
}
