//! Project command handlers

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::cli::{Cli, CreateProjectsArgs, ListProjectsArgs, RemoveProjectsArgs};
use crate::error::{GitlabError, Result, ResultExt};
use crate::gitlab::helpers::Filter;
use crate::gitlab::pagination::ListOptions;
use crate::gitlab::GitlabClient;
use crate::output::{Printer, ProjectRecord};
use crate::ui::{confirm_removal, create_spinner, finish_spinner};

/// Run the 'list-projects' command
pub async fn run_list_projects_command(
    client: &GitlabClient,
    cli: &Cli,
    args: &ListProjectsArgs,
) -> Result<()> {
    let groups_filter = Filter::new(args.group.as_deref())?;
    let projects_filter = Filter::new(args.project.as_deref())?;
    let printer = Printer::new(args.format, cli.debug);

    let spinner = create_spinner("Fetching groups...", cli.batch);
    let groups = client.list_groups(ListOptions::default()).await;
    finish_spinner(spinner);
    let groups = groups.context("listing groups")?;

    for group in groups.iter().filter(|g| groups_filter.accepts(*g, "group")) {
        let projects = client
            .list_group_projects(group)
            .await
            .context("listing group projects")?;
        debug!("Group '{}' has {} projects", group.name, projects.len());

        for project in projects.iter().filter(|p| projects_filter.accepts(*p, "project")) {
            printer.emit(&ProjectRecord::from(project));
        }
    }
    Ok(())
}

/// Read `group,project` rows into project names per group
///
/// Names are sorted and de-duplicated within each group. Blank lines are
/// ignored; any other row without exactly two non-empty fields is an error.
pub fn read_projects_csv(path: &Path) -> Result<BTreeMap<String, Vec<String>>> {
    let content = fs::read_to_string(path)
        .map_err(GitlabError::from)
        .with_context(|| format!("opening input file '{}'", path.display()))?;

    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let (group, project) = match fields.as_slice() {
            [group, project] if !group.is_empty() && !project.is_empty() => (*group, *project),
            _ => {
                return Err(GitlabError::Config(format!(
                    "{}:{}: expected 'group,project', got '{}'",
                    path.display(),
                    index + 1,
                    line
                )))
            }
        };

        let projects = groups.entry(group.to_string()).or_default();
        if let Err(pos) = projects.binary_search_by(|p| p.as_str().cmp(project)) {
            projects.insert(pos, project.to_string());
        }
    }
    debug!("Read {} group(s) from '{}'", groups.len(), path.display());
    Ok(groups)
}

/// Run the 'create-projects' command
///
/// Rows from `--from` are handled first, one group at a time, then the
/// positional names in `--group`.
pub async fn run_create_projects_command(
    client: &GitlabClient,
    _cli: &Cli,
    args: &CreateProjectsArgs,
) -> Result<()> {
    if !args.names.is_empty() && args.group.is_none() {
        return Err(GitlabError::NotImplemented(
            "user projects creation".to_string(),
        ));
    }

    if let Some(path) = &args.from {
        for (group, names) in read_projects_csv(path)? {
            info!(
                "Creating projects {:?} in group '{}' with owners {:?}",
                names, group, args.owners
            );
            let created = client
                .create_projects(&args.owners, &group, &names)
                .await
                .with_context(|| format!("creating projects {:?} in group '{}'", names, group))?;
            debug!("Created {} project(s) in '{}'", created.len(), group);
        }
    }

    if let Some(group) = &args.group {
        if !args.names.is_empty() {
            let created = client
                .create_projects(&args.owners, group, &args.names)
                .await
                .context("creating projects")?;
            debug!("Created {} project(s) in '{}'", created.len(), group);
        }
    }
    Ok(())
}

/// Run the 'remove-projects' command
///
/// Every name is resolved before anything is deleted.
pub async fn run_remove_projects_command(
    client: &GitlabClient,
    cli: &Cli,
    args: &RemoveProjectsArgs,
) -> Result<()> {
    let Some(group_path) = args.group.as_deref() else {
        return Err(GitlabError::NotImplemented(
            "user projects removal".to_string(),
        ));
    };

    let (group, projects) = client.find_group_projects(group_path, &args.names).await?;

    if !confirm_removal(&args.names, &group.name, args.yes, cli.batch)? {
        info!("Removal of projects from '{}' cancelled", group.name);
        return Ok(());
    }

    for project in &projects {
        client.delete_project(project).await.with_context(|| {
            format!(
                "removing project '{}' ({}) from group '{}'",
                project.name, project.id, group_path
            )
        })?;
        info!(
            "Removed project '{}' ({}) from group '{}'",
            project.name, project.id, group_path
        );
    }
    Ok(())
}
