//! Membership command handlers

use log::{debug, info};

use crate::cli::{AddMemberArgs, Cli, OutputFormat, ReplaceOwnersArgs};
use crate::error::{Result, ResultExt};
use crate::gitlab::helpers::{apply_to_public_projects, Filter};
use crate::gitlab::GitlabClient;
use crate::output::{OutcomeRecord, Printer};
use crate::ui::{create_spinner, finish_spinner};

use super::models::{AccessLevel, User};

/// Run the 'add-member' command
///
/// Best effort: every public project is attempted and the outcome of each
/// is printed, followed by the tally.
pub async fn run_add_member_command(
    client: &GitlabClient,
    cli: &Cli,
    args: &AddMemberArgs,
) -> Result<()> {
    let level = AccessLevel::from(args.access);
    let filter = Filter::new(args.project.as_deref())?;
    let printer = Printer::new(OutputFormat::Csv, cli.debug);

    let user = client
        .get_user(&args.username)
        .await
        .context("getting user")?;
    debug!("Adding '{}' ({}) as {}", user.username, user.id, level);

    let user = &user;
    let tally = apply_to_public_projects(
        client.enum_all_groups_projects(),
        &filter,
        &printer,
        |project| async move { client.add_member(&project, user, level).await },
    )
    .await
    .context("listing projects")?;

    printer.emit_all(&tally.records());
    Ok(())
}

/// Run the 'replace-owners' command
///
/// Fail fast: the first project that cannot be updated ends the command.
pub async fn run_replace_owners_command(
    client: &GitlabClient,
    cli: &Cli,
    args: &ReplaceOwnersArgs,
) -> Result<()> {
    let filter = Filter::new(args.project.as_deref())?;
    let printer = Printer::new(OutputFormat::Csv, cli.debug);

    let mut owners: Vec<User> = Vec::with_capacity(args.owners.len());
    for username in &args.owners {
        owners.push(client.get_user(username).await.context("getting user")?);
    }

    let spinner = create_spinner("Fetching projects...", cli.batch);
    let projects = client.list_all_groups_projects().await;
    finish_spinner(spinner);
    let projects = projects.context("listing projects")?;

    for project in projects.iter().filter(|p| filter.accepts(*p, "project")) {
        let removed = client
            .replace_owners(project, &owners)
            .await
            .with_context(|| format!("replacing owners of project '{}'", project.name))?;
        info!(
            "Project '{}': {} previous owner(s) removed",
            project.name,
            removed.len()
        );
        printer.emit(&OutcomeRecord::ok(&project.name));
    }
    Ok(())
}
