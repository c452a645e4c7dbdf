//! Deploy key command handlers

use log::debug;

use crate::cli::{Cli, DeployKeyArgs, OutputFormat};
use crate::error::{Result, ResultExt};
use crate::gitlab::helpers::{apply_to_public_projects, Filter};
use crate::gitlab::GitlabClient;
use crate::output::Printer;

/// Run the 'deploy-key' command
///
/// The reference key is fetched once, then added to (or removed from)
/// every public project. Best effort, like 'add-member'.
pub async fn run_deploy_key_command(
    client: &GitlabClient,
    cli: &Cli,
    args: &DeployKeyArgs,
) -> Result<()> {
    let filter = Filter::new(args.project.as_deref())?;
    let printer = Printer::new(OutputFormat::Csv, cli.debug);

    let key = client
        .get_deploy_key(args.project_id, args.key_id)
        .await
        .context("getting deploy key")?;
    debug!(
        "Reference deploy key '{}' ({}), {}",
        key.title,
        key.id,
        if args.disabled { "disabling" } else { "enabling" }
    );

    let key = &key;
    let disabled = args.disabled;
    let tally = apply_to_public_projects(
        client.enum_all_groups_projects(),
        &filter,
        &printer,
        |project| async move {
            if disabled {
                client.disable_deploy_key(key, &project).await
            } else {
                client.enable_deploy_key(key, &project).await
            }
        },
    )
    .await
    .context("listing projects")?;

    printer.emit_all(&tally.records());
    Ok(())
}
