//! Group command handlers

use log::debug;

use crate::cli::{Cli, ListGroupsArgs};
use crate::error::{Result, ResultExt};
use crate::gitlab::helpers::Filter;
use crate::gitlab::pagination::ListOptions;
use crate::gitlab::GitlabClient;
use crate::output::{GroupRecord, Printer};
use crate::ui::{create_spinner, finish_spinner};

/// Run the 'list-groups' command
pub async fn run_list_groups_command(
    client: &GitlabClient,
    cli: &Cli,
    args: &ListGroupsArgs,
) -> Result<()> {
    let filter = Filter::new(args.group.as_deref())?;
    let printer = Printer::new(args.format, cli.debug);

    let spinner = create_spinner("Fetching groups...", cli.batch);
    let groups = client.list_groups(ListOptions::default()).await;
    finish_spinner(spinner);
    let groups = groups.context("listing groups")?;

    debug!("Fetched {} groups", groups.len());

    for group in groups.iter().filter(|g| filter.accepts(*g, "group")) {
        printer.emit(&GroupRecord::from(group));
    }
    Ok(())
}
