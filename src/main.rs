//! gitlab-api-client - main entry point

use clap::Parser;
use log::{debug, error, info};

use gitlab_api_client::gitlab::{build_http_client, dereference};
use gitlab_api_client::{
    logging, run_add_member_command, run_create_projects_command, run_deploy_key_command,
    run_list_files_command, run_list_groups_command, run_list_projects_command,
    run_remove_projects_command, run_replace_owners_command, Cli, Command, GitlabClient, Result,
    Settings, SettingsStore,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_format, &cli.log_file, cli.debug) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli).await {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let store = SettingsStore::for_cli(cli.config.as_deref());
    let settings = Settings::resolve(cli, store.load()?)?;

    let pems = dereference(&settings.trusted_certificates)?;
    let http = build_http_client(&pems)?;
    let client = GitlabClient::new(http, &settings.api_url, settings.private_token);

    info!(
        "gitlab-api-client v{}: {} against {}",
        env!("CARGO_PKG_VERSION"),
        cli.command.name(),
        client.base_url()
    );
    debug!("{} extra trusted certificate source(s)", pems.len());

    match &cli.command {
        Command::ListGroups(args) => run_list_groups_command(&client, cli, args).await,
        Command::ListProjects(args) => run_list_projects_command(&client, cli, args).await,
        Command::ListFiles(args) => run_list_files_command(&client, cli, args).await,
        Command::AddMember(args) => run_add_member_command(&client, cli, args).await,
        Command::ReplaceOwners(args) => run_replace_owners_command(&client, cli, args).await,
        Command::CreateProjects(args) => run_create_projects_command(&client, cli, args).await,
        Command::RemoveProjects(args) => run_remove_projects_command(&client, cli, args).await,
        Command::DeployKey(args) => run_deploy_key_command(&client, cli, args).await,
    }
}
