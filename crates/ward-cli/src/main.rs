//! Ward CLI — inspect role resolution and permission checks.

mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use ward_config::{CliOverrides, WardConfig};
use ward_directory::DirectoryStore;
use ward_permissions::{PermissionEvaluator, RoleTemplate};
use ward_types::WardError;

/// Exit code for a denied check.
const EXIT_DENIED: u8 = 1;
/// Exit code when the actor is not in the directory.
const EXIT_UNKNOWN_ACTOR: u8 = 2;

#[derive(Parser)]
#[command(name = "ward", version, about = "Role-based access checks")]
struct Cli {
    /// Directory holding actors.json and roles.json
    #[arg(long, global = true)]
    directory: Option<PathBuf>,

    /// Actor id to resolve (overrides WARD_ACTOR)
    #[arg(long, global = true)]
    actor: Option<String>,

    /// Enable verbose/debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Query(Query),
    /// Write the built-in DEV and Director roles into roles.json
    SeedRoles,
}

/// Commands that run against a resolved session.
#[derive(Subcommand)]
enum Query {
    /// Check whether the actor may perform an action on a category
    Check { category: String, action: String },
    /// Show the resolved actor and role
    Whoami,
    /// List the resolved role's grants
    Grants,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    Ok(run(cli).await?)
}

async fn run(cli: Cli) -> Result<ExitCode, WardError> {
    let config = WardConfig::load(CliOverrides {
        directory: cli.directory,
        actor: cli.actor,
    })?;
    let store = DirectoryStore::new(config.directory.clone());

    match cli.command {
        Command::SeedRoles => seed_roles(&store, &config).await,
        Command::Query(query) => {
            let Some(evaluator) = open_session(&store, &config).await? else {
                return Ok(ExitCode::from(EXIT_UNKNOWN_ACTOR));
            };
            Ok(answer(query, &evaluator))
        }
    }
}

/// Load the directory and resolve the configured actor. `None` when the
/// actor is not in the directory.
async fn open_session(
    store: &DirectoryStore,
    config: &WardConfig,
) -> Result<Option<PermissionEvaluator>, WardError> {
    let directory = store.load().await?;
    let actor_id = config.require_actor()?;

    let mut evaluator = PermissionEvaluator::new(config.fallback.clone());
    if !evaluator.initialize(actor_id, &directory.actors, &directory.roles) {
        eprintln!(
            "Unknown actor '{actor_id}' in {}",
            store.actors_path().display()
        );
        return Ok(None);
    }
    Ok(Some(evaluator))
}

fn answer(query: Query, evaluator: &PermissionEvaluator) -> ExitCode {
    match query {
        Query::Check { category, action } => {
            let decision = evaluator.check(&category, &action);
            println!("{}", report::decision(&decision));
            if decision.is_permit() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_DENIED)
            }
        }
        Query::Whoami => {
            println!("{}", report::whoami(evaluator));
            ExitCode::SUCCESS
        }
        Query::Grants => {
            println!("{}", report::grants(evaluator.current_grants()));
            ExitCode::SUCCESS
        }
    }
}

async fn seed_roles(store: &DirectoryStore, config: &WardConfig) -> Result<ExitCode, WardError> {
    let templates = RoleTemplate::ALL
        .iter()
        .map(|template| template.build(&config.fallback))
        .collect();
    let replaced = store.upsert_roles(templates).await?;
    tracing::info!(replaced, "Seeded built-in roles");
    println!(
        "Seeded {} roles into {} ({replaced} replaced)",
        RoleTemplate::ALL.len(),
        store.roles_path().display()
    );
    Ok(ExitCode::SUCCESS)
}
