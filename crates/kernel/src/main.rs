//! Atelier CLI
//!
//! Inspect the admin registry and upgrade projects.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use atelier_kernel::config::Config;
use atelier_kernel::locale::DirectoryTranslations;
use atelier_kernel::upgrade::{
    self, AssumeYes, Confirm, ManifestUpgradeRunner, StdinConfirm, UpgradeOptions,
    UpgradeOutcome, UpgradeTarget,
};
use atelier_kernel::{AdminApp, builtin};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Boot the registry with the built-in extensions and print the render context
    Inspect {
        /// Admin overrides file (TOML or JSON); defaults to ATELIER_ADMIN_CONFIG
        #[arg(long)]
        config: Option<PathBuf>,

        /// Admin translations directory; defaults to ATELIER_TRANSLATIONS_DIR
        #[arg(long)]
        translations: Option<PathBuf>,
    },

    /// Upgrade a project to a newer framework release
    Upgrade {
        /// Log nothing
        #[arg(long, conflicts_with = "debug")]
        silent: bool,

        /// Log debug output
        #[arg(long)]
        debug: bool,

        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// major, minor, patch or an exact X.Y.Z release
        #[arg(long, default_value = "minor")]
        target: UpgradeTarget,

        /// Pin the exact version instead of keeping the range operator
        #[arg(long)]
        exact: bool,

        /// Project directory
        #[arg(long, default_value = ".")]
        project_path: PathBuf,

        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Print the HTTP contract routes
    Contracts,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let forced_filter = match &cli.command {
        Command::Upgrade { silent: true, .. } => Some("off"),
        Command::Upgrade { debug: true, .. } => Some("debug"),
        _ => None,
    };
    init_tracing(forced_filter);

    let result = match cli.command {
        Command::Inspect {
            config,
            translations,
        } => cmd_inspect(config, translations).await,
        Command::Upgrade {
            dry_run,
            target,
            exact,
            project_path,
            yes,
            ..
        } => cmd_upgrade(
            UpgradeOptions {
                project_path,
                target,
                exact,
                dry_run,
            },
            yes,
        ),
        Command::Contracts => {
            cmd_contracts();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => upgrade::handle_error(&err),
    }
}

async fn cmd_inspect(config_path: Option<PathBuf>, translations: Option<PathBuf>) -> Result<()> {
    let mut config = Config::from_env().context("failed to load configuration")?;
    if config_path.is_some() {
        config.admin_config = config_path;
    }
    if let Some(dir) = translations {
        config.translations_dir = dir;
    }

    let custom = config.load_custom_configuration()?;
    let mut app = AdminApp::new(custom, builtin::extensions())
        .with_translation_source(DirectoryTranslations::new(config.translations_dir.clone()));
    if let Some(timeout) = config.extension_timeout {
        app = app.with_extension_timeout(timeout);
    }

    let admin = app.boot().await.context("admin bootstrap failed")?;
    info!(plugins = admin.plugins().len(), "registry booted");

    let context = admin.render_context();
    let json =
        serde_json::to_string_pretty(&context).context("failed to serialize render context")?;
    println!("{json}");
    Ok(())
}

fn cmd_upgrade(options: UpgradeOptions, yes: bool) -> Result<()> {
    let confirm: Box<dyn Confirm> = if yes || !std::io::stdin().is_terminal() {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    };

    let outcome = upgrade::upgrade(&options, &ManifestUpgradeRunner, confirm.as_ref())
        .context("upgrade failed")?;

    match outcome {
        UpgradeOutcome::Upgraded { from, to, packages } => {
            println!("Upgraded {} package(s) from {from} to {to}.", packages.len());
        }
        UpgradeOutcome::Planned { from, to, packages } => {
            println!("Dry run: would upgrade {from} -> {to}:");
            for package in packages {
                println!("  {package}");
            }
        }
        UpgradeOutcome::Aborted => println!("Upgrade aborted."),
    }
    Ok(())
}

fn cmd_contracts() {
    println!("{:<8} {:<40} {}", "METHOD", "PATH", "CONTRACT");
    println!("{}", "-".repeat(80));
    for route in atelier_contracts::ROUTES {
        println!("{:<8} {:<40} {}", route.method, route.path, route.name);
    }
}

/// `forced` (from --silent / --debug) wins over RUST_LOG.
fn init_tracing(forced: Option<&str>) {
    let filter = match forced {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
