//! The `upgrade` command: move a project to a newer framework release.
//!
//! The command itself is thin. It warns about backups, then hands the
//! request to an [`UpgradeRunner`] together with a [`Confirm`] prompt. A
//! declined confirmation is a normal outcome, not an error.

mod manifest;
mod prompt;
mod version;

use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;
use tracing::{info, warn};

pub use manifest::{FRAMEWORK_SCOPE, ManifestUpgradeRunner};
pub use prompt::{AssumeYes, Confirm, StdinConfirm};
pub use version::{UpgradeTarget, Version};

/// Errors raised while upgrading a project.
#[derive(Debug, Error)]
pub enum UpgradeError {
    /// The project has no `package.json`.
    #[error("no package.json found in {0}")]
    ManifestNotFound(PathBuf),

    /// Reading or writing the manifest failed.
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON.
    #[error("{path} is not a valid package.json")]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest does not depend on the framework at all.
    #[error("{0} has no {FRAMEWORK_SCOPE}* dependency; is this an atelier project?")]
    NoFrameworkDependency(PathBuf),

    /// A version string could not be understood.
    #[error("invalid version '{0}': expected X.Y.Z, optionally prefixed with ^ or ~")]
    InvalidVersion(String),

    /// The installed release has no next major, minor or patch number.
    #[error("cannot compute the next {target} release after {current}")]
    NoNextRelease {
        current: Version,
        target: UpgradeTarget,
    },

    /// The target is not newer than the installed release.
    #[error("target version {target} is not newer than the installed version {current}")]
    NotNewer { current: Version, target: Version },
}

/// Options of the `upgrade` command.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeOptions {
    pub project_path: PathBuf,
    pub target: UpgradeTarget,
    /// Pin the exact version instead of keeping the existing range operator.
    pub exact: bool,
    pub dry_run: bool,
}

impl Default for UpgradeOptions {
    fn default() -> Self {
        Self {
            project_path: PathBuf::from("."),
            target: UpgradeTarget::Minor,
            exact: false,
            dry_run: false,
        }
    }
}

/// What an upgrade did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// The manifest was rewritten.
    Upgraded {
        from: Version,
        to: Version,
        packages: Vec<String>,
    },
    /// Dry run: this is what would have been written.
    Planned {
        from: Version,
        to: Version,
        packages: Vec<String>,
    },
    /// The user declined the confirmation.
    Aborted,
}

/// Performs the actual upgrade work.
pub trait UpgradeRunner {
    fn run(
        &self,
        options: &UpgradeOptions,
        confirm: &dyn Confirm,
    ) -> Result<UpgradeOutcome, UpgradeError>;
}

/// Run the `upgrade` command.
pub fn upgrade(
    options: &UpgradeOptions,
    runner: &dyn UpgradeRunner,
    confirm: &dyn Confirm,
) -> Result<UpgradeOutcome, UpgradeError> {
    warn!("Please make sure you've created a backup of your codebase and files before upgrading");

    let outcome = runner.run(options, confirm)?;
    match &outcome {
        UpgradeOutcome::Upgraded { from, to, packages } => {
            info!(%from, %to, packages = packages.len(), "project upgraded");
        }
        UpgradeOutcome::Planned { from, to, packages } => {
            info!(%from, %to, packages = packages.len(), "dry run: no files were changed");
        }
        UpgradeOutcome::Aborted => info!("upgrade aborted"),
    }
    Ok(outcome)
}

/// Print an error and its causes, and return the failure exit code.
pub fn handle_error(err: &anyhow::Error) -> ExitCode {
    eprintln!("error: {err}");
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
    ExitCode::FAILURE
}
