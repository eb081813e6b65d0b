//! Upgrade by rewriting framework dependency versions in `package.json`.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use super::{
    Confirm, UpgradeError, UpgradeOptions, UpgradeOutcome, UpgradeRunner, Version,
};

/// Package scope of the framework's own packages.
pub const FRAMEWORK_SCOPE: &str = "@atelier/";

const DEPENDENCY_TABLES: &[&str] = &["dependencies", "devDependencies"];

/// Rewrites every `@atelier/*` dependency of the project to the target
/// release. The installed release is read from the first framework
/// dependency found.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestUpgradeRunner;

impl ManifestUpgradeRunner {
    fn manifest_path(project: &Path) -> PathBuf {
        project.join("package.json")
    }

    fn read(path: &Path) -> Result<Value, UpgradeError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                let dir = path.parent().unwrap_or(path).to_path_buf();
                UpgradeError::ManifestNotFound(dir)
            } else {
                UpgradeError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&content).map_err(|source| UpgradeError::InvalidManifest {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(path: &Path, manifest: &Value) -> Result<(), UpgradeError> {
        let mut content = serde_json::to_string_pretty(manifest).map_err(|source| {
            UpgradeError::InvalidManifest {
                path: path.to_path_buf(),
                source,
            }
        })?;
        content.push('\n');
        std::fs::write(path, content).map_err(|source| UpgradeError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Framework dependencies as (table, package, version range).
fn framework_dependencies(manifest: &Value) -> Vec<(&'static str, String, String)> {
    let mut found = Vec::new();
    for table in DEPENDENCY_TABLES {
        let Some(deps) = manifest.get(*table).and_then(Value::as_object) else {
            continue;
        };
        for (name, range) in deps {
            if !name.starts_with(FRAMEWORK_SCOPE) {
                continue;
            }
            if let Some(range) = range.as_str() {
                found.push((*table, name.clone(), range.to_string()));
            }
        }
    }
    found
}

/// Keep the range operator of `previous` unless `exact` is set.
fn format_range(previous: &str, target: Version, exact: bool) -> String {
    if exact {
        return target.to_string();
    }
    match previous.trim().chars().next() {
        Some(op @ ('^' | '~')) => format!("{op}{target}"),
        _ => target.to_string(),
    }
}

impl UpgradeRunner for ManifestUpgradeRunner {
    fn run(
        &self,
        options: &UpgradeOptions,
        confirm: &dyn Confirm,
    ) -> Result<UpgradeOutcome, UpgradeError> {
        let path = Self::manifest_path(&options.project_path);
        let mut manifest = Self::read(&path)?;

        let deps = framework_dependencies(&manifest);
        let Some((_, _, first_range)) = deps.first() else {
            return Err(UpgradeError::NoFrameworkDependency(path));
        };
        let current: Version = first_range.parse()?;
        let target = options.target.resolve(current)?;
        if target <= current {
            return Err(UpgradeError::NotNewer { current, target });
        }

        let packages: Vec<String> = deps.iter().map(|(_, name, _)| name.clone()).collect();
        debug!(%current, %target, packages = ?packages, "upgrade planned");

        if options.dry_run {
            return Ok(UpgradeOutcome::Planned {
                from: current,
                to: target,
                packages,
            });
        }

        let question = format!(
            "Upgrade {} package(s) from {current} to {target}?",
            packages.len()
        );
        if !confirm.confirm(&question) {
            return Ok(UpgradeOutcome::Aborted);
        }

        for (table, name, range) in &deps {
            if let Some(slot) = manifest
                .get_mut(*table)
                .and_then(|deps| deps.get_mut(name.as_str()))
            {
                *slot = Value::String(format_range(range, target, options.exact));
            }
        }
        Self::write(&path, &manifest)?;
        info!(path = %path.display(), "package.json updated");

        Ok(UpgradeOutcome::Upgraded {
            from: current,
            to: target,
            packages,
        })
    }
}
