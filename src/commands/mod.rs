pub mod lingui;
pub mod tailwind;
pub mod zustand;

use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::materialize::WritePolicy;

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct WriteArgs {
    /// Preview changes without writing files
    #[arg(long)]
    pub dry_run: bool,
    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl WriteArgs {
    pub fn policy(self) -> WritePolicy {
        WritePolicy::new(self.force, self.dry_run)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageManager {
    Pnpm,
    Npm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pnpm => "pnpm",
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    pub fn install_dev_command(self, deps: &[&str]) -> String {
        let joined = deps.join(" ");
        match self {
            Self::Pnpm => format!("pnpm add -D {joined}"),
            Self::Yarn => format!("yarn add -D {joined}"),
            Self::Bun => format!("bun add -d {joined}"),
            Self::Npm => format!("npm install -D {joined}"),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expands a leading `~` the way a shell would.
pub fn expand_path(raw: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&raw.to_string_lossy()).into_owned())
}

/// Splits a comma-separated list, trimming items and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" en, zh ,,ja "), vec!["en", "zh", "ja"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_install_dev_command() {
        let deps = ["tailwindcss", "postcss"];
        assert_eq!(PackageManager::Pnpm.install_dev_command(&deps), "pnpm add -D tailwindcss postcss");
        assert_eq!(PackageManager::Bun.install_dev_command(&deps), "bun add -d tailwindcss postcss");
        assert_eq!(PackageManager::Npm.install_dev_command(&deps), "npm install -D tailwindcss postcss");
    }

    #[test]
    fn test_expand_path_keeps_absolute() {
        assert_eq!(expand_path(Path::new("/tmp/x")), PathBuf::from("/tmp/x"));
    }
}
