use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ScaffoldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WritePolicy {
    pub force: bool,
    pub dry_run: bool,
}

impl WritePolicy {
    pub fn new(force: bool, dry_run: bool) -> Self {
        Self { force, dry_run }
    }
}

/// Decides what happens to one output path. Dry runs classify identically.
pub fn classify(exists: bool, force: bool) -> Outcome {
    match (exists, force) {
        (false, _) => Outcome::Created,
        (true, false) => Outcome::Skipped,
        (true, true) => Outcome::Updated,
    }
}

/// Applies `content` to `path` under `policy` and reports what happened (or would have).
pub fn materialize(path: &Path, content: &str, policy: WritePolicy) -> Result<Outcome> {
    let outcome = classify(path.exists(), policy.force);
    debug!(path = %path.display(), ?outcome, dry_run = policy.dry_run, "materialize");

    if outcome != Outcome::Skipped && !policy.dry_run {
        write_atomic(path, content)?;
    }
    Ok(outcome)
}

/// Writes through a sibling temp file so a failed write never leaves a truncated target.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".scaffold-kit-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }

    let mut tmp = builder.tempfile_in(parent).map_err(|e| ScaffoldError::io(parent, e))?;
    tmp.write_all(content.as_bytes()).map_err(|e| ScaffoldError::io(path, e))?;
    tmp.persist(path).map_err(|e| ScaffoldError::io(path, e.error))?;
    Ok(())
}
