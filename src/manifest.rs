use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, ScaffoldError};
use crate::materialize::write_atomic;

pub type Object = Map<String, Value>;

/// Sections of a `package.json` the scaffolders contribute to, in merge order.
pub const PACKAGE_SECTIONS: &[&str] = &["scripts", "dependencies", "devDependencies"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub changed: bool,
    /// `section.key` for every entry added, in insertion order.
    pub added: Vec<String>,
}

/// Extra entries folded into one snippet section before merging.
#[derive(Debug, Clone, Copy)]
pub struct Extra<'a> {
    pub section: &'a str,
    pub entries: &'a Object,
}

/// Adds snippet entries the target does not have yet. Existing keys are never touched.
pub fn merge_manifest(
    target: &mut Object,
    snippet: &Object,
    sections: &[&str],
    extra: Option<Extra<'_>>,
) -> Result<MergeOutcome> {
    let mut outcome = MergeOutcome::default();

    for &section in sections {
        let Some(Value::Object(payload)) = snippet.get(section) else {
            debug!(section, "section absent from snippet");
            continue;
        };

        let mut payload = payload.clone();
        if let Some(extra) = extra.filter(|e| e.section == section) {
            payload.extend(extra.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let current = target.entry(section).or_insert_with(|| Value::Object(Object::new()));
        let Value::Object(current) = current else {
            return Err(ScaffoldError::MalformedTarget { section: section.to_string() });
        };

        for (key, value) in payload {
            if current.contains_key(&key) {
                continue;
            }
            debug!(section, key = %key, "manifest entry added");
            outcome.added.push(format!("{section}.{key}"));
            current.insert(key, value);
            outcome.changed = true;
        }
    }

    Ok(outcome)
}

pub fn parse_object(text: &str, origin: &Path) -> Result<Object> {
    let value: Value = serde_json::from_str(text)
        .map_err(|source| ScaffoldError::InvalidJson { path: origin.to_path_buf(), source })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ScaffoldError::InvalidInput(format!(
            "expected JSON object in {}",
            origin.display()
        ))),
    }
}

pub fn load_object(path: &Path) -> Result<Object> {
    let text = fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
    parse_object(&text, path)
}

/// Pretty-prints with two-space indent and a trailing newline. No-op under dry run.
pub fn write_object(path: &Path, object: &Object, dry_run: bool) -> Result<()> {
    if dry_run {
        return Ok(());
    }
    let mut text = serde_json::to_string_pretty(object)
        .map_err(|source| ScaffoldError::InvalidJson { path: path.to_path_buf(), source })?;
    text.push('\n');
    write_atomic(path, &text)
}
