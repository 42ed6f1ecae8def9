use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, ScaffoldError};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Z0-9_]+)\}\}").expect("placeholder pattern is valid"));

/// Placeholder name to replacement text. Ordered so that anything derived from it is stable.
pub type Values = BTreeMap<String, String>;

/// Substitutes every `{{NAME}}` token in one pass.
///
/// Fails on the first token without a value; nothing is returned for a partially
/// rendered template. Values are inserted verbatim and never rescanned.
pub fn render(template: &str, values: &Values) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let (Some(token), Some(name)) = (caps.get(0), caps.get(1)) else { continue };
        let value = values
            .get(name.as_str())
            .ok_or_else(|| ScaffoldError::MissingPlaceholder { name: name.as_str().to_string() })?;
        out.push_str(&template[last..token.start()]);
        out.push_str(value);
        last = token.end();
    }

    out.push_str(&template[last..]);
    Ok(out)
}

/// Distinct placeholder names referenced by `template`, in first-use order.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        if let Some(name) = caps.get(1).map(|m| m.as_str())
            && !names.contains(&name)
        {
            names.push(name);
        }
    }
    names
}
