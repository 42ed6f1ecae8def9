use std::fmt::Write;

use crate::error::{Result, ScaffoldError};

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cases the first character and leaves the rest untouched.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds the store `index.ts` that composes several class-based slices.
///
/// Slice actions are merged through the `flattenActions` helper shipped in
/// `utils/flattenActions.ts`, the same composition the single-slice template uses.
pub fn generate_aggregate(aggregate: &str, components: &[String]) -> Result<String> {
    if components.is_empty() {
        return Err(ScaffoldError::InvalidInput("slices must not be empty".to_string()));
    }
    if let Some(dup) = components.iter().enumerate().find_map(|(i, c)| {
        components[..i].contains(c).then_some(c)
    }) {
        return Err(ScaffoldError::InvalidInput(format!("duplicate slice name: {dup}")));
    }

    let mut imports = String::new();
    let mut type_imports = String::new();
    let mut type_exports = String::new();
    let mut config_fields = String::new();
    let mut initial_state = String::new();
    let mut action_types = Vec::with_capacity(components.len());
    let mut slice_types = Vec::with_capacity(components.len());
    let mut creators = Vec::with_capacity(components.len());

    for name in components {
        let pascal = capitalize(name);
        let _ = writeln!(imports, "import {{ create{pascal}Slice }} from './slices/{name}'");
        let _ = writeln!(
            type_imports,
            "import type {{ {pascal}Slice, {pascal}SliceAction, {pascal}SliceConfig }} from './slices/{name}'"
        );
        let _ = writeln!(type_exports, "export type * from './slices/{name}'");
        let _ = writeln!(config_fields, "  {name}?: {pascal}SliceConfig");
        let _ = writeln!(initial_state, "      ...config?.{name}?.initialState,");
        action_types.push(format!("{pascal}SliceAction"));
        slice_types.push(format!("{pascal}Slice"));
        creators.push(format!("create{pascal}Slice(...args)"));
    }

    let slice_union = slice_types.join(" & ");
    let action_union = action_types.join(" & ");
    let creators = creators.join(", ");

    Ok(format!(
        "import {{ createStore }} from 'zustand'
import {{ immer }} from 'zustand/middleware/immer'

import {{ flattenActions }} from './utils/flattenActions'
{imports}
{type_imports}
{type_exports}
export type {aggregate}Slice = {slice_union}

export interface {aggregate}SliceConfig {{
{config_fields}}}

export function create{aggregate}Store(config?: {aggregate}SliceConfig) {{
  return createStore<{aggregate}Slice>()(
    immer((...args) => ({{
{initial_state}      ...flattenActions<{action_union}>([{creators}]),
    }})),
  )
}}

export type {aggregate}StoreApi = ReturnType<typeof create{aggregate}Store>
"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("userData"), "UserData");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_decapitalize() {
        assert_eq!(decapitalize("ToolList"), "toolList");
        assert_eq!(decapitalize(""), "");
    }

    #[test]
    fn test_generate_aggregate_rejects_duplicates() {
        let slices = vec!["auth".to_string(), "auth".to_string()];
        assert!(matches!(generate_aggregate("Core", &slices), Err(ScaffoldError::InvalidInput(_))));
    }
}
