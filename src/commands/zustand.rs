use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context as _, Result, bail};
use clap::{Parser, ValueEnum};
use regex::Regex;

use super::{WriteArgs, expand_path, split_list};
use crate::aggregate::{capitalize, decapitalize};
use crate::plan::{self, Context, Step};
use crate::render::Values;
use crate::report::Report;
use crate::templates::{self, ZUSTAND};

static STORE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("store name pattern is valid"));
static SLICE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").expect("slice name pattern is valid"));

const DEFAULT_SLICE: &str = "core";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Pattern {
    /// Component-level store with context and provider
    Web,
    /// Slice-based store composed from class-based slices
    Core,
}

impl Pattern {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Core => "core",
        }
    }
}

/// Scaffold class-based Zustand stores
#[derive(Debug, Clone, Parser)]
pub struct ZustandArgs {
    /// Store pattern
    #[arg(long, value_enum)]
    pub pattern: Pattern,
    /// PascalCase store name, e.g. ToolList
    #[arg(long)]
    pub name: String,
    /// Target directory for the store
    #[arg(long)]
    pub path: PathBuf,
    /// Comma-separated camelCase slice names for the core pattern, e.g. auth,user,ui
    #[arg(long)]
    pub slices: Option<String>,
    #[command(flatten)]
    pub write: WriteArgs,
}

pub fn validate_store_name(name: &str) -> Result<()> {
    if !STORE_NAME_RE.is_match(name) {
        bail!("--name must be PascalCase (e.g. ToolList).");
    }
    Ok(())
}

pub fn invalid_slice_names(slices: &[String]) -> Vec<&str> {
    slices.iter().map(String::as_str).filter(|s| !SLICE_NAME_RE.is_match(s)).collect()
}

/// Parses `--slices`, rejecting an empty list, bad names and duplicates.
pub fn parse_slices(raw: &str) -> Result<Vec<String>> {
    let slices = split_list(raw);
    if slices.is_empty() {
        bail!("--slices must include at least one slice name (e.g., auth,user).");
    }
    let invalid = invalid_slice_names(&slices);
    if !invalid.is_empty() {
        bail!("Invalid slice names: {}. Must be camelCase (e.g., auth, userData).", invalid.join(", "));
    }
    if let Some((i, dup)) = slices.iter().enumerate().find(|(i, s)| slices[..*i].contains(s)) {
        bail!("duplicate slice name at position {}: {dup}", i + 1);
    }
    Ok(slices)
}

/// Asks for slice names on a terminal. Non-interactive input falls back to a single `core` slice.
fn prompt_slices() -> Result<Vec<String>> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(vec![DEFAULT_SLICE.to_string()]);
    }

    println!("\nCore pattern detected. Do you need multiple slices for different features?");
    println!("   Examples: auth, user, ui, data, settings");
    println!("   Leave empty to use single '{DEFAULT_SLICE}' slice.\n");

    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter slice names (comma-separated, or press Enter for '{DEFAULT_SLICE}'): ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(vec![DEFAULT_SLICE.to_string()]);
        };
        if line.trim().is_empty() {
            return Ok(vec![DEFAULT_SLICE.to_string()]);
        }
        match parse_slices(&line) {
            Ok(slices) => return Ok(slices),
            Err(err) => println!("{err}\n   Please try again.\n"),
        }
    }
}

pub fn build_values(store: &str) -> Values {
    [
        ("STORE_NAME", store.to_string()),
        ("STORE_NAME_CAMEL", decapitalize(store)),
        ("CONTEXT_NAME", format!("{store}Context")),
        ("PROVIDER_NAME", format!("{store}Provider")),
        ("STORE_TYPE", format!("{store}Store")),
        ("STATE_TYPE", format!("{store}StoreState")),
        ("ACTIONS_TYPE", format!("{store}StoreActions")),
        ("PROPS_TYPE", format!("{store}Props")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn slice_values(slice: &str) -> Values {
    Values::from([
        ("SLICE_NAME".to_string(), capitalize(slice)),
        ("SLICE_NAME_CAMEL".to_string(), slice.to_string()),
    ])
}

/// Shared utilities first, then the pattern's own files.
pub fn plan_steps(pattern: Pattern, store: &str, slices: &[String]) -> Vec<Step> {
    let mut steps = vec![
        Step::render("shared/types.ts.tpl", "types.ts"),
        Step::render("shared/flatten-actions.ts.tpl", "utils/flattenActions.ts"),
    ];

    match pattern {
        Pattern::Web => {
            steps.push(Step::render("web/index.ts.tpl", "index.ts"));
            steps.push(Step::render("web/context.ts.tpl", "context.ts"));
            steps.push(Step::render("web/provider.tsx.tpl", "provider.tsx"));
        }
        Pattern::Core => {
            for slice in slices {
                steps.push(Step::Render {
                    template: "core/slices/core.ts.tpl".to_string(),
                    output: format!("slices/{slice}.ts"),
                    extra: slice_values(slice),
                });
            }
            match slices {
                [single] => steps.push(Step::Render {
                    template: "core/index.ts.tpl".to_string(),
                    output: "index.ts".to_string(),
                    extra: slice_values(single),
                }),
                _ => steps.push(Step::Aggregate {
                    name: store.to_string(),
                    components: slices.to_vec(),
                    output: "index.ts".to_string(),
                }),
            }
        }
    }
    steps
}

pub fn run(args: &ZustandArgs, templates_root: Option<&Path>) -> Result<Report> {
    validate_store_name(&args.name)?;

    let slices = match (args.pattern, &args.slices) {
        (Pattern::Web, _) => Vec::new(),
        (Pattern::Core, Some(raw)) => parse_slices(raw)?,
        (Pattern::Core, None) => prompt_slices().context("failed to read slice names")?,
    };

    let source = templates::open(ZUSTAND, templates_root).context("failed to open templates")?;
    let target = expand_path(&args.path);
    let values = build_values(&args.name);
    let steps = plan_steps(args.pattern, &args.name, &slices);

    println!("\nScaffolding {} store: {} (class-based)", args.pattern.as_str(), args.name);
    if !slices.is_empty() {
        println!("Slices: {}", slices.join(", "));
    }
    println!("Target: {}", target.display());

    let ctx = Context { templates: &*source, values: &values, root: &target, policy: args.write.policy() };
    let mut report = Report::new();
    if !plan::execute(&ctx, &steps, &mut report) {
        report.add_note(plan::STOPPED_NOTE);
    }
    report.print_summary("zustand-store-scaffold");

    if report.is_success() {
        println!("\nNext steps:");
        println!("  1. Define state properties in *SliceState interface");
        println!("  2. Add action methods as arrow functions in *ActionImpl class");
        println!("  3. Use this.#set() for state updates, this.#get() for reading state");
        match args.pattern {
            Pattern::Web => {
                println!("  4. Import Provider in your component");
                println!("  5. Use the context hook to access state");
            }
            Pattern::Core => {
                println!("  4. Create store instance with createStore()");
                println!("  5. Use store.getState() and store.setState()");
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_store_name() {
        assert!(validate_store_name("ToolList").is_ok());
        assert!(validate_store_name("toolList").is_err());
        assert!(validate_store_name("Tool-List").is_err());
    }

    #[test]
    fn test_parse_slices() {
        assert_eq!(parse_slices("auth, userData").unwrap(), vec!["auth", "userData"]);
        assert!(parse_slices(" , ").is_err());
        assert!(parse_slices("Auth").is_err());
        assert!(parse_slices("auth,auth").is_err());
    }

    #[test]
    fn test_build_values() {
        let values = build_values("ToolList");
        assert_eq!(values["STORE_NAME_CAMEL"], "toolList");
        assert_eq!(values["STATE_TYPE"], "ToolListStoreState");
    }

    #[test]
    fn test_plan_single_slice_uses_template() {
        let steps = plan_steps(Pattern::Core, "Core", &["core".to_string()]);
        assert!(matches!(steps.last(), Some(Step::Render { template, .. }) if template == "core/index.ts.tpl"));
    }

    #[test]
    fn test_plan_multi_slice_uses_generator() {
        let slices = vec!["auth".to_string(), "user".to_string()];
        let steps = plan_steps(Pattern::Core, "Core", &slices);
        assert_eq!(steps.len(), 2 + 2 + 1);
        assert!(matches!(steps.last(), Some(Step::Aggregate { .. })));
    }
}
