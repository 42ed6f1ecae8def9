use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context as _, Result, bail};
use clap::{Parser, ValueEnum};
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use super::{PackageManager, WriteArgs, expand_path};
use crate::plan::{self, Context, Step};
use crate::render::Values;
use crate::report::Report;
use crate::templates::{self, TAILWIND};

const BASE_DEPS: &[&str] = &["tailwindcss", "@tailwindcss/postcss", "postcss"];
const PLUGIN_DEPS: &[&str] = &["tw-animate-css", "tailwind-scrollbar", "@iconify/tailwind4"];
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
];

static GLOBALS_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| import_re("globals"));
static CUSTOM_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| import_re("custom"));

fn import_re(stem: &str) -> Regex {
    Regex::new(&format!(
        r#"(?m)^\s*import\s+(?:type\s+)?(?:[^'"]+\s+from\s+)?['"][^'"]*{stem}\.css['"]\s*;?(?:\s*//.*)?$"#
    ))
    .expect("import pattern is valid")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Minimal,
    ProjectLike,
}

impl Preset {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::ProjectLike => "project-like",
        }
    }

    /// (output file, template file) pairs, in write order.
    pub fn files(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Minimal => &[
                ("tailwind-core.css", "tailwind-core.tpl"),
                ("globals.css", "globals.tpl"),
                ("custom.css", "custom.tpl"),
            ],
            Self::ProjectLike => &[
                ("tailwind-core.css", "tailwind-core.tpl"),
                ("globals.css", "globals.tpl"),
                ("custom.css", "custom.tpl"),
                ("shadcn-theme.css", "shadcn-theme.tpl"),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Icons {
    All,
    Lucide,
    None,
}

impl Icons {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Lucide => "lucide",
            Self::None => "none",
        }
    }

    fn deps(self) -> &'static [&'static str] {
        match self {
            Self::All => &["@iconify-json/lucide", "@iconify-json/mdi", "@iconify-json/tabler"],
            Self::Lucide => &["@iconify-json/lucide"],
            Self::None => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ManagerChoice {
    Auto,
    Pnpm,
    Npm,
    Yarn,
    Bun,
}

/// Initialize Tailwind CSS v4 style files for a Next.js project
#[derive(Debug, Clone, Parser)]
pub struct TailwindArgs {
    /// Path to the target project root
    #[arg(long)]
    pub project_root: PathBuf,
    /// Template preset to apply
    #[arg(long, value_enum, default_value_t = Preset::Minimal)]
    pub preset: Preset,
    /// Iconify JSON package strategy
    #[arg(long, value_enum, default_value_t = Icons::All)]
    pub icons: Icons,
    /// Package manager for the install command
    #[arg(long, value_enum, default_value_t = ManagerChoice::Auto)]
    pub package_manager: ManagerChoice,
    #[command(flatten)]
    pub write: WriteArgs,
}

/// Resolves the package manager, walking up from `root` for a lockfile when set to auto.
pub fn detect_package_manager(root: &Path, choice: ManagerChoice) -> (PackageManager, Option<PathBuf>) {
    let fixed = match choice {
        ManagerChoice::Auto => None,
        ManagerChoice::Pnpm => Some(PackageManager::Pnpm),
        ManagerChoice::Npm => Some(PackageManager::Npm),
        ManagerChoice::Yarn => Some(PackageManager::Yarn),
        ManagerChoice::Bun => Some(PackageManager::Bun),
    };
    if let Some(pm) = fixed {
        return (pm, None);
    }

    for dir in root.ancestors() {
        for (lockfile, pm) in LOCKFILES {
            let candidate = dir.join(lockfile);
            if candidate.exists() {
                return (*pm, Some(candidate));
            }
        }
    }
    (PackageManager::Npm, None)
}

pub fn dependency_set(icons: Icons) -> Vec<&'static str> {
    let mut deps: Vec<&str> = Vec::new();
    for dep in BASE_DEPS.iter().chain(PLUGIN_DEPS).chain(icons.deps()) {
        if !deps.contains(dep) {
            deps.push(*dep);
        }
    }
    deps
}

pub fn resolve_layout_file(root: &Path) -> Option<PathBuf> {
    ["src/app/layout.tsx", "app/layout.tsx"].iter().map(|rel| root.join(rel)).find(|p| p.exists())
}

pub fn resolve_styles_dir(root: &Path, layout: Option<&Path>) -> PathBuf {
    if let Some(existing) = ["src/styles", "styles"].iter().map(|rel| root.join(rel)).find(|p| p.exists()) {
        return existing;
    }
    if let Some(rel) = layout.and_then(|l| l.strip_prefix(root).ok()) {
        if rel.starts_with("src/app") {
            return root.join("src/styles");
        }
        if rel.starts_with("app") {
            return root.join("styles");
        }
    }
    root.join("src/styles")
}

/// Whether the layout already imports globals.css and custom.css.
pub fn import_status(layout_source: &str) -> (bool, bool) {
    (GLOBALS_IMPORT_RE.is_match(layout_source), CUSTOM_IMPORT_RE.is_match(layout_source))
}

fn load_json(path: &Path) -> Option<Value> {
    let text = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to parse JSON file");
            None
        }
    }
}

fn string_list(value: Option<&Value>) -> impl Iterator<Item = String> + '_ {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// `@source` hints from tailwind-source-hints.json and package.json, de-duplicated in order.
pub fn load_source_hints(root: &Path) -> Vec<String> {
    let mut hints: Vec<String> = Vec::new();

    if let Some(file) = load_json(&root.join("tailwind-source-hints.json")) {
        hints.extend(string_list(file.get("sources")));
    }
    if let Some(pkg) = load_json(&root.join("package.json")) {
        hints.extend(string_list(pkg.get("tailwindSourceHints")));
        hints.extend(string_list(pkg.get("tailwind").and_then(|t| t.get("sourceHints"))));
    }

    let mut unique: Vec<String> = Vec::with_capacity(hints.len());
    for hint in hints {
        if !unique.contains(&hint) {
            unique.push(hint);
        }
    }
    unique
}

pub fn run(args: &TailwindArgs, templates_root: Option<&Path>) -> Result<Report> {
    let raw_root = expand_path(&args.project_root);
    if !raw_root.exists() {
        bail!("project root does not exist: {}", raw_root.display());
    }
    let root = raw_root.canonicalize().with_context(|| format!("failed to resolve {}", raw_root.display()))?;
    if !root.join("package.json").exists() {
        bail!("package.json not found in project root: {}", root.display());
    }
    let source = templates::open(TAILWIND, templates_root).context("failed to open templates")?;

    let layout = resolve_layout_file(&root);
    let styles_dir = resolve_styles_dir(&root, layout.as_deref());
    let (package_manager, lockfile) = detect_package_manager(&root, args.package_manager);
    let deps = dependency_set(args.icons);
    let policy = args.write.policy();

    println!("Tailwind v4 initializer");
    println!("- Project root: {}", root.display());
    println!("- Preset: {}", args.preset.as_str());
    println!("- Icons: {}", args.icons.as_str());
    println!("- Package manager: {package_manager}");
    match &lockfile {
        Some(path) => println!("- Detected lockfile: {}", path.display()),
        None if args.package_manager == ManagerChoice::Auto => {
            println!("- Detected lockfile: none (fallback to npm)");
        }
        None => {}
    }
    println!("- Mode: {}", if policy.dry_run { "dry-run" } else { "write" });
    println!("- Force overwrite: {}", policy.force);
    println!("- Styles dir: {}", styles_dir.display());

    let steps: Vec<Step> = args
        .preset
        .files()
        .iter()
        .map(|(output, template)| Step::render(format!("{}/{template}", args.preset.as_str()), *output))
        .collect();

    let values = Values::new();
    let ctx = Context { templates: &*source, values: &values, root: &styles_dir, policy };
    let mut report = Report::new();
    if !plan::execute(&ctx, &steps, &mut report) {
        report.add_note(plan::STOPPED_NOTE);
        report.print_summary("tailwind-v4-init");
        return Ok(report);
    }

    let install = package_manager.install_dev_command(&deps);
    report.add_note(format!("install dependencies: {install}"));

    println!();
    println!("Dependency command:");
    println!("{install}");

    println!();
    println!("Layout import check:");
    match &layout {
        None => {
            println!("- No layout file found at src/app/layout.tsx or app/layout.tsx.");
            println!("- Add these imports manually in your root layout:");
            println!("  import \"@/styles/globals.css\";");
            println!("  import \"@/styles/custom.css\";");
            report.add_note("no root layout found; add globals.css and custom.css imports manually");
        }
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
            let (has_globals, has_custom) = import_status(&text);
            println!("- Layout file: {}", path.display());
            println!("- Has globals.css import: {has_globals}");
            println!("- Has custom.css import: {has_custom}");
            if !has_globals || !has_custom {
                println!("- Missing import suggestions:");
                if !has_globals {
                    println!("  import \"@/styles/globals.css\";");
                    report.add_note(format!("{}: missing globals.css import", path.display()));
                }
                if !has_custom {
                    println!("  import \"@/styles/custom.css\";");
                    report.add_note(format!("{}: missing custom.css import", path.display()));
                }
            }
        }
    }

    println!();
    println!("@source hints:");
    let hints = load_source_hints(&root);
    if hints.is_empty() {
        println!("- No explicit source hints found.");
        println!("- If utility classes come from external packages, add entries like:");
        println!("  @source \"../node_modules/@your-scope/ui/dist/**/*.{{js,ts,jsx,tsx}}\";");
        println!("  @source \"../packages/ui/src/**/*.{{js,ts,jsx,tsx,mdx}}\";");
    } else {
        println!("- Detected source hints from configuration:");
        for hint in &hints {
            println!("  @source \"{hint}\";");
        }
    }

    println!();
    println!("Validation checklist:");
    println!("- Run typecheck (for example: {package_manager} typecheck).");
    println!("- Run dev server and confirm styles render.");
    println!("- Verify Iconify classes render (example: icon-[lucide--sparkles]).");
    if args.icons == Icons::All {
        println!("- Verify mdi/tabler classes also render.");
    }

    report.print_summary("tailwind-v4-init");
    if policy.dry_run {
        println!("\nDry run complete. No files were written.");
    }
    Ok(report)
}
