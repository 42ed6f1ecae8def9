use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use clap::{Parser, ValueEnum};
use serde_json::Value;
use tracing::debug;

use super::{PackageManager, WriteArgs, expand_path, split_list};
use crate::manifest::{Object, PACKAGE_SECTIONS};
use crate::plan::{self, Context, Step};
use crate::render::Values;
use crate::report::Report;
use crate::templates::{self, LINGUI, output_rel};

pub const DEFAULT_I18N_PACKAGE: &str = "@your-org/i18n";
pub const DEFAULT_SERVER_LAYOUTS_PACKAGE: &str = "@adonis-kit/react-layouts";
pub const DEFAULT_SERVER_LAYOUTS_VERSION: &str = "latest";

const MANIFEST_SNIPPET: &str = "web/package.scripts.json.tpl";
const MANIFEST_TARGET: &str = "web/package.json";
const SHARED_PREFIX: &str = "packages/i18n/";
const SERVER_LAYOUT_TEMPLATES: &[&str] =
    &["web/src/i18n/layout-factory.tsx.tpl", "web/src/app/[lang]/(home)/layout.tsx.tpl"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    AppOnly,
    SharedAuto,
    SharedForce,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AppOnly => "app-only",
            Self::SharedAuto => "shared-auto",
            Self::SharedForce => "shared-force",
        })
    }
}

/// Scaffold Lingui i18n into a Next.js App Router project
#[derive(Debug, Clone, Parser)]
pub struct LinguiArgs {
    /// Absolute path to the target project root (may start with ~)
    #[arg(long)]
    pub project_root: PathBuf,
    /// Scaffold mode
    #[arg(long, value_enum)]
    pub mode: Mode,
    /// Comma-separated locales, e.g. en,zh,ja
    #[arg(long, default_value = "en,zh")]
    pub locales: String,
    /// Default locale; must be one of --locales
    #[arg(long, default_value = "en")]
    pub default_locale: String,
    /// Source locale for extraction; must be one of --locales
    #[arg(long, default_value = "en")]
    pub source_locale: String,
    /// Package manager used in generated scripts
    #[arg(long, value_enum, default_value_t = PackageManager::Pnpm)]
    pub package_manager: PackageManager,
    /// Package name for the shared packages/i18n workspace package
    #[arg(long, default_value = DEFAULT_I18N_PACKAGE)]
    pub i18n_package_name: String,
    /// Render the optional withServerLayouts templates and merge their dependency
    #[arg(long)]
    pub with_server_layouts: bool,
    /// Package exporting withServerLayouts under /server
    #[arg(long, default_value = DEFAULT_SERVER_LAYOUTS_PACKAGE)]
    pub server_layouts_package: String,
    /// Version used when adding the server-layouts dependency
    #[arg(long, default_value = DEFAULT_SERVER_LAYOUTS_VERSION)]
    pub server_layouts_version: String,
    #[command(flatten)]
    pub write: WriteArgs,
}

struct LanguagePreset {
    abbr: &'static str,
    lang: &'static str,
    language: &'static str,
}

const LANGUAGE_PRESETS: &[LanguagePreset] = &[
    LanguagePreset { abbr: "en", lang: "en-US", language: "English" },
    LanguagePreset { abbr: "zh", lang: "zh-CN", language: "Chinese Simplified" },
    LanguagePreset { abbr: "ja", lang: "ja-JP", language: "Japanese" },
    LanguagePreset { abbr: "ko", lang: "ko-KR", language: "Korean" },
    LanguagePreset { abbr: "fr", lang: "fr-FR", language: "French" },
    LanguagePreset { abbr: "de", lang: "de-DE", language: "German" },
    LanguagePreset { abbr: "es", lang: "es-ES", language: "Spanish" },
    LanguagePreset { abbr: "it", lang: "it-IT", language: "Italian" },
    LanguagePreset { abbr: "pt", lang: "pt-PT", language: "Portuguese" },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub lang: String,
    pub language: String,
    pub locale: String,
    pub language_in_en: String,
}

pub fn language_for(locale: &str) -> Language {
    if let Some(p) = LANGUAGE_PRESETS.iter().find(|p| p.abbr == locale) {
        return Language {
            lang: p.lang.to_string(),
            language: p.language.to_string(),
            locale: p.abbr.to_string(),
            language_in_en: p.language.to_string(),
        };
    }

    let normalized = locale.replace('_', "-");
    let mut pieces = normalized.split('-');
    let language = pieces.next().filter(|s| !s.is_empty()).unwrap_or(locale);
    let territory = pieces.next().map_or_else(|| language.to_uppercase(), str::to_uppercase);
    let title = language.to_uppercase();
    Language {
        lang: format!("{}-{territory}", language.to_lowercase()),
        language: title.clone(),
        locale: language.to_lowercase(),
        language_in_en: title,
    }
}

/// Comma-separated locales, de-duplicated in first-seen order.
pub fn parse_locales(raw: &str) -> Result<Vec<String>> {
    let mut locales: Vec<String> = Vec::new();
    for locale in split_list(raw) {
        if !locales.contains(&locale) {
            locales.push(locale);
        }
    }
    if locales.is_empty() {
        bail!("--locales must contain at least one locale");
    }
    Ok(locales)
}

fn json_array(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| Value::from(s.as_str()).to_string()).collect();
    format!("[{}]", quoted.join(", "))
}

pub fn languages_entries(locales: &[String]) -> String {
    locales
        .iter()
        .map(|abbr| {
            let l = language_for(abbr);
            format!(
                "\t{{\n\t\tabbr: \"{abbr}\",\n\t\tlang: \"{}\",\n\t\tlanguage: \"{}\",\n\t\tlocale: \"{}\",\n\t\tlanguageInEn: \"{}\",\n\t}}",
                l.lang, l.language, l.locale, l.language_in_en
            )
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

fn inline_lingui_config(locales: &[String], source_locale: &str) -> String {
    format!(
        r#"import type {{ LinguiConfig }} from "@lingui/conf";

const linguiConfig: LinguiConfig = {{
	locales: {locales},
	sourceLocale: "{source_locale}",
	compileNamespace: "es",
	format: "po",
	experimental: {{
		extractor: {{
			entries: [
				"<rootDir>/src/app/[[]lang[]]/**/{{page,layout,loading,error,not-found,template,default}}.tsx",
			],
			output: "<rootDir>/src/locales/{{entryDir}}/{{entryName}}/{{locale}}",
		}},
	}},
}};

export default linguiConfig;
"#,
        locales = json_array(locales),
    )
}

fn inline_i18n_config(locales: &[String], default_locale: &str) -> String {
    format!(
        r#"export const SUPPORTED_LOCALES = {locales} as const;
export type AppLocale = (typeof SUPPORTED_LOCALES)[number];

export const DEFAULT_LOCALE: AppLocale = "{default_locale}";

export function isSupportedLocale(value: string): value is AppLocale {{
	return SUPPORTED_LOCALES.includes(value as AppLocale);
}}
"#,
        locales = json_array(locales),
    )
}

fn shared_i18n_config(package: &str) -> String {
    format!(
        r#"import {{ defaultLocale, supportedLocales }} from "{package}/next-config";

export const SUPPORTED_LOCALES = supportedLocales;
export type AppLocale = (typeof SUPPORTED_LOCALES)[number];

export const DEFAULT_LOCALE = defaultLocale as AppLocale;

export function isSupportedLocale(value: string): value is AppLocale {{
	return SUPPORTED_LOCALES.includes(value as AppLocale);
}}
"#
    )
}

pub struct ValueInputs<'a> {
    pub locales: &'a [String],
    pub default_locale: &'a str,
    pub source_locale: &'a str,
    pub package_manager: PackageManager,
    pub i18n_package_name: &'a str,
    pub server_layouts_package: &'a str,
    pub use_shared_package: bool,
}

pub fn build_values(input: &ValueInputs<'_>) -> Values {
    let mut values = Values::new();
    let mut set = |k: &str, v: String| {
        values.insert(k.to_string(), v);
    };
    set("SUPPORTED_LOCALES_ARRAY", json_array(input.locales));
    set("DEFAULT_LOCALE", input.default_locale.to_string());
    set("SOURCE_LOCALE", input.source_locale.to_string());
    set("PACKAGE_MANAGER", input.package_manager.to_string());
    set("I18N_PACKAGE_NAME", input.i18n_package_name.to_string());
    set("SERVER_LAYOUTS_IMPORT_PATH", format!("{}/server", input.server_layouts_package));
    set("ALL_LANGUAGES_ENTRIES", languages_entries(input.locales));

    if input.use_shared_package {
        set(
            "WEB_LINGUI_CONFIG_CONTENT",
            format!(
                "import linguiConfig from \"{}/lingui-config\";\n\nexport default linguiConfig;\n",
                input.i18n_package_name
            ),
        );
        set("WEB_I18N_CONFIG_CONTENT", shared_i18n_config(input.i18n_package_name));
    } else {
        set("WEB_LINGUI_CONFIG_CONTENT", inline_lingui_config(input.locales, input.source_locale));
        set("WEB_I18N_CONFIG_CONTENT", inline_i18n_config(input.locales, input.default_locale));
    }
    values
}

/// True for a pnpm workspace or a `package.json` with non-empty `workspaces`.
pub fn detect_workspace(root: &Path) -> bool {
    if root.join("pnpm-workspace.yaml").exists() {
        return true;
    }
    let Ok(text) = fs::read_to_string(root.join("package.json")) else { return false };
    let Ok(payload) = serde_json::from_str::<Value>(&text) else { return false };

    match payload.get("workspaces") {
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(ws)) => {
            matches!(ws.get("packages"), Some(Value::Array(items)) if !items.is_empty())
        }
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedLayout {
    pub use_shared_package: bool,
    pub render_shared_templates: bool,
}

pub fn resolve_mode(mode: Mode, workspace: bool, shared_exists: bool) -> SharedLayout {
    let (use_shared_package, render_shared_templates) = match mode {
        Mode::AppOnly => (false, false),
        Mode::SharedForce => (true, true),
        Mode::SharedAuto => (workspace || shared_exists, workspace && !shared_exists),
    };
    SharedLayout { use_shared_package, render_shared_templates }
}

pub struct PlanInputs<'a> {
    pub mode: Mode,
    pub render_shared_templates: bool,
    pub with_server_layouts: bool,
    pub extra_dependencies: Option<Object>,
    pub templates: &'a [String],
}

pub fn plan_steps(input: PlanInputs<'_>) -> Vec<Step> {
    let mut extra = input.extra_dependencies.map(|deps| ("dependencies".to_string(), deps));
    let mut steps = Vec::with_capacity(input.templates.len());

    for rel in input.templates {
        let rel = rel.as_str();
        if rel == MANIFEST_SNIPPET {
            steps.push(Step::MergeManifest {
                template: rel.to_string(),
                target: MANIFEST_TARGET.to_string(),
                sections: PACKAGE_SECTIONS,
                extra: extra.take(),
            });
        } else if rel.starts_with(SHARED_PREFIX) && !input.render_shared_templates {
            steps.push(Step::Skip { reason: format!("skip by mode ({}): {rel}", input.mode) });
        } else if SERVER_LAYOUT_TEMPLATES.contains(&rel) && !input.with_server_layouts {
            steps.push(Step::Skip {
                reason: format!(
                    "skip optional server-layout template (--with-server-layouts disabled): {rel}"
                ),
            });
        } else {
            steps.push(Step::render(rel, output_rel(rel)));
        }
    }
    steps
}

fn validate_root(raw: &Path) -> Result<PathBuf> {
    let root = expand_path(raw);
    if !root.is_absolute() {
        bail!("--project-root must be an absolute path.");
    }
    if !root.exists() {
        bail!("project root does not exist: {}", root.display());
    }
    if !root.is_dir() {
        bail!("project root is not a directory: {}", root.display());
    }
    Ok(root)
}

pub fn run(args: &LinguiArgs, templates_root: Option<&Path>) -> Result<Report> {
    let root = validate_root(&args.project_root)?;
    let locales = parse_locales(&args.locales)?;
    if !locales.contains(&args.default_locale) {
        bail!("--default-locale must be present in --locales.");
    }
    if !locales.contains(&args.source_locale) {
        bail!("--source-locale must be present in --locales.");
    }
    let source = templates::open(LINGUI, templates_root).context("failed to open templates")?;

    let mut report = Report::new();
    let workspace = detect_workspace(&root);
    let shared_exists = root.join("packages/i18n").exists();
    let layout = resolve_mode(args.mode, workspace, shared_exists);
    debug!(%workspace, shared_exists, ?layout, "resolved mode");

    if args.mode == Mode::SharedAuto {
        report.add_note(if shared_exists {
            "shared-auto: found existing packages/i18n, skip rendering package templates."
        } else if workspace {
            "shared-auto: workspace detected, render package templates."
        } else {
            "shared-auto: workspace not detected, fallback to app-only."
        });
    }

    let values = build_values(&ValueInputs {
        locales: &locales,
        default_locale: &args.default_locale,
        source_locale: &args.source_locale,
        package_manager: args.package_manager,
        i18n_package_name: &args.i18n_package_name,
        server_layouts_package: &args.server_layouts_package,
        use_shared_package: layout.use_shared_package,
    });

    let extra_dependencies = if args.with_server_layouts {
        report.add_note(format!(
            "server-layouts enabled: merge dependency {}@{}",
            args.server_layouts_package, args.server_layouts_version
        ));
        let mut deps = Object::new();
        deps.insert(
            args.server_layouts_package.clone(),
            Value::from(args.server_layouts_version.as_str()),
        );
        Some(deps)
    } else {
        report.add_note("server-layouts disabled: skip optional templates and dependency merge.");
        if args.server_layouts_package != DEFAULT_SERVER_LAYOUTS_PACKAGE
            || args.server_layouts_version != DEFAULT_SERVER_LAYOUTS_VERSION
        {
            report.add_note(
                "--server-layouts-package/--server-layouts-version ignored because --with-server-layouts is not enabled.",
            );
        }
        None
    };

    let template_paths = source.list().context("failed to list templates")?;
    let steps = plan_steps(PlanInputs {
        mode: args.mode,
        render_shared_templates: layout.render_shared_templates,
        with_server_layouts: args.with_server_layouts,
        extra_dependencies,
        templates: &template_paths,
    });

    let ctx = Context {
        templates: &*source,
        values: &values,
        root: &root,
        policy: args.write.policy(),
    };
    if !plan::execute(&ctx, &steps, &mut report) {
        report.add_note(plan::STOPPED_NOTE);
    }

    report.print_summary("lingui-next-init");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_for_preset() {
        let l = language_for("zh");
        assert_eq!(l.lang, "zh-CN");
        assert_eq!(l.language, "Chinese Simplified");
    }

    #[test]
    fn test_language_for_inferred() {
        let l = language_for("pt_BR");
        assert_eq!(l.lang, "pt-BR");
        assert_eq!(l.locale, "pt");
        assert_eq!(l.language, "PT");

        let l = language_for("nl");
        assert_eq!(l.lang, "nl-NL");
        assert_eq!(l.language_in_en, "NL");
    }

    #[test]
    fn test_parse_locales_dedup() {
        assert_eq!(parse_locales("en, zh,en,,ja").unwrap(), vec!["en", "zh", "ja"]);
        assert!(parse_locales(" , ").is_err());
    }

    #[test]
    fn test_json_array_spacing() {
        assert_eq!(json_array(&["en".to_string(), "zh".to_string()]), r#"["en", "zh"]"#);
    }

    #[test]
    fn test_resolve_mode_shared_auto() {
        let l = resolve_mode(Mode::SharedAuto, true, false);
        assert!(l.use_shared_package && l.render_shared_templates);
        let l = resolve_mode(Mode::SharedAuto, true, true);
        assert!(l.use_shared_package && !l.render_shared_templates);
        let l = resolve_mode(Mode::SharedAuto, false, false);
        assert!(!l.use_shared_package && !l.render_shared_templates);
    }
}
