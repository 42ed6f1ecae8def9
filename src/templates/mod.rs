use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};

pub const LINGUI: &str = "lingui";
pub const TAILWIND: &str = "tailwind";
pub const ZUSTAND: &str = "zustand";

macro_rules! embed {
    ($set:literal, [$($rel:literal),* $(,)?]) => {
        &[$(($rel, include_str!(concat!("../../assets/templates/", $set, "/", $rel)))),*]
    };
}

const LINGUI_FILES: &[(&str, &str)] = embed!("lingui", [
    "packages/i18n/package.json.tpl",
    "packages/i18n/src/data.ts.tpl",
    "packages/i18n/src/lingui-config.ts.tpl",
    "packages/i18n/src/next-config.ts.tpl",
    "web/lingui.config.ts.tpl",
    "web/package.scripts.json.tpl",
    "web/src/app/[lang]/(home)/layout.tsx.tpl",
    "web/src/app/[lang]/layout.tsx.tpl",
    "web/src/i18n/appRouterI18n.ts.tpl",
    "web/src/i18n/config.ts.tpl",
    "web/src/i18n/href.ts.tpl",
    "web/src/i18n/initLingui.ts.tpl",
    "web/src/i18n/layout-factory.tsx.tpl",
    "web/src/i18n/locale-link.tsx.tpl",
    "web/src/i18n/provider.tsx.tpl",
    "web/src/proxy.ts.tpl",
]);

const TAILWIND_FILES: &[(&str, &str)] = embed!("tailwind", [
    "minimal/custom.tpl",
    "minimal/globals.tpl",
    "minimal/tailwind-core.tpl",
    "project-like/custom.tpl",
    "project-like/globals.tpl",
    "project-like/shadcn-theme.tpl",
    "project-like/tailwind-core.tpl",
]);

const ZUSTAND_FILES: &[(&str, &str)] = embed!("zustand", [
    "core/index.ts.tpl",
    "core/slices/core.ts.tpl",
    "shared/flatten-actions.ts.tpl",
    "shared/types.ts.tpl",
    "web/context.ts.tpl",
    "web/index.ts.tpl",
    "web/provider.tsx.tpl",
]);

/// Read-only access to one named template set. Paths are relative and `/`-separated.
pub trait TemplateSource {
    /// Every `.tpl` path in the set, sorted.
    fn list(&self) -> Result<Vec<String>>;

    fn read(&self, rel: &str) -> Result<String>;

    fn describe(&self) -> String;
}

/// Templates compiled into the binary.
pub struct Builtin {
    set: &'static str,
    files: &'static [(&'static str, &'static str)],
}

impl Builtin {
    pub fn new(set: &str) -> Result<Self> {
        let (set, files) = match set {
            LINGUI => (LINGUI, LINGUI_FILES),
            TAILWIND => (TAILWIND, TAILWIND_FILES),
            ZUSTAND => (ZUSTAND, ZUSTAND_FILES),
            other => return Err(ScaffoldError::TemplateNotFound(format!("unknown template set '{other}'"))),
        };
        Ok(Self { set, files })
    }
}

impl TemplateSource for Builtin {
    fn list(&self) -> Result<Vec<String>> {
        let mut paths: Vec<String> = self.files.iter().map(|(rel, _)| (*rel).to_string()).collect();
        paths.sort();
        Ok(paths)
    }

    fn read(&self, rel: &str) -> Result<String> {
        self.files
            .iter()
            .find(|(path, _)| *path == rel)
            .map(|(_, body)| (*body).to_string())
            .ok_or_else(|| ScaffoldError::TemplateNotFound(format!("{}/{rel}", self.set)))
    }

    fn describe(&self) -> String {
        format!("built-in:{}", self.set)
    }
}

/// Templates read from `<root>/<set>/` on disk, same layout as the built-in sets.
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ScaffoldError::TemplateNotFound(format!(
                "template directory not found: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }
}

fn to_slash(path: &Path) -> String {
    path.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/")
}

impl TemplateSource for Directory {
    fn list(&self) -> Result<Vec<String>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).to_path_buf();
                ScaffoldError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() || entry.path().extension().is_none_or(|ext| ext != "tpl") {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(&self.root) {
                paths.push(to_slash(rel));
            }
        }
        paths.sort();
        debug!(root = %self.root.display(), count = paths.len(), "listed templates");
        Ok(paths)
    }

    fn read(&self, rel: &str) -> Result<String> {
        let path = self.root.join(rel);
        if !path.is_file() {
            return Err(ScaffoldError::TemplateNotFound(path.display().to_string()));
        }
        fs::read_to_string(&path).map_err(|e| ScaffoldError::io(path, e))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Opens `set` from `override_root` when given, the built-in copy otherwise.
pub fn open(set: &str, override_root: Option<&Path>) -> Result<Box<dyn TemplateSource>> {
    let source: Box<dyn TemplateSource> = match override_root {
        Some(root) => Box::new(Directory::new(root.join(set))?),
        None => Box::new(Builtin::new(set)?),
    };
    debug!(source = %source.describe(), "templates");
    Ok(source)
}

/// Output path for a template path: the `.tpl` suffix is dropped.
pub fn output_rel(rel: &str) -> &str {
    rel.strip_suffix(".tpl").unwrap_or(rel)
}
