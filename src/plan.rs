use std::path::{Path, PathBuf};

use tracing::debug;

use crate::aggregate::generate_aggregate;
use crate::error::Result;
use crate::manifest::{self, Extra, Object};
use crate::materialize::{WritePolicy, materialize};
use crate::render::{Values, render};
use crate::report::Report;
use crate::templates::TemplateSource;

pub const STOP_HINT: &str =
    "write mode stops at first template error. Re-run with --dry-run to collect all errors.";
pub const STOPPED_NOTE: &str = "stopped at first error; remaining planned outputs were not visited";

/// One planned output, in the order it will be visited.
#[derive(Debug, Clone)]
pub enum Step {
    /// Render `template` with the shared values plus `extra` into `output`.
    Render { template: String, output: String, extra: Values },
    /// Generate a multi-slice store index into `output`.
    Aggregate { name: String, components: Vec<String>, output: String },
    /// Render `template` as a JSON snippet and fold missing keys into `target`.
    MergeManifest {
        template: String,
        target: String,
        sections: &'static [&'static str],
        extra: Option<(String, Object)>,
    },
    /// Planned but excluded by configuration.
    Skip { reason: String },
}

impl Step {
    pub fn render(template: impl Into<String>, output: impl Into<String>) -> Self {
        Self::Render { template: template.into(), output: output.into(), extra: Values::new() }
    }

    fn label(&self) -> &str {
        match self {
            Self::Render { template, .. } => template,
            Self::Aggregate { output, .. } => output,
            Self::MergeManifest { target, .. } => target,
            Self::Skip { reason } => reason,
        }
    }
}

pub struct Context<'a> {
    pub templates: &'a dyn TemplateSource,
    pub values: &'a Values,
    pub root: &'a Path,
    pub policy: WritePolicy,
}

impl Context<'_> {
    fn target(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    fn render_template(&self, template: &str, extra: &Values) -> Result<String> {
        let body = self.templates.read(template)?;
        if extra.is_empty() {
            return render(&body, self.values);
        }
        let mut values = self.values.clone();
        values.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        render(&body, &values)
    }

    /// Runs one step and records its outcome. Errors are returned unrecorded.
    pub fn apply(&self, step: &Step, report: &mut Report) -> Result<()> {
        match step {
            Step::Render { template, output, extra } => {
                let content = self.render_template(template, extra)?;
                let path = self.target(output);
                let outcome = materialize(&path, &content, self.policy)?;
                report.record(&path, outcome, self.policy.dry_run);
            }
            Step::Aggregate { name, components, output } => {
                let content = generate_aggregate(name, components)?;
                let path = self.target(output);
                let outcome = materialize(&path, &content, self.policy)?;
                report.record(&path, outcome, self.policy.dry_run);
            }
            Step::MergeManifest { template, target, sections, extra } => {
                self.merge(template, target, sections, extra.as_ref(), report)?;
            }
            Step::Skip { reason } => report.add_skipped(reason.clone()),
        }
        Ok(())
    }

    fn merge(
        &self,
        template: &str,
        target: &str,
        sections: &[&str],
        extra: Option<&(String, Object)>,
        report: &mut Report,
    ) -> Result<()> {
        let target_path = self.target(target);
        if !target_path.exists() {
            report.add_note(format!("skip merge: missing target {}", target_path.display()));
            return Ok(());
        }

        let snippet_text = self.render_template(template, &Values::new())?;
        let snippet = manifest::parse_object(&snippet_text, Path::new(template))?;
        let mut document = manifest::load_object(&target_path)?;

        let extra = extra.map(|(section, entries)| Extra { section, entries });
        let merged = manifest::merge_manifest(&mut document, &snippet, sections, extra)?;

        if !merged.changed {
            report.add_note(format!("package.json unchanged: {}", target_path.display()));
            return Ok(());
        }

        manifest::write_object(&target_path, &document, self.policy.dry_run)?;
        report.add_updated(&target_path, self.policy.dry_run);
        report.add_note(format!("package.json additions: {}", merged.added.join(", ")));
        Ok(())
    }
}

/// Visits `steps` in order. Write runs stop at the first failure; dry runs collect them all.
///
/// Returns `false` when the run was cut short.
#[must_use]
pub fn execute(ctx: &Context<'_>, steps: &[Step], report: &mut Report) -> bool {
    for step in steps {
        debug!(step = step.label(), "visit");
        let Err(err) = ctx.apply(step, report) else { continue };

        report.add_error(format!("{}: {err}", step.label()));
        if !ctx.policy.dry_run {
            eprintln!("Error: {STOP_HINT}");
            return false;
        }
    }
    true
}
