use std::fmt::Write;
use std::path::Path;

use serde::Serialize;

use crate::materialize::Outcome;

/// Append-only record of one run. Success iff no error was recorded.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Report {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
    pub notes: Vec<String>,
    pub errors: Vec<String>,
}

fn tagged(path: &Path, dry_run: bool) -> String {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    format!("{prefix}{}", path.display())
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_created(&mut self, path: &Path, dry_run: bool) {
        self.created.push(tagged(path, dry_run));
    }

    pub fn add_updated(&mut self, path: &Path, dry_run: bool) {
        self.updated.push(tagged(path, dry_run));
    }

    pub fn add_skipped(&mut self, message: impl Into<String>) {
        self.skipped.push(message.into());
    }

    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn record(&mut self, path: &Path, outcome: Outcome, dry_run: bool) {
        match outcome {
            Outcome::Created => self.add_created(path, dry_run),
            Outcome::Updated => self.add_updated(path, dry_run),
            Outcome::Skipped => self
                .add_skipped(format!("skip existing (use --force to overwrite): {}", path.display())),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn exit_code(&self) -> u8 {
        u8::from(!self.is_success())
    }

    pub fn summary(&self, title: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== {title} summary ===");
        let _ = writeln!(out, "created: {}", self.created.len());
        for item in &self.created {
            let _ = writeln!(out, "  + {item}");
        }
        let _ = writeln!(out, "updated: {}", self.updated.len());
        for item in &self.updated {
            let _ = writeln!(out, "  ~ {item}");
        }
        let _ = writeln!(out, "skipped: {}", self.skipped.len());
        for item in &self.skipped {
            let _ = writeln!(out, "  - {item}");
        }
        if !self.notes.is_empty() {
            out.push_str("notes:\n");
            for note in &self.notes {
                let _ = writeln!(out, "  * {note}");
            }
        }
        if !self.errors.is_empty() {
            out.push_str("errors:\n");
            for error in &self.errors {
                let _ = writeln!(out, "  ! {error}");
            }
        }
        out
    }

    pub fn print_summary(&self, title: &str) {
        println!();
        print!("{}", self.summary(title));
    }
}
