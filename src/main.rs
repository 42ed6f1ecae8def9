use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use scaffold_kit::commands::{lingui, tailwind, zustand};
use scaffold_kit::{Report, logging};

#[derive(Parser)]
#[command(name = "scaffold-kit")]
#[command(version, about = "Scaffold i18n, styling and state-management code into web projects")]
struct Cli {
    /// Read templates from this directory instead of the built-in set
    #[arg(long, global = true, env = "SCAFFOLD_KIT_TEMPLATES")]
    templates: Option<PathBuf>,
    /// Print the run report as JSON after the summary
    #[arg(long, global = true)]
    json: bool,
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize Lingui i18n for a Next.js App Router project
    #[command(name = "lingui-next-init")]
    Lingui(lingui::LinguiArgs),
    /// Initialize Tailwind CSS v4 in a project
    #[command(name = "tailwind-v4-init")]
    Tailwind(tailwind::TailwindArgs),
    /// Scaffold a class-based Zustand store
    #[command(name = "zustand-store")]
    Zustand(zustand::ZustandArgs),
}

fn dispatch(cli: &Cli) -> Result<Report> {
    let templates = cli.templates.as_deref();
    match &cli.command {
        Command::Lingui(args) => lingui::run(args, templates),
        Command::Tailwind(args) => tailwind::run(args, templates),
        Command::Zustand(args) => zustand::run(args, templates),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match dispatch(&cli) {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(text) => println!("{text}"),
                    Err(err) => eprintln!("Error: failed to encode report: {err}"),
                }
            }
            ExitCode::from(report.exit_code())
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}
