use clap::{Parser, Subcommand};
use miette::{MietteHandlerOpts, Result};
use staticapi_codegen::{renderer_for, Target};
use std::path::PathBuf;
use std::process;

mod config;
mod emit;
mod inspect;
mod logging;
mod pipeline;

use config::Config;
use pipeline::{Generation, SourceFile};

#[derive(Parser)]
#[command(
    name = "staticapi",
    version,
    about = "Generate static facades for @StaticApi interfaces",
    long_about = "Reads interface definition files and generates, for every interface marked @StaticApi, a singleton that forwards each call to a delegate installed at startup."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate facade sources
    Generate {
        /// Definition files (use '-' to read from stdin)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Output language: kotlin or rust
        #[arg(short, long)]
        target: Option<Target>,

        /// Directory generated files are written to
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Config file (defaults to ./staticapi.toml when present)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Run the pipeline and report diagnostics without writing anything
    Check {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Output language to check rendering for: kotlin or rust
        #[arg(short, long)]
        target: Option<Target>,

        /// Config file (defaults to ./staticapi.toml when present)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show the methods each facade would forward, in order
    Inspect {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Only show the facade with this name
        #[arg(short, long)]
        facade: Option<String>,
    },
}

fn main() {
    setup_miette_handler();

    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let result = match cli.command {
        Some(Commands::Generate {
            files,
            target,
            out_dir,
            config,
        }) => handle_generate_command(files, target, out_dir, config),
        Some(Commands::Check {
            files,
            target,
            config,
        }) => handle_check_command(files, target, config),
        Some(Commands::Inspect { files, facade }) => handle_inspect_command(files, facade),
        None => {
            // No subcommand provided, show help
            Cli::parse_from(["staticapi", "--help"]);
            Ok(true)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{e:?}");
            process::exit(1);
        }
    }
}

/// Configure miette for error reporting
fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

/// Read every input, reporting unreadable ones. Returns the sources and
/// whether all of them could be read.
fn read_sources(files: &[PathBuf]) -> (Vec<SourceFile>, bool) {
    let mut sources = Vec::with_capacity(files.len());
    let mut success = true;

    for path in files {
        match pipeline::read_source(path) {
            Ok(source) => sources.push(source),
            Err(e) => {
                eprintln!("{e:?}");
                success = false;
            }
        }
    }

    (sources, success)
}

/// Print reports and the summary; true when no error was reported
fn report(generation: &Generation) -> bool {
    let diagnostics = &generation.diagnostics;
    if diagnostics.has_diagnostics() {
        diagnostics.print_diagnostics();
        eprintln!("\n📊 Diagnostics Summary: {}", diagnostics.summary());
    }
    !diagnostics.has_errors()
}

fn handle_generate_command(
    files: Vec<PathBuf>,
    target: Option<Target>,
    out_dir: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<bool> {
    let settings = Config::load(config.as_deref())?.resolve(target, out_dir)?;
    tracing::debug!(target = %settings.target, out_dir = %settings.out_dir.display(), "settings");

    let (sources, read_ok) = read_sources(&files);
    let mut generation = pipeline::generate(&sources);
    let renderer = renderer_for(settings.target, settings.render);
    let rendered = pipeline::render(&mut generation, renderer.as_ref());
    let clean = report(&generation);

    for path in emit::write_files(&settings.out_dir, &rendered)? {
        println!("✅ {}", path.display());
    }

    Ok(read_ok && clean)
}

fn handle_check_command(
    files: Vec<PathBuf>,
    target: Option<Target>,
    config: Option<PathBuf>,
) -> Result<bool> {
    let settings = Config::load(config.as_deref())?.resolve(target, None)?;

    let (sources, read_ok) = read_sources(&files);
    let mut generation = pipeline::generate(&sources);
    let renderer = renderer_for(settings.target, settings.render);
    let rendered = pipeline::render(&mut generation, renderer.as_ref());
    let clean = report(&generation);

    for facade in &generation.facades {
        println!(
            "✅ {} ({} methods)",
            facade.name,
            facade.methods.len()
        );
    }
    tracing::debug!(files = rendered.len(), "check rendered without writing");

    Ok(read_ok && clean)
}

fn handle_inspect_command(files: Vec<PathBuf>, only: Option<String>) -> Result<bool> {
    let (sources, read_ok) = read_sources(&files);
    let generation = pipeline::generate(&sources);
    let clean = report(&generation);

    let selected: Vec<_> = generation
        .facades
        .iter()
        .filter(|facade| only.as_ref().is_none_or(|name| &facade.name == name))
        .collect();

    if let Some(name) = &only {
        if selected.is_empty() {
            return Err(miette::miette!("No facade named {name} was generated"));
        }
    }

    for facade in selected {
        print!("{}", inspect::describe(facade));
    }

    Ok(read_ok && clean)
}

#[cfg(test)]
mod tests;
