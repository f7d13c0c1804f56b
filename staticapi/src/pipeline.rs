//! Read, parse, discover and synthesize

use miette::{IntoDiagnostic, Result};
use staticapi_codegen::{
    discover, process_discovery, render_all, CodegenError, DiagnosticCollector, DiagnosticSink,
    Facade, Origin, RenderedFile, Renderer,
};
use staticapi_parser::{parse_file_with_source, Span};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Extension required for definition files
pub const SOURCE_EXTENSION: &str = "sapi";

pub const STDIN_NAME: &str = "<stdin>";

/// A definition file read into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Facades that survived plus every diagnostic reported on the way
#[derive(Debug)]
pub struct Generation {
    pub facades: Vec<Facade>,
    pub diagnostics: DiagnosticCollector,
}

/// Read one input; `-` is stdin
pub fn read_source(path: &Path) -> Result<SourceFile> {
    if path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).into_diagnostic()?;
        return Ok(SourceFile::new(STDIN_NAME, buffer));
    }

    if !path.exists() {
        return Err(miette::miette!("File not found: {}", path.display()));
    }

    if path.extension().and_then(|s| s.to_str()) != Some(SOURCE_EXTENSION) {
        return Err(miette::miette!(
            "Expected .{} file, got: {}",
            SOURCE_EXTENSION,
            path.display()
        ));
    }

    let text = fs::read_to_string(path).into_diagnostic()?;
    Ok(SourceFile::new(path.display().to_string(), text))
}

/// Run the whole pipeline. A file that fails to parse is reported and left
/// out; facades from the other files are still produced.
pub fn generate(sources: &[SourceFile]) -> Generation {
    let mut diagnostics = DiagnosticCollector::new();
    let mut files = Vec::with_capacity(sources.len());

    for source in sources {
        diagnostics.add_source(source.name.clone(), source.text.clone());

        match parse_file_with_source(&source.text, Some(source.name.clone())) {
            Ok(file) => {
                tracing::debug!(
                    file = %source.name,
                    declarations = file.declarations.len(),
                    "parsed"
                );
                files.push(file);
            }
            Err(error) => {
                let origin = Origin::new(Some(source.name.clone()), Span::default());
                diagnostics.error(CodegenError::Syntax(error), &origin);
            }
        }
    }

    let discovery = discover(&files, &mut diagnostics);
    let facades = process_discovery(&discovery, &mut diagnostics);

    tracing::info!(
        files = files.len(),
        facades = facades.len(),
        "generation finished"
    );

    Generation {
        facades,
        diagnostics,
    }
}

/// Render every facade. Facades that cannot be rendered, or whose output
/// path is already taken, are reported in the generation's diagnostics.
pub fn render(generation: &mut Generation, renderer: &dyn Renderer) -> Vec<RenderedFile> {
    let files = render_all(renderer, &generation.facades, &mut generation.diagnostics);
    tracing::info!(
        language = %renderer.target(),
        files = files.len(),
        "rendering finished"
    );
    files
}
