//! Rendering: [`Facade`] -> source text
//!
//! Renderers are interchangeable; the synthesized [`Facade`] knows nothing about
//! the target language.

use crate::diagnostics::DiagnosticSink;
use crate::error::{RenderError, UnknownTarget};
use crate::synthesis::Facade;
use indexmap::IndexMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

mod kotlin;
mod rust;

pub use kotlin::KotlinRenderer;
pub use rust::RustRenderer;

#[cfg(test)]
pub(crate) use rust::rust_type;

/// Output language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    #[default]
    Kotlin,
    Rust,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Kotlin => write!(f, "kotlin"),
            Target::Rust => write!(f, "rust"),
        }
    }
}

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kotlin" | "kt" => Ok(Target::Kotlin),
            "rust" | "rs" => Ok(Target::Rust),
            _ => Err(UnknownTarget {
                name: s.to_string(),
            }),
        }
    }
}

/// Knobs shared by the renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fully qualified annotation marking the delegate field internal (Kotlin)
    pub internal_annotation: String,
    /// Crate providing `DelegateCell` (Rust)
    pub runtime_crate: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            internal_annotation: "org.jetbrains.annotations.ApiStatus.Internal".to_string(),
            runtime_crate: "staticapi_runtime".to_string(),
        }
    }
}

/// One generated source file, path relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

pub trait Renderer {
    fn target(&self) -> Target;

    /// Render one facade. Fails when the facade has no valid rendering in
    /// the target language.
    fn render(&self, facade: &Facade) -> Result<RenderedFile, RenderError>;
}

pub fn renderer_for(target: Target, options: RenderOptions) -> Box<dyn Renderer> {
    match target {
        Target::Kotlin => Box::new(KotlinRenderer::new(options)),
        Target::Rust => Box::new(RustRenderer::new(options)),
    }
}

/// Render every facade, reporting failures to the sink. A facade whose
/// output path was already taken by an earlier one is reported and dropped,
/// so no file is silently overwritten.
pub fn render_all(
    renderer: &dyn Renderer,
    facades: &[Facade],
    sink: &mut dyn DiagnosticSink,
) -> Vec<RenderedFile> {
    let mut claimed: IndexMap<PathBuf, &str> = IndexMap::new();
    let mut files = Vec::with_capacity(facades.len());

    for facade in facades {
        let file = match renderer.render(facade) {
            Ok(file) => file,
            Err(error) => {
                tracing::debug!(%error, facade = %facade.name, "render failed");
                sink.error(error.into(), &facade.origin);
                continue;
            }
        };

        if let Some(previous) = claimed.get(&file.path) {
            let error = RenderError::DuplicateOutput {
                path: file.path.clone(),
                facade: facade.name.clone(),
                interface: facade.source_qualified_name.clone(),
                previous: previous.to_string(),
            };
            sink.error(error.into(), &facade.origin);
            continue;
        }

        claimed.insert(file.path.clone(), &facade.source_qualified_name);
        files.push(file);
    }

    files
}

/// Header line placed at the top of every generated file
pub(crate) fn generated_header(comment: &str, facade: &Facade) -> String {
    format!(
        "{comment} Generated by staticapi from {}. Do not edit.",
        facade.source_qualified_name
    )
}

/// Line-oriented text builder with four-space indentation
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    buffer: String,
    indent: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.buffer.push_str("    ");
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    pub fn indent(&mut self) -> &mut Self {
        self.indent += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

/// `UserService` -> `user_service`
pub(crate) fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if i > 0 && (prev_lower || (prev_upper && next_lower)) && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// `UserService` -> `USER_SERVICE`
pub(crate) fn to_screaming_snake_case(name: &str) -> String {
    to_snake_case(name).to_uppercase()
}
