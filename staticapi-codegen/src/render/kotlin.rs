// Kotlin rendering: an `object` with @JvmStatic forwarding functions

use super::{generated_header, RenderOptions, RenderedFile, Renderer, SourceWriter, Target};
use crate::error::RenderError;
use crate::model::{Parameter, TypeParameter};
use crate::synthesis::{Facade, ForwardingMethod};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct KotlinRenderer {
    options: RenderOptions,
}

impl KotlinRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Split `org.jetbrains.annotations.ApiStatus.Internal` into the import
    /// (`org.jetbrains.annotations.ApiStatus`) and the usage
    /// (`ApiStatus.Internal`). The first capitalized segment starts the class.
    fn internal_annotation(&self) -> (Option<String>, String) {
        let segments: Vec<&str> = self.options.internal_annotation.split('.').collect();
        let class_start = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_uppercase()))
            .unwrap_or(0);

        if class_start == 0 {
            return (None, segments.join("."));
        }

        let import = segments[..=class_start].join(".");
        let usage = segments[class_start..].join(".");
        (Some(import), usage)
    }

    fn output_path(facade: &Facade) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in facade.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}_IMPL.kt", facade.name));
        path
    }
}

impl Renderer for KotlinRenderer {
    fn target(&self) -> Target {
        Target::Kotlin
    }

    fn render(&self, facade: &Facade) -> Result<RenderedFile, RenderError> {
        let (import, annotation) = self.internal_annotation();
        let delegate = &facade.delegate;
        let delegate_type = delegate.ty.to_string();

        let mut w = SourceWriter::new();
        w.line(generated_header("//", facade));
        if !facade.package.is_empty() {
            w.line(format!("package {}", facade.package));
        }
        if let Some(import) = import {
            w.blank();
            w.line(format!("import {import}"));
        }
        w.blank();

        write_kdoc(&mut w, &facade.documentation);
        w.line(format!("object {} {{", facade.name)).indent();

        let delegate_doc = if delegate.internal {
            format!(
                "{}\n\nThis property is marked [{annotation}] to discourage direct access.",
                delegate.documentation
            )
        } else {
            delegate.documentation.clone()
        };
        write_kdoc(&mut w, &delegate_doc);
        if delegate.internal {
            w.line(format!("@{annotation}"));
        }
        w.line(format!("var {}: {delegate_type}? = null", delegate.name));
        w.blank();

        write_kdoc(&mut w, "Installs the implementation every call is forwarded to.");
        w.line("@JvmStatic");
        w.line(format!("fun initialize({0}: {delegate_type}) {{", delegate.name))
            .indent()
            .line(format!("this.{0} = {0}", delegate.name))
            .dedent()
            .line("}");
        w.blank();

        w.line(format!("private fun requireDelegate(): {delegate_type} ="))
            .indent()
            .line(format!(
                "{} ?: throw UninitializedPropertyAccessException(\"{}.{} has not been initialized\")",
                delegate.name, facade.name, delegate.name
            ))
            .dedent();

        for method in &facade.methods {
            w.blank();
            write_method(&mut w, method);
        }

        w.dedent().line("}");

        Ok(RenderedFile {
            path: Self::output_path(facade),
            contents: w.finish(),
        })
    }
}

fn write_method(w: &mut SourceWriter, method: &ForwardingMethod) {
    let signature = &method.signature;
    write_kdoc(w, &method.documentation);
    w.line("@JvmStatic");

    let mut head = String::new();
    if signature.is_async {
        head.push_str("suspend ");
    }
    head.push_str("fun ");
    if !signature.type_parameters.is_empty() {
        let params: Vec<String> = signature.type_parameters.iter().map(type_parameter).collect();
        head.push_str(&format!("<{}> ", params.join(", ")));
    }
    let params: Vec<String> = signature.parameters.iter().map(parameter).collect();
    head.push_str(&format!("{}({})", signature.name, params.join(", ")));
    if let Some(return_type) = &signature.return_type {
        head.push_str(&format!(": {return_type}"));
    }
    head.push_str(&where_clause(&signature.type_parameters));

    let args: Vec<String> = method
        .call
        .arguments
        .iter()
        .map(|arg| {
            if arg.spread {
                format!("*{}", arg.name)
            } else {
                arg.name.clone()
            }
        })
        .collect();
    let call = format!("requireDelegate().{}({})", method.call.method, args.join(", "));

    if method.call.returns_value {
        w.line(format!("{head} = {call}"));
    } else {
        w.line(format!("{head} {{"))
            .indent()
            .line(call)
            .dedent()
            .line("}");
    }
}

/// Single bounds go inline, several bounds move to a `where` clause
fn type_parameter(param: &TypeParameter) -> String {
    match param.bounds.as_slice() {
        [bound] => format!("{} : {bound}", param.name),
        _ => param.name.clone(),
    }
}

fn where_clause(params: &[TypeParameter]) -> String {
    let constraints: Vec<String> = params
        .iter()
        .filter(|p| p.bounds.len() > 1)
        .flat_map(|p| p.bounds.iter().map(move |b| format!("{} : {b}", p.name)))
        .collect();

    if constraints.is_empty() {
        String::new()
    } else {
        format!(" where {}", constraints.join(", "))
    }
}

fn parameter(param: &Parameter) -> String {
    if param.is_variadic {
        format!("vararg {}: {}", param.name, param.ty)
    } else {
        format!("{}: {}", param.name, param.ty)
    }
}

fn write_kdoc(w: &mut SourceWriter, text: &str) {
    w.line("/**");
    for line in text.lines() {
        let line = line.replace("*/", "*&#47;");
        if line.trim().is_empty() {
            w.line(" *");
        } else {
            w.line(format!(" * {line}"));
        }
    }
    w.line(" */");
}
