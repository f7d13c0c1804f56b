// Rust rendering: a unit struct with associated forwarding functions backed
// by a `DelegateCell` static

use super::{
    generated_header, to_screaming_snake_case, to_snake_case, RenderOptions, RenderedFile,
    Renderer, SourceWriter, Target,
};
use crate::error::RenderError;
use crate::model::{Parameter, TypeParameter, TypeRef};
use crate::synthesis::{Facade, ForwardingMethod};
use indexmap::IndexMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct RustRenderer {
    options: RenderOptions,
}

impl RustRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn delegate_static(facade: &Facade) -> String {
        format!("{}_DELEGATE", to_screaming_snake_case(&facade.name))
    }
}

impl Renderer for RustRenderer {
    fn target(&self) -> Target {
        Target::Rust
    }

    fn render(&self, facade: &Facade) -> Result<RenderedFile, RenderError> {
        let cell = Self::delegate_static(facade);
        let object = format!("dyn {} + Send + Sync", rust_type(&facade.delegate_type));
        let names = function_names(facade)?;

        let mut w = SourceWriter::new();
        w.line(generated_header("//", facade));
        w.blank();
        w.line("use std::sync::Arc;");
        w.line(format!("use {}::DelegateCell;", self.options.runtime_crate));
        w.line("#[allow(unused_imports)]");
        w.line("use super::*;");
        w.blank();

        write_doc(&mut w, &facade.documentation);
        w.line(format!("pub struct {};", facade.name));
        w.blank();

        write_doc(&mut w, &facade.delegate.documentation);
        if facade.delegate.internal {
            w.line("#[doc(hidden)]");
        }
        w.line(format!(
            "pub static {cell}: DelegateCell<{object}> = DelegateCell::new(\"{}\");",
            facade.name
        ));
        w.blank();

        let delegate = rust_ident(facade, &facade.delegate.name)?;
        w.line(format!("impl {} {{", facade.name)).indent();
        write_doc(&mut w, "Installs the implementation every call is forwarded to.");
        w.line(format!("pub fn {INITIALIZE}({delegate}: Arc<{object}>) {{"))
            .indent()
            .line(format!("{cell}.install({delegate});"))
            .dedent()
            .line("}");

        for (method, name) in facade.methods.iter().zip(&names) {
            w.blank();
            write_method(&mut w, facade, &cell, name, method)?;
        }

        w.dedent().line("}");

        Ok(RenderedFile {
            path: PathBuf::from(format!("{}.rs", to_snake_case(&facade.name))),
            contents: w.finish(),
        })
    }
}

/// Associated function every facade defines besides the forwarding ones
const INITIALIZE: &str = "initialize";

/// Strict and reserved keywords, usable only in raw form
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that have no raw form
const UNESCAPABLE: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Snake-case `name` and escape it as `r#name` when it is a keyword
fn rust_ident(facade: &Facade, name: &str) -> Result<String, RenderError> {
    let ident = to_snake_case(name);
    if UNESCAPABLE.contains(&ident.as_str()) {
        return Err(RenderError::ReservedIdentifier {
            facade: facade.name.clone(),
            name: name.to_string(),
        });
    }
    if KEYWORDS.contains(&ident.as_str()) {
        Ok(format!("r#{ident}"))
    } else {
        Ok(ident)
    }
}

/// The fn name of every forwarding method, in order. Overloads and names
/// that only differ in case collapse to one Rust name and are rejected.
fn function_names(facade: &Facade) -> Result<Vec<String>, RenderError> {
    let mut seen: IndexMap<String, String> = IndexMap::new();
    seen.insert(INITIALIZE.to_string(), INITIALIZE.to_string());

    let mut names = Vec::with_capacity(facade.methods.len());
    for method in &facade.methods {
        let name = rust_ident(facade, &method.signature.name)?;
        let key = method.signature.identity_key().to_string();
        if let Some(first) = seen.get(&name) {
            return Err(RenderError::DuplicateMethod {
                facade: facade.name.clone(),
                name,
                first: first.clone(),
                second: key,
            });
        }
        seen.insert(name.clone(), key);
        names.push(name);
    }

    Ok(names)
}

fn write_method(
    w: &mut SourceWriter,
    facade: &Facade,
    cell: &str,
    name: &str,
    method: &ForwardingMethod,
) -> Result<(), RenderError> {
    let signature = &method.signature;
    write_doc(w, &method.documentation);

    let mut head = String::from("pub ");
    if signature.is_async {
        head.push_str("async ");
    }
    head.push_str(&format!("fn {name}"));
    if !signature.type_parameters.is_empty() {
        let params: Vec<String> = signature.type_parameters.iter().map(type_parameter).collect();
        head.push_str(&format!("<{}>", params.join(", ")));
    }
    let params = signature
        .parameters
        .iter()
        .map(|param| parameter(facade, param))
        .collect::<Result<Vec<_>, _>>()?;
    head.push_str(&format!("({})", params.join(", ")));
    if let Some(return_type) = &signature.return_type {
        head.push_str(&format!(" -> {}", rust_type(return_type)));
    }

    // Slices are passed straight through, so spread needs no special casing
    let args = method
        .call
        .arguments
        .iter()
        .map(|arg| rust_ident(facade, &arg.name))
        .collect::<Result<Vec<_>, _>>()?;
    let mut call = format!(
        "{cell}.require().{}({})",
        rust_ident(facade, &method.call.method)?,
        args.join(", ")
    );
    if method.call.awaits {
        call.push_str(".await");
    }
    if !method.call.returns_value {
        call.push(';');
    }

    w.line(format!("{head} {{"))
        .indent()
        .line(call)
        .dedent()
        .line("}");
    Ok(())
}

fn type_parameter(param: &TypeParameter) -> String {
    if param.bounds.is_empty() {
        return param.name.clone();
    }
    let bounds: Vec<String> = param.bounds.iter().map(rust_type).collect();
    format!("{}: {}", param.name, bounds.join(" + "))
}

fn parameter(facade: &Facade, param: &Parameter) -> Result<String, RenderError> {
    let name = rust_ident(facade, &param.name)?;
    let ty = rust_type(&param.ty);
    if param.is_variadic {
        Ok(format!("{name}: &[{ty}]"))
    } else {
        Ok(format!("{name}: {ty}"))
    }
}

/// Render a definition-file type as Rust. Well-known builtins map to their
/// Rust counterparts; everything else keeps its path with `::` separators.
pub(crate) fn rust_type(ty: &TypeRef) -> String {
    let args: Vec<String> = ty.args.iter().map(rust_type).collect();
    let name = ty.qualified_name();
    let base = match (name.trim_start_matches("kotlin."), args.as_slice()) {
        ("Unit", []) => "()".to_string(),
        ("Boolean", []) => "bool".to_string(),
        ("Byte", []) => "i8".to_string(),
        ("Short", []) => "i16".to_string(),
        ("Int", []) => "i32".to_string(),
        ("Long", []) => "i64".to_string(),
        ("Float", []) => "f32".to_string(),
        ("Double", []) => "f64".to_string(),
        ("Char", []) => "char".to_string(),
        ("String", []) => "String".to_string(),
        ("collections.List", [item]) | ("List", [item]) => format!("Vec<{item}>"),
        ("collections.Set", [item]) | ("Set", [item]) => {
            format!("std::collections::HashSet<{item}>")
        }
        ("collections.Map", [k, v]) | ("Map", [k, v]) => {
            format!("std::collections::HashMap<{k}, {v}>")
        }
        _ => {
            let path = ty.path.join("::");
            if args.is_empty() {
                path
            } else {
                format!("{path}<{}>", args.join(", "))
            }
        }
    };

    if ty.nullable {
        format!("Option<{base}>")
    } else {
        base
    }
}

fn write_doc(w: &mut SourceWriter, text: &str) {
    for line in text.lines() {
        if line.trim().is_empty() {
            w.line("///");
        } else {
            w.line(format!("/// {line}"));
        }
    }
}
