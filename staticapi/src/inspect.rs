//! Human-readable dump of synthesized facades

use staticapi_codegen::{Facade, ForwardingMethod};
use std::fmt::Write;

pub fn describe(facade: &Facade) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (from {})",
        facade.name, facade.source_qualified_name
    );
    let _ = writeln!(out, "  delegate: {}", facade.delegate_type);

    if facade.methods.is_empty() {
        let _ = writeln!(out, "  (no methods)");
    }
    for (index, method) in facade.methods.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {}  [{}]",
            index + 1,
            signature(method),
            method.origin_interface
        );
    }

    out
}

fn signature(method: &ForwardingMethod) -> String {
    let sig = &method.signature;
    let mut text = String::new();
    if sig.is_async {
        text.push_str("suspend ");
    }
    if !sig.type_parameters.is_empty() {
        let params: Vec<String> = sig
            .type_parameters
            .iter()
            .map(|tp| {
                let bounds: Vec<String> = tp.bounds.iter().map(|b| b.to_string()).collect();
                if bounds.is_empty() {
                    tp.name.clone()
                } else {
                    format!("{} : {}", tp.name, bounds.join(" + "))
                }
            })
            .collect();
        let _ = write!(text, "<{}> ", params.join(", "));
    }

    let params: Vec<String> = sig
        .parameters
        .iter()
        .map(|p| {
            let vararg = if p.is_variadic { "vararg " } else { "" };
            format!("{vararg}{}: {}", p.name, p.ty)
        })
        .collect();
    let _ = write!(text, "{}({})", sig.name, params.join(", "));

    if let Some(return_type) = &sig.return_type {
        let _ = write!(text, ": {return_type}");
    }
    text
}
