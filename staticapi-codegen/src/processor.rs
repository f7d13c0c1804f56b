//! Per-interface pipeline: validate, name, collect, synthesize
//!
//! Interfaces are independent. A failure is reported to the sink and only
//! abandons the interface it concerns.

use crate::collector::collect;
use crate::diagnostics::DiagnosticSink;
use crate::discovery::{Discovery, FacadeRequest};
use crate::error::{CodegenError, CodegenResult, CodegenWarning, DiscoveryError};
use crate::model::{DeclarationGraph, Origin};
use crate::naming::resolve;
use crate::synthesis::{synthesize, Facade};
use crate::validation::validate;

/// Run the pipeline for one request. Warnings go to the sink; the error, if
/// any, is returned for the caller to report.
pub fn process_interface(
    graph: &DeclarationGraph,
    request: &FacadeRequest,
    sink: &mut dyn DiagnosticSink,
) -> CodegenResult<Facade> {
    let decl = graph
        .get(request.decl)
        .ok_or(DiscoveryError::UnknownDeclaration { id: request.decl.0 })?;

    let _span = tracing::debug_span!("facade", interface = %decl.qualified_name).entered();

    validate(decl)?;
    let name = resolve(&decl.simple_name, &request.object_name)?;

    let methods = collect(graph, request.decl);
    if methods.is_empty() {
        sink.warn(
            CodegenWarning::EmptyMethodSet {
                interface: decl.simple_name.clone(),
            },
            &decl.origin,
        );
    }

    tracing::debug!(facade = %name, methods = methods.len(), "synthesizing facade");
    Ok(synthesize(&name, decl, methods))
}

/// Run every request, reporting failures and keeping the rest
pub fn process_batch(
    graph: &DeclarationGraph,
    requests: &[FacadeRequest],
    sink: &mut dyn DiagnosticSink,
) -> Vec<Facade> {
    let mut facades = Vec::with_capacity(requests.len());

    for request in requests {
        match process_interface(graph, request, sink) {
            Ok(facade) => facades.push(facade),
            Err(error) => {
                let origin = graph
                    .get(request.decl)
                    .map(|decl| decl.origin.clone())
                    .unwrap_or_default();
                report(sink, error, &origin);
            }
        }
    }

    facades
}

/// Convenience over [`process_batch`] for a whole discovery result
pub fn process_discovery(discovery: &Discovery, sink: &mut dyn DiagnosticSink) -> Vec<Facade> {
    process_batch(&discovery.graph, &discovery.requests, sink)
}

fn report(sink: &mut dyn DiagnosticSink, error: CodegenError, origin: &Origin) {
    tracing::debug!(%error, "facade abandoned");
    sink.error(error, origin);
}
