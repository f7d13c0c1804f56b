//! Discovery: parsed definition files -> declaration graph + facade requests
//!
//! Every declaration is registered so supertypes can be resolved, but only
//! those carrying the marker annotation become requests. The annotation's
//! `objectName` argument is the only thing read from it.

use crate::diagnostics::DiagnosticSink;
use crate::error::{CodegenWarning, DiscoveryError};
use crate::model::{
    DeclId, DeclarationGraph, InterfaceDeclaration, MethodSignature, Origin, Parameter,
    SupertypeRef, TypeParameter, TypeRef,
};
use staticapi_parser::{Declaration, DefinitionFile, DocComment, MethodDeclaration};

/// Fully qualified name of the marker annotation. Bare `@StaticApi` usages
/// match on the last segment.
pub const MARKER_ANNOTATION: &str = "dev.tmpod.staticapi.StaticApi";

/// The marker's single parameter
pub const OBJECT_NAME_ARGUMENT: &str = "objectName";

/// One annotated declaration awaiting generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacadeRequest {
    pub decl: DeclId,
    /// Empty when the annotation gave no name
    pub object_name: String,
}

/// Everything the generator needs from discovery
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub graph: DeclarationGraph,
    pub requests: Vec<FacadeRequest>,
}

/// Build the graph for a set of parsed files and collect facade requests
pub fn discover(files: &[DefinitionFile], sink: &mut dyn DiagnosticSink) -> Discovery {
    let mut discovery = Discovery::default();
    let mut registered: Vec<(DeclId, &Declaration, String, Option<String>)> = Vec::new();

    // Pass 1: register declarations so forward references resolve
    for file in files {
        let package = file.package_name();
        for declaration in &file.declarations {
            let origin = Origin::new(file.source_file.clone(), declaration.name.span);
            let lowered = lower_declaration(declaration, &package, origin.clone());

            match discovery.graph.insert(lowered) {
                Ok(id) => {
                    tracing::trace!(name = %declaration.name.name, id = id.0, "registered declaration");
                    registered.push((id, declaration, package.clone(), file.source_file.clone()));
                }
                Err(_) => {
                    let qualified_name = qualify(&package, &declaration.name.name);
                    sink.error(
                        DiscoveryError::DuplicateDeclaration { qualified_name }.into(),
                        &origin,
                    );
                }
            }
        }
    }

    // Pass 2: link supertypes, record requests
    for (id, declaration, package, source_file) in registered {
        let mut supertypes = Vec::new();

        for supertype in &declaration.supertypes {
            let name = supertype.path.to_string();
            match resolve_type_name(&discovery.graph, &package, &name) {
                Some(target) => supertypes.push(SupertypeRef {
                    target,
                    args: supertype.arguments.iter().map(TypeRef::from).collect(),
                }),
                None => sink.warn(
                    CodegenWarning::UnresolvedSupertype {
                        interface: declaration.name.name.clone(),
                        supertype: supertype.to_string(),
                    },
                    &Origin::new(source_file.clone(), supertype.span),
                ),
            }
        }

        if let Some(decl) = discovery.graph.get_mut(id) {
            decl.super_interfaces = supertypes;
        }

        if let Some(annotation) = declaration.annotation(MARKER_ANNOTATION) {
            let object_name = annotation
                .argument(OBJECT_NAME_ARGUMENT)
                .map(|literal| literal.value.clone())
                .unwrap_or_default();
            discovery.requests.push(FacadeRequest {
                decl: id,
                object_name,
            });
        }
    }

    tracing::debug!(
        declarations = discovery.graph.len(),
        requests = discovery.requests.len(),
        "discovery finished"
    );

    discovery
}

/// Resolve a written supertype name: same package first, then fully
/// qualified, then a unique simple name anywhere
fn resolve_type_name(graph: &DeclarationGraph, package: &str, name: &str) -> Option<DeclId> {
    if let Some(id) = graph.lookup(&qualify(package, name)) {
        return Some(id);
    }
    if let Some(id) = graph.lookup(name) {
        return Some(id);
    }
    if name.contains('.') {
        return None;
    }
    match graph.lookup_simple(name).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}

fn lower_declaration(declaration: &Declaration, package: &str, origin: Origin) -> InterfaceDeclaration {
    let mut lowered =
        InterfaceDeclaration::new(declaration.keyword.into(), package, &declaration.name.name);
    lowered.documentation = declaration.documentation.as_ref().map(DocComment::text);
    lowered.type_parameters = declaration
        .type_parameters
        .iter()
        .map(lower_type_parameter)
        .collect();
    lowered.own_methods = declaration.methods.iter().map(lower_method).collect();
    lowered.origin = origin;
    lowered
}

fn lower_type_parameter(parameter: &staticapi_parser::TypeParameter) -> TypeParameter {
    TypeParameter {
        name: parameter.name.name.clone(),
        bounds: parameter.bounds.iter().map(TypeRef::from).collect(),
    }
}

fn lower_method(method: &MethodDeclaration) -> MethodSignature {
    MethodSignature {
        name: method.name.name.clone(),
        parameters: method
            .parameters
            .iter()
            .map(|p| Parameter {
                name: p.name.name.clone(),
                ty: TypeRef::from(&p.type_annotation),
                is_variadic: p.is_variadic,
            })
            .collect(),
        type_parameters: method.type_parameters.iter().map(lower_type_parameter).collect(),
        return_type: method.return_type.as_ref().map(TypeRef::from),
        is_async: method.is_async,
        documentation: method.documentation.as_ref().map(DocComment::text),
    }
}
