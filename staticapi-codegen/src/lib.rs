//! staticapi code generation
//!
//! Turns interfaces marked `@StaticApi` into static facades: a singleton
//! holding one mutable delegate plus a forwarding method for every method the
//! interface exposes, inherited ones included.
//!
//! ## Pipeline
//!
//! - **Discovery** (`discovery`): parsed files become a [`DeclarationGraph`]
//!   and a list of [`FacadeRequest`]s
//! - **Validation** (`validation`): only non-generic interfaces qualify
//! - **Naming** (`naming`): `IFoo` -> `Foo`, or the explicit override
//! - **Collection** (`collector`): transitive, deduplicated method set
//! - **Synthesis** (`synthesis`): target-neutral [`Facade`]
//! - **Rendering** (`render`): Kotlin or Rust source text
//!
//! Failures are reported through a [`DiagnosticSink`] and only abandon the
//! interface they concern.

pub mod collector;
pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod model;
pub mod naming;
pub mod processor;
pub mod render;
pub mod synthesis;
pub mod validation;

// Re-export public API
pub use collector::{collect, collect_all, CollectedMethod};
pub use diagnostics::{
    DiagnosticCollector, DiagnosticSink, DiagnosticSummary, FacadeDiagnostic, LocatedDiagnostic,
    Severity,
};
pub use discovery::{discover, Discovery, FacadeRequest, MARKER_ANNOTATION, OBJECT_NAME_ARGUMENT};
pub use error::{
    CodegenError, CodegenResult, CodegenWarning, DiscoveryError, NamingError, RenderError,
    UnknownTarget, ValidationError,
};
pub use model::{
    DeclId, DeclarationGraph, DeclarationKind, InterfaceDeclaration, MethodKey, MethodSignature,
    Origin, Parameter, Substitution, SupertypeRef, TypeParameter, TypeRef,
};
pub use naming::resolve;
pub use processor::{process_batch, process_discovery, process_interface};
pub use render::{
    render_all, renderer_for, KotlinRenderer, RenderOptions, RenderedFile, Renderer, RustRenderer,
    Target,
};
pub use synthesis::{
    synthesize, DelegateHolder, Facade, ForwardedArgument, ForwardingCall, ForwardingMethod,
};
pub use validation::validate;

#[cfg(test)]
mod tests;
