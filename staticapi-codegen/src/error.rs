//! Error types for facade generation
//!
//! Following the parser's miette patterns. The errors themselves carry no
//! source spans; the diagnostic sink attaches the declaration's location.

use crate::model::DeclarationKind;
use miette::Diagnostic;
use staticapi_parser::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Any failure that abandons one interface
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum CodegenError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Naming(#[from] NamingError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),
}

/// The annotated declaration cannot back a facade
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("@StaticApi can only be applied to interface declarations, but {name} is a {kind}")]
    #[diagnostic(
        code(staticapi::validation::not_an_interface),
        help("Move the annotation to an interface the {kind} implements")
    )]
    NotAnInterface { name: String, kind: DeclarationKind },

    #[error("@StaticApi cannot be applied to generic interface {name}<{parameters}>")]
    #[diagnostic(
        code(staticapi::validation::generic_interface),
        help("A singleton facade cannot be parameterized; annotate a non-generic interface extending {name} instead")
    )]
    GenericInterface { name: String, parameters: String },
}

/// The facade name could not be derived
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("@StaticApi must be applied to an interface named ISomething or be passed a specific name for the generated object")]
    #[diagnostic(
        code(staticapi::naming::missing_convention),
        help("Rename {interface} to I{interface} or write @StaticApi(objectName = \"...\")")
    )]
    MissingConvention { interface: String },
}

/// Problems building the declaration graph
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("{qualified_name} is declared more than once")]
    #[diagnostic(
        code(staticapi::discovery::duplicate_declaration),
        help("The first declaration is kept; rename or remove this one")
    )]
    DuplicateDeclaration { qualified_name: String },

    #[error("Facade request refers to declaration #{id}, which is not in the graph")]
    #[diagnostic(code(staticapi::discovery::unknown_declaration))]
    UnknownDeclaration { id: usize },
}

/// The facade cannot be expressed in the target language
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("{name} cannot be used as a Rust identifier in facade {facade}")]
    #[diagnostic(
        code(staticapi::render::reserved_identifier),
        help("self, Self, super and crate have no raw form; rename it in the definition file")
    )]
    ReservedIdentifier { facade: String, name: String },

    #[error("Facade {facade} would define fn {name} more than once ({first} and {second})")]
    #[diagnostic(
        code(staticapi::render::duplicate_method),
        help("Rust has no overloading and names are snake_cased; rename one of the methods")
    )]
    DuplicateMethod {
        facade: String,
        name: String,
        first: String,
        second: String,
    },

    #[error("Facade {facade} generated from {interface} would overwrite {path}, already generated from {previous}")]
    #[diagnostic(
        code(staticapi::render::duplicate_output),
        help("Give one of them a distinct @StaticApi(objectName = \"...\")")
    )]
    DuplicateOutput {
        path: PathBuf,
        facade: String,
        interface: String,
        previous: String,
    },
}

/// A target name other than kotlin or rust
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("unknown target '{name}', expected kotlin or rust")]
#[diagnostic(code(staticapi::config::unknown_target))]
pub struct UnknownTarget {
    pub name: String,
}

/// Non-fatal findings; output is still produced
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum CodegenWarning {
    #[error("No methods found in interface {interface}")]
    #[diagnostic(
        code(staticapi::collect::empty_method_set),
        severity(Warning),
        help("The facade is generated with a delegate field but no forwarding methods")
    )]
    EmptyMethodSet { interface: String },

    #[error("Supertype {supertype} of {interface} is not declared in any input file")]
    #[diagnostic(
        code(staticapi::discovery::unresolved_supertype),
        severity(Warning),
        help("Methods inherited from {supertype} will not be forwarded")
    )]
    UnresolvedSupertype { interface: String, supertype: String },
}

/// Result type for generation operations
pub type CodegenResult<T> = Result<T, CodegenError>;
