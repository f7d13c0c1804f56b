//! Facade synthesis
//!
//! Produces [`Facade`], a target-neutral description of the generated
//! singleton. Renderers turn it into source text.

use crate::collector::CollectedMethod;
use crate::model::{InterfaceDeclaration, MethodKey, MethodSignature, Origin, TypeRef};

/// Name of the delegate field on every facade
pub const DELEGATE_FIELD: &str = "delegate";

pub const DELEGATE_DOC: &str = "Internal mutable delegate. Should be set during initialization.";

/// The synthesized facade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facade {
    pub name: String,
    /// Package the facade is generated into (the interface's own)
    pub package: String,
    pub delegate_type: TypeRef,
    pub source_interface: String,
    pub source_qualified_name: String,
    pub documentation: String,
    pub delegate: DelegateHolder,
    pub methods: Vec<ForwardingMethod>,
    /// Where the source interface was declared, for render diagnostics
    pub origin: Origin,
}

impl Facade {
    pub fn method(&self, name: &str) -> Option<&ForwardingMethod> {
        self.methods.iter().find(|m| m.signature.name == name)
    }

    pub fn method_keys(&self) -> Vec<MethodKey> {
        self.methods
            .iter()
            .map(|m| m.signature.identity_key())
            .collect()
    }
}

/// The single mutable field holding the implementation. Unset until the
/// generated `initialize` runs; reading it earlier fails at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegateHolder {
    pub name: String,
    pub ty: TypeRef,
    /// Marked as internal so callers go through the forwarding methods
    pub internal: bool,
    pub documentation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingMethod {
    /// Signature as exposed by the facade; a `Unit` return is normalized to
    /// no value
    pub signature: MethodSignature,
    pub documentation: String,
    pub origin_interface: String,
    pub call: ForwardingCall,
}

/// Body of a forwarding method: one call on the delegate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingCall {
    pub method: String,
    pub arguments: Vec<ForwardedArgument>,
    /// False when the result is discarded
    pub returns_value: bool,
    /// The delegate call is awaited
    pub awaits: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedArgument {
    pub name: String,
    /// Variadic arguments are passed through spread, not re-wrapped
    pub spread: bool,
}

/// Build the facade for `source` named `facade_name` forwarding `methods`.
pub fn synthesize(
    facade_name: &str,
    source: &InterfaceDeclaration,
    methods: Vec<CollectedMethod>,
) -> Facade {
    debug_assert!(!facade_name.trim().is_empty(), "facade name must not be blank");

    let delegate_type = source.as_type();

    Facade {
        name: facade_name.to_string(),
        package: source.package.clone(),
        delegate: DelegateHolder {
            name: DELEGATE_FIELD.to_string(),
            ty: delegate_type.clone(),
            internal: true,
            documentation: DELEGATE_DOC.to_string(),
        },
        delegate_type,
        source_interface: source.simple_name.clone(),
        source_qualified_name: source.qualified_name.clone(),
        documentation: source
            .documentation
            .clone()
            .unwrap_or_else(|| format!("API implementation of [{}]", source.simple_name)),
        methods: methods.into_iter().map(forwarding_method).collect(),
        origin: source.origin.clone(),
    }
}

fn forwarding_method(collected: CollectedMethod) -> ForwardingMethod {
    let CollectedMethod {
        mut signature,
        owner,
    } = collected;

    if signature.return_type.as_ref().is_some_and(TypeRef::is_unit) {
        signature.return_type = None;
    }

    let documentation = signature
        .documentation
        .clone()
        .unwrap_or_else(|| format!("Forwards to [{owner}.{}].", signature.name));

    let call = ForwardingCall {
        method: signature.name.clone(),
        arguments: signature
            .parameters
            .iter()
            .map(|p| ForwardedArgument {
                name: p.name.clone(),
                spread: p.is_variadic,
            })
            .collect(),
        returns_value: signature.return_type.is_some(),
        awaits: signature.is_async,
    };

    ForwardingMethod {
        signature,
        documentation,
        origin_interface: owner,
        call,
    }
}
