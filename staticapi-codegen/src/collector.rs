//! Method collection over the supertype graph
//!
//! Own methods come first in declaration order, then each supertype's
//! collection in the order the supertypes are written, recursively. The
//! concatenation is deduplicated by identity key, first occurrence wins.
//!
//! Diamonds are walked once per path that reaches them; deduplication makes
//! the repeats harmless. Only the current descent path is tracked, which is
//! enough to terminate on cyclic input without hiding diamond revisits.

use crate::model::{
    DeclId, DeclarationGraph, MethodKey, MethodSignature, Substitution, SupertypeRef,
};
use indexmap::IndexSet;

/// A method reachable from the collected interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedMethod {
    /// Signature with supertype type arguments already substituted
    pub signature: MethodSignature,
    /// Simple name of the interface that declares the method
    pub owner: String,
}

impl CollectedMethod {
    pub fn identity_key(&self) -> MethodKey {
        self.signature.identity_key()
    }
}

/// Collect the deduplicated method set of `root`
pub fn collect(graph: &DeclarationGraph, root: DeclId) -> Vec<CollectedMethod> {
    let mut seen = IndexSet::new();
    collect_all(graph, root)
        .into_iter()
        .filter(|method| seen.insert(method.identity_key()))
        .collect()
}

/// Every method reachable from `root` in traversal order, duplicates included
pub fn collect_all(graph: &DeclarationGraph, root: DeclId) -> Vec<CollectedMethod> {
    let mut methods = Vec::new();
    let mut path = Vec::new();
    visit(graph, root, &Substitution::new(), &mut path, &mut methods);
    methods
}

fn visit(
    graph: &DeclarationGraph,
    id: DeclId,
    substitution: &Substitution,
    path: &mut Vec<DeclId>,
    out: &mut Vec<CollectedMethod>,
) {
    let Some(decl) = graph.get(id) else {
        return;
    };

    path.push(id);

    out.extend(decl.own_methods.iter().map(|method| CollectedMethod {
        signature: method.substitute(substitution),
        owner: decl.simple_name.clone(),
    }));

    for SupertypeRef { target, args } in &decl.super_interfaces {
        if path.contains(target) {
            tracing::trace!(
                interface = %decl.qualified_name,
                "supertype cycle skipped"
            );
            continue;
        }

        let Some(supertype) = graph.get(*target) else {
            continue;
        };
        if !supertype.is_interface() {
            continue;
        }

        let inherited = supertype.bind(args, substitution);
        visit(graph, *target, &inherited, path, out);
    }

    path.pop();
}
