use crate::collector::{collect, collect_all};
use crate::model::{
    DeclId, DeclarationGraph, DeclarationKind, InterfaceDeclaration, MethodKey, MethodSignature,
    Parameter, TypeParameter, TypeRef,
};
use indexmap::IndexSet;
use pretty_assertions::assert_eq;

fn method(name: &str) -> MethodSignature {
    MethodSignature::new(name)
}

fn names(methods: &[crate::collector::CollectedMethod]) -> Vec<String> {
    methods.iter().map(|m| m.signature.name.clone()).collect()
}

fn insert(graph: &mut DeclarationGraph, decl: InterfaceDeclaration) -> DeclId {
    graph.insert(decl).unwrap()
}

#[test]
fn test_own_methods_in_declaration_order() {
    let mut graph = DeclarationGraph::new();
    let root = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IFoo")
            .with_method(method("b"))
            .with_method(method("a"))
            .with_method(method("c")),
    );

    assert_eq!(names(&collect(&graph, root)), vec!["b", "a", "c"]);
}

#[test]
fn test_own_methods_before_inherited() {
    let mut graph = DeclarationGraph::new();
    let base = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IBase").with_method(method("close")),
    );
    let root = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IFoo")
            .with_method(method("open"))
            .with_supertype(base, vec![]),
    );

    let methods = collect(&graph, root);
    assert_eq!(names(&methods), vec!["open", "close"]);
    assert_eq!(methods[0].owner, "IFoo");
    assert_eq!(methods[1].owner, "IBase");
}

#[test]
fn test_supertypes_in_written_order() {
    let mut graph = DeclarationGraph::new();
    let a = insert(&mut graph, InterfaceDeclaration::interface("", "IA").with_method(method("a")));
    let b = insert(&mut graph, InterfaceDeclaration::interface("", "IB").with_method(method("b")));
    let root = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IRoot")
            .with_supertype(b, vec![])
            .with_supertype(a, vec![]),
    );

    assert_eq!(names(&collect(&graph, root)), vec!["b", "a"]);
}

#[test]
fn test_diamond_contributes_once() {
    let mut graph = DeclarationGraph::new();
    let top = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "ITop").with_method(method("shared")),
    );
    let left = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "ILeft")
            .with_method(method("left"))
            .with_supertype(top, vec![]),
    );
    let right = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IRight")
            .with_method(method("right"))
            .with_supertype(top, vec![]),
    );
    let root = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IRoot")
            .with_supertype(left, vec![])
            .with_supertype(right, vec![]),
    );

    assert_eq!(names(&collect(&graph, root)), vec!["left", "shared", "right"]);
    // Walked on both paths before deduplication
    assert_eq!(
        names(&collect_all(&graph, root)),
        vec!["left", "shared", "right", "shared"]
    );
}

#[test]
fn test_overloads_are_distinct() {
    let mut graph = DeclarationGraph::new();
    let root = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IFoo")
            .with_method(method("get").with_parameter(Parameter::new("id", TypeRef::named("Int"))))
            .with_method(
                method("get").with_parameter(Parameter::new("name", TypeRef::named("String"))),
            ),
    );

    assert_eq!(collect(&graph, root).len(), 2);
}

#[test]
fn test_parameter_names_do_not_affect_identity() {
    let mut graph = DeclarationGraph::new();
    let base = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IBase").with_method(
            method("get")
                .with_parameter(Parameter::new("key", TypeRef::named("String")))
                .documented("base doc"),
        ),
    );
    let root = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IFoo")
            .with_method(
                method("get")
                    .with_parameter(Parameter::new("name", TypeRef::named("String")))
                    .returning(TypeRef::named("Int")),
            )
            .with_supertype(base, vec![]),
    );

    let methods = collect(&graph, root);
    assert_eq!(methods.len(), 1);
    // First occurrence wins, including its return type and documentation
    assert_eq!(methods[0].owner, "IFoo");
    assert_eq!(methods[0].signature.parameters[0].name, "name");
    assert_eq!(methods[0].signature.return_type, Some(TypeRef::named("Int")));
    assert_eq!(methods[0].signature.documentation, None);
}

#[test]
fn test_collection_is_first_seen_dedup_of_traversal() {
    let mut graph = DeclarationGraph::new();
    let a = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IA")
            .with_method(method("x"))
            .with_method(method("y")),
    );
    let b = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IB")
            .with_method(method("y"))
            .with_method(method("z"))
            .with_supertype(a, vec![]),
    );
    let root = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IRoot")
            .with_method(method("z"))
            .with_supertype(b, vec![])
            .with_supertype(a, vec![]),
    );

    let mut seen = IndexSet::new();
    let expected: Vec<MethodKey> = collect_all(&graph, root)
        .iter()
        .map(|m| m.identity_key())
        .filter(|key| seen.insert(key.clone()))
        .collect();
    let actual: Vec<MethodKey> = collect(&graph, root).iter().map(|m| m.identity_key()).collect();

    assert_eq!(actual, expected);
    assert_eq!(names(&collect(&graph, root)), vec!["z", "y", "x"]);
}

#[test]
fn test_cycle_terminates() {
    let mut graph = DeclarationGraph::new();
    let a = insert(&mut graph, InterfaceDeclaration::interface("", "IA").with_method(method("a")));
    let b = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IB")
            .with_method(method("b"))
            .with_supertype(a, vec![]),
    );
    graph.get_mut(a).unwrap().super_interfaces.push(crate::model::SupertypeRef {
        target: b,
        args: vec![],
    });

    assert_eq!(names(&collect(&graph, a)), vec!["a", "b"]);
    assert_eq!(names(&collect(&graph, b)), vec!["b", "a"]);
}

#[test]
fn test_self_reference_terminates() {
    let mut graph = DeclarationGraph::new();
    let a = insert(&mut graph, InterfaceDeclaration::interface("", "IA").with_method(method("a")));
    graph.get_mut(a).unwrap().super_interfaces.push(crate::model::SupertypeRef {
        target: a,
        args: vec![],
    });

    assert_eq!(names(&collect(&graph, a)), vec!["a"]);
}

#[test]
fn test_non_interface_supertypes_are_skipped() {
    let mut graph = DeclarationGraph::new();
    let base = insert(
        &mut graph,
        InterfaceDeclaration::new(DeclarationKind::Class, "", "BaseImpl").with_method(method("hidden")),
    );
    let root = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IFoo")
            .with_method(method("visible"))
            .with_supertype(base, vec![]),
    );

    assert_eq!(names(&collect(&graph, root)), vec!["visible"]);
}

#[test]
fn test_supertype_arguments_are_substituted() {
    let mut graph = DeclarationGraph::new();
    let mut repo = InterfaceDeclaration::interface("", "IRepo")
        .with_method(
            method("get")
                .with_parameter(Parameter::new("id", TypeRef::named("Long")))
                .returning(TypeRef::named("T").nullable()),
        )
        .with_method(
            method("all").returning(TypeRef::generic("List", vec![TypeRef::named("T")])),
        );
    repo.type_parameters = vec![TypeParameter::new("T")];
    let repo = insert(&mut graph, repo);

    let root = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IUsers")
            .with_supertype(repo, vec![TypeRef::named("User")]),
    );

    let methods = collect(&graph, root);
    assert_eq!(methods[0].signature.return_type, Some(TypeRef::named("User").nullable()));
    assert_eq!(
        methods[1].signature.return_type.as_ref().map(|t| t.to_string()),
        Some("List<User>".to_string())
    );
}

#[test]
fn test_substitution_chains_through_levels() {
    let mut graph = DeclarationGraph::new();
    let mut store = InterfaceDeclaration::interface("", "IStore")
        .with_method(method("put").with_parameter(Parameter::new("value", TypeRef::named("V"))));
    store.type_parameters = vec![TypeParameter::new("V")];
    let store = insert(&mut graph, store);

    let mut repo = InterfaceDeclaration::interface("", "IRepo")
        .with_supertype(store, vec![TypeRef::generic("Box", vec![TypeRef::named("T")])]);
    repo.type_parameters = vec![TypeParameter::new("T")];
    let repo = insert(&mut graph, repo);

    let root = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IUsers")
            .with_supertype(repo, vec![TypeRef::named("User")]),
    );

    let methods = collect(&graph, root);
    assert_eq!(methods[0].signature.parameters[0].ty.to_string(), "Box<User>");
}

#[test]
fn test_method_type_parameters_shadow_inherited_ones() {
    let mut graph = DeclarationGraph::new();
    let mut base = InterfaceDeclaration::interface("", "IBase").with_method(
        method("map")
            .with_type_parameter(TypeParameter::new("T"))
            .with_parameter(Parameter::new("value", TypeRef::named("T"))),
    );
    base.type_parameters = vec![TypeParameter::new("T")];
    let base = insert(&mut graph, base);

    let root = insert(
        &mut graph,
        InterfaceDeclaration::interface("", "IFoo").with_supertype(base, vec![TypeRef::named("Int")]),
    );

    let methods = collect(&graph, root);
    assert_eq!(methods[0].signature.parameters[0].ty, TypeRef::named("T"));
}

#[test]
fn test_empty_interface_collects_nothing() {
    let mut graph = DeclarationGraph::new();
    let root = insert(&mut graph, InterfaceDeclaration::interface("", "IEmpty"));
    assert!(collect(&graph, root).is_empty());
}
