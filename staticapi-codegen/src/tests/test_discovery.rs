use super::discover_source;
use crate::error::{CodegenError, CodegenWarning, DiscoveryError};
use crate::model::DeclarationKind;
use pretty_assertions::assert_eq;

#[test]
fn test_marked_interfaces_become_requests() {
    let (discovery, collector) = discover_source(
        r#"
        package com.example

        interface IPlain {
            fun a()
        }

        @StaticApi
        interface IMarked {
            fun b()
        }

        @StaticApi(objectName = "Named")
        interface Custom
        "#,
    );

    assert!(!collector.has_diagnostics());
    assert_eq!(discovery.graph.len(), 3);
    assert_eq!(discovery.requests.len(), 2);

    let first = discovery.graph.get(discovery.requests[0].decl).unwrap();
    assert_eq!(first.qualified_name, "com.example.IMarked");
    assert_eq!(discovery.requests[0].object_name, "");

    let second = discovery.graph.get(discovery.requests[1].decl).unwrap();
    assert_eq!(second.simple_name, "Custom");
    assert_eq!(discovery.requests[1].object_name, "Named");
}

#[test]
fn test_positional_object_name() {
    let (discovery, _) = discover_source(
        r#"
        @StaticApi("Positional")
        interface Thing
        "#,
    );
    assert_eq!(discovery.requests[0].object_name, "Positional");
}

#[test]
fn test_qualified_marker_is_recognized() {
    let (discovery, _) = discover_source(
        r#"
        @dev.tmpod.staticapi.StaticApi
        interface IThing
        "#,
    );
    assert_eq!(discovery.requests.len(), 1);
}

#[test]
fn test_same_named_annotation_from_other_package_is_ignored() {
    let (discovery, collector) = discover_source(
        r#"
        @some.other.StaticApi
        interface IThing

        @com.example.annotations.StaticApi
        interface IOther
        "#,
    );

    assert!(discovery.requests.is_empty());
    assert_eq!(discovery.graph.len(), 2);
    assert!(!collector.has_diagnostics());
}

#[test]
fn test_marked_class_is_still_requested() {
    let (discovery, _) = discover_source(
        r#"
        @StaticApi
        class IService
        "#,
    );

    let decl = discovery.graph.get(discovery.requests[0].decl).unwrap();
    assert_eq!(decl.kind, DeclarationKind::Class);
}

#[test]
fn test_forward_supertype_reference() {
    let (discovery, collector) = discover_source(
        r#"
        @StaticApi
        interface IFoo : IBase {
            fun foo()
        }

        interface IBase {
            fun base()
        }
        "#,
    );

    assert!(!collector.has_diagnostics());
    let foo = discovery.graph.get(discovery.requests[0].decl).unwrap();
    assert_eq!(foo.super_interfaces.len(), 1);
    let base = discovery.graph.get(foo.super_interfaces[0].target).unwrap();
    assert_eq!(base.simple_name, "IBase");
}

#[test]
fn test_supertype_arguments_are_recorded() {
    let (discovery, _) = discover_source(
        r#"
        interface IRepo<T> {
            fun get(): T
        }

        @StaticApi
        interface IUsers : IRepo<User>
        "#,
    );

    let users = discovery.graph.get(discovery.requests[0].decl).unwrap();
    let args: Vec<String> = users.super_interfaces[0]
        .args
        .iter()
        .map(|a| a.to_string())
        .collect();
    assert_eq!(args, vec!["User"]);
}

#[test]
fn test_unresolved_supertype_warns() {
    let (discovery, collector) = discover_source(
        r#"
        @StaticApi
        interface IFoo : java.io.Closeable {
            fun foo()
        }
        "#,
    );

    assert_eq!(collector.error_count(), 0);
    let warnings: Vec<&CodegenWarning> = collector.warnings().collect();
    assert_eq!(
        warnings,
        vec![&CodegenWarning::UnresolvedSupertype {
            interface: "IFoo".to_string(),
            supertype: "java.io.Closeable".to_string(),
        }]
    );
    let foo = discovery.graph.get(discovery.requests[0].decl).unwrap();
    assert!(foo.super_interfaces.is_empty());
}

#[test]
fn test_duplicate_declaration_keeps_first() {
    let (discovery, collector) = discover_source(
        r#"
        interface IFoo {
            fun first()
        }

        @StaticApi
        interface IFoo {
            fun second()
        }
        "#,
    );

    assert_eq!(discovery.graph.len(), 1);
    assert!(discovery.requests.is_empty());

    let errors: Vec<&CodegenError> = collector.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        CodegenError::Discovery(DiscoveryError::DuplicateDeclaration { qualified_name })
            if qualified_name == "IFoo"
    ));
}

#[test]
fn test_documentation_and_signatures_are_lowered() {
    let (discovery, _) = discover_source(
        r#"
        /// Greets people.
        @StaticApi
        interface IGreeter {
            /// Says hello.
            suspend fun <T : Named> greet(who: T, vararg extra: String): String?
        }
        "#,
    );

    let greeter = discovery.graph.get(discovery.requests[0].decl).unwrap();
    assert_eq!(greeter.documentation.as_deref(), Some("Greets people."));

    let greet = &greeter.own_methods[0];
    assert_eq!(greet.documentation.as_deref(), Some("Says hello."));
    assert!(greet.is_async);
    assert_eq!(greet.type_parameters[0].name, "T");
    assert_eq!(greet.type_parameters[0].bounds[0].to_string(), "Named");
    assert!(greet.parameters[1].is_variadic);
    assert_eq!(greet.return_type.as_ref().map(|t| t.to_string()), Some("String?".to_string()));
}
