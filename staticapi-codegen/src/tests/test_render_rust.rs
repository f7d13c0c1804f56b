use super::discover_source;
use crate::error::RenderError;
use crate::model::TypeRef;
use crate::processor::process_discovery;
use crate::render::{renderer_for, rust_type, to_snake_case, RenderOptions, RustRenderer, Renderer, Target};
use crate::synthesis::Facade;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn facades(source: &str) -> Vec<Facade> {
    let (discovery, mut collector) = discover_source(source);
    let facades = process_discovery(&discovery, &mut collector);
    assert!(!collector.has_errors());
    facades
}

#[test]
fn test_render_simple_facade() {
    let facade = &facades(
        r#"
        package com.example

        @StaticApi
        interface IGreeter {
            fun greet(name: String): String
            fun reset()
        }
        "#,
    )[0];
    let rendered = RustRenderer::default().render(facade).unwrap();

    assert_eq!(rendered.path, PathBuf::from("greeter.rs"));
    assert_eq!(
        rendered.contents,
        r#"// Generated by staticapi from com.example.IGreeter. Do not edit.

use std::sync::Arc;
use staticapi_runtime::DelegateCell;
#[allow(unused_imports)]
use super::*;

/// API implementation of [IGreeter]
pub struct Greeter;

/// Internal mutable delegate. Should be set during initialization.
#[doc(hidden)]
pub static GREETER_DELEGATE: DelegateCell<dyn IGreeter + Send + Sync> = DelegateCell::new("Greeter");

impl Greeter {
    /// Installs the implementation every call is forwarded to.
    pub fn initialize(delegate: Arc<dyn IGreeter + Send + Sync>) {
        GREETER_DELEGATE.install(delegate);
    }

    /// Forwards to [IGreeter.greet].
    pub fn greet(name: String) -> String {
        GREETER_DELEGATE.require().greet(name)
    }

    /// Forwards to [IGreeter.reset].
    pub fn reset() {
        GREETER_DELEGATE.require().reset();
    }
}
"#
    );
}

#[test]
fn test_render_signature_features() {
    let facade = &facades(
        r#"
        @StaticApi(objectName = "HttpClient")
        interface Transport {
            async fun fetchAll(vararg urls: String): List<Response>
            fun <T : Decode + Send> decode(rawBody: Bytes): T?
        }
        "#,
    )[0];
    let rendered = renderer_for(Target::Rust, RenderOptions::default())
        .render(facade)
        .unwrap();

    assert_eq!(rendered.path, PathBuf::from("http_client.rs"));
    assert!(rendered.contents.contains(
        "    pub async fn fetch_all(urls: &[String]) -> Vec<Response> {\n        HTTP_CLIENT_DELEGATE.require().fetch_all(urls).await\n    }\n"
    ));
    assert!(rendered.contents.contains(
        "    pub fn decode<T: Decode + Send>(raw_body: Bytes) -> Option<T> {\n        HTTP_CLIENT_DELEGATE.require().decode(raw_body)\n    }\n"
    ));
}

#[test]
fn test_custom_runtime_crate() {
    let facade = &facades(
        r#"
        @StaticApi
        interface IFoo
        "#,
    )[0];
    let renderer = RustRenderer::new(RenderOptions {
        runtime_crate: "crate::runtime".to_string(),
        ..RenderOptions::default()
    });

    assert_eq!(renderer.target(), Target::Rust);
    assert!(renderer
        .render(facade)
        .unwrap()
        .contents
        .contains("use crate::runtime::DelegateCell;\n"));
}

#[test]
fn test_keywords_become_raw_identifiers() {
    let facade = &facades(
        r#"
        @StaticApi
        interface IMover {
            fun move(type: String, ref: Int): Boolean
            fun match(impl: String)
        }
        "#,
    )[0];
    let contents = RustRenderer::default().render(facade).unwrap().contents;

    assert!(contents.contains(
        "    pub fn r#move(r#type: String, r#ref: i32) -> bool {\n        MOVER_DELEGATE.require().r#move(r#type, r#ref)\n    }\n"
    ));
    assert!(contents.contains(
        "    pub fn r#match(r#impl: String) {\n        MOVER_DELEGATE.require().r#match(r#impl);\n    }\n"
    ));
}

#[test]
fn test_identifier_without_raw_form_is_rejected() {
    let facade = &facades(
        r#"
        @StaticApi
        interface INode {
            fun attach(super: Node)
        }
        "#,
    )[0];

    assert_eq!(
        RustRenderer::default().render(facade),
        Err(RenderError::ReservedIdentifier {
            facade: "Node".to_string(),
            name: "super".to_string(),
        })
    );
}

#[test]
fn test_overloads_are_rejected() {
    let facade = &facades(
        r#"
        @StaticApi
        interface IPrinter {
            fun print(value: Int)
            fun print(value: String)
        }
        "#,
    )[0];

    assert_eq!(
        RustRenderer::default().render(facade),
        Err(RenderError::DuplicateMethod {
            facade: "Printer".to_string(),
            name: "print".to_string(),
            first: "print(Int)".to_string(),
            second: "print(String)".to_string(),
        })
    );
}

#[test]
fn test_names_equal_after_snake_case_are_rejected() {
    let facade = &facades(
        r#"
        @StaticApi
        interface ILinks {
            fun getURL(): String
            fun getUrl(): String
        }
        "#,
    )[0];

    assert!(matches!(
        RustRenderer::default().render(facade),
        Err(RenderError::DuplicateMethod { ref name, .. }) if name == "get_url"
    ));
}

#[test]
fn test_method_named_initialize_is_rejected() {
    let facade = &facades(
        r#"
        @StaticApi
        interface IEngine {
            fun initialize(config: String)
        }
        "#,
    )[0];

    assert!(matches!(
        RustRenderer::default().render(facade),
        Err(RenderError::DuplicateMethod { ref name, .. }) if name == "initialize"
    ));
}

#[test]
fn test_type_mapping() {
    assert_eq!(rust_type(&TypeRef::named("Int")), "i32");
    assert_eq!(rust_type(&TypeRef::named("kotlin.Long").nullable()), "Option<i64>");
    assert_eq!(
        rust_type(&TypeRef::generic(
            "Map",
            vec![TypeRef::named("String"), TypeRef::named("Boolean")]
        )),
        "std::collections::HashMap<String, bool>"
    );
    assert_eq!(
        rust_type(&TypeRef::generic("com.example.Page", vec![TypeRef::named("User")])),
        "com::example::Page<User>"
    );
}

#[test]
fn test_snake_case() {
    assert_eq!(to_snake_case("UserService"), "user_service");
    assert_eq!(to_snake_case("HTTPClient"), "http_client");
    assert_eq!(to_snake_case("getV2Data"), "get_v2_data");
    assert_eq!(to_snake_case("already_snake"), "already_snake");
}
