// Running the staticapi binary end to end

use pretty_assertions::assert_eq;
use std::fs;
use std::process::Command;

const API: &str = r#"
package com.example

/// Greets people.
@StaticApi
interface IGreeter {
    fun greet(name: String): String
}

@StaticApi
interface Unnamed {
    fun never()
}
"#;

fn staticapi() -> Command {
    Command::new(env!("CARGO_BIN_EXE_staticapi"))
}

#[test]
fn test_generate_kotlin_writes_facades_and_fails_on_errors() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("api.sapi");
    fs::write(&input, API).unwrap();
    let out_dir = dir.path().join("out");

    let output = staticapi()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .output()
        .unwrap();

    // The unconventional interface is an error, the other facade is still written
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ISomething"));

    let generated = fs::read_to_string(out_dir.join("com/example/Greeter_IMPL.kt")).unwrap();
    assert!(generated.contains("object Greeter {"));
    assert!(generated.contains("fun greet(name: String): String = requireDelegate().greet(name)"));
}

#[test]
fn test_generate_rust_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("api.sapi");
    fs::write(
        &input,
        "@StaticApi interface IClock { fun now(): Long }",
    )
    .unwrap();
    fs::write(
        dir.path().join("staticapi.toml"),
        "[generate]\ntarget = \"rust\"\nout_dir = \"facades\"\n",
    )
    .unwrap();

    let status = staticapi()
        .current_dir(dir.path())
        .arg("generate")
        .arg("api.sapi")
        .status()
        .unwrap();

    assert!(status.success());
    let generated = fs::read_to_string(dir.path().join("facades/clock.rs")).unwrap();
    assert!(generated.contains("pub fn now() -> i64 {"));
}

#[test]
fn test_check_reports_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("api.sapi");
    fs::write(&input, "@StaticApi interface IEmpty").unwrap();

    let output = staticapi()
        .current_dir(dir.path())
        .arg("check")
        .arg(&input)
        .output()
        .unwrap();

    // Warnings do not fail the run
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Empty (0 methods)"));
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn test_inspect_unknown_facade_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("api.sapi");
    fs::write(&input, "@StaticApi interface IFoo { fun a() }").unwrap();

    let status = staticapi()
        .arg("inspect")
        .arg(&input)
        .arg("--facade")
        .arg("Bar")
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_generate_reports_facades_sharing_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("api.sapi");
    fs::write(
        &input,
        r#"
        package com.example

        @StaticApi
        interface IFoo {
            fun first()
        }

        @StaticApi(objectName = "Foo")
        interface IBar {
            fun second()
        }
        "#,
    )
    .unwrap();
    let out_dir = dir.path().join("out");

    let output = staticapi()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("com.example.IBar"));

    let generated = fs::read_to_string(out_dir.join("com/example/Foo_IMPL.kt")).unwrap();
    assert!(generated.contains("fun first()"));
    assert!(!generated.contains("fun second()"));
}

#[test]
fn test_check_renders_for_the_requested_target() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("api.sapi");
    fs::write(
        &input,
        "@StaticApi interface IPrinter { fun print(value: Int)\n fun print(value: String) }",
    )
    .unwrap();

    let kotlin = staticapi()
        .current_dir(dir.path())
        .arg("check")
        .arg(&input)
        .status()
        .unwrap();
    assert!(kotlin.success());

    let rust = staticapi()
        .current_dir(dir.path())
        .arg("check")
        .arg(&input)
        .arg("--target")
        .arg("rust")
        .output()
        .unwrap();
    assert_eq!(rust.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&rust.stderr).contains("print"));
    assert!(!dir.path().join("generated").exists());
}
