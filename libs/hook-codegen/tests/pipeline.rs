//! End-to-end tests: load a package from disk, plan, render and write hooks

mod support;

use std::fs;
use std::process::Command;

use hoog_codegen::{generate_hook, plan_hook, render_hook, Error, ExtractError};
use hoog_format::{formatter_for, FormatterChoice};

fn plan_into_cbhook(interface: &str) -> hoog_codegen::HookTemplate {
    let dir = support::instance_module();
    let config = support::config(
        support::location(&dir.path().join("instance"), interface),
        support::location(&dir.path().join("cbhook"), ""),
    );
    plan_hook(&config).unwrap()
}

fn extract_error(interface: &str) -> anyhow::Error {
    let dir = support::instance_module();
    let config = support::config(
        support::location(&dir.path().join("instance"), interface),
        support::location(&dir.path().join("cbhook"), ""),
    );
    plan_hook(&config).unwrap_err()
}

#[test]
fn interface0_anonymous_parameter() {
    let plan = plan_into_cbhook("Interface0");
    assert_eq!(plan.declaration_args, vec!["arg0 interface{}"]);
    assert_eq!(plan.call_args, vec!["arg0"]);
}

#[test]
fn interface1_variadic_parameter() {
    let plan = plan_into_cbhook("Interface1");
    assert_eq!(plan.declaration_args, vec!["arg0 ...interface{}"]);
    assert_eq!(plan.call_args, vec!["arg0..."]);
}

#[test]
fn interface2_discarded_parameter() {
    let plan = plan_into_cbhook("Interface2");
    assert_eq!(plan.declaration_args, vec!["s string", "arg1 interface{}"]);
    assert_eq!(plan.call_args, vec!["s", "arg1"]);
}

#[test]
fn interface3_into_other_package() {
    let plan = plan_into_cbhook("Interface3");
    assert_eq!(plan.package_name, "cbhook");
    assert_eq!(plan.hook_name, "Hook");
    assert_eq!(plan.interface_ref, "instance.Interface3");
    assert_eq!(plan.declaration_args, vec!["i int", "s instance.Struct"]);
    assert_eq!(plan.call_args, vec!["i", "s"]);
    assert_eq!(plan.imports, vec!["example.com/m/instance"]);
    assert!(!plan.thread_safe);
}

#[test]
fn foreign_parameter_types_are_imported() {
    let plan = plan_into_cbhook("Writer");
    assert_eq!(
        plan.declaration_args,
        vec!["w io.Writer", "p *instance.Struct", "rest ...[]byte"]
    );
    assert_eq!(plan.call_args, vec!["w", "p", "rest..."]);
    assert_eq!(plan.imports, vec!["example.com/m/instance", "io"]);
}

#[test]
fn same_package_hook_is_unqualified() {
    let dir = support::instance_module();
    let instance = dir.path().join("instance");
    let config = support::config(
        support::location(&instance, "Interface3"),
        support::location(&instance, "Interface3Hook"),
    );

    let plan = plan_hook(&config).unwrap();
    assert_eq!(plan.package_name, "instance");
    assert_eq!(plan.hook_name, "Interface3Hook");
    assert_eq!(plan.interface_ref, "Interface3");
    assert_eq!(plan.declaration_args, vec!["i int", "s Struct"]);
    assert!(plan.imports.is_empty());
}

#[test]
fn main_package_names() {
    let dir = support::module(
        "example.com/m",
        &[(
            "main/main.go",
            "package main\n\ntype Handler interface {\n\tHandle(code int)\n}\n\nfunc main() {}\n",
        )],
    );
    let main = dir.path().join("main");

    let config = support::config(
        support::location(&main, "Handler"),
        support::location(&main, "Handlers"),
    );
    assert_eq!(plan_hook(&config).unwrap().package_name, "main");

    let config = support::config(
        support::location(&main, "Handler"),
        support::location(&dir.path().join("cbhook"), ""),
    );
    assert_eq!(plan_hook(&config).unwrap().package_name, "cbhook");
}

#[test]
fn dot_imported_parameter_types_are_imported() {
    let dir = support::module(
        "example.com/m",
        &[(
            "instance/instance.go",
            "package instance\n\nimport . \"io\"\n\ntype Sink interface {\n\tFire(w Writer)\n}\n",
        )],
    );
    let config = support::config(
        support::location(&dir.path().join("instance"), "Sink"),
        support::location(&dir.path().join("cbhook"), ""),
    );
    let plan = plan_hook(&config).unwrap();
    assert_eq!(plan.declaration_args, vec!["w io.Writer"]);
    assert_eq!(plan.imports, vec!["example.com/m/instance", "io"]);
}

#[test]
fn undefined_parameter_type_fails_to_load() {
    let dir = support::module(
        "example.com/m",
        &[(
            "instance/instance.go",
            "package instance\n\ntype Callback interface {\n\tFire(s Nope)\n}\n",
        )],
    );
    let config = support::config(
        support::location(&dir.path().join("instance"), "Callback"),
        support::location(&dir.path().join("cbhook"), ""),
    );
    let err = plan_hook(&config).unwrap_err();
    assert!(format!("{err:#}").contains("undefined: Nope"), "{err:#}");
}

#[test]
fn method_with_results_is_rejected() {
    let err = extract_error("Reader");
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::Extract(ExtractError::HasResults { .. }))
    ));
}

#[test]
fn interface_with_two_methods_is_rejected() {
    let err = extract_error("Pair");
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::Extract(ExtractError::TooManyMethods { count: 2, .. }))
    ));
}

#[test]
fn empty_interface_is_rejected() {
    let err = extract_error("Empty");
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::Extract(ExtractError::EmptyInterface { .. }))
    ));
}

#[test]
fn non_interfaces_are_rejected() {
    for name in ["Struct", "Helper"] {
        let err = extract_error(name);
        assert!(
            matches!(
                err.downcast_ref::<Error>(),
                Some(Error::Extract(ExtractError::NotInterface { .. }))
            ),
            "{name}: {err:#}"
        );
    }
}

#[test]
fn unknown_interface_is_not_found() {
    let err = extract_error("Missing");
    assert!(format!("{err:#}").contains("'Missing' not found in scope"));
}

#[test]
fn missing_interface_name_is_a_config_error() {
    let dir = support::instance_module();
    let config = support::config(
        support::location(&dir.path().join("instance"), ""),
        support::location(&dir.path().join("cbhook"), ""),
    );
    let err = plan_hook(&config).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Config(_))));
}

#[test]
fn generate_writes_file_into_new_directory() {
    let dir = support::instance_module();
    let destination = dir.path().join("internal/cbhook");
    let config = support::config(
        support::location(&dir.path().join("instance"), "Interface3"),
        support::location(&destination, ""),
    )
    .with_thread_safe(true);

    let path = generate_hook(&config).unwrap();
    assert_eq!(path, destination.join("generated.go"));

    let code = fs::read_to_string(&path).unwrap();
    assert!(code.starts_with("// Code generated by hoog; DO NOT EDIT.\n\npackage cbhook\n"));
    assert!(code.contains("\t\"example.com/m/instance\"\n\t\"sync\"\n"));
    assert!(code.contains("func (h *Hook) Method(i int, s instance.Struct) {"));
    assert!(code.contains("\t\tentry.Method(i, s)\n"));
}

#[test]
fn generation_is_idempotent() {
    let dir = support::instance_module();
    let config = support::config(
        support::location(&dir.path().join("instance"), "Interface2"),
        support::location(&dir.path().join("cbhook"), "Callbacks"),
    )
    .with_file_name("callbacks_hook.go");

    let path = generate_hook(&config).unwrap();
    let first = fs::read(&path).unwrap();
    let second_path = generate_hook(&config).unwrap();
    assert_eq!(path, second_path);
    assert_eq!(first, fs::read(&second_path).unwrap());
    assert_eq!(first, render_hook(&config).unwrap());
}

#[test]
fn rendered_source_is_stable_under_gofmt() {
    if Command::new("gofmt").arg("-l").arg("/dev/null").output().is_err() {
        eprintln!("gofmt not found, skipping");
        return;
    }

    for thread_safe in [false, true] {
        let dir = support::instance_module();
        let config = support::config(
            support::location(&dir.path().join("instance"), "Writer"),
            support::location(&dir.path().join("cbhook"), ""),
        )
        .with_thread_safe(thread_safe);

        let raw = render_hook(&config).unwrap();
        let formatted = formatter_for(FormatterChoice::Gofmt).format(&raw).unwrap();
        assert_eq!(String::from_utf8(formatted).unwrap(), String::from_utf8(raw).unwrap());
    }
}

#[test]
fn checked_in_fixture_loads() {
    let config = support::config(
        support::location(&support::fixtures_dir().join("instance"), "Interface3"),
        support::location(&support::fixtures_dir().join("instance"), "Interface3Hook"),
    );
    let plan = plan_hook(&config).unwrap();
    assert_eq!(plan.package_name, "instance");
    assert_eq!(plan.declaration_args, vec!["i int", "s Struct"]);
}
