//! End-to-end driver runs over JSON program models on disk.

use clap::Parser;
use exn::cli::args::CliArgs;
use exn::cli::driver;
use exn_binder::ModelBuilder;
use exn_binder::model::{MemberModel, OperationModel, ProgramModel, TypeModel};
use exn_common::Span;
use exn_common::diagnostics::diagnostic_codes;
use std::path::Path;

const SOURCE: &str = "class C {\n    public void M() { throw new FormatException(); }\n}\n";

fn span_of(needle: &str) -> Span {
    let start = SOURCE.find(needle).expect("needle in source") as u32;
    Span::at(start, needle.len() as u32)
}

fn throwing_model() -> ProgramModel {
    let mut builder = ModelBuilder::new();
    let file = builder.file("app.cs", SOURCE);
    builder.add_type(
        TypeModel::class("App.C")
            .in_file(file, span_of("C"))
            .member(
                MemberModel::method("M")
                    .at(span_of("M"))
                    .declared_at(span_of("public").start)
                    .body(OperationModel::throw_new(
                        span_of("throw"),
                        "System.FormatException",
                        span_of("FormatException"),
                    )),
            ),
    );
    builder.build()
}

fn write_model(dir: &Path, model: &ProgramModel) {
    let json = serde_json::to_string_pretty(model).expect("serialize model");
    std::fs::write(dir.join("model.json"), json).expect("write model");
}

fn run(dir: &Path, flags: &[&str]) -> anyhow::Result<driver::CheckRun> {
    let mut argv = vec!["exn"];
    argv.extend_from_slice(flags);
    argv.push("model.json");
    let args = CliArgs::try_parse_from(argv).expect("arguments");
    driver::run(&args, dir)
}

#[test]
fn test_reports_diagnostics_from_json_model() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_model(dir.path(), &throwing_model());

    let result = run(dir.path(), &[]).expect("run");
    assert!(!result.cancelled);
    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.code, diagnostic_codes::EXCEPTION_SHOULD_BE_DOCUMENTED);
    assert_eq!(diag.file, "app.cs");
    assert_eq!(diag.start, span_of("throw").start);
    assert_eq!(result.sources.get("app.cs").map(String::as_str), Some(SOURCE));
    assert!(result.fixes.is_empty());
}

#[test]
fn test_deeply_nested_json_model_loads_and_checks() {
    const DEPTH: usize = 12_000;
    let mut body = OperationModel::throw_new(
        span_of("throw"),
        "System.FormatException",
        span_of("FormatException"),
    );
    for _ in 0..DEPTH {
        body = OperationModel::block(vec![body]);
    }
    let mut builder = ModelBuilder::new();
    let file = builder.file("app.cs", SOURCE);
    builder.add_type(
        TypeModel::class("App.C")
            .in_file(file, span_of("C"))
            .member(MemberModel::method("M").at(span_of("M")).body(body)),
    );
    let dir = tempfile::tempdir().expect("temp dir");
    write_model(dir.path(), &builder.build());

    let result = run(dir.path(), &[]).expect("run");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].code,
        diagnostic_codes::EXCEPTION_SHOULD_BE_DOCUMENTED
    );
    assert_eq!(result.diagnostics[0].start, span_of("throw").start);
}

#[test]
fn test_config_next_to_model_is_applied() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_model(dir.path(), &throwing_model());
    std::fs::write(
        dir.path().join("exn.json"),
        r#"{ "ignoredExceptions": ["System.SystemException"] }"#,
    )
    .expect("write config");

    assert!(run(dir.path(), &[]).expect("run").diagnostics.is_empty());

    let overridden = run(dir.path(), &["--ignore", "System.TimeoutException"]).expect("run");
    assert_eq!(overridden.diagnostics.len(), 1);
}

#[test]
fn test_explicit_config_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_model(dir.path(), &throwing_model());
    std::fs::create_dir(dir.path().join("settings")).expect("mkdir");
    std::fs::write(
        dir.path().join("settings/strict.json"),
        r#"{ "ignoredExceptions": ["System.FormatException"] }"#,
    )
    .expect("write config");

    let result = run(dir.path(), &["--config", "settings/strict.json"]).expect("run");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_fixes_are_addressed_by_file_name() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_model(dir.path(), &throwing_model());

    let result = run(dir.path(), &["--fixes", "--new-line", "crlf"]).expect("run");
    assert_eq!(result.fixes.len(), 1);
    let fix = &result.fixes[0];
    assert_eq!(fix.file, "app.cs");
    assert_eq!(fix.start, span_of("    public").start);
    assert_eq!(
        fix.new_text,
        "    /// <exception cref=\"FormatException\"></exception>\r\n"
    );

    let json = serde_json::to_value(fix).expect("serialize fix");
    assert!(json.get("newText").is_some());
}

#[test]
fn test_missing_model_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = run(dir.path(), &[]).expect_err("should fail");
    assert!(format!("{err:#}").contains("failed to read program model"));
}

#[test]
fn test_unknown_base_type_is_a_bind_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut builder = ModelBuilder::new();
    builder.add_type(TypeModel::class("App.C").extends("Vendor.Missing"));
    write_model(dir.path(), &builder.build());

    let err = run(dir.path(), &[]).expect_err("should fail");
    let message = format!("{err:#}");
    assert!(message.contains("failed to bind program model"));
    assert!(message.contains("Vendor.Missing"));
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("model.json"), "{ \"types\": 3 }").expect("write");
    let err = run(dir.path(), &[]).expect_err("should fail");
    assert!(format!("{err:#}").contains("failed to parse program model"));
}
