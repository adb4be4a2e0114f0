//! End-to-end slices over an on-disk fixture.

use engine::{SliceError, SliceOptions, ValidationError, run_slice};
use test_support::{TestTree, relative_entries, relative_files};

fn fixture() -> TestTree {
    TestTree::new()
        .file("README.md", "# readme")
        .file("common.txt", "common")
        .file("main.go", "package main")
        .file("main_test.go", "package main")
        .file("src/app/app.go", "package app")
        .file("src/app/app_test.go", "package app")
        .file("docs/guide.md", "guide")
        .file("docs/trace.log", "log")
        .file("base.manifest", "+ /common.txt\n")
}

fn slice(source: &TestTree, manifest_name: &str, manifest: &str) -> TestTree {
    let source_manifest = source.join(manifest_name);
    std::fs::write(&source_manifest, manifest).expect("write manifest");
    let output = TestTree::new();
    let options = SliceOptions::new(&source_manifest, source.path(), output.path());
    run_slice(&options, std::io::sink()).expect("slice succeeds");
    output
}

#[test]
fn basic_include_and_exclude() {
    let source = fixture();
    let out = slice(
        &source,
        "manifest1.txt",
        "+ /main.go\n+ /docs/\n- /docs/guide.md\n- *\n",
    );
    assert_eq!(relative_entries(out.path()), ["docs/", "main.go"]);
}

#[test]
fn manifest_inheritance() {
    let source = fixture();
    let out = slice(&source, "manifest2.txt", ". base.manifest\n+ /main.go\n- *\n");
    assert_eq!(relative_files(out.path()), ["common.txt", "main.go"]);
}

#[test]
fn wildcard_inclusion() {
    let source = fixture();
    let out = slice(&source, "manifest3.txt", "+ **/*.md\n+ **/\n- *\n");
    assert_eq!(relative_files(out.path()), ["README.md", "docs/guide.md"]);
    assert!(out.join("src/app").is_dir());
}

#[test]
fn wildcard_exclusion() {
    let source = fixture();
    let out = slice(&source, "manifest4.txt", "- *.log\n- *_test.go\n+ **\n");
    let files = relative_files(out.path());
    assert!(files.contains(&"main.go".to_owned()));
    assert!(files.contains(&"src/app/app.go".to_owned()));
    assert!(!files.iter().any(|f| f.ends_with(".log") || f.ends_with("_test.go")));
}

#[test]
fn rule_precedence() {
    let source = fixture();
    let out = slice(
        &source,
        "manifest5.txt",
        "- /src/app/app_test.go\n+ /src/**\n",
    );
    assert_eq!(relative_entries(out.path()), ["src/", "src/app/", "src/app/app.go"]);
}

#[test]
fn self_exclusion_of_manifest() {
    let source = fixture();
    let out = slice(&source, "manifest6.txt", "+ /main.go\n- /manifest6.txt\n");
    assert_eq!(relative_files(out.path()), ["main.go"]);
}

#[test]
fn extensions_are_remapped_in_output_only() {
    let source = fixture();
    std::fs::write(source.join("slice.manifest"), "+ *.go\n- *\n").expect("manifest");
    let out = TestTree::new();
    let options = SliceOptions::new(source.join("slice.manifest"), source.path(), out.path())
        .remap_extensions("go:txt");
    let report = run_slice(&options, std::io::sink()).expect("slice");

    assert_eq!(report.materialized().files_renamed(), 4);
    assert_eq!(
        relative_files(out.path()),
        ["main.txt", "main_test.txt", "src/app/app.txt", "src/app/app_test.txt"]
    );
    assert!(source.exists("main.go"));
}

#[test]
fn dry_run_lists_without_copying() {
    let source = fixture();
    std::fs::write(source.join("slice.manifest"), "+ /docs/**\n- *\n").expect("manifest");
    let out = TestTree::new();
    let target = out.join("slice");
    let options =
        SliceOptions::new(source.join("slice.manifest"), source.path(), &target).dry_run(true);

    let mut listing = Vec::new();
    let report = run_slice(&options, &mut listing).expect("dry run");
    assert_eq!(
        String::from_utf8(listing).expect("utf8"),
        "docs/guide.md\ndocs/trace.log\n"
    );
    assert_eq!(report.files_selected(), 2);
    assert!(!target.exists());
}

#[test]
fn missing_source_fails_validation() {
    let temp = TestTree::new().file("m", "+ *\n");
    let options = SliceOptions::new(temp.join("m"), temp.join("nope"), temp.join("out"));
    let error = run_slice(&options, std::io::sink()).expect_err("missing source");
    assert!(matches!(
        error,
        SliceError::Validation(ValidationError::SourceNotFound { .. })
    ));
}

#[test]
fn broken_manifest_writes_nothing() {
    let source = fixture();
    std::fs::write(source.join("bad.manifest"), "+ /main.go\n. missing.manifest\n")
        .expect("manifest");
    let out = TestTree::new();
    let target = out.join("slice");
    let options = SliceOptions::new(source.join("bad.manifest"), source.path(), &target);

    let error = run_slice(&options, std::io::sink()).expect_err("missing inherited file");
    assert!(error.to_string().contains("missing.manifest"));
    assert!(!target.exists());
}
