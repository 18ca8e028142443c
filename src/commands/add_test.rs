use super::*;
use crate::error::RxwireError;
use crate::fs::mock::MockFs;
use std::path::PathBuf;

const MODULE_PATH: &str = "src/app/app.module.ts";

const FRESH_MODULE: &str = "@NgModule({
  declarations: [AppComponent],
  imports: [],
  bootstrap: [AppComponent],
})
export class AppModule {}
";

const MODULE_WITH_BROWSER_MODULE: &str = "import { NgModule } from '@angular/core';
import { BrowserModule } from '@angular/platform-browser';

@NgModule({
  declarations: [AppComponent],
  imports: [BrowserModule],
  bootstrap: [AppComponent],
})
export class AppModule {}
";

fn workspace_tree(module_source: &str) -> Tree {
    let fs = Arc::new(MockFs::new());
    fs.add_file(
        "/ws/angular.json",
        r#"{"projects": {"app": {"sourceRoot": "src", "projectType": "application"}}}"#,
    );
    fs.add_file(
        "/ws/package.json",
        "{\n  \"name\": \"app\",\n  \"dependencies\": {\n    \"@angular/core\": \"17.0.0\"\n  }\n}\n",
    );
    fs.add_file(&format!("/ws/{}", MODULE_PATH), module_source);
    Tree::new(fs, PathBuf::from("/ws"))
}

fn resolved_dependencies() -> Vec<Dependency> {
    vec![
        Dependency::new("@rx-angular/template", "2.0.0"),
        Dependency::new("@rx-angular/cdk", "2.0.0"),
    ]
}

fn run_pipeline(tree: &mut Tree, module_path: &str) {
    apply_dependencies(tree, &resolved_dependencies()).unwrap();
    add_import_statement(tree, module_path).unwrap();
    add_module_declarations(tree, module_path).unwrap();
}

#[test]
fn test_wires_fresh_module() {
    let mut tree = workspace_tree(FRESH_MODULE);
    run_pipeline(&mut tree, MODULE_PATH);

    let module = tree.read_to_string(MODULE_PATH).unwrap();
    assert!(module.starts_with(
        "import { LetModule, PushModule } from '@rx-angular/template';\n"
    ));
    assert!(module.contains("imports: [LetModule, PushModule],"));
    // import 文と imports 配列の2箇所のみ
    assert_eq!(module.matches("LetModule").count(), 2);
    assert_eq!(module.matches("PushModule").count(), 2);

    let manifest = tree.read_to_string("package.json").unwrap();
    assert!(manifest.contains("\"@rx-angular/template\": \"2.0.0\""));
    assert!(manifest.contains("\"@rx-angular/cdk\": \"2.0.0\""));
}

#[test]
fn test_existing_declaration_is_preserved() {
    let mut tree = workspace_tree(MODULE_WITH_BROWSER_MODULE);
    run_pipeline(&mut tree, MODULE_PATH);

    let module = tree.read_to_string(MODULE_PATH).unwrap();
    // 既存要素が先頭、追加分は指定順
    assert!(module.contains("imports: [BrowserModule, LetModule, PushModule],"));
    assert!(module.contains(
        "import { BrowserModule } from '@angular/platform-browser';\nimport { LetModule, PushModule } from '@rx-angular/template';"
    ));
}

#[test]
fn test_missing_module_file_fails_both_inserters() {
    let mut tree = workspace_tree(FRESH_MODULE);

    let err = add_import_statement(&mut tree, "src/app/missing.module.ts").unwrap_err();
    assert!(matches!(err, RxwireError::MissingFile(_)));
    let err = add_module_declarations(&mut tree, "src/app/missing.module.ts").unwrap_err();
    assert!(matches!(err, RxwireError::MissingFile(_)));

    // テキスト変更は一切発生しない
    assert!(tree.changed_paths().is_empty());
}

#[test]
fn test_rerun_is_idempotent() {
    let mut tree = workspace_tree(MODULE_WITH_BROWSER_MODULE);
    run_pipeline(&mut tree, MODULE_PATH);
    let module_after_first = tree.read_to_string(MODULE_PATH).unwrap();
    let manifest_after_first = tree.read_to_string("package.json").unwrap();

    run_pipeline(&mut tree, MODULE_PATH);
    assert_eq!(tree.read_to_string(MODULE_PATH).unwrap(), module_after_first);
    assert_eq!(
        tree.read_to_string("package.json").unwrap(),
        manifest_after_first
    );
}

#[test]
fn test_changed_paths_cover_manifest_and_module() {
    let mut tree = workspace_tree(FRESH_MODULE);
    run_pipeline(&mut tree, MODULE_PATH);

    assert_eq!(
        tree.changed_paths(),
        vec![PathBuf::from("package.json"), PathBuf::from(MODULE_PATH)]
    );
}
