//! add コマンド
//!
//! ng add 相当のセットアップパイプライン:
//! 1. プロジェクト解決（読み取りのみ）
//! 2. 依存解決（並行ルックアップ）と package.json への反映
//! 3. ルートモジュールへの import 文の挿入
//! 4. @NgModule imports 配列への追加
//!
//! 変更はすべてインメモリのツリーに記録し、最後にまとめて書き出す。
//! 3 と 4 は同じファイルを対象とする別々の編集で、4 のパースには
//! 3 の適用結果が反映される。

use clap::Parser;
use std::sync::Arc;

use crate::constants::{required_packages, FEATURE_MODULES, PACKAGE_NAME};
use crate::error::Result;
use crate::fs::RealFs;
use crate::manifest::{self, Dependency};
use crate::module_edit;
use crate::output;
use crate::registry::{RegistryClient, DEFAULT_REGISTRY};
use crate::tree::Tree;
use crate::workspace::{self, WorkspaceConfig};

#[derive(Debug, Parser)]
pub struct Args {
    /// 対象プロジェクト名（未指定なら defaultProject）
    #[arg(long)]
    pub project: Option<String>,

    /// ルートモジュールのパス（未指定なら自動検出）
    #[arg(long)]
    pub module: Option<String>,

    /// npm レジストリの URL
    #[arg(long, default_value = DEFAULT_REGISTRY)]
    pub registry: String,

    /// 書き込みを行わず、変更されるファイルの一覧だけ表示
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: Args) -> Result<()> {
    let root = std::env::current_dir()?;
    let mut tree = Tree::new(Arc::new(RealFs), root);
    let registry = RegistryClient::with_base_url(&args.registry);

    // プロジェクトとルートモジュールの解決
    let config = WorkspaceConfig::load(&tree)?;
    let (_, project) = config.select_project(args.project.as_deref())?;
    let module_path =
        workspace::find_root_module(&tree, args.module.as_deref(), project.source_root())?;

    // 依存解決。全件揃うまで package.json には触らない
    let requests = required_packages();
    let spinner = output::resolving_spinner();
    let resolved = registry.resolve_all(&requests).await;
    spinner.finish_and_clear();
    apply_dependencies(&mut tree, &resolved?)?;

    // ルートモジュールへの配線
    add_import_statement(&mut tree, &module_path)?;
    add_module_declarations(&mut tree, &module_path)?;

    if args.dry_run {
        output::dry_run_listing(&tree.changed_paths());
    } else {
        tree.flush()?;
        output::wired_summary(&FEATURE_MODULES, &module_path);
    }
    Ok(())
}

/// 解決済みの依存を package.json に反映し、1件ずつログを出す
fn apply_dependencies(tree: &mut Tree, dependencies: &[Dependency]) -> Result<()> {
    for dependency in dependencies {
        manifest::record_dependency(tree, dependency)?;
        output::added_dependency(&dependency.name, &dependency.version);
    }
    Ok(())
}

/// import 文をルートモジュールに挿入する
fn add_import_statement(tree: &mut Tree, module_path: &str) -> Result<()> {
    let source = tree.read_to_string(module_path)?;
    if let Some(change) =
        module_edit::import_statement_change(&source, module_path, &FEATURE_MODULES, PACKAGE_NAME)?
    {
        let mut recorder = tree.begin_update(module_path)?;
        recorder.insert_left(change.pos, change.text);
        tree.commit_update(recorder)?;
    }
    Ok(())
}

/// フィーチャーモジュールを @NgModule の imports 配列に追加する
fn add_module_declarations(tree: &mut Tree, module_path: &str) -> Result<()> {
    let source = tree.read_to_string(module_path)?;
    let changes = module_edit::declaration_changes(&source, module_path, &FEATURE_MODULES)?;
    if changes.is_empty() {
        return Ok(());
    }

    let mut recorder = tree.begin_update(module_path)?;
    for change in changes {
        recorder.insert_left(change.pos, change.text);
    }
    tree.commit_update(recorder)?;
    Ok(())
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
