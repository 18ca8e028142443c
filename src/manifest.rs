//! package.json への依存追加
//!
//! 編集は値レベル（serde_json::Value）で行い、dependencies 以外の
//! キー順は preserve_order でそのまま維持する。

use crate::error::{Result, RxwireError};
use crate::tree::Tree;
use serde_json::Value;

/// 依存マニフェストのパス
pub const MANIFEST_PATH: &str = "package.json";

/// 解決済みの依存（パッケージ名と確定バージョン）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub version: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// 依存を dependencies に記録する
///
/// - 既存エントリは解決済みバージョンで上書き
/// - dependencies が無ければ作成
/// - dependencies 内はアルファベット順に並べ直す
pub fn record_dependency(tree: &mut Tree, dependency: &Dependency) -> Result<()> {
    if !tree.exists(MANIFEST_PATH) {
        return Err(RxwireError::InvalidManifest(format!(
            "{} not found in workspace root",
            MANIFEST_PATH
        )));
    }

    let content = tree.read_to_string(MANIFEST_PATH)?;
    let mut manifest: Value = serde_json::from_str(&content)
        .map_err(|e| RxwireError::InvalidManifest(format!("Failed to parse package.json: {}", e)))?;

    let root = manifest.as_object_mut().ok_or_else(|| {
        RxwireError::InvalidManifest("package.json root is not an object".to_string())
    })?;

    let dependencies = root
        .entry("dependencies")
        .or_insert_with(|| Value::Object(serde_json::Map::new()));
    let dependencies = dependencies.as_object_mut().ok_or_else(|| {
        RxwireError::InvalidManifest("dependencies is not an object".to_string())
    })?;

    dependencies.insert(
        dependency.name.clone(),
        Value::String(dependency.version.clone()),
    );

    let mut entries: Vec<(String, Value)> = std::mem::take(dependencies).into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    *dependencies = entries.into_iter().collect();

    let mut text = serde_json::to_string_pretty(&manifest)?;
    text.push('\n');
    tree.write(MANIFEST_PATH, text);
    Ok(())
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
