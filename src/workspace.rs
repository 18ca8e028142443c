//! ワークスペース設定とルートモジュールの解決
//!
//! angular.json からプロジェクトを選び、アプリケーションの
//! ルートモジュールファイルを特定する。ツリーの読み取りのみで
//! 副作用はない。

use crate::error::{Result, RxwireError};
use crate::tree::Tree;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::PathBuf;

/// ワークスペース設定ファイル
pub const WORKSPACE_CONFIG_PATH: &str = "angular.json";

/// angular.json のスキーマ（必要な部分のみ）
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default, rename = "defaultProject")]
    pub default_project: Option<String>,
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectConfig>,
}

/// projects 配下の1エントリ
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub root: String,
    #[serde(default, rename = "sourceRoot")]
    pub source_root: Option<String>,
    #[serde(default, rename = "projectType")]
    pub project_type: Option<String>,
}

impl ProjectConfig {
    /// ソースルート（未指定なら "src"）
    pub fn source_root(&self) -> &str {
        self.source_root.as_deref().unwrap_or("src")
    }
}

impl WorkspaceConfig {
    /// JSONからパース
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            RxwireError::InvalidWorkspace(format!("Failed to parse angular.json: {}", e))
        })
    }

    /// ツリーから読み込み
    pub fn load(tree: &Tree) -> Result<Self> {
        if !tree.exists(WORKSPACE_CONFIG_PATH) {
            return Err(RxwireError::InvalidWorkspace(format!(
                "{} not found in workspace root",
                WORKSPACE_CONFIG_PATH
            )));
        }
        Self::parse(&tree.read_to_string(WORKSPACE_CONFIG_PATH)?)
    }

    /// プロジェクトを選択する
    ///
    /// 優先順位: 明示指定 > defaultProject > 唯一のプロジェクト >
    /// 唯一の application プロジェクト
    pub fn select_project(&self, name: Option<&str>) -> Result<(&str, &ProjectConfig)> {
        if let Some(name) = name {
            return self
                .projects
                .get_key_value(name)
                .map(|(key, project)| (key.as_str(), project))
                .ok_or_else(|| RxwireError::ProjectNotFound(name.to_string()));
        }

        if let Some(default) = &self.default_project {
            return self
                .projects
                .get_key_value(default)
                .map(|(key, project)| (key.as_str(), project))
                .ok_or_else(|| RxwireError::ProjectNotFound(default.clone()));
        }

        if self.projects.len() == 1 {
            if let Some((key, project)) = self.projects.iter().next() {
                return Ok((key.as_str(), project));
            }
        }

        // application が1つだけならそれを使う
        let mut applications = self
            .projects
            .iter()
            .filter(|(_, project)| project.project_type.as_deref() == Some("application"));
        if let (Some((key, project)), None) = (applications.next(), applications.next()) {
            return Ok((key.as_str(), project));
        }

        Err(RxwireError::ProjectNotFound(
            "no project specified and no defaultProject configured".to_string(),
        ))
    }
}

/// ルートモジュールファイルを特定する
///
/// 1. 明示されたパス（そのまま、またはソースルート相対）
/// 2. 慣例的な配置（`<sourceRoot>/app/app.module.ts` など）
/// 3. ソースルート以下の `*.module.ts` 探索（app.module.ts 優先）
pub fn find_root_module(tree: &Tree, hint: Option<&str>, source_root: &str) -> Result<String> {
    if let Some(hint) = hint.filter(|hint| !hint.is_empty()) {
        if tree.exists(hint) {
            return Ok(hint.to_string());
        }
        let joined = format!("{}/{}", source_root, hint);
        if tree.exists(&joined) {
            return Ok(joined);
        }
        return Err(RxwireError::ModuleNotFound(hint.to_string()));
    }

    for candidate in [
        format!("{}/app/app.module.ts", source_root),
        format!("{}/app.module.ts", source_root),
    ] {
        if tree.exists(&candidate) {
            return Ok(candidate);
        }
    }

    let modules: Vec<PathBuf> = tree
        .walk_files(source_root)
        .into_iter()
        .filter(|path| path.to_string_lossy().ends_with(".module.ts"))
        .collect();

    if let Some(app) = modules
        .iter()
        .find(|path| path.file_name() == Some(OsStr::new("app.module.ts")))
    {
        return Ok(app.to_string_lossy().to_string());
    }

    modules
        .first()
        .map(|path| path.to_string_lossy().to_string())
        .ok_or_else(|| RxwireError::ModuleNotFound(source_root.to_string()))
}

#[cfg(test)]
#[path = "workspace_test.rs"]
mod tests;
