//! npm レジストリクライアント
//!
//! パッケージ名から最新公開バージョンを解決する。複数パッケージの
//! 解決はタスクを並行で発行し、全件揃ってから呼び出し側へ返す。

use crate::error::{Result, RxwireError};
use crate::manifest::Dependency;
use reqwest::Client;
use std::time::Duration;

/// デフォルトのレジストリURL
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";

/// 解決要求（バージョン指定があればルックアップを省略）
#[derive(Debug, Clone)]
pub struct PackageRequest {
    pub name: String,
    pub version: Option<String>,
}

impl PackageRequest {
    /// 最新バージョンをレジストリで解決する要求
    pub fn latest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }
}

/// レジストリAPIクライアント
#[derive(Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
}

impl RegistryClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent("rxwire-cli")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// パッケージの最新公開バージョンを取得
    pub async fn latest_version(&self, name: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, encode_package_name(name));

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();

        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RxwireError::RegistryLookup {
                name: name.to_string(),
                status,
                message,
            });
        }

        let document: serde_json::Value = response.json().await?;
        latest_from_document(&document)
            .map(str::to_string)
            .ok_or_else(|| RxwireError::RegistryLookup {
                name: name.to_string(),
                status,
                message: "response has no dist-tags.latest".to_string(),
            })
    }

    /// 1要求を解決済み依存にする
    pub async fn resolve(&self, request: &PackageRequest) -> Result<Dependency> {
        match &request.version {
            Some(version) => Ok(Dependency::new(&request.name, version)),
            None => {
                let version = self.latest_version(&request.name).await?;
                Ok(Dependency::new(&request.name, version))
            }
        }
    }

    /// 全要求を並行で解決する
    ///
    /// - タスクを全件発行してから要求順に join する
    /// - 1件でも失敗すれば全体が Err（部分的な結果は返さない）
    pub async fn resolve_all(&self, requests: &[PackageRequest]) -> Result<Vec<Dependency>> {
        let handles: Vec<_> = requests
            .iter()
            .map(|request| {
                let client = self.clone();
                let request = request.clone();
                tokio::spawn(async move { client.resolve(&request).await })
            })
            .collect();

        let mut resolved = Vec::with_capacity(handles.len());
        for handle in handles {
            resolved.push(handle.await??);
        }
        Ok(resolved)
    }
}

/// スコープ付きパッケージ名の `/` をエンコードする
fn encode_package_name(name: &str) -> String {
    name.replace('/', "%2F")
}

/// レジストリ応答から latest タグを取り出す
fn latest_from_document(document: &serde_json::Value) -> Option<&str> {
    document.get("dist-tags")?.get("latest")?.as_str()
}
