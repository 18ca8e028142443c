//! プロジェクトツリー
//!
//! ワークスペース配下のファイル群に対するインメモリのオーバーレイ。
//! 各ステップは編集をツリーに記録するだけで、ディスクへの書き出しは
//! 最後の flush に集約する。途中で失敗した実行はディスクに何も残さない。

use crate::error::{Result, RxwireError};
use crate::fs::FileSystem;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// テキスト挿入編集（スナップショット内オフセットと挿入文字列）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertChange {
    pub pos: usize,
    pub text: String,
}

/// 1ファイル分の編集レコーダ
///
/// begin_update 時点の内容をスナップショットとして保持する。
/// 記録する位置はすべてスナップショットに対するオフセット。
/// commit までの間に再パースと混在させないこと。
#[derive(Debug)]
pub struct UpdateRecorder {
    path: PathBuf,
    base: String,
    edits: Vec<InsertChange>,
}

impl UpdateRecorder {
    /// 挿入編集を記録する（適用は commit_update まで遅延）
    pub fn insert_left(&mut self, pos: usize, text: impl Into<String>) {
        self.edits.push(InsertChange {
            pos,
            text: text.into(),
        });
    }
}

/// プロジェクトツリー
pub struct Tree {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    overlay: BTreeMap<PathBuf, String>,
}

impl Tree {
    pub fn new(fs: Arc<dyn FileSystem>, root: PathBuf) -> Self {
        Self {
            fs,
            root,
            overlay: BTreeMap::new(),
        }
    }

    fn abs(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// パスが存在するか（未 flush の変更も含む）
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.overlay.contains_key(path) || self.fs.exists(&self.abs(path))
    }

    /// ファイル内容を読み込み（未 flush の変更を優先）
    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        if let Some(content) = self.overlay.get(path) {
            return Ok(content.clone());
        }
        if !self.fs.exists(&self.abs(path)) {
            return Err(RxwireError::MissingFile(path.display().to_string()));
        }
        self.fs.read_to_string(&self.abs(path))
    }

    /// 現在の内容をスナップショットとしてレコーダを開く
    pub fn begin_update(&self, path: impl AsRef<Path>) -> Result<UpdateRecorder> {
        let path = path.as_ref();
        Ok(UpdateRecorder {
            path: path.to_path_buf(),
            base: self.read_to_string(path)?,
            edits: Vec::new(),
        })
    }

    /// 記録された編集をスナップショットへ一括適用する
    ///
    /// - 位置の昇順で適用、同位置は記録順を保つ
    /// - 範囲外または UTF-8 境界以外の位置は Err、その場合は何も適用しない
    pub fn commit_update(&mut self, recorder: UpdateRecorder) -> Result<()> {
        let UpdateRecorder {
            path,
            base,
            mut edits,
        } = recorder;

        for edit in &edits {
            if edit.pos > base.len() || !base.is_char_boundary(edit.pos) {
                return Err(RxwireError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!(
                        "insert position {} is not valid for {}",
                        edit.pos,
                        path.display()
                    ),
                )));
            }
        }

        edits.sort_by_key(|edit| edit.pos);

        let mut content = base;
        let mut offset = 0usize;
        for edit in edits {
            content.insert_str(edit.pos + offset, &edit.text);
            offset += edit.text.len();
        }

        self.overlay.insert(path, content);
        Ok(())
    }

    /// ファイル全体を置き換える
    pub fn write(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.overlay
            .insert(path.as_ref().to_path_buf(), content.into());
    }

    /// dir 以下のファイル一覧（ワークスペース相対、ソート済み）
    ///
    /// 読めないディレクトリは空扱い。
    pub fn walk_files(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let mut files = Vec::new();
        self.walk_into(&self.abs(dir.as_ref()), &mut files);
        files.sort();
        files
    }

    fn walk_into(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let Ok(entries) = self.fs.read_dir(dir) else {
            return;
        };
        for entry in entries {
            if entry.is_dir() {
                self.walk_into(&entry.path, files);
            } else {
                let relative = entry.path.strip_prefix(&self.root).unwrap_or(&entry.path);
                files.push(relative.to_path_buf());
            }
        }
    }

    /// 変更済みファイルの一覧（ソート済み）
    pub fn changed_paths(&self) -> Vec<PathBuf> {
        self.overlay.keys().cloned().collect()
    }

    /// 記録済みの変更をディスクへ書き出す
    pub fn flush(&self) -> Result<()> {
        for (path, content) in &self.overlay {
            self.fs.write(&self.abs(path), content.as_bytes())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tests;

#[cfg(test)]
#[path = "tree_proptests.rs"]
mod proptests;
