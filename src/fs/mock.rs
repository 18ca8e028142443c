//! テスト用モックファイルシステム

use super::*;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// テスト用モックファイルシステム
///
/// パス文字列 → ファイル内容のフラットなマップ。中間ディレクトリは
/// 明示的に登録せず、read_dir / exists 時にパス区切りから合成する。
pub struct MockFs {
    files: RwLock<HashMap<String, String>>,
}

impl MockFs {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
        }
    }

    /// ファイルを追加
    pub fn add_file(&self, path: &str, content: &str) {
        self.files
            .write()
            .unwrap()
            .insert(path.to_string(), content.to_string());
    }
}

impl Default for MockFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFs {
    fn exists(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_string();
        let prefix = format!("{}/", path_str);
        let files = self.files.read().unwrap();
        files.contains_key(&path_str) || files.keys().any(|k| k.starts_with(&prefix))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .read()
            .unwrap()
            .get(path.to_string_lossy().as_ref())
            .cloned()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "not found").into())
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        self.files.write().unwrap().insert(
            path.to_string_lossy().to_string(),
            String::from_utf8_lossy(content).to_string(),
        );
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FsDirEntry>> {
        let path_str = path.to_string_lossy().to_string();
        let files = self.files.read().unwrap();

        // ファイルとして登録済みのパスはディレクトリではない
        if files.contains_key(&path_str) {
            return Err(crate::error::RxwireError::Io(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                "Not a directory",
            )));
        }

        let prefix = if path_str.ends_with('/') {
            path_str
        } else {
            format!("{}/", path_str)
        };

        // 直接の子のみ。サブディレクトリはパス区切りから合成する
        let mut children: BTreeMap<String, FsFileType> = BTreeMap::new();
        for key in files.keys() {
            let Some(remainder) = key.strip_prefix(&prefix) else {
                continue;
            };
            match remainder.find('/') {
                Some(index) => {
                    let dir = format!("{}{}", prefix, &remainder[..index]);
                    children.insert(dir, FsFileType::Dir);
                }
                None => {
                    children.insert(key.clone(), FsFileType::File);
                }
            }
        }

        Ok(children
            .into_iter()
            .map(|(path, file_type)| FsDirEntry {
                path: PathBuf::from(path),
                file_type,
            })
            .collect())
    }
}
