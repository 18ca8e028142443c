use super::*;
use crate::fs::mock::MockFs;
use proptest::prelude::*;

/// ASCII のベース内容と、その範囲内の挿入編集列
fn base_and_edits() -> impl Strategy<Value = (String, Vec<(usize, String)>)> {
    "[ -~]{0,40}".prop_flat_map(|base| {
        let len = base.len();
        let edits = proptest::collection::vec((0..=len, "[a-z]{1,6}"), 0..8);
        (Just(base), edits)
    })
}

fn committed(base: &str, edits: &[(usize, String)]) -> String {
    let fs = Arc::new(MockFs::new());
    fs.add_file("/ws/file.ts", base);
    let mut tree = Tree::new(fs, PathBuf::from("/ws"));

    let mut recorder = tree.begin_update("file.ts").unwrap();
    for (pos, text) in edits {
        recorder.insert_left(*pos, text.clone());
    }
    tree.commit_update(recorder).unwrap();
    tree.read_to_string("file.ts").unwrap()
}

proptest! {
    /// 挿入編集の合計長だけ内容が伸びる
    #[test]
    fn prop_commit_grows_by_inserted_len((base, edits) in base_and_edits()) {
        let total: usize = edits.iter().map(|(_, text)| text.len()).sum();
        let content = committed(&base, &edits);
        prop_assert_eq!(content.len(), base.len() + total);
    }

    /// 挿入したテキストは分断されずに含まれる
    #[test]
    fn prop_inserted_text_stays_contiguous((base, edits) in base_and_edits()) {
        let content = committed(&base, &edits);
        for (_, text) in &edits {
            prop_assert!(content.contains(text.as_str()));
        }
    }

    /// 編集位置より前のベース内容は変化しない
    #[test]
    fn prop_prefix_before_first_edit_is_untouched((base, edits) in base_and_edits()) {
        let first = edits.iter().map(|(pos, _)| *pos).min().unwrap_or(base.len());
        let content = committed(&base, &edits);
        prop_assert_eq!(&content[..first], &base[..first]);
    }
}
