//! CLI 出力ヘルパー

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// 依存追加1件分のログ
pub fn added_dependency(name: &str, version: &str) {
    println!("{} Added dependency {}@{}", "✓".green(), name, version);
}

/// 配線完了のサマリ
pub fn wired_summary(modules: &[&str], module_path: &str) {
    println!(
        "{} Wired {} into {}",
        "✓".green(),
        modules.join(", "),
        module_path
    );
}

/// dry-run 時の変更予定ファイル一覧
pub fn dry_run_listing(paths: &[PathBuf]) {
    println!(
        "{} Dry run: {} file(s) would change",
        "•".yellow(),
        paths.len()
    );
    for path in paths {
        println!("  {} {}", "~".yellow(), path.display());
    }
}

/// レジストリ解決中のスピナー
pub fn resolving_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} Resolving package versions...")
            .unwrap(),
    );
    pb
}
