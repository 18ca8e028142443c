//! 配線対象の固定定義
//!
//! 導入するパッケージとシンボルはツールにコンパイルされており、
//! 実行時には変更できない。

use crate::registry::PackageRequest;

/// 導入するライブラリのパッケージ名
pub const PACKAGE_NAME: &str = "@rx-angular/template";

/// ルートモジュールへ配線するフィーチャーモジュール
pub const FEATURE_MODULES: [&str; 2] = ["LetModule", "PushModule"];

/// add 実行時にレジストリで解決するパッケージ一覧
pub fn required_packages() -> Vec<PackageRequest> {
    vec![
        PackageRequest::latest(PACKAGE_NAME),
        PackageRequest::latest("@rx-angular/cdk"),
    ]
}
