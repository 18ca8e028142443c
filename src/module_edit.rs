//! ルートモジュールの編集計算
//!
//! TypeScript ソースを oxc でパースし、import 文と @NgModule の
//! imports 配列に対する挿入編集を計算する。構文木は計算のたびに
//! 作り直す純粋なクエリで、編集の適用はツリー側に任せる。

use crate::error::{Result, RxwireError};
use crate::tree::InsertChange;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, ArrayExpression, ArrayExpressionElement, Class, Declaration, Expression,
    ImportDeclaration, ImportDeclarationSpecifier, ModuleDeclaration, ModuleExportName,
    ObjectExpression, ObjectPropertyKind, Program, PropertyKey, Statement,
};
use oxc_parser::{Parser, ParserReturn};
use oxc_span::{GetSpan, SourceType};

fn parse_program<'a>(
    allocator: &'a Allocator,
    path: &str,
    source: &'a str,
) -> Result<Program<'a>> {
    let ParserReturn {
        program, errors, ..
    } = Parser::new(allocator, source, SourceType::ts()).parse();

    if let Some(first) = errors.first() {
        return Err(RxwireError::ModuleParse {
            path: path.to_string(),
            message: first.to_string(),
        });
    }
    Ok(program)
}

/// import 文の挿入編集を計算する
///
/// - 同一パッケージからの名前付き import が既にあれば、不足している
///   シンボルだけを末尾の指定子の後ろへ追記する
/// - なければ既存 import 群の直後（import が無いファイルは先頭）に
///   結合 import 文を1つ挿入する
/// - 追加すべきものが無ければ None
pub fn import_statement_change(
    source: &str,
    path: &str,
    symbols: &[&str],
    package: &str,
) -> Result<Option<InsertChange>> {
    let allocator = Allocator::default();
    let program = parse_program(&allocator, path, source)?;

    let mut last_import_end: Option<usize> = None;
    for stmt in program.body.iter() {
        let Some(ModuleDeclaration::ImportDeclaration(import)) = stmt.as_module_declaration()
        else {
            continue;
        };
        last_import_end = Some(import.span.end as usize);

        if import.source.value.as_str() != package {
            continue;
        }
        let Some(target) = merge_target(import) else {
            continue;
        };

        let missing: Vec<&str> = symbols
            .iter()
            .copied()
            .filter(|symbol| !target.existing.iter().any(|name| name == symbol))
            .collect();
        if missing.is_empty() {
            return Ok(None);
        }
        return Ok(Some(InsertChange {
            pos: target.last_end,
            text: format!(", {}", missing.join(", ")),
        }));
    }

    let change = match last_import_end {
        Some(end) => InsertChange {
            pos: end,
            text: format!("\nimport {{ {} }} from '{}';", symbols.join(", "), package),
        },
        None => InsertChange {
            pos: 0,
            text: format!("import {{ {} }} from '{}';\n", symbols.join(", "), package),
        },
    };
    Ok(Some(change))
}

struct MergeTarget {
    existing: Vec<String>,
    last_end: usize,
}

/// 既存 import の名前付き指定子一覧と末尾位置
fn merge_target(import: &ImportDeclaration) -> Option<MergeTarget> {
    let specifiers = import.specifiers.as_ref()?;

    let mut existing = Vec::new();
    let mut last_end = None;
    for specifier in specifiers {
        if let ImportDeclarationSpecifier::ImportSpecifier(named) = specifier {
            existing.push(export_name(&named.imported));
            last_end = Some(named.span.end as usize);
        }
    }

    Some(MergeTarget {
        existing,
        last_end: last_end?,
    })
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(literal) => literal.value.to_string(),
    }
}

/// @NgModule の imports 配列への挿入編集をシンボルごとに計算する
///
/// 各編集は同一スナップショットに対する位置で独立に計算される。
/// 呼び出し側は全編集を1回の commit にまとめて適用すること。
/// 既に配列に含まれるシンボルは編集を生まない。
pub fn declaration_changes(source: &str, path: &str, symbols: &[&str]) -> Result<Vec<InsertChange>> {
    let allocator = Allocator::default();
    let program = parse_program(&allocator, path, source)?;

    let metadata = ngmodule_metadata(&program).ok_or_else(|| RxwireError::ModuleParse {
        path: path.to_string(),
        message: "no class with an @NgModule decorator".to_string(),
    })?;
    let imports = imports_array(metadata).ok_or_else(|| RxwireError::ModuleParse {
        path: path.to_string(),
        message: "@NgModule metadata has no imports array".to_string(),
    })?;

    Ok(symbols
        .iter()
        .filter_map(|symbol| array_insertion(imports, symbol))
        .collect())
}

/// 配列末尾への挿入（既に要素として含まれていれば None）
fn array_insertion(array: &ArrayExpression, symbol: &str) -> Option<InsertChange> {
    let present = array.elements.iter().any(|element| {
        matches!(
            element,
            ArrayExpressionElement::Identifier(ident) if ident.name.as_str() == symbol
        )
    });
    if present {
        return None;
    }

    match array.elements.last() {
        Some(last) => Some(InsertChange {
            pos: last.span().end as usize,
            text: format!(", {}", symbol),
        }),
        None => Some(InsertChange {
            pos: array.span.start as usize + 1,
            text: symbol.to_string(),
        }),
    }
}

/// @NgModule デコレータ付きクラスのメタデータオブジェクトを探す
///
/// トップレベルのクラス宣言と export されたクラス宣言の両方を見る。
fn ngmodule_metadata<'a>(program: &'a Program<'a>) -> Option<&'a ObjectExpression<'a>> {
    for stmt in program.body.iter() {
        let class: Option<&Class> = match stmt {
            Statement::ClassDeclaration(class) => Some(class),
            _ => match stmt.as_module_declaration() {
                Some(ModuleDeclaration::ExportNamedDeclaration(named)) => {
                    match &named.declaration {
                        Some(Declaration::ClassDeclaration(class)) => Some(class),
                        _ => None,
                    }
                }
                _ => None,
            },
        };

        if let Some(metadata) = class.and_then(decorator_metadata) {
            return Some(metadata);
        }
    }
    None
}

/// NgModule(...) 呼び出しの第1引数（オブジェクトリテラル）
fn decorator_metadata<'a>(class: &'a Class<'a>) -> Option<&'a ObjectExpression<'a>> {
    for decorator in &class.decorators {
        let Expression::CallExpression(call) = &decorator.expression else {
            continue;
        };
        let Expression::Identifier(callee) = &call.callee else {
            continue;
        };
        if callee.name.as_str() != "NgModule" {
            continue;
        }
        if let Some(Argument::ObjectExpression(object)) = call.arguments.first() {
            return Some(object);
        }
    }
    None
}

/// メタデータの imports プロパティ（配列リテラル）
fn imports_array<'a>(object: &'a ObjectExpression<'a>) -> Option<&'a ArrayExpression<'a>> {
    for property in object.properties.iter() {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            continue;
        };
        let PropertyKey::StaticIdentifier(key) = &property.key else {
            continue;
        };
        if key.name.as_str() != "imports" {
            continue;
        }
        if let Expression::ArrayExpression(array) = &property.value {
            return Some(array);
        }
    }
    None
}

#[cfg(test)]
#[path = "module_edit_test.rs"]
mod tests;
