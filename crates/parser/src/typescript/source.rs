//! TypeScript source files parsed with swc
//!
//! A [`TsSource`] owns the syntax tree of one file together with its text and
//! comments, so converters can read type annotations as written and look up
//! the JSDoc attached to a declaration.

use std::fmt;
use swc_common::comments::{CommentKind, Comments, SingleThreadedComments};
use swc_common::sync::Lrc;
use swc_common::{BytePos, FileName, SourceFile, SourceMap, Span, Spanned};
use swc_ecma_ast::{
    Decl, EsVersion, ImportSpecifier, Module, ModuleDecl, ModuleItem, Stmt, TsModuleRef,
};
use swc_ecma_parser::{parse_file_as_module, Syntax};
use thiserror::Error;

/// A source file that cannot be turned into a syntax tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at {line}:{column})")]
pub struct SyntaxError {
    pub message: String,
    /// 1-based
    pub line: usize,
    /// 1-based, in characters
    pub column: usize,
}

/// One parsed TypeScript file
pub struct TsSource {
    file: Lrc<SourceFile>,
    comments: SingleThreadedComments,
    module: Module,
}

/// A declaration and the description of the JSDoc block in front of it
#[derive(Debug)]
pub struct Documented<'a> {
    pub decl: &'a Decl,
    pub documentation: String,
}

/// Parse TypeScript module source
///
/// Errors the parser recovers from (strict-mode violations, computed enum
/// keys) still yield a tree; only unrecoverable ones fail.
pub fn parse_source(source: &str) -> Result<TsSource, SyntaxError> {
    let cm: Lrc<SourceMap> = Default::default();
    let file = cm.new_source_file(FileName::Anon.into(), source.to_string());
    let comments = SingleThreadedComments::default();
    let mut recovered = Vec::new();

    let module = parse_file_as_module(
        &file,
        Syntax::Typescript(Default::default()),
        EsVersion::EsNext,
        Some(&comments),
        &mut recovered,
    )
    .map_err(|e| {
        let loc = cm.lookup_char_pos(e.span().lo);
        SyntaxError {
            message: e.into_kind().msg().into_owned(),
            line: loc.line,
            column: loc.col.0 + 1,
        }
    })?;

    Ok(TsSource {
        file,
        comments,
        module,
    })
}

impl TsSource {
    /// Top-level module items in source order
    pub fn items(&self) -> &[ModuleItem] {
        &self.module.body
    }

    /// Source text covered by `span`
    pub fn text(&self, span: Span) -> &str {
        let start = span.lo.0.saturating_sub(self.file.start_pos.0) as usize;
        let end = span.hi.0.saturating_sub(self.file.start_pos.0) as usize;
        self.file.src.get(start..end).unwrap_or_default()
    }

    /// Description of the first JSDoc block leading the token at `pos`
    pub fn documentation(&self, pos: BytePos) -> String {
        self.comments
            .get_leading(pos)
            .and_then(|comments| {
                comments.into_iter().find_map(|comment| {
                    let text: &str = &comment.text;
                    match comment.kind {
                        CommentKind::Block => text.strip_prefix('*').map(jsdoc_description),
                        CommentKind::Line => None,
                    }
                })
            })
            .unwrap_or_default()
    }

    /// Interface, enum, alias and namespace declarations among `items`
    ///
    /// Both `export`ed and local declarations count. The JSDoc of an exported
    /// declaration sits in front of the `export` keyword.
    pub fn declarations<'a>(&self, items: &'a [ModuleItem]) -> Vec<Documented<'a>> {
        items
            .iter()
            .filter_map(|item| match item {
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                    Some((&export.decl, export.span.lo))
                },
                ModuleItem::Stmt(Stmt::Decl(decl)) => Some((decl, decl.span().lo)),
                _ => None,
            })
            .filter(|(decl, _)| {
                matches!(
                    decl,
                    Decl::TsInterface(_) | Decl::TsEnum(_) | Decl::TsTypeAlias(_) | Decl::TsModule(_)
                )
            })
            .map(|(decl, pos)| Documented {
                decl,
                documentation: self.documentation(pos),
            })
            .collect()
    }

    /// Aliases of namespace imports from sibling modules
    ///
    /// Covers `import * as model from "../model"` and
    /// `import model = require("../model")`. Package imports are left out.
    pub fn relative_namespace_aliases(&self) -> Vec<String> {
        self.module
            .body
            .iter()
            .filter_map(|item| match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(import))
                    if is_relative(&import.src.value) =>
                {
                    import.specifiers.iter().find_map(|specifier| match specifier {
                        ImportSpecifier::Namespace(namespace) => {
                            Some(namespace.local.sym.to_string())
                        },
                        _ => None,
                    })
                },
                ModuleItem::ModuleDecl(ModuleDecl::TsImportEquals(import)) => {
                    match &import.module_ref {
                        TsModuleRef::TsExternalModuleRef(external)
                            if is_relative(&external.expr.value) =>
                        {
                            Some(import.id.sym.to_string())
                        },
                        _ => None,
                    }
                },
                _ => None,
            })
            .collect()
    }
}

impl fmt::Debug for TsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TsSource")
            .field("items", &self.module.body.len())
            .finish_non_exhaustive()
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier.starts_with('.')
}

/// JSDoc body with `*` gutters removed, lines joined, stopping at the first
/// block tag (`@param`, `@see`, ...)
fn jsdoc_description(body: &str) -> String {
    let mut lines = Vec::new();
    for line in body.lines() {
        let line = line.trim();
        let line = line.strip_prefix('*').unwrap_or(line).trim();
        if line.starts_with('@') {
            break;
        }
        lines.push(line);
    }

    lines.join("\n").trim().to_string()
}
