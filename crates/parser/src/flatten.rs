//! Namespace-nested enum flattening
//!
//! Enums declared inside a namespace named after their parent structure are
//! published under a single identifier, `Instance.LifecycleState` becoming
//! `InstanceLifecycleState`. Flattening runs in two passes: every nested enum
//! of the service is collected first, then all dotted references in field
//! and alias types are rewritten at once, so references across files resolve
//! regardless of file order.

use crate::typescript::TsSource;
use regex::{Captures, Regex};
use sdk_bindgen_common::model::ModelBody;
use sdk_bindgen_common::{BindgenError, ParsedModel, Result};
use std::collections::HashMap;
use swc_ecma_ast::{Decl, TsEnumDecl, TsModuleDecl, TsModuleName, TsNamespaceBody};

/// An enum found inside a (possibly nested) namespace
#[derive(Debug)]
pub struct NestedEnum<'a> {
    /// File the enum was declared in
    pub source: &'a TsSource,
    /// Namespace path segments, outermost first
    pub path: Vec<String>,
    pub decl: &'a TsEnumDecl,
    pub documentation: String,
}

impl NestedEnum<'_> {
    /// `["Instance"]` + `LifecycleState` -> `InstanceLifecycleState`
    pub fn flat_name(&self) -> String {
        format!("{}{}", self.path.concat(), self.decl.id.sym)
    }

    /// `["Instance"]` + `LifecycleState` -> `Instance.LifecycleState`
    pub fn dotted_reference(&self) -> String {
        format!("{}.{}", self.path.join("."), self.decl.id.sym)
    }
}

/// Every enum inside `namespace` in declaration order, descending into
/// nested namespaces
///
/// Ambient module declarations (`declare module "x"`) have no namespace path
/// and yield nothing.
pub fn nested_enums<'a>(source: &'a TsSource, namespace: &'a TsModuleDecl) -> Vec<NestedEnum<'a>> {
    let mut found = Vec::new();
    if let (TsModuleName::Ident(id), Some(body)) = (&namespace.id, &namespace.body) {
        collect(source, body, vec![id.sym.to_string()], &mut found);
    }
    found
}

fn collect<'a>(
    source: &'a TsSource,
    body: &'a TsNamespaceBody,
    path: Vec<String>,
    found: &mut Vec<NestedEnum<'a>>,
) {
    match body {
        // `namespace A.B { ... }`
        TsNamespaceBody::TsNamespaceDecl(inner) => {
            let mut path = path;
            path.push(inner.id.sym.to_string());
            collect(source, &inner.body, path, found);
        },
        TsNamespaceBody::TsModuleBlock(block) => {
            for documented in source.declarations(&block.body) {
                match documented.decl {
                    Decl::TsEnum(decl) => found.push(NestedEnum {
                        source,
                        path: path.clone(),
                        decl,
                        documentation: documented.documentation,
                    }),
                    Decl::TsModule(inner) => {
                        if let (TsModuleName::Ident(id), Some(body)) = (&inner.id, &inner.body) {
                            let mut inner_path = path.clone();
                            inner_path.push(id.sym.to_string());
                            collect(source, body, inner_path, found);
                        }
                    },
                    _ => {},
                }
            }
        },
    }
}

/// Dotted references and the flattened names they stand for
///
/// Insertion order is kept; the first mapping recorded for a reference wins.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMap {
    entries: Vec<(String, String)>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `dotted -> flat`; returns false if `dotted` was already mapped
    pub fn insert(&mut self, dotted: impl Into<String>, flat: impl Into<String>) -> bool {
        let dotted = dotted.into();
        if self.get(&dotted).is_some() {
            return false;
        }
        self.entries.push((dotted, flat.into()));
        true
    }

    pub fn get(&self, dotted: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(d, _)| d == dotted)
            .map(|(_, flat)| flat.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compile the map into a rewriter; `None` when there is nothing to rewrite
    pub fn rewriter(&self) -> Result<Option<ReferenceRewriter>> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        // Longest first so `A.B.C` wins over `A.B`
        let mut references: Vec<&str> = self.entries.iter().map(|(d, _)| d.as_str()).collect();
        references.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let alternation = references
            .iter()
            .map(|r| regex::escape(r))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(^|[^\w$.])({alternation})\b"))
            .map_err(|e| BindgenError::Config(format!("Invalid reference pattern: {e}")))?;

        Ok(Some(ReferenceRewriter {
            pattern,
            targets: self.entries.iter().cloned().collect(),
        }))
    }
}

/// Replaces dotted enum references with flattened names, word-bounded
#[derive(Debug, Clone)]
pub struct ReferenceRewriter {
    pattern: Regex,
    targets: HashMap<String, String>,
}

impl ReferenceRewriter {
    pub fn rewrite(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                let reference = &caps[2];
                let flat = self
                    .targets
                    .get(reference)
                    .map(String::as_str)
                    .unwrap_or(reference);
                format!("{}{}", &caps[1], flat)
            })
            .into_owned()
    }

    /// Rewrite every field type and alias type in place
    pub fn apply(&self, models: &mut [ParsedModel]) {
        for model in models {
            match &mut model.body {
                ModelBody::Structure { fields, .. } => {
                    for field in fields {
                        field.type_descriptor = self.rewrite(&field.type_descriptor);
                    }
                },
                ModelBody::TypeAlias { aliased_type } => {
                    *aliased_type = self.rewrite(aliased_type);
                },
                ModelBody::Enumeration { .. } => {},
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typescript::parse_source;

    fn rewriter(pairs: &[(&str, &str)]) -> ReferenceRewriter {
        let mut map = ReferenceMap::new();
        for (dotted, flat) in pairs {
            map.insert(*dotted, *flat);
        }
        map.rewriter().unwrap().unwrap()
    }

    #[test]
    fn test_nested_enums_paths() {
        let source = parse_source(
            r#"
export namespace Instance {
  /** Lifecycle */
  export enum LifecycleState { Running = "RUNNING" }
  export namespace Launch {
    export enum Mode { Native = "NATIVE" }
  }
  export function getJsonObj(obj: Instance): object { return obj; }
}
export namespace A.B {
  export enum C { X = "X" }
}
declare module "ambient" {
  export enum Hidden { Y = "Y" }
}
"#,
        )
        .unwrap();

        let found: Vec<_> = source
            .declarations(source.items())
            .into_iter()
            .filter_map(|documented| match documented.decl {
                Decl::TsModule(namespace) => Some(nested_enums(&source, namespace)),
                _ => None,
            })
            .flatten()
            .collect();

        let names: Vec<_> = found
            .iter()
            .map(|e| (e.flat_name(), e.dotted_reference()))
            .collect();
        assert_eq!(
            names,
            vec![
                (
                    "InstanceLifecycleState".to_string(),
                    "Instance.LifecycleState".to_string()
                ),
                (
                    "InstanceLaunchMode".to_string(),
                    "Instance.Launch.Mode".to_string()
                ),
                ("ABC".to_string(), "A.B.C".to_string()),
            ]
        );
        assert_eq!(found[0].documentation, "Lifecycle");
    }

    #[test]
    fn test_rewrite_word_bounded() {
        let rewriter = rewriter(&[("Instance.LifecycleState", "InstanceLifecycleState")]);

        assert_eq!(rewriter.rewrite("Instance.LifecycleState"), "InstanceLifecycleState");
        assert_eq!(
            rewriter.rewrite("Array<Instance.LifecycleState>"),
            "Array<InstanceLifecycleState>"
        );
        assert_eq!(
            rewriter.rewrite("Instance.LifecycleState | Instance.LifecycleState"),
            "InstanceLifecycleState | InstanceLifecycleState"
        );
        // Longer identifiers sharing the prefix are left alone
        assert_eq!(
            rewriter.rewrite("Instance.LifecycleStateDetails"),
            "Instance.LifecycleStateDetails"
        );
        assert_eq!(
            rewriter.rewrite("BmInstance.LifecycleState"),
            "BmInstance.LifecycleState"
        );
    }

    #[test]
    fn test_rewrite_prefers_longest_reference() {
        let rewriter = rewriter(&[("A.B", "AB"), ("A.B.C", "ABC")]);
        assert_eq!(rewriter.rewrite("A.B.C | A.B"), "ABC | AB");
    }

    #[test]
    fn test_first_mapping_wins() {
        let mut map = ReferenceMap::new();
        assert!(map.insert("A.B", "AB"));
        assert!(!map.insert("A.B", "Other"));
        assert_eq!(map.get("A.B"), Some("AB"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_empty_map_has_no_rewriter() {
        assert!(ReferenceMap::new().rewriter().unwrap().is_none());
    }

    #[test]
    fn test_apply_to_fields_and_aliases() {
        let rewriter = rewriter(&[("Volume.State", "VolumeState")]);
        let mut models = vec![
            ParsedModel {
                name: "Volume".to_string(),
                file_name: "volume".to_string(),
                documentation: String::new(),
                body: ModelBody::Structure {
                    fields: vec![sdk_bindgen_common::ParsedField {
                        name: "state".to_string(),
                        target_name: "state".to_string(),
                        type_descriptor: "Volume.State".to_string(),
                        is_required: true,
                        documentation: String::new(),
                    }],
                    base_type: None,
                    discriminator: Some("state".to_string()),
                },
            },
            ParsedModel {
                name: "States".to_string(),
                file_name: "states".to_string(),
                documentation: String::new(),
                body: ModelBody::TypeAlias {
                    aliased_type: "Array<Volume.State>".to_string(),
                },
            },
        ];

        rewriter.apply(&mut models);
        assert_eq!(models[0].fields()[0].type_descriptor, "VolumeState");
        assert_eq!(
            models[1].body,
            ModelBody::TypeAlias {
                aliased_type: "Array<VolumeState>".to_string()
            }
        );
    }
}
