//! Model extraction over a loaded project

use crate::flatten::{nested_enums, NestedEnum, ReferenceMap};
use crate::project::SourceProject;
use crate::type_cleaner::TypeCleaner;
use crate::typescript::{convert_enum, convert_interface, convert_type_alias, TsSource};
use sdk_bindgen_common::{ParsedModel, Result, SdkLayout};
use std::collections::HashSet;
use swc_ecma_ast::Decl;

/// Extract every model of a project
///
/// File-scoped structures, enums and aliases come first, in file order and
/// declaration order. Flattened namespace enums follow in the order their
/// namespaces were scanned. Dotted references to those enums are rewritten
/// in every field and alias type once all files have been scanned.
pub fn extract_models(project: &SourceProject, layout: &SdkLayout) -> Result<Vec<ParsedModel>> {
    let mut models = Vec::new();
    let mut nested: Vec<NestedEnum<'_>> = Vec::new();

    for parsed in project.sources() {
        let source = &parsed.source;
        let cleaner = TypeCleaner::new(file_qualifiers(source, layout).as_slice())?;

        for documented in source.declarations(source.items()) {
            match documented.decl {
                Decl::TsInterface(decl) if decl.id.sym.contains('.') => {},
                Decl::TsInterface(decl) => models.push(convert_interface(
                    source,
                    decl,
                    documented.documentation,
                    &cleaner,
                )),
                Decl::TsEnum(decl) => models.push(convert_enum(
                    source,
                    decl,
                    &decl.id.sym,
                    documented.documentation,
                )),
                Decl::TsTypeAlias(decl) => models.push(convert_type_alias(
                    source,
                    decl,
                    documented.documentation,
                    &cleaner,
                )),
                Decl::TsModule(namespace) => nested.extend(nested_enums(source, namespace)),
                _ => {},
            }
        }
    }

    let mut references = ReferenceMap::new();
    let mut taken: HashSet<String> = models.iter().map(|m| m.name.clone()).collect();

    for nested_enum in nested {
        let flat = nested_enum.flat_name();
        let dotted = nested_enum.dotted_reference();
        references.insert(dotted.as_str(), flat.as_str());

        if !taken.insert(flat.clone()) {
            eprintln!("  Warning: {dotted} flattens to {flat}, which is already defined; skipping");
            continue;
        }
        models.push(convert_enum(
            nested_enum.source,
            nested_enum.decl,
            &flat,
            nested_enum.documentation,
        ));
    }

    if let Some(rewriter) = references.rewriter()? {
        rewriter.apply(&mut models);
    }

    Ok(models)
}

/// Prefixes stripped from type text in one file: the configured container
/// qualifiers plus the aliases of relative namespace imports
fn file_qualifiers(source: &TsSource, layout: &SdkLayout) -> Vec<String> {
    let mut qualifiers = layout.container_qualifiers.clone();
    qualifiers.extend(source.relative_namespace_aliases());
    qualifiers
}
