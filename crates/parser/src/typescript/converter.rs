//! Conversion of parsed declarations into normalized models

use super::source::TsSource;
use crate::type_cleaner::TypeCleaner;
use sdk_bindgen_common::model::ModelBody;
use sdk_bindgen_common::naming::{target_field_name, to_snake_case};
use sdk_bindgen_common::{EnumVariant, ParsedField, ParsedModel};
use swc_common::Spanned;
use swc_ecma_ast::{
    Expr, Lit, TsEnumDecl, TsEnumMember, TsEnumMemberId, TsInterfaceDecl, TsPropertySignature,
    TsTypeAliasDecl, TsTypeElement,
};

/// Role of a structure in a polymorphic variant family
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolymorphicRole {
    /// Not part of a family
    Plain,
    /// Family root; variants are told apart by the named field
    Base { discriminator: String },
    /// Family member extending `base_type`
    Variant { base_type: String },
}

impl PolymorphicRole {
    /// Classify a structure from its extended types and its fields
    ///
    /// An interface that extends anything is a variant of its first base.
    /// Otherwise a structure whose only field is a `string` is taken to be a
    /// family root keyed on that field. This is a heuristic and does flag
    /// single-string structures that have no variants.
    pub fn classify(extends: &[String], fields: &[ParsedField]) -> Self {
        match (extends.first(), fields) {
            (Some(base), _) => PolymorphicRole::Variant {
                base_type: base.clone(),
            },
            (None, [only]) if only.type_descriptor == "string" => PolymorphicRole::Base {
                discriminator: only.name.clone(),
            },
            _ => PolymorphicRole::Plain,
        }
    }
}

/// Structure model from an interface declaration
///
/// Only property signatures become fields; index, call, construct and method
/// signatures and accessors are left out.
pub fn convert_interface(
    source: &TsSource,
    decl: &TsInterfaceDecl,
    documentation: String,
    cleaner: &TypeCleaner,
) -> ParsedModel {
    let fields: Vec<ParsedField> = decl
        .body
        .body
        .iter()
        .filter_map(|element| match element {
            TsTypeElement::TsPropertySignature(property) => {
                convert_field(source, property, cleaner)
            },
            _ => None,
        })
        .collect();

    let extends: Vec<String> = decl
        .extends
        .iter()
        .map(|heritage| cleaner.clean(source.text(heritage.span)))
        .collect();
    let (base_type, discriminator) = match PolymorphicRole::classify(&extends, &fields) {
        PolymorphicRole::Variant { base_type } => (Some(base_type), None),
        PolymorphicRole::Base { discriminator } => (None, Some(discriminator)),
        PolymorphicRole::Plain => (None, None),
    };

    let name = decl.id.sym.to_string();
    ParsedModel {
        file_name: to_snake_case(&name),
        name,
        documentation,
        body: ModelBody::Structure {
            fields,
            base_type,
            discriminator,
        },
    }
}

fn convert_field(
    source: &TsSource,
    property: &TsPropertySignature,
    cleaner: &TypeCleaner,
) -> Option<ParsedField> {
    let name = property_name(source, property)?;
    let type_text = property
        .type_ann
        .as_ref()
        .map(|annotation| source.text(annotation.type_ann.span()))
        .unwrap_or("any");

    Some(ParsedField {
        target_name: target_field_name(&name),
        name,
        type_descriptor: cleaner.clean(type_text),
        is_required: !property.optional,
        documentation: source.documentation(property.span.lo),
    })
}

/// Declared member name, unquoted; `None` for computed keys that are not
/// string literals
fn property_name(source: &TsSource, property: &TsPropertySignature) -> Option<String> {
    match &*property.key {
        Expr::Lit(Lit::Str(key)) => Some(key.value.to_string()),
        Expr::Lit(Lit::Num(key)) => Some(source.text(key.span).to_string()),
        Expr::Ident(key) if !property.computed => Some(key.sym.to_string()),
        _ => None,
    }
}

/// Enumeration model from an enum declaration, published under `name`
///
/// `name` differs from the declared name for namespace-nested enums.
pub fn convert_enum(
    source: &TsSource,
    decl: &TsEnumDecl,
    name: &str,
    documentation: String,
) -> ParsedModel {
    let variants = decl
        .members
        .iter()
        .map(|member| {
            let name = member_name(source, member);
            let value = match member.init.as_deref() {
                Some(Expr::Lit(Lit::Str(value))) => value.value.to_string(),
                Some(init) => source.text(init.span()).to_string(),
                None => name.clone(),
            };
            EnumVariant { name, value }
        })
        .collect();

    ParsedModel {
        name: name.to_string(),
        file_name: to_snake_case(name),
        documentation,
        body: ModelBody::Enumeration { variants },
    }
}

fn member_name(source: &TsSource, member: &TsEnumMember) -> String {
    match &member.id {
        TsEnumMemberId::Str(key) => key.value.to_string(),
        TsEnumMemberId::Ident(key) if !key.sym.is_empty() => key.sym.to_string(),
        // `['a'] = 1`: the tree keeps no name for computed keys
        TsEnumMemberId::Ident(_) => computed_key(source.text(member.span)),
    }
}

/// `['a'] = 1` -> `a`
fn computed_key(member_text: &str) -> String {
    let key = match member_text.trim_start().strip_prefix('[') {
        Some(rest) => rest.find(']').map_or(rest, |end| &rest[..end]),
        None => member_text.split('=').next().unwrap_or(member_text),
    };
    key.trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}

/// Type-alias model from a `type X = ...` declaration
pub fn convert_type_alias(
    source: &TsSource,
    decl: &TsTypeAliasDecl,
    documentation: String,
    cleaner: &TypeCleaner,
) -> ParsedModel {
    let name = decl.id.sym.to_string();
    ParsedModel {
        file_name: to_snake_case(&name),
        name,
        documentation,
        body: ModelBody::TypeAlias {
            aliased_type: cleaner.clean(source.text(decl.type_ann.span())),
        },
    }
}
